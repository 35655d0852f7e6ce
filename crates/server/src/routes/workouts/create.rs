use axum::{http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use shared::{
    api::{
        error::{Nothing, ServerError},
        payloads::CreateWorkout,
    },
    model::{ValidateModel, Workout, WorkoutWithExercises},
};
use tracing::{info, instrument};

use crate::{db::DatabaseConnection, JsonBody, UserState};

#[instrument(skip_all, fields(user_id = %user_state.id))]
pub async fn create_workout(
    DatabaseConnection(conn): DatabaseConnection,
    user_state: UserState,
    WithRejection(Json(payload), _): JsonBody<CreateWorkout>,
) -> Result<(StatusCode, Json<WorkoutWithExercises>), ServerError<Nothing>> {
    payload.validate()?;

    let (name, description, ai_generated, drafts) = payload.into_parts();
    let workout = Workout::new(*user_state.id, name, description, ai_generated);

    let workout = conn
        .interact(move |conn| workout.create(conn, drafts))
        .await??;
    info!(workout_id = %workout.workout.id, exercises = workout.exercises.len(), "Created workout");

    Ok((StatusCode::CREATED, Json(workout)))
}
