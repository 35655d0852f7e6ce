use axum::{extract::Path, Json};
use axum_extra::extract::WithRejection;
use shared::{
    api::{error::ServerError, payloads::UpdateWorkout, response_errors::WorkoutError},
    model::{ValidateModel, WorkoutWithExercises},
    types::Uuid,
};
use tracing::{info, instrument};

use super::fetch_accessible;
use crate::{db::DatabaseConnection, JsonBody, PathParams, UserState};

#[instrument(skip_all, fields(user_id = %user_state.id, workout_id = %id))]
pub async fn update_workout(
    DatabaseConnection(conn): DatabaseConnection,
    user_state: UserState,
    WithRejection(Path(id), _): PathParams<Uuid>,
    WithRejection(Json(mut payload), _): JsonBody<UpdateWorkout>,
) -> Result<Json<WorkoutWithExercises>, ServerError<WorkoutError>> {
    payload.validate()?;

    let drafts = payload.exercise_drafts();
    let replaces_exercises = drafts.is_some();

    let workout = conn
        .interact(move |conn| {
            let mut workout = fetch_accessible(conn, &id, &user_state.id)?;
            if let Some(name) = payload.name {
                workout.name = name.trim().to_string();
            }
            if let Some(description) = payload.description {
                workout.description = description;
            }
            workout.update(conn, drafts)?;

            Ok::<_, ServerError<WorkoutError>>(workout.with_exercises(conn)?)
        })
        .await??;
    info!(replaces_exercises, "Updated workout");

    Ok(Json(workout))
}
