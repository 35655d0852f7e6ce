use axum::{extract::Path, Json};
use axum_extra::extract::WithRejection;
use shared::{
    api::{error::ServerError, response_errors::WorkoutError},
    model::WorkoutWithExercises,
    types::Uuid,
};
use tracing::{debug, instrument};

use super::fetch_accessible;
use crate::{db::DatabaseConnection, PathParams, UserState};

#[instrument(skip_all, fields(user_id = %user_state.id, workout_id = %id))]
pub async fn toggle_workout(
    DatabaseConnection(conn): DatabaseConnection,
    user_state: UserState,
    WithRejection(Path(id), _): PathParams<Uuid>,
) -> Result<Json<WorkoutWithExercises>, ServerError<WorkoutError>> {
    let workout = conn
        .interact(move |conn| {
            let mut workout = fetch_accessible(conn, &id, &user_state.id)?;
            workout.toggle_active(conn)?;
            Ok::<_, ServerError<WorkoutError>>(workout.with_exercises(conn)?)
        })
        .await??;
    debug!(is_active = workout.workout.is_active, "Toggled workout");

    Ok(Json(workout))
}
