use axum::{http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use shared::{
    api::{error::ServerError, payloads::CreateWorkoutLog, response_errors::TrackerError},
    model::{ValidateModel, Workout, WorkoutLog},
};
use tracing::{info, instrument};

use crate::{db::DatabaseConnection, JsonBody, UserState};

#[instrument(skip_all, fields(user_id = %user_state.id))]
pub async fn create_log(
    DatabaseConnection(conn): DatabaseConnection,
    user_state: UserState,
    WithRejection(Json(payload), _): JsonBody<CreateWorkoutLog>,
) -> Result<(StatusCode, Json<WorkoutLog>), ServerError<TrackerError>> {
    payload.validate()?;

    let CreateWorkoutLog {
        workout_id,
        logged_date,
        notes,
    } = payload;

    let log = conn
        .interact(move |conn| {
            // Only the owner can log a workout, and never a deleted one
            let workout = Workout::fetch_by_id(conn, &workout_id)?
                .filter(|w| w.check_access(&user_state.id).is_ok())
                .ok_or(TrackerError::WorkoutNotFound)?;

            let log = WorkoutLog::new(*user_state.id, workout.id, logged_date, notes);
            Ok::<_, ServerError<TrackerError>>(log.create(conn)?)
        })
        .await??;
    info!(log_id = %log.id, %logged_date, "Logged workout");

    Ok((StatusCode::CREATED, Json(log)))
}
