use axum::{extract::Path, Json};
use axum_extra::extract::WithRejection;
use shared::{
    api::{error::ServerError, response_errors::TrackerError},
    model::WorkoutLog,
    types::Uuid,
};
use tracing::{info, instrument};

use crate::{db::DatabaseConnection, PathParams, UserState};

/// Logs of other users are reported as missing
#[instrument(skip_all, fields(user_id = %user_state.id, log_id = %id))]
pub async fn delete_log(
    DatabaseConnection(conn): DatabaseConnection,
    user_state: UserState,
    WithRejection(Path(id), _): PathParams<Uuid>,
) -> Result<Json<()>, ServerError<TrackerError>> {
    let deleted = conn
        .interact(move |conn| WorkoutLog::delete_for_user(conn, &id, &user_state.id))
        .await??;

    if !deleted {
        Err(TrackerError::LogNotFound)?;
    }
    info!("Deleted workout log");

    Ok(Json(()))
}
