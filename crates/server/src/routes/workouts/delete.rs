use axum::{extract::Path, Json};
use axum_extra::extract::WithRejection;
use shared::{
    api::{error::ServerError, response_errors::WorkoutError},
    types::Uuid,
};
use tracing::{info, instrument};

use super::fetch_accessible;
use crate::{db::DatabaseConnection, PathParams, UserState};

/// Soft delete. Logs referencing the workout stay in the tracker
#[instrument(skip_all, fields(user_id = %user_state.id, workout_id = %id))]
pub async fn delete_workout(
    DatabaseConnection(conn): DatabaseConnection,
    user_state: UserState,
    WithRejection(Path(id), _): PathParams<Uuid>,
) -> Result<Json<()>, ServerError<WorkoutError>> {
    conn.interact(move |conn| {
        let mut workout = fetch_accessible(conn, &id, &user_state.id)?;
        workout.soft_delete(conn)?;
        Ok::<_, ServerError<WorkoutError>>(())
    })
    .await??;
    info!("Deleted workout");

    Ok(Json(()))
}
