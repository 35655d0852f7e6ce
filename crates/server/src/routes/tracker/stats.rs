use axum::Json;
use chrono::Utc;
use shared::{
    api::{error::ServerError, response_errors::FetchError},
    model::{Stats, WorkoutLog},
};
use tracing::{debug, instrument};

use crate::{db::DatabaseConnection, UserState};

#[instrument(skip_all, fields(user_id = %user_state.id))]
pub async fn stats(
    DatabaseConnection(conn): DatabaseConnection,
    user_state: UserState,
) -> Result<Json<Stats>, ServerError<FetchError>> {
    let logs = conn
        .interact(move |conn| WorkoutLog::fetch_all_for_user(conn, &user_state.id))
        .await??;

    let stats = Stats::compute(&logs, Utc::now().date_naive());
    debug!(?stats);

    Ok(Json(stats))
}
