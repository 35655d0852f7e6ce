use axum::{extract::Path, Json};
use axum_extra::extract::WithRejection;
use shared::{
    api::{error::ServerError, response_errors::TrackerError},
    model::{month_range, CalendarLog, WorkoutLog},
};

use crate::{db::DatabaseConnection, PathParams, UserState};

pub async fn calendar_logs(
    DatabaseConnection(conn): DatabaseConnection,
    user_state: UserState,
    WithRejection(Path((year, month)), _): PathParams<(i32, u32)>,
) -> Result<Json<Vec<CalendarLog>>, ServerError<TrackerError>> {
    let (first, last) = month_range(year, month).ok_or(TrackerError::InvalidMonth { year, month })?;

    let logs = conn
        .interact(move |conn| WorkoutLog::fetch_calendar(conn, &user_state.id, first, last))
        .await??;

    Ok(Json(logs))
}
