use axum::{extract::Query, Json};
use axum_extra::extract::WithRejection;
use shared::{
    api::{error::ServerError, payloads::WorkoutListQuery, response_errors::FetchError},
    model::{Workout, WorkoutWithExercises},
};

use crate::{db::DatabaseConnection, QueryParams, UserState};

pub async fn list_workouts(
    DatabaseConnection(conn): DatabaseConnection,
    user_state: UserState,
    WithRejection(Query(query), _): QueryParams<WorkoutListQuery>,
) -> Result<Json<Vec<WorkoutWithExercises>>, ServerError<FetchError>> {
    let active = query.active_filter();

    let workouts = conn
        .interact(move |conn| Workout::fetch_for_user(conn, &user_state.id, active))
        .await??;

    Ok(Json(workouts))
}
