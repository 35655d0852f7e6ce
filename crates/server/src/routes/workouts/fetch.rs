use axum::{extract::Path, Json};
use axum_extra::extract::WithRejection;
use shared::{
    api::{error::ServerError, response_errors::WorkoutError},
    model::WorkoutWithExercises,
    types::Uuid,
};

use super::fetch_accessible;
use crate::{db::DatabaseConnection, PathParams, UserState};

pub async fn fetch_workout(
    DatabaseConnection(conn): DatabaseConnection,
    user_state: UserState,
    WithRejection(Path(id), _): PathParams<Uuid>,
) -> Result<Json<WorkoutWithExercises>, ServerError<WorkoutError>> {
    let workout = conn
        .interact(move |conn| {
            let workout = fetch_accessible(conn, &id, &user_state.id)?;
            Ok::<_, ServerError<WorkoutError>>(workout.with_exercises(conn)?)
        })
        .await??;

    Ok(Json(workout))
}
