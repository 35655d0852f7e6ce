//! Workout plans owned by the logged in user

use rusqlite::Connection;
use shared::{
    api::{error::ServerError, response_errors::WorkoutError},
    model::Workout,
    types::Uuid,
};

mod create;
pub use create::*;

mod list;
pub use list::*;

mod fetch;
pub use fetch::*;

mod update;
pub use update::*;

mod toggle;
pub use toggle::*;

mod delete;
pub use delete::*;

/// Loads a workout `user_id` is allowed to see and modify
fn fetch_accessible(
    conn: &Connection,
    id: &Uuid,
    user_id: &Uuid,
) -> Result<Workout, ServerError<WorkoutError>> {
    let workout = Workout::fetch_by_id(conn, id)?.ok_or(WorkoutError::NotFound)?;
    workout.check_access(user_id)?;
    Ok(workout)
}
