//! Workout logging, the month calendar and streak statistics

mod create_log;
pub use create_log::*;

mod delete_log;
pub use delete_log::*;

mod calendar;
pub use calendar::*;

mod stats;
pub use stats::*;
