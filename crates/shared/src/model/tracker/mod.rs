mod workout_log;
pub use workout_log::*;

mod stats;
pub use stats::*;
