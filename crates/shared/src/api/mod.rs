pub mod error;
pub mod payloads;
pub mod response_errors;

mod auth;
pub use auth::*;

mod object;
pub use object::*;

pub const API_BASE_PATH: &str = "/api/";

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_paths_are_under_api_base() {
        for path in [
            Auth::Register.path(),
            Auth::Login.path(),
            Auth::Logout.path(),
            Auth::Me.path(),
            Object::Ping.path(),
            Object::Profile.path(),
            Object::Workouts.path(),
            Object::WorkoutId.path(),
            Object::WorkoutToggle.path(),
            Object::TrackerLog.path(),
            Object::TrackerLogId.path(),
            Object::TrackerCalendar.path(),
            Object::TrackerStats.path(),
            Object::AiGenerateWorkout.path(),
        ] {
            assert!(path.starts_with(API_BASE_PATH), "{path}");
        }
    }
}
