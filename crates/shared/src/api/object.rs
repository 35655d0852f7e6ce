use const_format::concatcp;

use crate::api::API_BASE_PATH;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Object {
    Ping,
    Profile,
    Workouts,
    WorkoutId,
    WorkoutToggle,
    TrackerLog,
    TrackerLogId,
    TrackerCalendar,
    TrackerStats,
    AiGenerateWorkout,
}

impl Object {
    pub const fn path(&self) -> &str {
        use Object::*;
        match self {
            Ping => concatcp!(API_BASE_PATH, "ping"),
            Profile => concatcp!(API_BASE_PATH, "users/profile"),
            Workouts => concatcp!(API_BASE_PATH, "workouts"),
            WorkoutId => concatcp!(API_BASE_PATH, "workouts/:id"),
            WorkoutToggle => concatcp!(API_BASE_PATH, "workouts/:id/toggle"),
            TrackerLog => concatcp!(API_BASE_PATH, "tracker/log"),
            TrackerLogId => concatcp!(API_BASE_PATH, "tracker/log/:id"),
            TrackerCalendar => concatcp!(API_BASE_PATH, "tracker/calendar/:year/:month"),
            TrackerStats => concatcp!(API_BASE_PATH, "tracker/stats"),
            AiGenerateWorkout => concatcp!(API_BASE_PATH, "ai/generate-workout"),
        }
    }
}
