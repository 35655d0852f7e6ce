pub const EMAIL_MAX_LENGTH: usize = 255;
pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const PASSWORD_MAX_LENGTH: usize = 128;

pub const USER_NAME_MIN_LENGTH: usize = 2;
pub const USER_NAME_MAX_LENGTH: usize = 100;

pub const HEIGHT_MIN_CM: f64 = 100.0;
pub const HEIGHT_MAX_CM: f64 = 250.0;
pub const WEIGHT_MIN_KG: f64 = 30.0;
pub const WEIGHT_MAX_KG: f64 = 300.0;

pub const WORKOUT_NAME_MAX_LENGTH: usize = 100;
pub const EXERCISE_NAME_MAX_LENGTH: usize = 100;
pub const DESCRIPTION_MAX_LENGTH: usize = 500;
pub const NOTES_MAX_LENGTH: usize = 500;

pub const PROMPT_MIN_LENGTH: usize = 10;
pub const PROMPT_MAX_LENGTH: usize = 1000;

/// Window used for the weekly frequency statistic
pub const WEEKLY_FREQUENCY_WINDOW_DAYS: i64 = 28;
