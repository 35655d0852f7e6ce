mod ping;
pub use ping::*;

pub mod ai;
pub mod auth;
pub mod tracker;
pub mod users;
pub mod workouts;
