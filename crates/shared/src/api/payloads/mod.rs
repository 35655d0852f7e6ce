//! Request and response bodies of the json api

mod auth;
pub use auth::*;

mod workout;
pub use workout::*;

mod tracker;
pub use tracker::*;

mod ai;
pub use ai::*;
