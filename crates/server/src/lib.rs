pub mod ai;
pub mod cli;
pub mod db;
pub mod routes;
pub mod session_store;

mod app;
pub use app::*;

mod errors;
pub use errors::*;

mod extract;
pub use extract::*;

mod password;
pub use password::*;

mod session;
pub use session::*;

mod state;
pub use state::*;
