//! Email and password auth backed by a server side session

mod register;
pub use register::*;

mod login;
pub use login::*;

mod logout;
pub use logout::*;

mod me;
pub use me::*;
