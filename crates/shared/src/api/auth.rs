use const_format::concatcp;

use crate::api::API_BASE_PATH;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Auth {
    Register,
    Login,
    Logout,
    Me,
}

impl Auth {
    pub const fn path(&self) -> &str {
        use Auth::*;
        match self {
            Register => concatcp!(API_BASE_PATH, "auth/register"),
            Login => concatcp!(API_BASE_PATH, "auth/login"),
            Logout => concatcp!(API_BASE_PATH, "auth/logout"),
            Me => concatcp!(API_BASE_PATH, "auth/me"),
        }
    }
}
