use std::{fmt, ops::Deref};

#[cfg(feature = "backend")]
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{model::User, types::Uuid};

/// What the session remembers about the logged in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserId {
    pub id: Uuid,
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl Deref for UserId {
    type Target = Uuid;
    fn deref(&self) -> &Self::Target {
        &self.id
    }
}

impl From<&User> for UserId {
    fn from(value: &User) -> Self {
        Self { id: value.id }
    }
}

#[cfg(feature = "backend")]
impl UserId {
    pub fn fetch_full_user(&self, conn: &Connection) -> Result<User, rusqlite::Error> {
        User::fetch_by_id(conn, &self.id)
    }
}
