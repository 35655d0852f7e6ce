mod user;
pub use user::*;

mod workout;
pub use workout::*;

mod tracker;
pub use tracker::*;

use crate::api::error::ValidationError;

pub mod constants;

pub trait ValidateModel {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Length in characters rather than bytes
pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}
