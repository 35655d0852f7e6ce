use std::fmt;

use deadpool_sqlite::HookError;
use shared::{
    api::error::{Nothing, ServerError},
    other_error,
};

/// Turns an infrastructure failure in an extractor into a 500 response
pub fn internal_error<E: fmt::Debug>(err: E) -> ServerError<Nothing> {
    other_error!("{err:?}")
}

/// Pool hooks can only report string messages
pub fn hook_error<E: fmt::Display>(err: E) -> HookError {
    HookError::Message(err.to_string())
}
