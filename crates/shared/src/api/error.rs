use std::fmt;

pub use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Error type for routes with no route specific errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Nothing {}

impl fmt::Display for Nothing {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl std::error::Error for Nothing {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub error_messages: Vec<String>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` unless `condition` holds
    pub fn check<F: FnOnce() -> String>(&mut self, condition: bool, message: F) {
        if !condition {
            self.error_messages.push(message());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.error_messages.is_empty()
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error_messages.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Error returned by every route. `T` carries the route specific errors
/// declared with `response_error!`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ServerError<T> {
    Inner {
        #[serde(with = "http_serde::status_code")]
        code: StatusCode,
        inner: T,
    },
    StatusCode {
        #[serde(with = "http_serde::status_code")]
        code: StatusCode,
        message: String,
    },
    Validation {
        inner: ValidationError,
    },
    Other {
        message: String,
    },
}

impl<T> ServerError<T> {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Inner { code, .. } | Self::StatusCode { code, .. } => *code,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Other { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl<T: fmt::Display + Clone> ServerError<T> {
    /// The body sent to the client. Internal error details stay in the logs
    pub fn response_body(&self) -> ErrorResponse<T> {
        let status_code = self.status_code().as_u16();
        match self {
            Self::Inner { inner, .. } => ErrorResponse {
                status_code,
                message: inner.to_string(),
                error: Some(inner.clone()),
                errors: Vec::new(),
            },
            Self::StatusCode { message, .. } => ErrorResponse {
                status_code,
                message: message.clone(),
                error: None,
                errors: Vec::new(),
            },
            Self::Validation { inner } => ErrorResponse {
                status_code,
                message: "Validation failed".to_string(),
                error: None,
                errors: inner.error_messages.clone(),
            },
            Self::Other { .. } => ErrorResponse {
                status_code,
                message: "Something went wrong".to_string(),
                error: None,
                errors: Vec::new(),
            },
        }
    }
}

impl<T: fmt::Display> fmt::Display for ServerError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inner { code, inner } => write!(f, "{code}: {inner}"),
            Self::StatusCode { code, message } => write!(f, "{code}: {message}"),
            Self::Validation { inner } => write!(f, "Validation failed: {inner}"),
            Self::Other { message } => write!(f, "{message}"),
        }
    }
}

impl<T: fmt::Debug + fmt::Display> std::error::Error for ServerError<T> {}

impl<T> From<ValidationError> for ServerError<T> {
    fn from(inner: ValidationError) -> Self {
        Self::Validation { inner }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse<T> {
    pub status_code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

#[macro_export]
macro_rules! status_code_error {
    ($code:expr, $($arg:tt)+) => {
        $crate::api::error::ServerError::StatusCode {
            code: $code,
            message: format!($($arg)+),
        }
    };
}

#[macro_export]
macro_rules! bad_request_error {
    ($($arg:tt)+) => {
        $crate::status_code_error!($crate::api::error::StatusCode::BAD_REQUEST, $($arg)+)
    };
}

#[macro_export]
macro_rules! unauthorized_error {
    ($($arg:tt)+) => {
        $crate::status_code_error!($crate::api::error::StatusCode::UNAUTHORIZED, $($arg)+)
    };
}

#[macro_export]
macro_rules! other_error {
    ($($arg:tt)+) => {
        $crate::api::error::ServerError::Other {
            message: format!($($arg)+),
        }
    };
}

#[cfg(feature = "backend")]
mod backend {
    use std::fmt;

    use axum::{
        extract::rejection::{JsonRejection, PathRejection, QueryRejection},
        http::StatusCode,
        response::{IntoResponse, Response},
        Json,
    };
    use serde::Serialize;
    use tracing::{debug, error};

    use super::ServerError;
    use crate::{bad_request_error, status_code_error};

    macro_rules! other_error_from {
        ($($ty:ty => $label:literal,)*) => {
            $(
                impl<T> From<$ty> for ServerError<T> {
                    #[track_caller]
                    fn from(err: $ty) -> Self {
                        Self::Other {
                            message: format!(concat!($label, ": {:?}"), err),
                        }
                    }
                }
            )*
        };
    }

    other_error_from!(
        rusqlite::Error => "Rusqlite error",
        deadpool_sqlite::InteractError => "Deadpool interact error",
        deadpool_sqlite::PoolError => "Deadpool pool error",
        serde_json::Error => "Serde json error",
        anyhow::Error => "Error",
    );

    // Malformed bodies and urls are client errors. Size and content type
    // rejections keep their own status
    impl<T> From<JsonRejection> for ServerError<T> {
        fn from(rejection: JsonRejection) -> Self {
            match rejection.status() {
                StatusCode::UNPROCESSABLE_ENTITY => bad_request_error!("{}", rejection.body_text()),
                code => status_code_error!(code, "{}", rejection.body_text()),
            }
        }
    }

    impl<T> From<PathRejection> for ServerError<T> {
        fn from(rejection: PathRejection) -> Self {
            status_code_error!(rejection.status(), "{}", rejection.body_text())
        }
    }

    impl<T> From<QueryRejection> for ServerError<T> {
        fn from(rejection: QueryRejection) -> Self {
            bad_request_error!("{}", rejection.body_text())
        }
    }

    // Render ServerError into a json response
    impl<T> IntoResponse for ServerError<T>
    where
        T: Serialize + Clone + fmt::Debug + fmt::Display,
    {
        fn into_response(self) -> Response {
            let code = self.status_code();
            if code.is_server_error() {
                error!(error = ?self, "{self}");
            } else {
                debug!("{self}");
            }

            (code, Json(self.response_body())).into_response()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{bad_request_error, other_error};

    #[test]
    fn test_validation_error_collects_failed_checks() {
        let mut errors = ValidationError::new();
        errors.check(true, || "never".to_string());
        errors.check(false, || "first".to_string());
        errors.check(false, || "second".to_string());

        let err = errors.into_result().unwrap_err();
        assert_eq!(err.error_messages, vec!["first", "second"]);
        assert!(ValidationError::new().into_result().is_ok());
    }

    #[test]
    fn test_other_error_hides_details() {
        let err: ServerError<Nothing> = other_error!("db exploded: {}", 42);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = err.response_body();
        assert_eq!(body.status_code, 500);
        assert!(!body.message.contains("exploded"));
    }

    #[test]
    fn test_status_code_error_body() {
        let err: ServerError<Nothing> = bad_request_error!("Invalid month ({})", 13);
        let json = serde_json::to_value(err.response_body()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "statusCode": 400, "message": "Invalid month (13)" })
        );
    }

    #[test]
    fn test_validation_body_lists_messages() {
        let err: ServerError<Nothing> = ValidationError {
            error_messages: vec!["a".to_string(), "b".to_string()],
        }
        .into();
        let body = err.response_body();
        assert_eq!(body.status_code, 400);
        assert_eq!(body.errors, vec!["a", "b"]);
    }
}
