use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::{Nothing, ServerError, StatusCode};

/// Declares a route error enum. Each variant carries the status code it is
/// rendered with once converted into a `ServerError`
macro_rules! response_error {
    ($name:ident {
        $(
            #[code($variant_code:expr)]
            #[error($($error_tt:tt)+)]
            $variant:ident
            $({ $($var_struct_body_tt:tt)* })?
        ,)*
    }) => {

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
        pub enum $name {
            $(
                #[error($($error_tt)+)]
                $variant $({
                    $($var_struct_body_tt)*
                })?,
            )*
        }

        impl $name {
            pub fn status_code(&self) -> StatusCode {
                match self {
                    $( $name::$variant { .. } => $variant_code, )*
                }
            }
        }

        impl From<$name> for ServerError<$name> {
            fn from(inner: $name) -> Self {
                Self::Inner { code: inner.status_code(), inner }
            }
        }
    };
}

response_error!(RegisterError {
    #[code(StatusCode::CONFLICT)]
    #[error("Email is already registered")]
    EmailUnavailable,
});

response_error!(LoginError {
    #[code(StatusCode::UNAUTHORIZED)]
    #[error("Invalid email or password")]
    InvalidCredentials,
});

response_error!(WorkoutError {
    #[code(StatusCode::NOT_FOUND)]
    #[error("Workout not found")]
    NotFound,
    #[code(StatusCode::FORBIDDEN)]
    #[error("Access denied")]
    Forbidden,
});

response_error!(TrackerError {
    #[code(StatusCode::NOT_FOUND)]
    #[error("Workout log not found")]
    LogNotFound,
    #[code(StatusCode::NOT_FOUND)]
    #[error("Workout not found")]
    WorkoutNotFound,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("Invalid calendar month {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
});

response_error!(AiError {
    #[code(StatusCode::BAD_REQUEST)]
    #[error("AI service is not configured")]
    NotConfigured,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("AI returned an empty response")]
    EmptyResponse,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("AI response did not contain a JSON object")]
    InvalidResponse,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("AI response has an invalid format")]
    InvalidFormat,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("Failed to generate workout: {message}")]
    Upstream { message: String },
});

// Alias used to allow future expansion of the errors without having to go back
// and update all routes that use it
pub type FetchError = Nothing;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_inner_error_uses_variant_code() {
        let err: ServerError<RegisterError> = RegisterError::EmailUnavailable.into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err: ServerError<WorkoutError> = WorkoutError::Forbidden.into();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_inner_error_body_carries_typed_error() {
        let err: ServerError<TrackerError> = TrackerError::InvalidMonth { year: 2024, month: 13 }.into();
        let json = serde_json::to_value(err.response_body()).unwrap();
        assert_eq!(json["statusCode"], 400);
        assert_eq!(json["message"], "Invalid calendar month 2024-13");
        assert_eq!(
            json["error"],
            serde_json::json!({ "InvalidMonth": { "year": 2024, "month": 13 } })
        );
    }

    #[test]
    fn test_unit_variant_serializes_as_name() {
        let err: ServerError<LoginError> = LoginError::InvalidCredentials.into();
        let json = serde_json::to_value(err.response_body()).unwrap();
        assert_eq!(json["statusCode"], 401);
        assert_eq!(json["error"], "InvalidCredentials");
    }
}
