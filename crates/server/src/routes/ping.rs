use axum::{http::StatusCode, Json};

/// Liveness check, does not touch the database
pub async fn ping() -> (StatusCode, Json<()>) {
    (StatusCode::OK, Json(()))
}
