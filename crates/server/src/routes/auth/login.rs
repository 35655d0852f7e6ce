use axum::Json;
use axum_extra::extract::WithRejection;
use shared::{
    api::{
        error::ServerError,
        payloads::{normalize_email, LoginUser},
        response_errors::LoginError,
    },
    model::{Profile, User, ValidateModel},
};
use tracing::{info, instrument};

use crate::{db::DatabaseConnection, verify_password, JsonBody, SessionValue, UserState};

#[instrument(skip_all)]
pub async fn login(
    DatabaseConnection(conn): DatabaseConnection,
    mut session: SessionValue,
    WithRejection(Json(login_user), _): JsonBody<LoginUser>,
) -> Result<Json<Profile>, ServerError<LoginError>> {
    login_user.validate()?;

    // Remove the existing user
    session.take_user_state().await?;

    let LoginUser { email, password } = login_user;
    let email = normalize_email(&email);

    let user = conn
        .interact(move |conn| User::fetch_by_email(conn, email))
        .await??
        .ok_or(LoginError::InvalidCredentials)?;

    // Unknown emails and wrong passwords are reported the same way
    if !verify_password(password, user.password_hash.clone()).await? {
        Err(LoginError::InvalidCredentials)?;
    }

    session.set_user_state(UserState::new(&user)).await?;
    info!(user_id = %user.id, "Logged in");

    Ok(Json(Profile::from(&user)))
}
