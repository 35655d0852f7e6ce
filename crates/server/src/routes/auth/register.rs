use axum::{http::StatusCode, Json};
use rusqlite::ErrorCode;
use axum_extra::extract::WithRejection;
use shared::{
    api::{
        error::ServerError,
        payloads::{normalize_email, RegisterUser},
        response_errors::RegisterError,
    },
    model::{NewUser, Profile, User, ValidateModel},
};
use tracing::{info, instrument};

use crate::{
    db::DatabaseConnection, hash_password, state::Args, JsonBody, SessionValue, UserState,
};

#[instrument(skip_all)]
pub async fn register(
    DatabaseConnection(conn): DatabaseConnection,
    args: Args,
    mut session: SessionValue,
    WithRejection(Json(register_user), _): JsonBody<RegisterUser>,
) -> Result<(StatusCode, Json<Profile>), ServerError<RegisterError>> {
    register_user.validate()?;

    let RegisterUser {
        email,
        password,
        name,
    } = register_user;
    let email = normalize_email(&email);

    let existing = {
        let email = email.clone();
        conn.interact(move |conn| User::fetch_by_email(conn, email))
            .await??
    };
    if existing.is_some() {
        Err(RegisterError::EmailUnavailable)?;
    }

    let password_hash = hash_password(password, args.password_hash_cost).await?;
    let new_user = NewUser::new(email, password_hash, name.trim());

    let user = conn
        .interact(move |conn| match User::create(conn, new_user) {
            // Lost a race with another registration for the same email
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(ServerError::from(RegisterError::EmailUnavailable))
            }
            r => Ok::<_, ServerError<RegisterError>>(r?),
        })
        .await??;

    session.set_user_state(UserState::new(&user)).await?;
    info!(user_id = %user.id, "Registered");

    Ok((StatusCode::CREATED, Json(Profile::from(&user))))
}
