use axum::Json;
use axum_extra::extract::WithRejection;
use shared::{
    api::{
        error::{Nothing, ServerError},
        response_errors::FetchError,
    },
    model::{Profile, ProfileUpdate, ValidateModel},
};
use tracing::{debug, instrument};

use crate::{db::DatabaseConnection, JsonBody, UserState};

pub async fn fetch_profile(
    DatabaseConnection(conn): DatabaseConnection,
    user_state: UserState,
) -> Result<Json<Profile>, ServerError<FetchError>> {
    let user = conn
        .interact(move |conn| user_state.id.fetch_full_user(conn))
        .await??;

    Ok(Json(Profile::from(&user)))
}

#[instrument(skip_all, fields(user_id = %user_state.id))]
pub async fn update_profile(
    DatabaseConnection(conn): DatabaseConnection,
    user_state: UserState,
    WithRejection(Json(update), _): JsonBody<ProfileUpdate>,
) -> Result<Json<Profile>, ServerError<Nothing>> {
    update.validate()?;
    debug!(?update, "Updating profile");

    let user = conn
        .interact(move |conn| {
            let mut user = user_state.id.fetch_full_user(conn)?;
            user.update_profile(conn, update)?;
            Ok::<_, rusqlite::Error>(user)
        })
        .await??;

    Ok(Json(Profile::from(&user)))
}
