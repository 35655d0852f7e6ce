use axum::Json;
use shared::{
    api::{error::ServerError, response_errors::FetchError},
    model::Profile,
};

use crate::{db::DatabaseConnection, UserState};

pub async fn me(
    DatabaseConnection(conn): DatabaseConnection,
    user_state: UserState,
) -> Result<Json<Profile>, ServerError<FetchError>> {
    let user = conn
        .interact(move |conn| user_state.id.fetch_full_user(conn))
        .await??;

    Ok(Json(Profile::from(&user)))
}
