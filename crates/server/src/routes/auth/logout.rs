use axum::Json;
use shared::api::error::{Nothing, ServerError};
use tracing::instrument;

use crate::SessionValue;

#[instrument(skip_all)]
pub async fn logout(mut session: SessionValue) -> Result<Json<()>, ServerError<Nothing>> {
    session.flush().await?;
    Ok(Json(()))
}
