use std::sync::Arc;

use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use shared::{
    api::{
        error::ServerError,
        payloads::{GenerateWorkout, GeneratedWorkout},
        response_errors::AiError,
    },
    model::{Profile, ValidateModel},
};
use tracing::{info, instrument};

use crate::{ai::AiClient, db::DatabaseConnection, JsonBody, UserState};

/// Suggests workout plans. Nothing is stored, chosen plans are saved through
/// the workout create route
#[instrument(skip_all, fields(user_id = %user_state.id))]
pub async fn generate_workout(
    DatabaseConnection(conn): DatabaseConnection,
    State(ai_client): State<Arc<AiClient>>,
    user_state: UserState,
    WithRejection(Json(payload), _): JsonBody<GenerateWorkout>,
) -> Result<Json<Vec<GeneratedWorkout>>, ServerError<AiError>> {
    if !ai_client.is_configured() {
        Err(AiError::NotConfigured)?;
    }
    payload.validate()?;

    let user = conn
        .interact(move |conn| user_state.id.fetch_full_user(conn))
        .await??;
    // Release the connection while waiting on the model
    drop(conn);

    let workouts = ai_client
        .generate_workouts(&Profile::from(&user), payload.prompt.trim())
        .await?;
    info!(count = workouts.len(), "Generated workouts");

    Ok(Json(workouts))
}
