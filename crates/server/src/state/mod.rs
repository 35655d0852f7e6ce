use std::sync::Arc;

use axum::extract::FromRef;
use deadpool_sqlite::Pool;

mod args;
pub use args::*;

use crate::{ai::AiClient, cli::Cli};

#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: Pool,
    pub args: Arc<Cli>,
    pub ai_client: Arc<AiClient>,
}

impl FromRef<AppState> for Pool {
    fn from_ref(state: &AppState) -> Self {
        // pool uses an Arc internally so clone is cheap
        state.pool.clone()
    }
}

impl FromRef<AppState> for Arc<Cli> {
    fn from_ref(state: &AppState) -> Self {
        state.args.clone()
    }
}

impl FromRef<AppState> for Arc<AiClient> {
    fn from_ref(state: &AppState) -> Self {
        state.ai_client.clone()
    }
}
