use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use serde::{Deserialize, Serialize};
use shared::{
    api::error::{Nothing, ServerError},
    model::{User, UserId},
    unauthorized_error,
};
use tower_sessions::Session;

use crate::internal_error;

/// The logged in user, stored in the session
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserState {
    pub id: UserId,
}

impl UserState {
    pub fn new(user: &User) -> Self {
        Self { id: user.into() }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct SessionData {
    user_state: Option<UserState>,
}

#[derive(Debug, Clone)]
pub struct SessionValue {
    session: Session,
    data: SessionData,
}

impl SessionValue {
    const SESSION_DATA_KEY: &'static str = "session.data";

    pub fn user_state(&self) -> Option<&UserState> {
        self.data.user_state.as_ref()
    }

    pub async fn take_user_state(&mut self) -> Result<Option<UserState>, anyhow::Error> {
        let user_state = self.data.user_state.take();
        Self::update_session(&self.session, &self.data).await?;
        Ok(user_state)
    }

    /// Logs the user in. The session id is cycled to prevent fixation
    pub async fn set_user_state(&mut self, user_state: UserState) -> Result<(), anyhow::Error> {
        self.session.cycle_id().await?;
        self.data.user_state = Some(user_state);
        Self::update_session(&self.session, &self.data).await?;
        Ok(())
    }

    /// Drops all session data and removes the session from the store
    pub async fn flush(&mut self) -> Result<(), anyhow::Error> {
        self.data = SessionData::default();
        self.session.flush().await?;
        Ok(())
    }

    async fn update_session(session: &Session, data: &SessionData) -> Result<(), anyhow::Error> {
        session.insert(Self::SESSION_DATA_KEY, data.clone()).await?;
        Ok(())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionValue
where
    S: Send + Sync,
{
    type Rejection = ServerError<Nothing>;

    async fn from_request_parts(req: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(req, state)
            .await
            .map_err(internal_error)?;

        let data: SessionData = session
            .get(Self::SESSION_DATA_KEY)
            .await
            .map_err(internal_error)?
            .unwrap_or_default();

        Ok(Self { session, data })
    }
}

/// Extracting a `UserState` requires a logged in session
#[async_trait]
impl<S> FromRequestParts<S> for UserState
where
    S: Send + Sync,
{
    type Rejection = ServerError<Nothing>;

    async fn from_request_parts(req: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = SessionValue::from_request_parts(req, state).await?;

        session
            .user_state()
            .cloned()
            .ok_or_else(|| unauthorized_error!("Not logged in"))
    }
}
