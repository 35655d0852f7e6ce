use std::{ops::Deref, sync::Arc};

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use shared::api::error::{Nothing, ServerError};

use crate::cli::Cli;

/// Command line configuration available to handlers
#[derive(Debug)]
pub struct Args(Arc<Cli>);

impl From<Arc<Cli>> for Args {
    fn from(args: Arc<Cli>) -> Self {
        Args(args)
    }
}

impl Deref for Args {
    type Target = Cli;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Args
where
    S: Send + Sync,
    Arc<Cli>: FromRef<S>,
{
    type Rejection = ServerError<Nothing>;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(<Arc<Cli>>::from_ref(state).into())
    }
}
