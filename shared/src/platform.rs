use log::{info, warn};
use std::fmt;
use validator::Validate;

use crate::dto::common::CreatedResponse;
use crate::dto::event::CreateEventRequest;
use crate::dto::game::CreateGameRequest;
use crate::error::Result;

/// Bearer credential for the platform API, passed explicitly to every call
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Game and event creation endpoints of the platform
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PlatformClient: Send + Sync {
    async fn create_game(
        &self,
        token: &AuthToken,
        request: &CreateGameRequest,
    ) -> Result<CreatedResponse>;

    async fn create_event(
        &self,
        token: &AuthToken,
        request: &CreateEventRequest,
    ) -> Result<CreatedResponse>;
}

/// Validates the payload locally, then creates the game
pub async fn publish_game(
    client: &dyn PlatformClient,
    token: &AuthToken,
    request: &CreateGameRequest,
) -> Result<CreatedResponse> {
    if let Err(errors) = request.validate() {
        warn!("Refusing to publish game '{}': {}", request.name, errors);
        return Err(errors.into());
    }
    let created = client.create_game(token, request).await?;
    info!(
        "Published game '{}' as {} with {} question(s)",
        request.name,
        created.id,
        request.quiz.len()
    );
    Ok(created)
}

/// Validates the payload locally, then creates the event
pub async fn publish_event(
    client: &dyn PlatformClient,
    token: &AuthToken,
    request: &CreateEventRequest,
) -> Result<CreatedResponse> {
    if let Err(errors) = request.validate() {
        warn!("Refusing to publish event '{}': {}", request.name, errors);
        return Err(errors.into());
    }
    let created = client.create_event(token, request).await?;
    info!(
        "Published event '{}' as {} with {} question(s)",
        request.name,
        created.id,
        request.quiz.len()
    );
    Ok(created)
}
