use log::{debug, warn};
use reqwest::Client;
use serde::Serialize;
use shared::{
    AuthToken, CreateEventRequest, CreateGameRequest, CreatedResponse, ErrorResponse,
    PlatformClient, QuizError,
};
use std::time::Duration;
use url::Url;

use crate::config::ApiConfig;

/// REST implementation of the platform's game and event endpoints
#[derive(Clone)]
pub struct HttpPlatformClient {
    base: Url,
    http: Client,
}

impl HttpPlatformClient {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let mut base = Url::parse(&config.base_url)?;
        // join() replaces the last segment unless the path ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { base, http })
    }

    pub fn endpoint(&self, path: &str) -> shared::Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| QuizError::Platform(format!("Invalid endpoint {}: {}", path, e)))
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        token: &AuthToken,
        path: &str,
        body: &T,
    ) -> shared::Result<CreatedResponse> {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);

        let response = self
            .http
            .post(url.clone())
            .bearer_auth(token.as_str())
            .json(body)
            .send()
            .await
            .map_err(|e| QuizError::Platform(format!("Failed to reach {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(error) => error.error,
                Err(_) => format!("Request failed with status {}", status),
            };
            warn!("POST {} failed: {} ({})", url, message, status);
            return Err(QuizError::Platform(message));
        }

        response
            .json::<CreatedResponse>()
            .await
            .map_err(|e| QuizError::Platform(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait::async_trait]
impl PlatformClient for HttpPlatformClient {
    async fn create_game(
        &self,
        token: &AuthToken,
        request: &CreateGameRequest,
    ) -> shared::Result<CreatedResponse> {
        self.post(token, "games", request).await
    }

    async fn create_event(
        &self,
        token: &AuthToken,
        request: &CreateEventRequest,
    ) -> shared::Result<CreatedResponse> {
        self.post(token, "events", request).await
    }
}
