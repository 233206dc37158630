//! CareConnect REST client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{LoginBody, LoginResponseDto, extract_error_message, parse_envelope};
use crate::domain::entities::{Activity, ActivityId, AuthToken, News, NewsId, Session};
use crate::domain::errors::ApiError;
use crate::domain::ports::{ActivityDraft, ActivityPort, AuthPort, NewsDraft, NewsPort};

/// Backend used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "https://careconnect.unikloh.icu";
const USER_AGENT: &str = concat!("careconnect/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the CareConnect backend.
///
/// Implements the auth, activity and news ports. Mutating calls carry the
/// session token as a bearer header.
#[derive(Clone)]
pub struct CareConnectClient {
    client: Client,
    base_url: String,
}

impl CareConnectClient {
    /// Creates client for the default backend.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates client for a custom backend origin.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Returns the configured origin.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the absolute URL for an API path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Failed to reach CareConnect API");
            if e.is_timeout() {
                ApiError::network("request timed out")
            } else if e.is_connect() {
                ApiError::network("failed to connect to server")
            } else {
                ApiError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        Err(Self::handle_error_response(status.as_u16(), response).await)
    }

    async fn handle_error_response(status: u16, response: Response) -> ApiError {
        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| extract_error_message(&body));
        debug!(status, message = ?message, "API returned error");
        ApiError::from_status(status, message)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(format!("failed to read response: {e}")))?;
        parse_envelope(&body).map_err(|e| {
            warn!(error = %e, "Failed to parse API response");
            e
        })
    }

    fn authorized(request: RequestBuilder, token: &AuthToken) -> RequestBuilder {
        request.header(header::AUTHORIZATION, token.bearer())
    }
}

#[async_trait]
impl AuthPort for CareConnectClient {
    async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        debug!(email, "Signing in");
        let request = self
            .client
            .post(self.endpoint("users/login"))
            .json(&LoginBody { email, password });

        let dto: LoginResponseDto = self.fetch(request).await?;
        dto.into_session()
    }
}

#[async_trait]
impl ActivityPort for CareConnectClient {
    async fn list_activities(&self) -> Result<Vec<Activity>, ApiError> {
        self.fetch(self.client.get(self.endpoint("activities"))).await
    }

    async fn get_activity(&self, id: &ActivityId) -> Result<Activity, ApiError> {
        self.fetch(self.client.get(self.endpoint(&format!("activities/{id}"))))
            .await
    }

    async fn create_activity(
        &self,
        token: &AuthToken,
        draft: &ActivityDraft,
    ) -> Result<(), ApiError> {
        let request = self.client.post(self.endpoint("activities")).json(draft);
        self.send(Self::authorized(request, token)).await?;
        Ok(())
    }

    async fn update_activity(
        &self,
        token: &AuthToken,
        id: &ActivityId,
        draft: &ActivityDraft,
    ) -> Result<(), ApiError> {
        let request = self
            .client
            .put(self.endpoint(&format!("activities/{id}")))
            .json(draft);
        self.send(Self::authorized(request, token)).await?;
        Ok(())
    }

    async fn delete_activity(&self, token: &AuthToken, id: &ActivityId) -> Result<(), ApiError> {
        let request = self.client.delete(self.endpoint(&format!("activities/{id}")));
        self.send(Self::authorized(request, token)).await?;
        Ok(())
    }
}

#[async_trait]
impl NewsPort for CareConnectClient {
    async fn list_news(&self, activity_id: &ActivityId) -> Result<Vec<News>, ApiError> {
        let request = self
            .client
            .get(self.endpoint("news"))
            .query(&[("activityId", activity_id.as_str())]);
        self.fetch(request).await
    }

    async fn get_news(&self, id: &NewsId) -> Result<News, ApiError> {
        self.fetch(self.client.get(self.endpoint(&format!("news/{id}"))))
            .await
    }

    async fn create_news(&self, token: &AuthToken, draft: &NewsDraft) -> Result<(), ApiError> {
        let request = self.client.post(self.endpoint("news")).json(draft);
        self.send(Self::authorized(request, token)).await?;
        Ok(())
    }

    async fn update_news(
        &self,
        token: &AuthToken,
        id: &NewsId,
        draft: &NewsDraft,
    ) -> Result<(), ApiError> {
        let request = self
            .client
            .put(self.endpoint(&format!("news/{id}")))
            .json(draft);
        self.send(Self::authorized(request, token)).await?;
        Ok(())
    }

    async fn delete_news(&self, token: &AuthToken, id: &NewsId) -> Result<(), ApiError> {
        let request = self.client.delete(self.endpoint(&format!("news/{id}")));
        self.send(Self::authorized(request, token)).await?;
        Ok(())
    }
}
