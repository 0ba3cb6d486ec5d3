//! reqwest-backed marketplace client.

use super::types::{AgentsResponse, CreatedAgent, IssuedApiKey, SearchResponse, ServerAgent, SessionToken};
use super::{AgentRecord, MarketplaceClient};
use crate::config::{ApiConfig, SessionConfig};
use crate::error::ApiError;
use crate::search::SearchParams;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

const SEARCH_PATH: &str = "/agents/search";
const ACCOUNT_AGENTS_PATH: &str = "/me/agents";
const API_KEY_PATH: &str = "/me/agents/api-key";

const MARKETPLACE_HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

// Helper function to map transport errors to ApiError. The request URL is
// stripped: it carries the user's search text.
fn map_http_error(error: reqwest::Error) -> ApiError {
    let error = error.without_url();
    if let Some(status) = error.status() {
        match status.as_u16() {
            401 | 403 => ApiError::RemoteAuthFailed(format!("{}", error)),
            code => ApiError::RemoteRejected {
                status: code,
                body: error.to_string(),
            },
        }
    } else if error.is_timeout() {
        ApiError::RemoteRequestFailed(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ApiError::RemoteRequestFailed(format!("Connection error: {}", error))
    } else {
        ApiError::RemoteError(format!("HTTP error: {}", error))
    }
}

fn build_marketplace_http_client(timeout: Duration) -> Result<Client, ApiError> {
    Client::builder()
        .connect_timeout(MARKETPLACE_HTTP_CONNECT_TIMEOUT)
        .timeout(timeout)
        .user_agent(concat!("bazaar/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ApiError::RemoteError(format!("Failed to create HTTP client: {}", e)))
}

/// Marketplace client over HTTPS/JSON
pub struct HttpMarketplaceClient {
    client: Client,
    base_url: String,
    session_token: Option<String>,
}

impl HttpMarketplaceClient {
    pub fn new(api: &ApiConfig, session: &SessionConfig) -> Result<Self, ApiError> {
        api.validate().map_err(ApiError::ConfigError)?;
        let client = build_marketplace_http_client(api.timeout())?;
        Ok(Self {
            client,
            base_url: api.base_url.trim().trim_end_matches('/').to_string(),
            session_token: session
                .token
                .as_ref()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder, session: &SessionToken) -> RequestBuilder {
        request.header("Authorization", format!("Bearer {}", session.as_str()))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await.map_err(map_http_error)?;
        let response = check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| {
                ApiError::RemoteError(format!("Failed to parse response: {}", e.without_url()))
            })
    }
}

/// Turn a non-success response into an error carrying the server's message.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(match status.as_u16() {
        401 | 403 => ApiError::RemoteAuthFailed(format!("{} {}", status, error_text)),
        code => ApiError::RemoteRejected {
            status: code,
            body: error_text,
        },
    })
}

#[async_trait]
impl MarketplaceClient for HttpMarketplaceClient {
    async fn ensure_session(&self) -> Result<SessionToken, ApiError> {
        self.session_token
            .as_ref()
            .map(SessionToken::new)
            .ok_or(ApiError::NotLoggedIn)
    }

    async fn fetch_agents(&self, session: &SessionToken) -> Result<Vec<ServerAgent>, ApiError> {
        let request = self.authorized(self.client.get(self.url(ACCOUNT_AGENTS_PATH)), session);
        let response: AgentsResponse = self.send_json(request).await?;
        let agents = response.into_agents();
        debug!(count = agents.len(), "Fetched account agents");
        Ok(agents)
    }

    async fn create_agent(
        &self,
        session: &SessionToken,
        name: &str,
    ) -> Result<CreatedAgent, ApiError> {
        let request = self
            .authorized(self.client.post(self.url(ACCOUNT_AGENTS_PATH)), session)
            .json(&json!({ "name": name }));
        self.send_json(request).await
    }

    async fn regenerate_api_key(
        &self,
        session: &SessionToken,
        wallet_address: &str,
    ) -> Result<IssuedApiKey, ApiError> {
        let request = self
            .authorized(self.client.post(self.url(API_KEY_PATH)), session)
            .json(&json!({ "walletAddress": wallet_address }));
        self.send_json(request).await
    }

    async fn search(&self, params: &SearchParams) -> Result<Vec<AgentRecord>, ApiError> {
        debug!(params = ?params.pairs(), "Searching marketplace");
        let request = self.client.get(self.url(SEARCH_PATH)).query(params.pairs());
        let response: SearchResponse = self.send_json(request).await?;
        Ok(response.data)
    }
}
