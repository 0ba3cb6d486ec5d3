//! Marketplace API Abstraction
//!
//! The remote collaborator behind every command: session lookup, the account's
//! agents, agent creation, API key issuance, and agent search. Commands depend on
//! the `MarketplaceClient` trait; `HttpMarketplaceClient` is the reqwest-backed
//! implementation used by the binary.

use crate::error::ApiError;
use crate::search::SearchParams;
use async_trait::async_trait;

pub mod http;
pub mod types;

pub use http::HttpMarketplaceClient;
pub use types::{AgentRecord, CreatedAgent, IssuedApiKey, ServerAgent, SessionToken};

/// Remote marketplace operations.
#[async_trait]
pub trait MarketplaceClient: Send + Sync {
    /// Return a usable session token, or `NotLoggedIn`.
    async fn ensure_session(&self) -> Result<SessionToken, ApiError>;

    /// The account's agents as the server sees them.
    async fn fetch_agents(&self, session: &SessionToken) -> Result<Vec<ServerAgent>, ApiError>;

    /// Create an agent; the response carries its first API key.
    async fn create_agent(
        &self,
        session: &SessionToken,
        name: &str,
    ) -> Result<CreatedAgent, ApiError>;

    /// Issue a fresh API key for the agent owning `wallet_address`.
    async fn regenerate_api_key(
        &self,
        session: &SessionToken,
        wallet_address: &str,
    ) -> Result<IssuedApiKey, ApiError>;

    /// Run a search with prebuilt query parameters.
    async fn search(&self, params: &SearchParams) -> Result<Vec<AgentRecord>, ApiError>;
}

/// Markers of the server answering an impossible filter combination with a
/// query syntax failure instead of an empty result set.
const MALFORMED_FILTER_MARKERS: &[&str] = &["sql", "syntax"];

/// True when a search failure is the server's malformed-filter quirk.
///
/// Plain substring matching on the error text; the server gives no status code
/// that separates this from a real failure.
pub fn is_malformed_filter_error(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    MALFORMED_FILTER_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
}

/// Mask a secret for display: first and last four characters only.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len().max(4));
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
