//! Search workflow: validate, call the marketplace, normalize the outcome.

use super::params::{prepare, SearchOptions, SearchSettings};
use crate::error::ApiError;
use crate::marketplace::{is_malformed_filter_error, AgentRecord, MarketplaceClient};
use tracing::{debug, warn};

pub struct SearchService;

/// Only a response body the server sent back can carry the filter quirk;
/// transport, decode and auth failures never do.
fn is_filter_quirk(error: &ApiError) -> bool {
    match error {
        ApiError::RemoteRejected { body, .. } => is_malformed_filter_error(body),
        _ => false,
    }
}

/// Result of a search command.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub query: String,
    pub settings: SearchSettings,
    pub agents: Vec<AgentRecord>,
}

impl SearchService {
    /// Run a search. Usage errors are raised before the client is touched.
    ///
    /// A rejected request whose response body carries SQL/syntax markers is
    /// the server's answer to an impossible filter combination and yields an
    /// empty result; every other remote failure is returned as is.
    pub async fn run(
        client: &dyn MarketplaceClient,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchOutcome, ApiError> {
        let request = prepare(query, options)?;

        let agents = match client.search(&request.params).await {
            Ok(agents) => agents,
            Err(e) if is_filter_quirk(&e) => {
                warn!(
                    query = %request.query,
                    error = %e,
                    "Search filters produced a malformed server query; treating as no results"
                );
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        debug!(count = agents.len(), "Search completed");

        Ok(SearchOutcome {
            query: request.query,
            settings: request.settings,
            agents,
        })
    }
}
