//! Agent command service: single entry point per agent CLI command variant.
//!
//! Owns the agent workflows; the CLI parses, calls one method per variant, and
//! formats the result. Local lookups and validation always run before the
//! first remote call.

use crate::agent::storage::AgentStorage;
use crate::agent::store::AgentEntry;
use crate::error::ApiError;
use crate::marketplace::{MarketplaceClient, ServerAgent};
use std::path::PathBuf;
use tracing::{info, warn};

pub struct AgentCommandService;

/// One row of `agent list`: the local view plus the server's record when it
/// could be fetched.
#[derive(Debug, Clone)]
pub struct AgentListItem {
    pub entry: AgentEntry,
    pub server: Option<ServerAgent>,
}

/// Result of agent list command.
#[derive(Debug, Clone)]
pub struct AgentListResult {
    pub agents: Vec<AgentListItem>,
    /// Set when the server could not be reached and stored agents are shown.
    pub warning: Option<String>,
}

/// Result of agent switch command.
#[derive(Debug, Clone)]
pub struct AgentSwitchResult {
    pub agent: AgentEntry,
    pub config_path: PathBuf,
}

/// Result of agent create command.
#[derive(Debug, Clone)]
pub struct AgentCreateResult {
    pub agent: AgentEntry,
    pub config_path: PathBuf,
}

/// Result of agent current command.
#[derive(Debug, Clone)]
pub struct AgentCurrentResult {
    pub agent: Option<AgentEntry>,
    pub config_path: PathBuf,
}

fn required_name(name: &str, what: &str) -> Result<String, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::Usage(format!("{} cannot be empty", what)));
    }
    Ok(name.to_string())
}

impl AgentCommandService {
    /// Refresh the store from the server and list agents.
    ///
    /// A failed session or fetch is not fatal: the stored agents are returned
    /// with a warning and the store is left as it was.
    pub async fn list(
        client: &dyn MarketplaceClient,
        storage: &dyn AgentStorage,
    ) -> Result<AgentListResult, ApiError> {
        let mut store = storage.load()?;

        let fetched = async {
            let session = client.ensure_session().await?;
            client.fetch_agents(&session).await
        }
        .await;

        match fetched {
            Ok(server_agents) => {
                let entries = store.sync_agents_to_config(&server_agents);
                storage.save(&store)?;
                info!(count = entries.len(), "Agents synced from marketplace");
                let agents = entries
                    .into_iter()
                    .zip(server_agents)
                    .map(|(entry, server)| AgentListItem {
                        entry,
                        server: Some(server),
                    })
                    .collect();
                Ok(AgentListResult {
                    agents,
                    warning: None,
                })
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch agents; using stored agents");
                let agents = store
                    .entries()
                    .into_iter()
                    .map(|entry| AgentListItem {
                        entry,
                        server: None,
                    })
                    .collect();
                Ok(AgentListResult {
                    agents,
                    warning: Some(format!(
                        "Could not refresh agents from the marketplace ({}); showing locally saved agents",
                        e
                    )),
                })
            }
        }
    }

    /// Switch the active agent by name (or id) and issue it a fresh API key.
    pub async fn switch(
        client: &dyn MarketplaceClient,
        storage: &dyn AgentStorage,
        name_or_id: &str,
    ) -> Result<AgentSwitchResult, ApiError> {
        let name_or_id = required_name(name_or_id, "Agent name")?;
        let mut store = storage.load()?;
        let target = store
            .find(&name_or_id)
            .cloned()
            .ok_or_else(|| ApiError::AgentNotFound(name_or_id.clone()))?;
        if target.wallet_address.trim().is_empty() {
            return Err(ApiError::Usage(format!(
                "Agent {} has no wallet address on record; run `bazaar agent list` to refresh",
                target.name
            )));
        }

        let session = client.ensure_session().await?;
        let issued = client
            .regenerate_api_key(&session, &target.wallet_address)
            .await?;
        let api_key = issued
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ApiError::MissingApiKey(target.name.clone()))?;

        store.activate_agent(&target.id, &api_key)?;
        storage.save(&store)?;
        info!(agent_id = %target.id, "Switched active agent");

        let agent = store
            .active_entry()
            .ok_or_else(|| ApiError::AgentNotFound(target.id.clone()))?;
        Ok(AgentSwitchResult {
            agent,
            config_path: storage.path().to_path_buf(),
        })
    }

    /// Create an agent on the marketplace and make it the active one.
    pub async fn create(
        client: &dyn MarketplaceClient,
        storage: &dyn AgentStorage,
        name: &str,
    ) -> Result<AgentCreateResult, ApiError> {
        let name = required_name(name, "Agent name")?;
        let mut store = storage.load()?;

        let session = client.ensure_session().await?;
        let created = client.create_agent(&session, &name).await?;
        let agent = store.register_created_agent(created)?;
        storage.save(&store)?;
        info!(agent_id = %agent.id, "Created agent");

        Ok(AgentCreateResult {
            agent,
            config_path: storage.path().to_path_buf(),
        })
    }

    /// The active agent according to the store; no remote call.
    pub fn current(storage: &dyn AgentStorage) -> Result<AgentCurrentResult, ApiError> {
        let store = storage.load()?;
        Ok(AgentCurrentResult {
            agent: store.active_entry(),
            config_path: storage.path().to_path_buf(),
        })
    }

    /// Names of stored agents, for interactive selection.
    pub fn stored_names(storage: &dyn AgentStorage) -> Result<Vec<String>, ApiError> {
        Ok(storage
            .load()?
            .agents()
            .iter()
            .map(|a| a.name.clone())
            .collect())
    }
}
