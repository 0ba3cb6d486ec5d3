//! Reconciliation of server-reported agents with the local store.
//!
//! The server is authoritative for which agents exist; only the store knows
//! which agent is active and holds its key.

use super::store::{ActiveAgent, AgentEntry, AgentStore, LocalAgent};
use crate::error::ApiError;
use crate::marketplace::{CreatedAgent, ServerAgent};
use tracing::{debug, info};

impl AgentStore {
    /// Replace the stored agents with the server's list.
    ///
    /// The active selection survives only if the server still reports that
    /// agent. Activation is never inferred here, not even for a lone agent.
    pub fn sync_agents_to_config(&mut self, server_agents: &[ServerAgent]) -> Vec<AgentEntry> {
        let agents: Vec<LocalAgent> = server_agents
            .iter()
            .map(|agent| LocalAgent {
                id: agent.id.clone(),
                name: agent.name.clone(),
                wallet_address: agent.wallet_address.clone(),
            })
            .collect();

        let dropped = self
            .agents
            .iter()
            .filter(|local| !agents.iter().any(|a| a.id == local.id))
            .count();
        if dropped > 0 {
            debug!(dropped, "Dropping local agents no longer reported by the server");
        }

        self.agents = agents;
        if let Some(active) = &self.active {
            if self.get(&active.id).is_none() {
                info!(agent_id = %active.id, "Active agent no longer exists on the server");
                self.active = None;
            }
        }
        self.entries()
    }

    /// Make `id` the active agent with `api_key`. Every other agent becomes
    /// inactive and keyless. Unknown ids leave the store untouched.
    pub fn activate_agent(&mut self, id: &str, api_key: &str) -> Result<(), ApiError> {
        if self.get(id).is_none() {
            return Err(ApiError::AgentNotFound(id.to_string()));
        }
        self.active = Some(ActiveAgent {
            id: id.to_string(),
            api_key: api_key.to_string(),
        });
        Ok(())
    }

    /// Record a freshly created agent and make it active.
    ///
    /// A response without a usable key is rejected before anything changes.
    /// An existing entry with the same id is replaced in place.
    pub fn register_created_agent(&mut self, created: CreatedAgent) -> Result<AgentEntry, ApiError> {
        let api_key = created
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ApiError::MissingApiKey(created.name.clone()))?
            .to_string();

        self.active = None;
        let local = LocalAgent {
            id: created.id,
            name: created.name,
            wallet_address: created.wallet_address,
        };
        match self.agents.iter_mut().find(|a| a.id == local.id) {
            Some(existing) => *existing = local.clone(),
            None => self.agents.push(local.clone()),
        }
        self.activate_agent(&local.id, &api_key)?;

        self.active_entry()
            .ok_or_else(|| ApiError::AgentNotFound(local.id.clone()))
    }
}
