//! Local agent store: the agents this machine knows about and which one is active.
//!
//! The active agent and the current API key are one optional record, so the
//! store cannot hold two active agents or a key on an inactive one.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Agent identity as remembered locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalAgent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub wallet_address: String,
}

/// The selected agent and its API key.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveAgent {
    pub id: String,
    pub api_key: String,
}

impl fmt::Debug for ActiveAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveAgent")
            .field("id", &self.id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Flattened view of one stored agent. `api_key` is `Some` only when `active`.
#[derive(Clone, PartialEq, Eq)]
pub struct AgentEntry {
    pub id: String,
    pub name: String,
    pub wallet_address: String,
    pub api_key: Option<String>,
    pub active: bool,
}

impl fmt::Debug for AgentEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentEntry")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("wallet_address", &self.wallet_address)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("active", &self.active)
            .finish()
    }
}

/// Persisted local state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStore {
    #[serde(default)]
    pub(crate) agents: Vec<LocalAgent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) active: Option<ActiveAgent>,
}

impl AgentStore {
    /// Store with the given agents and none active.
    pub fn new(agents: Vec<LocalAgent>) -> Self {
        Self {
            agents,
            active: None,
        }
    }

    pub fn agents(&self) -> &[LocalAgent] {
        &self.agents
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn active(&self) -> Option<&ActiveAgent> {
        self.active.as_ref()
    }

    /// API key used for authenticated marketplace calls.
    pub fn current_api_key(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.api_key.as_str())
    }

    pub fn active_entry(&self) -> Option<AgentEntry> {
        self.entries().into_iter().find(|e| e.active)
    }

    /// Every stored agent, in stored order.
    pub fn entries(&self) -> Vec<AgentEntry> {
        self.agents.iter().map(|agent| self.entry_for(agent)).collect()
    }

    fn entry_for(&self, agent: &LocalAgent) -> AgentEntry {
        let active = self.active.as_ref().filter(|a| a.id == agent.id);
        AgentEntry {
            id: agent.id.clone(),
            name: agent.name.clone(),
            wallet_address: agent.wallet_address.clone(),
            api_key: active.map(|a| a.api_key.clone()),
            active: active.is_some(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&LocalAgent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Look up by exact name first, then by id.
    pub fn find(&self, name_or_id: &str) -> Option<&LocalAgent> {
        self.agents
            .iter()
            .find(|a| a.name == name_or_id)
            .or_else(|| self.get(name_or_id))
    }

    /// Drop an active selection that points at an agent the store does not hold.
    pub(crate) fn normalize(mut self) -> Self {
        if let Some(active) = &self.active {
            if self.get(&active.id).is_none() {
                warn!(
                    agent_id = %active.id,
                    "Active agent missing from agents file; clearing active selection"
                );
                self.active = None;
            }
        }
        self
    }
}
