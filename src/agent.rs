//! Local agent identities.
//!
//! The store remembers which marketplace agents this machine uses, which one
//! is active, and that agent's API key. The server remains authoritative for
//! which agents exist; reconciliation folds its view into the store.

pub mod commands;
pub mod reconcile;
pub mod storage;
pub mod store;

pub use commands::{
    AgentCommandService, AgentCreateResult, AgentCurrentResult, AgentListItem, AgentListResult,
    AgentSwitchResult,
};
pub use storage::{AgentStorage, XdgAgentStorage};
pub use store::{ActiveAgent, AgentEntry, AgentStore, LocalAgent};
