//! Storage port for the local agent store.

use super::store::AgentStore;
use crate::error::ApiError;
use std::path::Path;

mod xdg;

pub use xdg::XdgAgentStorage;

/// Whole-document persistence for `AgentStore`.
///
/// `save` must replace the previous document atomically: a reader sees either
/// the old store or the new one, never a mix.
pub trait AgentStorage: Send + Sync {
    /// Load the store; a missing file is an empty store.
    fn load(&self) -> Result<AgentStore, ApiError>;

    fn save(&self, store: &AgentStore) -> Result<(), ApiError>;

    /// Location of the backing file.
    fn path(&self) -> &Path;
}
