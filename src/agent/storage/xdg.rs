use super::AgentStorage;
use crate::agent::store::AgentStore;
use crate::error::{ApiError, StorageError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// TOML agents file, by default `$XDG_CONFIG_HOME/bazaar/agents.toml`.
pub struct XdgAgentStorage {
    path: PathBuf,
}

impl XdgAgentStorage {
    /// Storage at the default XDG location.
    pub fn new() -> Result<Self, ApiError> {
        Ok(Self::at(crate::config::xdg::agents_file()?))
    }

    /// Storage at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("toml.tmp")
    }
}

fn open_private(path: &Path) -> std::io::Result<fs::File> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

impl AgentStorage for XdgAgentStorage {
    fn load(&self) -> Result<AgentStore, ApiError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No agents file yet");
            return Ok(AgentStore::default());
        }
        let content = fs::read_to_string(&self.path).map_err(StorageError::IoError)?;
        let store: AgentStore = toml::from_str(&content).map_err(|e| StorageError::Parse {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(store.normalize())
    }

    fn save(&self, store: &AgentStore) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ApiError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(store)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;

        // Write to temporary file, then rename over the real one
        let temp_path = self.temp_path();
        let written = open_private(&temp_path).and_then(|mut file| {
            file.write_all(content.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(StorageError::IoError(e).into());
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            ApiError::StorageError(StorageError::IoError(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file to {:?}: {}", self.path, e),
            )))
        })?;

        debug!(path = %self.path.display(), agents = store.agents().len(), "Agents file saved");
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
