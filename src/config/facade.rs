//! ConfigLoader: the only entry point for building a `BazaarConfig`.

use super::merge::merge_policy::builder_with_defaults;
use super::sources::{env, global_file};
use super::BazaarConfig;
use crate::error::ApiError;
use config::File;
use std::path::Path;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from defaults, the global config file, and environment.
    pub fn load() -> Result<BazaarConfig, ApiError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = env::add_to_builder(builder);
        let config: BazaarConfig = builder.build()?.try_deserialize()?;
        debug!(base_url = %config.api.base_url, "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from an explicit file (required) plus environment.
    /// The global config file is skipped.
    pub fn load_from_file(path: &Path) -> Result<BazaarConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = builder_with_defaults()?.add_source(File::from(path).required(true));
        let builder = env::add_to_builder(builder);
        let config: BazaarConfig = builder.build()?.try_deserialize()?;
        debug!(config_path = %path.display(), "Configuration loaded from file");
        Ok(config)
    }
}
