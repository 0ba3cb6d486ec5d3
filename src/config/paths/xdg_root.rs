//! XDG base directory helpers.
//!
//! `XDG_CONFIG_HOME` / `XDG_DATA_HOME` win when set; otherwise `directories`
//! supplies the platform default (`~/.config`, `~/.local/share` on Linux).

use crate::error::ApiError;
use directories::BaseDirs;
use std::path::PathBuf;

const APP_DIR: &str = "bazaar";

fn base_dirs() -> Result<BaseDirs, ApiError> {
    BaseDirs::new()
        .ok_or_else(|| ApiError::ConfigError("Could not determine home directory".to_string()))
}

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
}

/// `$XDG_CONFIG_HOME`, falling back to the platform config dir.
pub fn config_home() -> Result<PathBuf, ApiError> {
    if let Some(dir) = env_dir("XDG_CONFIG_HOME") {
        return Ok(dir);
    }
    Ok(base_dirs()?.config_dir().to_path_buf())
}

/// `$XDG_DATA_HOME`, falling back to the platform data dir.
pub fn data_home() -> Result<PathBuf, ApiError> {
    if let Some(dir) = env_dir("XDG_DATA_HOME") {
        return Ok(dir);
    }
    Ok(base_dirs()?.data_dir().to_path_buf())
}

/// `<config home>/bazaar`. Not created here; the store creates it on first write.
pub fn app_config_dir() -> Result<PathBuf, ApiError> {
    Ok(config_home()?.join(APP_DIR))
}

/// `<data home>/bazaar`
pub fn data_dir() -> Result<PathBuf, ApiError> {
    Ok(data_home()?.join(APP_DIR))
}

/// Default location of the local agents file.
pub fn agents_file() -> Result<PathBuf, ApiError> {
    Ok(app_config_dir()?.join("agents.toml"))
}
