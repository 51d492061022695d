use benchlog_core::codec::DEFAULT_VARIABLE;
use benchlog_core::DuplicatePolicy;
use serde::{Deserialize, Serialize};

use crate::layout::StoreLayout;
use crate::StoreError;

/// Contents of `benchlog.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Repository the history belongs to. Only used when the data file does
    /// not exist yet; afterwards the file's own `repoUrl` wins.
    pub repo_url: String,
    /// Global the snapshot is assigned to in the data file.
    pub variable: String,
    /// Data file name, relative to the store directory.
    pub data_file: String,
    pub duplicates: DuplicatePolicy,
    pub lock_retries: u32,
    pub lock_backoff_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            repo_url: String::new(),
            variable: DEFAULT_VARIABLE.to_string(),
            data_file: "data.js".to_string(),
            duplicates: DuplicatePolicy::default(),
            lock_retries: 50,
            lock_backoff_ms: 100,
        }
    }
}

impl StoreConfig {
    pub fn new(repo_url: impl Into<String>) -> Self {
        Self {
            repo_url: repo_url.into(),
            ..Self::default()
        }
    }
}

pub fn write_config(layout: &StoreLayout, config: &StoreConfig) -> Result<(), StoreError> {
    let toml_str =
        toml::to_string_pretty(config).map_err(|e| StoreError::Config(e.to_string()))?;
    std::fs::write(layout.config_file(), toml_str)?;
    Ok(())
}

pub fn read_config(layout: &StoreLayout) -> Result<StoreConfig, StoreError> {
    let content = std::fs::read_to_string(layout.config_file())?;
    let config: StoreConfig =
        toml::from_str(&content).map_err(|e| StoreError::Config(e.to_string()))?;
    if config.data_file.trim().is_empty() {
        return Err(StoreError::Config("data_file must not be empty".into()));
    }
    Ok(config)
}
