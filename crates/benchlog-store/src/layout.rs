use std::path::{Path, PathBuf};

use crate::StoreError;

pub const CONFIG_FILE: &str = "benchlog.toml";

/// Files of a store directory.
#[derive(Debug, Clone)]
pub struct StoreLayout {
    dir: PathBuf,
}

impl StoreLayout {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    pub fn data_file(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn create_dirs(&self) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }
}
