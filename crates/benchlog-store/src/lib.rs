pub mod config;
pub mod error;
pub mod layout;
pub mod lockfile;
pub mod persist;

pub use config::StoreConfig;
pub use error::StoreError;

use std::path::{Path, PathBuf};
use std::time::Duration;

use benchlog_core::codec::{decode_opt, encode_with_variable};
use benchlog_core::{AppendOutcome, Run, Snapshot};

use crate::layout::StoreLayout;
use crate::lockfile::LockFile;

/// A benchmark history persisted as a `data.js` file in a store directory.
///
/// Writers serialize through a lock file and replace the data file
/// atomically; readers never take the lock.
pub struct HistoryStore {
    layout: StoreLayout,
    config: StoreConfig,
}

impl HistoryStore {
    pub fn init(dir: &Path, config: StoreConfig) -> Result<Self, StoreError> {
        let layout = StoreLayout::new(dir);
        if layout.config_file().exists() {
            return Err(StoreError::AlreadyInitialized(dir.to_path_buf()));
        }
        layout.create_dirs()?;
        config::write_config(&layout, &config)?;
        tracing::info!("initialized benchmark store at {}", dir.display());
        Ok(Self { layout, config })
    }

    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        let layout = StoreLayout::new(dir);
        if !layout.config_file().exists() {
            return Err(StoreError::NotInitialized(dir.to_path_buf()));
        }
        let config = config::read_config(&layout)?;
        Ok(Self { layout, config })
    }

    pub fn dir(&self) -> &Path {
        self.layout.dir()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn data_file(&self) -> PathBuf {
        self.layout.data_file(&self.config.data_file)
    }

    /// Read the last persisted snapshot. A missing data file is an empty
    /// history; a malformed one is an error and is left untouched.
    pub fn load(&self) -> Result<Snapshot, StoreError> {
        let path = self.data_file();
        let text = persist::read_optional(&path)?;
        if text.is_none() {
            tracing::debug!("no history at {}, starting empty", path.display());
        }
        let snapshot = decode_opt(text.as_deref(), &self.config.repo_url)?;
        Ok(snapshot)
    }

    /// Append `run` to `suite` and persist the result.
    ///
    /// The read-modify-write happens under the store lock against a fresh
    /// read of the data file, so concurrent writers cannot lose each other's
    /// runs. If the run is rejected nothing is written.
    pub fn append(&self, suite: &str, run: Run) -> Result<Snapshot, StoreError> {
        let path = self.data_file();
        let _lock = LockFile::acquire_with_retry(
            &path,
            self.config.lock_retries,
            Duration::from_millis(self.config.lock_backoff_ms),
        )?;
        tracing::debug!("acquired lock for {}", path.display());

        let mut snapshot = self.load()?;
        let commit = run.commit.id.clone();
        let date = run.date;
        match snapshot.append(suite, run, self.config.duplicates)? {
            AppendOutcome::Appended { index } => {
                self.persist(&snapshot)?;
                tracing::info!(
                    "appended run for commit {} at {} to '{}' (#{})",
                    commit,
                    date,
                    suite,
                    index + 1
                );
            }
            AppendOutcome::Skipped => {
                tracing::warn!(
                    "run for commit {} at {} already in '{}', skipped",
                    commit,
                    date,
                    suite
                );
            }
        }
        Ok(snapshot)
    }

    /// Render the persisted history in its on-disk form.
    pub fn export(&self) -> Result<String, StoreError> {
        let snapshot = self.load()?;
        self.render(&snapshot)
    }

    fn render(&self, snapshot: &Snapshot) -> Result<String, StoreError> {
        Ok(encode_with_variable(snapshot, &self.config.variable)?)
    }

    fn persist(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let text = self.render(snapshot)?;
        let path = self.data_file();
        persist::write_atomic(&path, text.as_bytes())?;
        tracing::debug!("wrote {} bytes to {}", text.len(), path.display());
        Ok(())
    }
}
