use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not a benchlog store: {0}")]
    NotInitialized(PathBuf),
    #[error("store already initialized: {0}")]
    AlreadyInitialized(PathBuf),
    #[error("lock contention on {0}")]
    LockContention(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Core(#[from] benchlog_core::CoreError),
    #[error("config error: {0}")]
    Config(String),
}
