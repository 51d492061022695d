use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("corrupt history state: {reason}")]
    CorruptState { reason: String },
    #[error("invalid run: {0}")]
    InvalidRun(String),
    #[error("duplicate run in suite '{suite}': commit {commit} at {date}")]
    DuplicateRun {
        suite: String,
        commit: String,
        date: u64,
    },
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl CoreError {
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptState {
            reason: reason.into(),
        }
    }
}
