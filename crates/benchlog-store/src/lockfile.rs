use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::StoreError;

/// Exclusive writer lock on a data file, held as a `<file>.lock` sidecar.
/// The sidecar is removed when the lock is dropped.
#[derive(Debug)]
pub struct LockFile {
    path: PathBuf,
    _handle: std::fs::File,
}

impl LockFile {
    pub fn acquire(target: &Path) -> Result<Self, StoreError> {
        let lock_path = target.with_extension("lock");
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
        {
            Ok(handle) => Ok(Self {
                path: lock_path,
                _handle: handle,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(StoreError::LockContention(target.to_path_buf()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Retry [`LockFile::acquire`] up to `retries` extra times, sleeping
    /// `backoff` between attempts.
    pub fn acquire_with_retry(
        target: &Path,
        retries: u32,
        backoff: Duration,
    ) -> Result<Self, StoreError> {
        let mut attempt = 0;
        loop {
            match Self::acquire(target) {
                Err(StoreError::LockContention(_)) if attempt < retries => {
                    attempt += 1;
                    tracing::debug!(
                        "lock on {} held, retry {}/{}",
                        target.display(),
                        attempt,
                        retries
                    );
                    std::thread::sleep(backoff);
                }
                Err(StoreError::LockContention(path)) => {
                    tracing::warn!(
                        "giving up on lock for {} after {} retries",
                        path.display(),
                        retries
                    );
                    return Err(StoreError::LockContention(path));
                }
                other => return other,
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
