//! # File Lock Implementation
//!
//! Two strategies share one contract: bounded attempts with a fixed delay,
//! `LockError::Timeout` when the lock stays busy, `LockError::Io` for anything
//! else, and release on drop.
//!
//! - `Token`: exclusive-create of the lock file (`O_CREAT | O_EXCL`). The
//!   file's existence is the lock; release deletes it. Nothing is written into
//!   it, so there is no owner identity and no expiry.
//! - `Flock`: `fs2` advisory exclusive lock (flock on Unix, LockFileEx on
//!   Windows) on the lock file. The file itself is left in place on release.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;

use fs2::FileExt;
use tracing::{debug, warn};

use crate::domain::config::{LockConfig, LockStrategy};
use crate::domain::errors::LockError;

/// Exclusive lock on a database file.
///
/// Held for the duration of a single load or save, released on drop (RAII).
/// Not reentrant: acquiring twice from the same process without releasing
/// times out like any other contention.
///
/// # Example
///
/// ```ignore
/// let lock = DatabaseLock::acquire(Path::new(".wkn.lock"), &LockConfig::default())?;
/// // Lock is held until `lock` goes out of scope
/// ```
#[derive(Debug)]
pub struct DatabaseLock {
    /// Open handle on the lock file; `None` once released.
    file: Option<File>,
    path: PathBuf,
    strategy: LockStrategy,
}

impl DatabaseLock {
    /// Acquire the lock at `lock_path`.
    ///
    /// Makes up to `config.max_attempts` attempts, sleeping
    /// `config.retry_delay` between them. No fairness: a busy lock may be won
    /// by another process on every attempt.
    ///
    /// # Errors
    ///
    /// - `LockError::Timeout` if the lock is still held after the last attempt
    /// - `LockError::Io` on any other failure (missing directory, permissions)
    pub fn acquire(lock_path: &Path, config: &LockConfig) -> Result<Self, LockError> {
        let attempts = config.max_attempts.max(1);

        for attempt in 1..=attempts {
            let outcome = match config.strategy {
                LockStrategy::Token => Self::try_create_token(lock_path),
                LockStrategy::Flock => Self::try_flock(lock_path),
            };

            match outcome {
                Ok(Some(file)) => {
                    debug!(path = %lock_path.display(), attempt, "lock acquired");
                    return Ok(Self {
                        file: Some(file),
                        path: lock_path.to_path_buf(),
                        strategy: config.strategy,
                    });
                }
                Ok(None) if attempt < attempts => {
                    debug!(
                        path = %lock_path.display(),
                        attempt,
                        max_attempts = attempts,
                        "lock busy, retrying"
                    );
                    thread::sleep(config.retry_delay);
                }
                Ok(None) => {}
                Err(source) => {
                    return Err(LockError::Io {
                        path: lock_path.to_path_buf(),
                        source,
                    });
                }
            }
        }

        warn!(path = %lock_path.display(), attempts, "giving up on busy lock");
        Err(LockError::Timeout {
            path: lock_path.to_path_buf(),
            attempts,
        })
    }

    /// `Ok(None)` when the token already exists.
    fn try_create_token(path: &Path) -> io::Result<Option<File>> {
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => Ok(Some(file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// `Ok(None)` when another handle holds the flock.
    fn try_flock(path: &Path) -> io::Result<Option<File>> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        match FileExt::try_lock_exclusive(&file) {
            Ok(()) => Ok(Some(file)),
            Err(e) if is_contended(&e) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get the path to the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn strategy(&self) -> LockStrategy {
        self.strategy
    }

    /// Release now instead of at end of scope.
    pub fn release(mut self) {
        self.release_inner();
    }

    /// Best effort: failures are logged, never returned.
    fn release_inner(&mut self) {
        let Some(file) = self.file.take() else {
            return;
        };

        match self.strategy {
            LockStrategy::Token => {
                // Close before deleting; Windows refuses to remove open files.
                drop(file);
                if let Err(e) = std::fs::remove_file(&self.path) {
                    warn!(path = %self.path.display(), error = %e, "failed to remove lock token");
                }
            }
            LockStrategy::Flock => {
                // Left in place so every process locks the same inode.
                if let Err(e) = FileExt::unlock(&file) {
                    warn!(path = %self.path.display(), error = %e, "failed to unlock lock file");
                }
            }
        }
        debug!(path = %self.path.display(), "lock released");
    }
}

impl Drop for DatabaseLock {
    fn drop(&mut self) {
        self.release_inner();
    }
}

fn is_contended(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}
