//! # Store Configuration
//!
//! Configuration for the database file, its lock and its encoding.
//!
//! All values default to the behavior every cooperating process expects:
//! `.wkn` in the working directory, a `.wkn.lock` token, five lock attempts
//! 200 ms apart, and JSON contents.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Default backing file name.
pub const DEFAULT_DB_FILE: &str = ".wkn";

/// Default number of lock acquisition attempts.
pub const DEFAULT_LOCK_ATTEMPTS: u32 = 5;

/// Default delay between lock acquisition attempts.
pub const DEFAULT_LOCK_RETRY_DELAY: Duration = Duration::from_millis(200);

/// How the lock is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockStrategy {
    /// Exclusive-create a marker file; its existence is the lock.
    ///
    /// Interoperates with any process that honors the same marker.
    #[default]
    Token,
    /// OS advisory exclusive lock (flock / LockFileEx) on the lock file.
    ///
    /// Released by the kernel if the holder dies. The lock file stays on disk
    /// after release, so a `Token` process pointed at the same database sees
    /// it as permanently locked: every process sharing a file must use the
    /// same strategy.
    Flock,
}

impl FromStr for LockStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "token" => Ok(LockStrategy::Token),
            "flock" => Ok(LockStrategy::Flock),
            other => Err(format!("unknown lock strategy '{}'", other)),
        }
    }
}

/// What `load` does with a backing file that cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptPolicy {
    /// Fail the command with `StoreError::Corrupt`; the file is left untouched.
    #[default]
    Fail,
    /// Treat the file as an empty database. The next save overwrites it.
    Reset,
}

impl FromStr for CorruptPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fail" => Ok(CorruptPolicy::Fail),
            "reset" => Ok(CorruptPolicy::Reset),
            other => Err(format!("unknown corruption policy '{}'", other)),
        }
    }
}

/// On-disk encoding of the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatabaseFormat {
    #[default]
    Json,
    Bincode,
}

impl FromStr for DatabaseFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(DatabaseFormat::Json),
            "bincode" => Ok(DatabaseFormat::Bincode),
            other => Err(format!("unknown database format '{}'", other)),
        }
    }
}

/// Lock acquisition policy.
#[derive(Debug, Clone)]
pub struct LockConfig {
    /// Total attempts before giving up with `LockError::Timeout` (default: 5).
    pub max_attempts: u32,
    /// Fixed sleep between attempts (default: 200ms).
    pub retry_delay: Duration,
    pub strategy: LockStrategy,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_LOCK_ATTEMPTS,
            retry_delay: DEFAULT_LOCK_RETRY_DELAY,
            strategy: LockStrategy::Token,
        }
    }
}

/// Configuration for a file-backed store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Backing file. The lock and temp files are siblings of it.
    pub db_path: PathBuf,
    pub lock: LockConfig,
    pub corrupt_policy: CorruptPolicy,
    pub format: DatabaseFormat,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            lock: LockConfig::default(),
            corrupt_policy: CorruptPolicy::Fail,
            format: DatabaseFormat::Json,
        }
    }
}

impl StoreConfig {
    /// Create a configuration for the given backing file with default policies.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }

    pub fn with_lock(mut self, lock: LockConfig) -> Self {
        self.lock = lock;
        self
    }

    pub fn with_corrupt_policy(mut self, policy: CorruptPolicy) -> Self {
        self.corrupt_policy = policy;
        self
    }

    pub fn with_format(mut self, format: DatabaseFormat) -> Self {
        self.format = format;
        self
    }

    /// `<db file name>.lock`, next to the backing file.
    pub fn lock_path(&self) -> PathBuf {
        sibling_with_suffix(&self.db_path, ".lock")
    }

    /// `<db file name>.tmp`, next to the backing file.
    pub fn temp_path(&self) -> PathBuf {
        sibling_with_suffix(&self.db_path, ".tmp")
    }
}

/// Append `suffix` to the file name. Unlike `Path::with_extension` this keeps
/// dot-files like `.wkn` intact (`.wkn` -> `.wkn.lock`).
fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from(DEFAULT_DB_FILE));
    name.push(suffix);
    path.with_file_name(name)
}
