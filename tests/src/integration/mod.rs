//! # Integration Tests
//!
//! Every "process" here is its own `FileDatabaseStore` (and usually its own
//! thread) sharing nothing but the path of the database file.

pub mod concurrency;
pub mod persistence;

#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::Path;
    use std::time::Duration;

    use wkn_db::{FileDatabaseStore, Interpreter, LockConfig, LockStrategy, StoreConfig};

    /// Config for a database at `dir/.wkn` with a patient lock, so that
    /// contention in tests resolves instead of timing out.
    pub fn patient_config(dir: &Path, strategy: LockStrategy) -> StoreConfig {
        StoreConfig::new(dir.join(".wkn")).with_lock(LockConfig {
            max_attempts: 2000,
            retry_delay: Duration::from_millis(2),
            strategy,
        })
    }

    /// Config that gives up on a busy lock almost immediately.
    pub fn impatient_config(dir: &Path) -> StoreConfig {
        StoreConfig::new(dir.join(".wkn")).with_lock(LockConfig {
            max_attempts: 2,
            retry_delay: Duration::from_millis(5),
            strategy: LockStrategy::Token,
        })
    }

    /// A fresh "process": its own store and interpreter.
    pub fn process(config: &StoreConfig) -> Interpreter<FileDatabaseStore> {
        Interpreter::new(FileDatabaseStore::new(config.clone()))
    }
}
