use std::path::PathBuf;

use parking_lot::Mutex;

use crate::domain::database::Database;
use crate::domain::errors::{LockError, StoreError};
use crate::ports::outbound::DatabaseStore;

#[derive(Default)]
struct MemoryState {
    db: Database,
    saves: usize,
    fail_next_load: bool,
    fail_next_save: bool,
}

/// In-memory store for unit tests.
///
/// Can be told to fail the next load or save with a lock timeout, to exercise
/// the interpreter's abort path without touching the filesystem.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<MemoryState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `db` already persisted.
    pub fn with_database(db: Database) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                db,
                ..MemoryState::default()
            }),
        }
    }

    /// Currently persisted database.
    pub fn snapshot(&self) -> Database {
        self.state.lock().db.clone()
    }

    /// Number of successful saves so far.
    pub fn saves(&self) -> usize {
        self.state.lock().saves
    }

    pub fn fail_next_load(&self) {
        self.state.lock().fail_next_load = true;
    }

    pub fn fail_next_save(&self) {
        self.state.lock().fail_next_save = true;
    }

    fn busy() -> StoreError {
        StoreError::Lock(LockError::Timeout {
            path: PathBuf::from("<memory>"),
            attempts: 0,
        })
    }
}

impl DatabaseStore for InMemoryStore {
    fn load(&self) -> Result<Database, StoreError> {
        let mut state = self.state.lock();
        if std::mem::take(&mut state.fail_next_load) {
            return Err(Self::busy());
        }
        Ok(state.db.clone())
    }

    fn save(&self, db: &Database) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        if std::mem::take(&mut state.fail_next_save) {
            return Err(Self::busy());
        }
        state.db = db.clone();
        state.saves += 1;
        Ok(())
    }
}
