//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the command interpreter.

use crate::domain::database::Database;
use crate::domain::errors::StoreError;

/// Whole-database persistence.
///
/// Production: `FileDatabaseStore` (lock-protected file)
/// Testing: `InMemoryStore`
///
/// Each call is its own unit of work: implementations that share state
/// between processes must take and release their lock inside the call
/// (INVARIANT-3).
pub trait DatabaseStore {
    /// Read the current database. A missing or empty backing file is an
    /// empty database.
    fn load(&self) -> Result<Database, StoreError>;

    /// Replace the persisted database with `db`.
    fn save(&self, db: &Database) -> Result<(), StoreError>;
}

impl<S: DatabaseStore + ?Sized> DatabaseStore for &S {
    fn load(&self) -> Result<Database, StoreError> {
        (**self).load()
    }

    fn save(&self, db: &Database) -> Result<(), StoreError> {
        (**self).save(db)
    }
}

/// Encoding of a database to and from bytes.
pub trait DatabaseCodec: Send + Sync {
    fn encode(&self, db: &Database) -> Result<Vec<u8>, String>;

    fn decode(&self, bytes: &[u8]) -> Result<Database, String>;
}
