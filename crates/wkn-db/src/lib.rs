//! # WKN Database Engine
//!
//! A persistent store of named integer arrays shared between several
//! independent processes. Every read-modify-write cycle is serialized by an
//! advisory, whole-file lock.
//!
//! ## Architecture
//!
//! ```text
//! input line ──→ Interpreter ──reload──→ DatabaseStore::load ──→ [lock] read  [unlock]
//!                    │
//!                    ├── resolve(ref) / power(base, exp)
//!                    │
//!                    └──persist──→ DatabaseStore::save ──→ [lock] write tmp, rename [unlock]
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Unique Names | Array names are unique within a database |
//! | 2 | Single Holder | At most one process holds the lock at a time |
//! | 3 | Scoped Lock | Every load/save releases the lock on every exit path |
//! | 4 | Fresh Reads | State-affecting commands reload before dispatch |
//! | 5 | No Torn Files | Saves go through a temp file and a rename |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Database value, errors, config, reference resolver, power
//! - `ports/` - Port traits (`DatabaseStore`, `DatabaseCodec`)
//! - `adapters/` - File lock, codecs, file-backed and in-memory stores
//! - `interpreter/` - Command parsing and dispatch
//!
//! ## Usage
//!
//! ```ignore
//! use wkn_db::{FileDatabaseStore, Interpreter, StoreConfig};
//!
//! let store = FileDatabaseStore::new(StoreConfig::default());
//! let mut interpreter = Interpreter::new(store);
//!
//! let reply = interpreter.execute("new a 1 2 3");
//! assert_eq!(reply.lines, vec!["CREATED (3)".to_string()]);
//! ```

pub mod adapters;
pub mod domain;
pub mod interpreter;
pub mod ports;

pub use adapters::{
    BincodeCodec, DatabaseLock, FileDatabaseStore, InMemoryStore, JsonCodec, LockError,
};
pub use domain::config::{CorruptPolicy, DatabaseFormat, LockConfig, LockStrategy, StoreConfig};
pub use domain::database::Database;
pub use domain::errors::{CommandError, StoreError};
pub use domain::power::{power, MODULUS};
pub use domain::reference::{resolve, Reference};
pub use interpreter::{Command, Control, Interpreter, Reply};
pub use ports::{DatabaseCodec, DatabaseStore};
