//! # Adapters Module
//!
//! Contains adapter implementations for the WKN store.
//!
//! ## Modules
//!
//! - `lock`: Cross-process database locking (scoped guard)
//! - `codec`: JSON and bincode encodings of the database
//! - `storage`: File-backed and in-memory `DatabaseStore` implementations

pub mod codec;
pub mod lock;
pub mod storage;

pub use crate::domain::errors::LockError;
pub use codec::{BincodeCodec, JsonCodec};
pub use lock::DatabaseLock;
pub use storage::{FileDatabaseStore, InMemoryStore};
