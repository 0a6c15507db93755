//! # Database Process Locking
//!
//! Serializes every load and save across all processes sharing a database
//! file.
//!
//! ## Modules
//!
//! - `file_lock`: `DatabaseLock` guard (marker token or fs2 flock)

mod file_lock;

pub use file_lock::DatabaseLock;
