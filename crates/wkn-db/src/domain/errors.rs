//! # Domain Errors
//!
//! Error types for the WKN store and command interpreter.
//!
//! ## Design Principles
//!
//! - Each error maps to one failure mode of a command or persistence call
//! - Every error is recovered at the command boundary; none is fatal
//! - No panics in domain logic (use Result instead)

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from acquiring the database lock.
#[derive(Debug, Error)]
pub enum LockError {
    /// The lock was still held by someone else after every attempt.
    #[error("database at {} is locked (gave up after {attempts} attempts)", .path.display())]
    Timeout { path: PathBuf, attempts: u32 },

    /// Any other failure while creating or locking the lock file.
    #[error("lock file {} could not be created: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors from loading or saving the database file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("couldn't acquire lock: {0}")]
    Lock(#[from] LockError),

    /// Reading, writing or renaming the backing file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backing file exists but could not be decoded.
    #[error("database file {} is corrupt: {message}", .path.display())]
    Corrupt { path: PathBuf, message: String },

    #[error("failed to encode database: {message}")]
    Encode { message: String },
}

/// Errors reported by a single command.
///
/// Rendered as one line by the interpreter; the loop always continues.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Missing arguments; the payload is the usage line.
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Array '{0}' already exists")]
    DuplicateArray(String),

    #[error("'{0}' does not exist")]
    UnknownArray(String),

    #[error("invalid reference '{0}', expected <array>.<index>")]
    InvalidReferenceFormat(String),

    #[error("index {index} out of bounds for '{name}' (length {len})")]
    IndexOutOfBounds { name: String, index: i64, len: usize },

    /// A `new` argument that is not an integer. Reported as a warning; the
    /// command still succeeds with the remaining values.
    #[error("Invalid number: {0}")]
    InvalidNumberToken(String),

    #[error("negative exponent {0} is not supported")]
    NegativeExponent(i64),

    #[error("'{0}' is not a supported operation")]
    UnsupportedOperation(String),

    #[error("failed to load database: {0}")]
    Load(#[source] StoreError),

    #[error("failed to save database: {0}")]
    Save(#[source] StoreError),
}
