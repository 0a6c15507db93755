//! # Domain Layer
//!
//! Pure domain logic with no I/O.
//!
//! ## Modules
//!
//! - `database`: The array-name to integer-sequence mapping
//! - `errors`: Store and command error taxonomy
//! - `config`: Store, lock and format configuration
//! - `reference`: `<array>.<index>` resolution
//! - `power`: Modular exponentiation over referenced elements

pub mod config;
pub mod database;
pub mod errors;
pub mod power;
pub mod reference;
