//! # Ports
//!
//! Interfaces the interpreter depends on. Adapters live in `crate::adapters`.

pub mod outbound;

pub use outbound::{DatabaseCodec, DatabaseStore};
