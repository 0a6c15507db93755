//! Storage Adapters
//!
//! Implementations of the `DatabaseStore` trait.

mod file;
mod memory;

pub use file::FileDatabaseStore;
pub use memory::InMemoryStore;
