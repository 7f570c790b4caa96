//! Persistence for the estatebook address book.
//!
//! Provides the [`Storage`] trait, a JSON file implementation ([`JsonStore`])
//! and an in-memory one ([`MemoryStore`]).

pub mod error;
pub mod json;
pub mod memory;
pub mod traits;

pub use error::StorageError;
pub use json::JsonStore;
pub use memory::MemoryStore;
pub use traits::Storage;
