//! The [`Storage`] trait -- the public API for address book persistence.
//!
//! Consumers depend on this trait rather than on a concrete backend so that
//! the JSON file store and the in-memory store are interchangeable.

use estate_core::book::AddressBook;

use crate::error::Result;

/// Loads and saves a whole [`AddressBook`].
pub trait Storage {
    /// Reads the stored book. A store that has never been saved yields an
    /// empty book.
    fn load(&self) -> Result<AddressBook>;

    /// Replaces the stored book with `book`.
    fn save(&self, book: &AddressBook) -> Result<()>;

    /// Human-readable description of where the book lives.
    fn location(&self) -> String;
}
