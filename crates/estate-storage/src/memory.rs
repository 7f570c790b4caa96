//! [`MemoryStore`] -- keeps the last saved book in memory.

use std::sync::Mutex;

use estate_core::book::AddressBook;
use tracing::debug;

use crate::error::Result;
use crate::traits::Storage;

/// In-memory [`Storage`] used by tests and `--data :memory:`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    book: Mutex<AddressBook>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts out holding `book`.
    pub fn with_book(book: AddressBook) -> Self {
        Self {
            book: Mutex::new(book),
        }
    }
}

impl Storage for MemoryStore {
    fn load(&self) -> Result<AddressBook> {
        let book = self.book.lock().unwrap_or_else(|e| e.into_inner());
        Ok(book.clone())
    }

    fn save(&self, book: &AddressBook) -> Result<()> {
        debug!(
            contacts = book.contacts().len(),
            properties = book.properties().len(),
            "saving in-memory address book"
        );
        let mut stored = self.book.lock().unwrap_or_else(|e| e.into_inner());
        *stored = book.clone();
        Ok(())
    }

    fn location(&self) -> String {
        ":memory:".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_core::sample::sample_book;

    #[test]
    fn starts_empty_and_keeps_saves() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());

        let book = sample_book().unwrap();
        store.save(&book).unwrap();
        assert_eq!(store.load().unwrap(), book);
        assert_eq!(store.location(), ":memory:");
    }
}
