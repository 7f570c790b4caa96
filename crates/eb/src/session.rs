//! A loaded address book bound to its store.
//!
//! Every command line goes through [`Session::run_line`]: parse, execute,
//! and save when the book changed. A failed save rolls the in-memory book
//! back so it never runs ahead of what is on disk.

use anyhow::Result;
use estate_core::book::AddressBook;
use estate_storage::Storage;
use tracing::{debug, info};

use crate::actions::{CommandResult, ExecSettings, execute};
use crate::context::RuntimeContext;

pub struct Session {
    store: Box<dyn Storage>,
    book: AddressBook,
    settings: ExecSettings,
}

impl Session {
    /// Opens the store selected by `ctx` and loads the book.
    ///
    /// # Errors
    ///
    /// Fails if the data file cannot be read or is corrupt. A corrupt file is
    /// left untouched.
    pub fn open(ctx: &RuntimeContext) -> Result<Self> {
        let store = ctx.open_store()?;
        let settings = ExecSettings {
            default_limit: ctx.config.default_limit,
            readonly: ctx.readonly,
        };
        Self::with_store(store, settings)
    }

    pub fn with_store(store: Box<dyn Storage>, settings: ExecSettings) -> Result<Self> {
        let book = store.load().map_err(|e| {
            let hint = if e.is_corrupt() {
                "; the file was left untouched, repair it or run `eb init --force`"
            } else {
                ""
            };
            anyhow::Error::new(e).context(format!(
                "failed to load address book from {}{hint}",
                store.location()
            ))
        })?;
        info!(
            location = %store.location(),
            contacts = book.contacts().len(),
            properties = book.properties().len(),
            "address book loaded"
        );
        Ok(Self {
            store,
            book,
            settings,
        })
    }

    /// Parses and runs one command line.
    ///
    /// # Errors
    ///
    /// Parse errors, rejected changes and save failures. After a save failure
    /// the book is restored to its state before the command.
    pub fn run_line(&mut self, line: &str) -> Result<CommandResult> {
        let command = estate_parser::parse(line)?;
        debug!(word = %command.word(), "parsed command");

        let snapshot = command.is_mutating().then(|| self.book.clone());
        let result = execute(&mut self.book, command, &self.settings)?;

        if result.mutated {
            if let Err(e) = self.store.save(&self.book) {
                if let Some(previous) = snapshot {
                    self.book = previous;
                }
                return Err(anyhow::Error::new(e).context(format!(
                    "failed to save address book to {}",
                    self.store.location()
                )));
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
impl Session {
    pub fn book(&self) -> &AddressBook {
        &self.book
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_core::sample::sample_book;
    use estate_storage::{JsonStore, MemoryStore, StorageError};

    /// Loads fine, refuses every save.
    struct FailingStore;

    impl Storage for FailingStore {
        fn load(&self) -> estate_storage::error::Result<AddressBook> {
            Ok(AddressBook::new())
        }

        fn save(&self, _book: &AddressBook) -> estate_storage::error::Result<()> {
            Err(StorageError::Io {
                path: "/nowhere/book.json".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }

        fn location(&self) -> String {
            "/nowhere/book.json".to_string()
        }
    }

    #[test]
    fn mutations_are_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.json");
        let mut session =
            Session::with_store(Box::new(JsonStore::new(&path)), ExecSettings::default()).unwrap();
        session
            .run_line("addp a/7 Holland Grove Drive pc/278844 fa/300 bed/5 bath/4 pr/4200000")
            .unwrap();

        let reloaded = JsonStore::new(&path).load().unwrap();
        assert_eq!(reloaded.properties().len(), 1);
    }

    #[test]
    fn queries_do_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.json");
        let mut session =
            Session::with_store(Box::new(JsonStore::new(&path)), ExecSettings::default()).unwrap();
        session.run_line("listc").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn failed_save_rolls_back() {
        let mut session =
            Session::with_store(Box::new(FailingStore), ExecSettings::default()).unwrap();
        let err = session
            .run_line("addc n/John Doe p/98765432 e/johnd@example.com")
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to save address book"), "{err:#}");
        assert!(session.book().is_empty());
    }

    #[test]
    fn corrupt_file_points_at_init() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.json");
        std::fs::write(&path, "[1, 2").unwrap();
        let err = Session::with_store(Box::new(JsonStore::new(&path)), ExecSettings::default())
            .err()
            .unwrap();
        assert!(format!("{err:#}").contains("eb init --force"), "{err:#}");

        let missing_dir = dir.path().join("nope").join("book.json");
        assert!(
            Session::with_store(Box::new(JsonStore::new(&missing_dir)), ExecSettings::default())
                .is_ok()
        );
    }

    #[test]
    fn rejected_commands_leave_the_book_alone() {
        let store = MemoryStore::with_book(sample_book().unwrap());
        let mut session = Session::with_store(Box::new(store), ExecSettings::default()).unwrap();
        let before = session.book().clone();
        assert!(session.run_line("deletec 99").is_err());
        assert!(session.run_line("addc n/Alex Yeoh p/11111111 e/a@b.co").is_err());
        assert_eq!(session.book(), &before);
    }
}
