//! [`JsonStore`] -- the address book as a single JSON file.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use estate_core::book::AddressBook;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{Result, StorageError};
use crate::json::records::{Document, FORMAT_VERSION, VersionHeader};
use crate::traits::Storage;

/// JSON file implementation of [`Storage`].
///
/// The whole book is rewritten on every save: the document goes to a
/// temporary file next to the target, which is then renamed over it.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses a document without touching the filesystem.
    fn decode(&self, contents: &str) -> Result<AddressBook> {
        let header: VersionHeader = serde_json::from_str(contents)
            .map_err(|e| StorageError::corrupt(&self.path, e.to_string()))?;
        if header.version != FORMAT_VERSION {
            return Err(StorageError::UnsupportedVersion {
                path: self.path.clone(),
                found: header.version,
                expected: FORMAT_VERSION,
            });
        }
        let document: Document = serde_json::from_str(contents)
            .map_err(|e| StorageError::corrupt(&self.path, e.to_string()))?;
        debug!(saved_at = %document.saved_at, "decoded address book document");
        document
            .into_book()
            .map_err(|reason| StorageError::corrupt(&self.path, reason))
    }
}

impl Storage for JsonStore {
    fn load(&self) -> Result<AddressBook> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = ?self.path, "data file not found, starting with an empty book");
                return Ok(AddressBook::new());
            }
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };
        let book = self.decode(&contents).inspect_err(|e| {
            warn!(path = ?self.path, error = %e, "refusing to load data file");
        })?;
        info!(
            path = ?self.path,
            contacts = book.contacts().len(),
            properties = book.properties().len(),
            "loaded address book"
        );
        Ok(book)
    }

    fn save(&self, book: &AddressBook) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| StorageError::io(&dir, e))?;

        let document = Document::from_book(book);
        let mut temp = NamedTempFile::new_in(&dir).map_err(|e| StorageError::io(&dir, e))?;
        serde_json::to_writer_pretty(&mut temp, &document)?;
        temp.write_all(b"\n")
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| StorageError::io(temp.path(), e))?;
        temp.persist(&self.path)
            .map_err(|e| StorageError::io(&self.path, e.error))?;

        info!(
            path = ?self.path,
            contacts = document.contacts.len(),
            properties = document.properties.len(),
            "saved address book"
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
