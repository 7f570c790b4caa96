//! Storage error types.

use std::path::PathBuf;

/// Errors that can occur while loading or saving an address book.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the data file failed.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The book could not be encoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The data file exists but does not describe a valid address book.
    #[error("data file {} is corrupt: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    /// The data file was written by a newer or unknown format version.
    #[error("data file {} has unsupported format version {found} (expected {expected})", path.display())]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },
}

/// Convenience alias used throughout the storage crate.
pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the file on disk could not be understood.
    ///
    /// Callers must not overwrite such a file.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. } | Self::UnsupportedVersion { .. })
    }
}
