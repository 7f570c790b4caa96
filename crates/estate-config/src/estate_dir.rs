//! Discovery and creation of the `.estate/` project directory.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::ConfigError;

/// The name of the project directory.
pub const ESTATE_DIR_NAME: &str = ".estate";

/// Environment variable that overrides discovery.
pub const ESTATE_DIR_ENV: &str = "ESTATE_DIR";

/// Finds the `.estate/` directory for `start`.
///
/// `ESTATE_DIR` wins when it names an existing directory; otherwise the tree
/// is walked upwards from `start` until a `.estate/` child is found.
pub fn find_estate_dir(start: &Path) -> Option<PathBuf> {
    if let Some(env_dir) = std::env::var_os(ESTATE_DIR_ENV) {
        let env_path = PathBuf::from(env_dir);
        if env_path.is_dir() {
            debug!(path = ?env_path, "using {ESTATE_DIR_ENV}");
            return Some(env_path);
        }
    }

    let start = start.canonicalize().ok()?;
    start
        .ancestors()
        .map(|dir| dir.join(ESTATE_DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

/// Like [`find_estate_dir`], but a missing directory is an error.
///
/// # Errors
///
/// Returns [`ConfigError::EstateDirNotFound`] if no `.estate/` directory is
/// found.
pub fn find_estate_dir_or_error(start: &Path) -> Result<PathBuf, ConfigError> {
    find_estate_dir(start).ok_or(ConfigError::EstateDirNotFound)
}

/// Creates `.estate/` under `path` (or `path` itself if it is already named
/// `.estate`) and returns it.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if directory creation fails.
pub fn ensure_estate_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let estate_dir = if path.ends_with(ESTATE_DIR_NAME) {
        path.to_path_buf()
    } else {
        path.join(ESTATE_DIR_NAME)
    };
    std::fs::create_dir_all(&estate_dir)?;
    Ok(estate_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_estate_dir_in_child() {
        let dir = tempfile::tempdir().unwrap();
        let estate = dir.path().join(".estate");
        std::fs::create_dir(&estate).unwrap();
        let child = dir.path().join("listings").join("2024");
        std::fs::create_dir_all(&child).unwrap();

        let found = find_estate_dir(&child).unwrap();
        assert_eq!(found.canonicalize().unwrap(), estate.canonicalize().unwrap());
        assert!(find_estate_dir_or_error(dir.path()).is_ok());
    }

    #[test]
    fn test_find_estate_dir_missing_start() {
        assert!(find_estate_dir(Path::new("/definitely/not/here")).is_none());
    }

    #[test]
    fn test_ensure_estate_dir() {
        let dir = tempfile::tempdir().unwrap();
        let created = ensure_estate_dir(dir.path()).unwrap();
        assert!(created.is_dir());
        assert!(created.ends_with(".estate"));
        assert_eq!(ensure_estate_dir(&created).unwrap(), created);
    }
}
