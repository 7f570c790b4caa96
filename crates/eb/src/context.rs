//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what every command handler needs: the global
//! flags, the discovered `.estate/` directory and the effective configuration.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use estate_config::{EstateConfig, find_estate_dir, find_estate_dir_or_error, load_config};
use estate_storage::{JsonStore, MemoryStore, Storage};
use tracing::debug;

use crate::cli::GlobalArgs;

/// `--data` value selecting a throwaway in-memory book.
pub const MEMORY_DATA: &str = ":memory:";

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Explicit data file from `--data`.
    pub data: Option<String>,

    /// The `.estate/` directory, if one was found.
    pub estate_dir: Option<PathBuf>,

    /// Effective configuration (defaults when there is no `.estate/`).
    pub config: EstateConfig,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Read-only mode: block commands that change the book.
    pub readonly: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Builds the context from parsed global arguments.
    ///
    /// # Errors
    ///
    /// Fails if `.estate/config.yaml` or the `ESTATE_*` environment holds an
    /// invalid value.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let cwd = env::current_dir().context("failed to get current directory")?;
        let estate_dir = find_estate_dir(&cwd);
        let config = match &estate_dir {
            Some(dir) => load_config(dir)
                .with_context(|| format!("failed to load configuration from {}", dir.display()))?,
            None => EstateConfig::default(),
        };

        Ok(Self {
            data: global.data.clone(),
            estate_dir,
            config,
            json: global.json,
            readonly: global.readonly,
            verbose: global.verbose,
            quiet: global.quiet,
        })
    }

    /// The `.estate/` directory, or an error telling the user to run `eb init`.
    pub fn require_estate_dir(&self) -> Result<PathBuf> {
        match &self.estate_dir {
            Some(dir) => Ok(dir.clone()),
            None => {
                let cwd = env::current_dir().context("failed to get current directory")?;
                Ok(find_estate_dir_or_error(&cwd)?)
            }
        }
    }

    /// Opens the storage backend selected by `--data` or the configuration.
    pub fn open_store(&self) -> Result<Box<dyn Storage>> {
        match self.data.as_deref() {
            Some(MEMORY_DATA) => {
                debug!("using in-memory store");
                Ok(Box::new(MemoryStore::new()))
            }
            Some(path) => {
                debug!(path, "using data file from --data");
                Ok(Box::new(JsonStore::new(path)))
            }
            None => {
                let estate_dir = self.require_estate_dir()?;
                let path = self.config.data_path(&estate_dir);
                debug!(?path, "using data file from configuration");
                Ok(Box::new(JsonStore::new(path)))
            }
        }
    }
}

#[cfg(test)]
impl RuntimeContext {
    /// A context over an in-memory book with default configuration.
    pub fn in_memory() -> Self {
        Self {
            data: Some(MEMORY_DATA.to_string()),
            estate_dir: None,
            config: EstateConfig::default(),
            json: false,
            readonly: false,
            verbose: false,
            quiet: false,
        }
    }
}
