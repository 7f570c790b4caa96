//! Configuration management for estatebook.
//!
//! This crate finds the `.estate/` project directory, loads
//! `.estate/config.yaml` layered with `ESTATE_*` environment variables, and
//! writes the file back for `eb config set`.

pub mod config;
pub mod estate_dir;

pub use config::{
    CONFIG_FILE_NAME, ColorChoice, ConfigError, EstateConfig, load_config, load_file_config,
    save_config,
};
pub use estate_dir::{
    ESTATE_DIR_ENV, ensure_estate_dir, find_estate_dir, find_estate_dir_or_error,
};
