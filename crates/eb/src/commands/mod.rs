//! Handlers for the `eb` subcommands.

pub mod completion;
pub mod config_cmd;
pub mod init;
pub mod run;
pub mod shell;
