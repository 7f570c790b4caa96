//! Parse error types.

use estate_core::validation::ValidationError;

/// Errors produced while turning a command line into a [`Command`](crate::command::Command).
///
/// Messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no command given. Type 'help' to see all commands")]
    Empty,

    #[error("unknown command '{0}'. Type 'help' to see all commands")]
    UnknownCommand(String),

    #[error("invalid command format!\n{usage}")]
    InvalidFormat { usage: &'static str },

    #[error("Multiple values specified for the following single-valued field(s): {}", .0.join(" "))]
    DuplicatePrefixes(Vec<&'static str>),

    #[error("invalid id '{0}': ids are positive whole numbers such as 1 or #1")]
    InvalidId(String),

    #[error("invalid value '{value}' for {prefix}: {reason}")]
    InvalidNumber {
        prefix: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("price range is empty: prmin/ ({min}) is above prmax/ ({max})")]
    InvalidRange { min: u64, max: u64 },

    #[error("at least one field to edit must be provided")]
    NoFieldsToEdit,

    #[error(transparent)]
    InvalidValue(#[from] ValidationError),
}

/// Result alias for parsing.
pub type Result<T> = std::result::Result<T, ParseError>;
