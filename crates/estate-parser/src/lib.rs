//! Command grammar for estatebook.
//!
//! A command line is a command word followed by `prefix/value` arguments,
//! e.g. `addp a/12 Marine Parade Road pc/449283 fa/110 bed/3 bath/2 pr/1250000`.
//! [`parse`] validates the whole line and returns a typed [`Command`].

pub mod command;
pub mod error;
pub mod parser;
pub mod tokenizer;

pub use command::{Command, CommandWord};
pub use error::ParseError;
pub use parser::parse;
