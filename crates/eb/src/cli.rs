//! Clap CLI definitions for the `eb` command.

use clap::{Args, Parser, Subcommand};

/// eb -- contacts, property listings and the deals between them.
///
/// Run without a subcommand to start the interactive shell, or pass a
/// single command line such as `eb addc n/John Doe p/98765432 e/john@example.com`.
#[derive(Parser, Debug)]
#[command(
    name = "eb",
    about = "Real-estate contact and property book",
    long_about = "Tracks contacts (buyers and sellers) and property listings, and the links between them.\n\
                  Run without a subcommand for the interactive shell, or give one command line, e.g.\n  \
                  eb addp a/12 Marine Parade Road pc/449283 fa/110 bed/3 bath/2 pr/1250000",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Data file to use instead of the one in .estate/ (`:memory:` for a throwaway book).
    #[arg(long, global = true, env = "EB_DATA", value_name = "FILE")]
    pub data: Option<String>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Read-only mode: reject commands that change the book.
    #[arg(long, global = true)]
    pub readonly: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create .estate/ in the current directory.
    Init(InitArgs),

    /// Start the interactive shell (the default).
    Shell,

    /// Show or change configuration.
    Config(ConfigArgs),

    /// Generate shell completion scripts.
    Completion(CompletionArgs),

    /// Any book command, e.g. `eb listc` or `eb link c/1 p/2 r/buyer`.
    #[command(external_subcommand)]
    Run(Vec<String>),
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

/// Arguments for `eb init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Populate the new book with sample contacts and listings.
    #[arg(long)]
    pub sample: bool,

    /// Overwrite an existing data file.
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Arguments for `eb config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration.
    Show,
    /// Set a configuration value in .estate/config.yaml.
    Set(ConfigSetArgs),
}

/// Arguments for `eb config set`.
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Configuration key (data-file, default-limit, prompt, color).
    pub key: String,
    /// New value; an empty string unsets default-limit.
    pub value: String,
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Arguments for `eb completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    /// Target shell.
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
