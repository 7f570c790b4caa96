//! `eb completion` -- generate shell completions.

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::{Cli, CompletionArgs};
use crate::context::RuntimeContext;

/// Execute the `eb completion` command.
pub fn run(_ctx: &RuntimeContext, args: &CompletionArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "eb", &mut std::io::stdout());
    Ok(())
}
