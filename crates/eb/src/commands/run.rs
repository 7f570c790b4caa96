//! `eb <word> [args...]` -- run one book command and exit.

use anyhow::{Result, bail};

use crate::context::RuntimeContext;
use crate::output::print_result;
use crate::session::Session;

/// Joins the words back into a command line and runs it once.
pub fn run(ctx: &RuntimeContext, words: &[String]) -> Result<()> {
    let line = words.join(" ");
    if line.trim().is_empty() {
        bail!("no command given");
    }
    let mut session = Session::open(ctx)?;
    let result = session.run_line(&line)?;
    print_result(ctx, &result, true);
    Ok(())
}
