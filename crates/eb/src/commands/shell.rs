//! `eb shell` -- the interactive command loop.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use estate_ui::terminal::stdin_is_tty;
use tracing::debug;

use crate::context::RuntimeContext;
use crate::output::{print_error, print_result};
use crate::session::Session;

/// Execute the `eb shell` command.
///
/// Reads one command per line until `exit` or end of input. Errors are
/// printed and the loop carries on.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let mut session = Session::open(ctx)?;
    let interactive = stdin_is_tty();

    if interactive && !ctx.quiet && !ctx.json {
        println!("estatebook shell. Type 'help' for commands, 'exit' to leave.");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("{}", ctx.config.prompt);
            io::stdout().flush().context("failed to write prompt")?;
        }

        let Some(line) = lines.next() else {
            debug!("end of input");
            if interactive {
                println!();
            }
            break;
        };
        let line = line.context("failed to read from stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match session.run_line(line) {
            Ok(result) => {
                print_result(ctx, &result, false);
                if result.exit {
                    break;
                }
            }
            Err(e) => print_error(ctx.json, &e),
        }
    }
    Ok(())
}
