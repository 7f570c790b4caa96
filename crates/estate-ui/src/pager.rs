//! Pager support for long listings.
//!
//! Pipes content through `less -RFX` (or `$PAGER`) when it exceeds the
//! terminal height.

use std::env;
use std::io::Write;
use std::process::{Command, Stdio};

use crate::terminal::{is_tty, terminal_height};

/// Returns `true` if the content exceeds the terminal height and should be paged.
///
/// Never pages when `EB_NO_PAGER` is set, stdout is not a TTY, or the
/// terminal height is unknown.
pub fn should_page(content: &str) -> bool {
    if env::var_os("EB_NO_PAGER").is_some() || !is_tty() {
        return false;
    }
    let height = terminal_height();
    if height == 0 {
        return false;
    }
    // Leave one line for the prompt.
    content.lines().count() > height.saturating_sub(1)
}

/// Pipes content through a pager if appropriate, otherwise prints directly.
///
/// The pager is `$EB_PAGER`, then `$PAGER`, then `less`. `LESS=-RFX` is set
/// unless the user already has a `LESS` variable.
pub fn page(content: &str) {
    if !should_page(content) {
        print!("{content}");
        return;
    }

    let pager_cmd = pager_command();
    let mut parts = pager_cmd.split_whitespace();
    let Some(program) = parts.next() else {
        print!("{content}");
        return;
    };

    let mut cmd = Command::new(program);
    cmd.args(parts)
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if env::var_os("LESS").is_none() {
        cmd.env("LESS", "-RFX");
    }

    match cmd.spawn() {
        Ok(mut child) => {
            if let Some(mut stdin) = child.stdin.take() {
                // Broken pipe when the user quits early is expected.
                let _ = stdin.write_all(content.as_bytes());
            }
            let _ = child.wait();
        }
        Err(_) => print!("{content}"),
    }
}

fn pager_command() -> String {
    ["EB_PAGER", "PAGER"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "less".to_string())
}
