//! `eb` -- real-estate contact and property book CLI.
//!
//! Parses CLI arguments with clap, resolves the runtime context, and
//! dispatches to the interactive shell or a one-shot command.

mod actions;
mod cli;
mod commands;
mod context;
mod output;
mod session;

use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;

use cli::{Cli, Commands};
use context::RuntimeContext;

/// Tracks whether a Ctrl+C has already been received.
static CTRLC_RECEIVED: AtomicBool = AtomicBool::new(false);

fn main() {
    // First Ctrl+C: exit cleanly. Second: force exit.
    let _ = ctrlc::set_handler(|| {
        if CTRLC_RECEIVED.swap(true, Ordering::SeqCst) {
            std::process::exit(1);
        }
        std::process::exit(0);
    });

    let cli = Cli::parse();

    let ctx = match RuntimeContext::from_global_args(&cli.global) {
        Ok(ctx) => ctx,
        Err(e) => {
            output::print_error(cli.global.json, &e);
            std::process::exit(1);
        }
    };

    if ctx.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("eb=debug,estate_storage=debug,estate_config=debug")
            .with_writer(std::io::stderr)
            .init();
    }
    estate_ui::terminal::set_color_override(ctx.config.color.forced());

    let result = match &cli.command {
        None | Some(Commands::Shell) => commands::shell::run(&ctx),
        Some(Commands::Init(args)) => commands::init::run(&ctx, args),
        Some(Commands::Config(args)) => commands::config_cmd::run(&ctx, args),
        Some(Commands::Completion(args)) => commands::completion::run(&ctx, args),
        Some(Commands::Run(words)) => commands::run::run(&ctx, words),
    };

    if let Err(e) = result {
        output::print_error(ctx.json, &e);
        std::process::exit(1);
    }
}
