//! `eb init` -- create `.estate/` in the current directory, or in the
//! directory named by `ESTATE_DIR`.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use estate_config::{
    CONFIG_FILE_NAME, ESTATE_DIR_ENV, EstateConfig, ensure_estate_dir, load_file_config,
    save_config,
};
use estate_core::book::AddressBook;
use estate_core::sample::sample_book;
use estate_storage::{JsonStore, Storage};

use crate::cli::InitArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Default gitignore content for the `.estate` directory.
const GITIGNORE_CONTENT: &str = "# Interrupted saves leave these behind
.tmp*
";

/// `ESTATE_DIR` when set, otherwise `.estate/` under the working directory.
fn target_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(ESTATE_DIR_ENV).filter(|v| !v.is_empty()) {
        let dir = PathBuf::from(dir);
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create directory: {}", dir.display()))?;
        return Ok(dir);
    }
    let cwd = env::current_dir().context("failed to get current directory")?;
    ensure_estate_dir(&cwd)
        .with_context(|| format!("failed to create directory: {}", cwd.join(".estate").display()))
}

/// Execute the `eb init` command.
pub fn run(ctx: &RuntimeContext, args: &InitArgs) -> Result<()> {
    if let Some(data) = &ctx.data {
        bail!(
            "--data {data} cannot be combined with init: init always writes the data file \
            named in .estate/config.yaml"
        );
    }
    let estate_dir = target_dir()?;

    let config_path = estate_dir.join(CONFIG_FILE_NAME);
    let config = if config_path.exists() {
        load_file_config(&estate_dir)
            .with_context(|| format!("failed to read {}", config_path.display()))?
    } else {
        let config = EstateConfig::default();
        save_config(&estate_dir, &config)
            .with_context(|| format!("failed to create {}", config_path.display()))?;
        config
    };

    let data_path = config.data_path(&estate_dir);
    if !args.force && data_path.exists() {
        bail!(
            "Found existing address book at {}\n\n\
            This directory is already initialized.\n\n\
            To use the existing book:\n  \
            Just run eb commands normally (e.g., eb listc)\n\n\
            Or use --force to replace it (data loss warning).",
            data_path.display()
        );
    }

    let gitignore_path = estate_dir.join(".gitignore");
    if !gitignore_path.exists() {
        fs::write(&gitignore_path, GITIGNORE_CONTENT).with_context(|| {
            format!("failed to create .gitignore: {}", gitignore_path.display())
        })?;
    }

    let book = if args.sample {
        sample_book().context("failed to build the sample address book")?
    } else {
        AddressBook::new()
    };
    JsonStore::new(&data_path)
        .save(&book)
        .with_context(|| format!("failed to create {}", data_path.display()))?;

    if ctx.json {
        output_json(&serde_json::json!({
            "estate_dir": estate_dir.display().to_string(),
            "data_file": data_path.display().to_string(),
            "contacts": book.contacts().len(),
            "properties": book.properties().len(),
        }));
    } else if !ctx.quiet {
        println!();
        println!("eb initialized successfully!");
        println!();
        println!("  Directory: {}", estate_dir.display());
        println!("  Data file: {}", data_path.display());
        if args.sample {
            println!(
                "  Sample data: {} contacts, {} properties",
                book.contacts().len(),
                book.properties().len()
            );
        }
        println!();
        println!("Run `eb help` to see the commands, or `eb` to start the shell.");
        println!();
    }

    Ok(())
}
