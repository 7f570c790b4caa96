//! `eb config` -- show or change configuration.

use anyhow::{Context, Result, bail};
use estate_config::{load_file_config, save_config};

use crate::cli::{ConfigArgs, ConfigCommands};
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `eb config` command.
pub fn run(ctx: &RuntimeContext, args: &ConfigArgs) -> Result<()> {
    match &args.command {
        ConfigCommands::Show => {
            if ctx.json {
                let map: serde_json::Map<String, serde_json::Value> = ctx
                    .config
                    .entries()
                    .into_iter()
                    .map(|(key, value)| (key.to_string(), serde_json::Value::String(value)))
                    .collect();
                output_json(&map);
            } else {
                for (key, value) in ctx.config.entries() {
                    println!("{key}: {value}");
                }
            }
        }

        ConfigCommands::Set(set_args) => {
            if ctx.readonly {
                bail!("cannot set config in read-only mode");
            }
            let estate_dir = ctx
                .require_estate_dir()
                .context("no .estate directory found. Run 'eb init' to create one.")?;

            let mut config = load_file_config(&estate_dir)?;
            config.set(&set_args.key, &set_args.value)?;
            save_config(&estate_dir, &config)?;

            if ctx.json {
                output_json(&serde_json::json!({
                    "key": set_args.key,
                    "value": config.get(&set_args.key),
                }));
            } else if !ctx.quiet {
                println!("Set {} = {}", set_args.key, set_args.value);
            }
        }
    }
    Ok(())
}
