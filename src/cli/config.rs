use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use super::output::OutputFormat;
use crate::config::Config;
use crate::context::AppContext;

#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration (file plus environment overrides)
    Show,

    /// Show the built-in defaults
    Defaults,
}

#[derive(Serialize)]
struct ShownConfig<'a> {
    path: String,
    exists: bool,
    config: &'a Config,
}

pub fn cmd_config(args: ConfigArgs, ctx: &AppContext, output: OutputFormat) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let shown = ShownConfig {
                path: ctx.config_path().display().to_string(),
                exists: ctx.config_path().exists(),
                config: ctx.config(),
            };
            let yaml = serde_yaml::to_string(shown.config)?;
            output.emit(&shown, || {
                let origin = if shown.exists { "" } else { ", not found; defaults" };
                format!("Current configuration ({}{origin}):\n{yaml}", shown.path)
            })
        }
        ConfigAction::Defaults => {
            let defaults = Config::default();
            let yaml = serde_yaml::to_string(&defaults)?;
            output.emit(&defaults, || yaml.clone())
        }
    }
}
