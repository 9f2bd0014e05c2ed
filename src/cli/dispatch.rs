use super::config::cmd_config;
use super::diff::cmd_diff;
use super::env::CliArgs;
use super::id::cmd_id;
use super::parse::cmd_parse;
use super::resolve::{cmd_diagnose, cmd_resolve};
use super::validate::cmd_validate;
use crate::cli::commands::Commands;
use crate::context::AppContext;
use anyhow::Result;

pub async fn dispatch(cli: &CliArgs, ctx: &AppContext) -> Result<()> {
    match cli.command.clone() {
        Commands::Parse(args) => cmd_parse(args, cli.output),
        Commands::Validate(args) => cmd_validate(args, ctx, cli.output),
        Commands::Resolve(args) => cmd_resolve(args, ctx, cli.output).await,
        Commands::Diagnose(args) => cmd_diagnose(args, cli.output).await,
        Commands::Diff(args) => cmd_diff(args, cli.output).await,
        Commands::Id(args) => cmd_id(args, ctx, cli.output).await,
        Commands::Config(args) => cmd_config(args, ctx, cli.output),
    }
}
