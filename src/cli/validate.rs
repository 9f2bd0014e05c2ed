use anyhow::Result;
use axpath_element_path::validate;
use clap::Args;
use tracing::debug;

use super::output::OutputFormat;
use crate::context::AppContext;
use crate::errors::AppError;

#[derive(Args, Clone, Debug)]
pub struct ValidateArgs {
    /// Element path to check
    pub path: String,

    /// Also lint for fragile or ambiguous constructs
    #[arg(long)]
    pub strict: bool,
}

pub fn cmd_validate(args: ValidateArgs, ctx: &AppContext, output: OutputFormat) -> Result<()> {
    let strict = args.strict || ctx.config().strict_validation;
    debug!(strict, "Validating {}", args.path);
    let report = validate(&args.path, strict).map_err(AppError::from)?;

    output.emit(&report, || {
        let mut lines = vec![format!(
            "{}: {}",
            if report.is_valid { "valid" } else { "invalid" },
            report.path
        )];
        for warning in &report.warnings {
            lines.push(format!("  {warning}"));
        }
        lines.join("\n")
    })?;

    if !report.is_valid {
        return Err(AppError::ValidationFailed(report.warnings.len()).into());
    }
    Ok(())
}
