use clap::Subcommand;

use super::config::ConfigArgs;
use super::diff::DiffArgs;
use super::id::IdArgs;
use super::parse::ParseArgs;
use super::resolve::{DiagnoseArgs, ResolveArgs};
use super::validate::ValidateArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Parse an element path and print its canonical form
    Parse(ParseArgs),

    /// Check an element path for syntax errors and, with --strict, fragility
    Validate(ValidateArgs),

    /// Resolve an element path against a captured tree
    Resolve(ResolveArgs),

    /// Explain why an element path does or does not resolve
    Diagnose(DiagnoseArgs),

    /// Compare two captured trees and report topmost changes
    Diff(DiffArgs),

    /// Map element paths to opaque ids and back
    Id(IdArgs),

    /// Inspect axpath configuration
    Config(ConfigArgs),
}
