use std::path::PathBuf;

use anyhow::Result;
use axpath_change_detector::{detect_with_policy, ChangeSet, DiffPolicy};
use axpath_element_path::ElementPath;
use axpath_path_resolver::capture_snapshot;
use clap::Args;
use serde::Serialize;
use tracing::info;

use super::output::OutputFormat;
use crate::errors::AppError;
use crate::tree_file::load_tree;

#[derive(Args, Clone, Debug)]
pub struct DiffArgs {
    /// Tree captured before the change (JSON)
    pub before: PathBuf,

    /// Tree captured after the change (JSON)
    pub after: PathBuf,

    /// Only compare this path and its descendants
    #[arg(long, value_name = "PATH")]
    pub focus: Option<String>,

    /// Attribute to leave out of content comparison (repeatable)
    #[arg(long = "ignore", value_name = "ATTRIBUTE")]
    pub ignore: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DiffReport<'a> {
    has_changes: bool,
    summary: String,
    #[serde(flatten)]
    changes: &'a ChangeSet,
}

pub async fn cmd_diff(args: DiffArgs, output: OutputFormat) -> Result<()> {
    let mut policy = DiffPolicy::default();
    if let Some(focus) = &args.focus {
        policy = policy.focused(ElementPath::parse(focus).map_err(AppError::from)?);
    }
    for attribute in &args.ignore {
        policy = policy.ignoring(attribute.clone());
    }

    let before = capture_snapshot(&load_tree(&args.before).await?);
    let after = capture_snapshot(&load_tree(&args.after).await?);
    let changes = detect_with_policy(&before, &after, &policy);
    info!("{}", changes.summary());

    let report = DiffReport {
        has_changes: changes.has_changes(),
        summary: changes.summary(),
        changes: &changes,
    };
    output.emit(&report, || render(&changes))
}

fn render(changes: &ChangeSet) -> String {
    let mut lines = vec![changes.summary()];
    for added in &changes.added {
        lines.push(format!(
            "+ {} ({} descendants)",
            added.path,
            added.node.descendant_count()
        ));
    }
    for removed in &changes.removed {
        lines.push(format!("- {removed}"));
    }
    for modified in &changes.modified {
        lines.push(format!(
            "~ {}\n    before: {}\n    after:  {}",
            modified.path,
            modified.before.describe(),
            modified.after.describe()
        ));
    }
    lines.join("\n")
}
