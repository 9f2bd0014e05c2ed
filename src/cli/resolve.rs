use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use axpath_core_types::{NodeArena, NodeId, UiNode};
use axpath_element_path::ElementPath;
use axpath_path_resolver::{generate_path, PathResolver, ResolveError, SnapshotWalker};
use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use super::output::OutputFormat;
use crate::context::AppContext;
use crate::errors::AppError;
use crate::tree_file::load_tree;

#[derive(Args, Clone, Debug)]
pub struct ResolveArgs {
    /// Element path to resolve
    pub path: String,

    /// Captured tree (JSON) to resolve against
    #[arg(long, value_name = "FILE")]
    pub tree: PathBuf,

    /// List every match of the last segment instead of requiring one
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Clone, Debug)]
pub struct DiagnoseArgs {
    /// Element path to explain
    pub path: String,

    /// Captured tree (JSON) to walk
    #[arg(long, value_name = "FILE")]
    pub tree: PathBuf,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedNode {
    /// Path generated for the node, which may be more specific than the
    /// requested one.
    pub path: String,
    pub opaque_id: String,
    pub node: UiNode,
}

async fn open(tree: &Path) -> Result<(Arc<NodeArena>, PathResolver)> {
    let arena = Arc::new(load_tree(tree).await?);
    let resolver = PathResolver::new(Arc::new(SnapshotWalker::from_shared(arena.clone())));
    Ok((arena, resolver))
}

fn summarize(arena: &NodeArena, ctx: &AppContext, node: UiNode) -> ResolvedNode {
    let path = node
        .handle
        .map(NodeId::from_handle)
        .and_then(|id| generate_path(arena, id))
        .map(|path| path.to_string())
        .unwrap_or_default();
    let opaque_id = ctx.opaque_ids().id_for(&path);
    ResolvedNode {
        path,
        opaque_id,
        node,
    }
}

fn render(resolved: &ResolvedNode) -> String {
    format!(
        "{}\n  path: {}\n  id:   {}",
        resolved.node.describe(),
        resolved.path,
        resolved.opaque_id
    )
}

pub async fn cmd_resolve(args: ResolveArgs, ctx: &AppContext, output: OutputFormat) -> Result<()> {
    let path = ElementPath::parse(&args.path).map_err(AppError::from)?;
    let (arena, resolver) = open(&args.tree).await?;

    if args.all {
        let matches = resolver
            .candidates(&path)
            .await
            .map_err(|err| report_failure(&path, err))?;
        info!("{} candidate(s) for {}", matches.len(), path);
        let resolved: Vec<ResolvedNode> = matches
            .into_iter()
            .map(|node| summarize(&arena, ctx, node))
            .collect();
        return output.emit(&resolved, || {
            if resolved.is_empty() {
                return "no matches".to_string();
            }
            resolved.iter().map(render).collect::<Vec<_>>().join("\n")
        });
    }

    let node = resolver
        .resolve(&path)
        .await
        .map_err(|err| report_failure(&path, err))?;
    let resolved = summarize(&arena, ctx, node);
    output.emit(&resolved, || render(&resolved))
}

fn report_failure(path: &ElementPath, err: ResolveError) -> anyhow::Error {
    if let ResolveError::NoMatchingElements { siblings, .. } = &err {
        for sibling in siblings {
            warn!("  nearby: {}", sibling);
        }
    }
    warn!("Run `axpath diagnose '{}' --tree <FILE>` for details", path);
    AppError::from(err).into()
}

pub async fn cmd_diagnose(args: DiagnoseArgs, output: OutputFormat) -> Result<()> {
    let path = ElementPath::parse(&args.path).map_err(AppError::from)?;
    let (_, resolver) = open(&args.tree).await?;
    let report = resolver.diagnose(&path).await;
    let resolved = resolver.resolve(&path).await.is_ok();

    #[derive(Serialize)]
    struct Diagnosis<'a> {
        path: String,
        resolved: bool,
        report: &'a str,
    }

    output.emit(
        &Diagnosis {
            path: path.to_string(),
            resolved,
            report: &report,
        },
        || report.clone(),
    )
}
