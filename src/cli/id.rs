use std::path::PathBuf;

use anyhow::{bail, Result};
use axpath_element_path::ElementPath;
use axpath_path_resolver::generate_path;
use clap::Args;
use serde::Serialize;

use super::output::OutputFormat;
use crate::context::AppContext;
use crate::errors::AppError;
use crate::tree_file::load_tree;

#[derive(Args, Clone, Debug)]
pub struct IdArgs {
    /// Element paths to map; each is canonicalized first
    pub paths: Vec<String>,

    /// Also map the generated path of every node in this tree (JSON)
    #[arg(long, value_name = "FILE")]
    pub tree: Option<PathBuf>,

    /// Opaque ids to map back to paths, after the paths above are mapped
    #[arg(long = "lookup", value_name = "ID")]
    pub lookup: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdEntry {
    opaque_id: String,
    path: String,
}

pub async fn cmd_id(args: IdArgs, ctx: &AppContext, output: OutputFormat) -> Result<()> {
    if args.paths.is_empty() && args.tree.is_none() && args.lookup.is_empty() {
        bail!("nothing to map: pass element paths, --tree or --lookup");
    }

    let mapper = ctx.opaque_ids();
    let mut entries = Vec::new();
    for text in &args.paths {
        let path = ElementPath::parse(text).map_err(AppError::from)?.to_string();
        entries.push(IdEntry {
            opaque_id: mapper.id_for(&path),
            path,
        });
    }
    if let Some(tree) = &args.tree {
        let arena = load_tree(tree).await?;
        for id in arena.ids() {
            if let Some(path) = generate_path(&arena, id) {
                let path = path.to_string();
                entries.push(IdEntry {
                    opaque_id: mapper.id_for(&path),
                    path,
                });
            }
        }
    }
    for token in &args.lookup {
        match mapper.path_for(token) {
            Some(path) => entries.push(IdEntry {
                opaque_id: token.clone(),
                path,
            }),
            None => return Err(AppError::UnknownOpaqueId(token.clone()).into()),
        }
    }

    output.emit(&entries, || {
        entries
            .iter()
            .map(|entry| format!("{}  {}", entry.opaque_id, entry.path))
            .collect::<Vec<_>>()
            .join("\n")
    })
}
