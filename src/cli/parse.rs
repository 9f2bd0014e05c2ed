use std::collections::BTreeMap;

use anyhow::Result;
use axpath_element_path::{ElementPath, PathSegment};
use clap::Args;
use serde::Serialize;

use super::output::OutputFormat;
use crate::errors::AppError;

#[derive(Args, Clone, Debug)]
pub struct ParseArgs {
    /// Element path, e.g. macos://ui/AXWindow/AXButton[@AXTitle="OK"]
    pub path: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedPath {
    pub canonical: String,
    pub segments: Vec<ParsedSegment>,
}

#[derive(Serialize)]
pub struct ParsedSegment {
    pub role: String,
    pub attributes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
}

impl From<&PathSegment> for ParsedSegment {
    fn from(segment: &PathSegment) -> Self {
        Self {
            role: segment.role().to_string(),
            attributes: segment.attributes().clone(),
            index: segment.index(),
        }
    }
}

pub fn describe_path(path: &ElementPath) -> ParsedPath {
    ParsedPath {
        canonical: path.to_string(),
        segments: path.segments().iter().map(ParsedSegment::from).collect(),
    }
}

pub fn cmd_parse(args: ParseArgs, output: OutputFormat) -> Result<()> {
    let path = ElementPath::parse(&args.path).map_err(AppError::from)?;
    let parsed = describe_path(&path);
    output.emit(&parsed, || {
        let mut lines = vec![parsed.canonical.clone()];
        for (position, segment) in parsed.segments.iter().enumerate() {
            let mut line = format!("  [{position}] {}", segment.role);
            for (name, value) in &segment.attributes {
                line.push_str(&format!(" {name}={value:?}"));
            }
            if let Some(index) = segment.index {
                line.push_str(&format!(" #{index}"));
            }
            lines.push(line);
        }
        lines.join("\n")
    })
}
