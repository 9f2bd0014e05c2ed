//! Error types surfaced by the CLI layer

use std::path::PathBuf;

use axpath_element_path::PathError;
use axpath_path_resolver::ResolveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a valid accessibility tree: {source}")]
    TreeFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} contains no nodes")]
    EmptyTree { path: PathBuf },

    #[error("invalid configuration in {path}: {source}")]
    ConfigFormat {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("path failed strict validation with {0} warning(s)")]
    ValidationFailed(usize),

    #[error("unknown opaque id '{0}'")]
    UnknownOpaqueId(String),
}
