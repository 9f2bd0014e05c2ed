//! Element path resolution.
//!
//! - [`PathResolver`] walks a live tree through a [`TreeWalker`] one segment at
//!   a time, applying per-attribute [`MatchStrategy`]s and index
//!   disambiguation.
//! - [`diagnose`] repeats the walk and explains why a path fails.
//! - [`generate`] builds paths for nodes of a captured [`NodeArena`] and the
//!   path-keyed snapshots consumed by the change detector.
//!
//! [`NodeArena`]: axpath_core_types::NodeArena

pub mod diagnose;
pub mod errors;
pub mod generate;
pub mod matching;
pub mod resolver;
pub mod walker;

pub use diagnose::diagnose;
pub use errors::ResolveError;
pub use generate::{capture_snapshot, generate_path, segment_for};
pub use matching::{attribute_matches, segment_matches, MatchStrategy};
pub use resolver::{PathResolver, SIBLING_SAMPLE_LIMIT};
pub use walker::{SnapshotWalker, TreeWalker, WalkerError};
