//! Element paths: stable, human-readable addresses for accessibility nodes.
//!
//! ```text
//! macos://ui/AXApplication[@AXTitle="Calculator"]/AXWindow/AXButton[@AXDescription="Equals"][1]
//! ```
//!
//! A path is a non-empty list of [`PathSegment`]s. Each segment names a role,
//! any number of attribute constraints and an optional index that picks one
//! of several matching siblings. Serialization is canonical: attributes are
//! emitted in alphabetical order and the index always uses the `[N]` form.

pub mod errors;
pub mod escape;
pub mod parser;
pub mod path;
pub mod segment;
pub mod validate;

pub use errors::PathError;
pub use escape::{escape_value, unescape_value};
pub use parser::Parser;
pub use path::{ElementPath, PATH_PREFIX};
pub use segment::{normalize_attribute_name, PathSegment};
pub use validate::{validate, ValidationReport, ValidationWarning};
