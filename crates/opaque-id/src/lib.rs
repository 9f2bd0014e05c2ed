//! Opaque identifiers for element paths.
//!
//! Paths are long and full of quoting, so clients are handed a 22-character
//! token instead. [`OpaqueIdMapper`] keeps the path/token association in a
//! capacity-bounded LRU cache that is safe to share between threads.

pub mod mapper;
pub mod token;

pub use mapper::{OpaqueIdMapper, DEFAULT_CAPACITY};
pub use token::{generate_token, is_well_formed, TOKEN_LENGTH};
