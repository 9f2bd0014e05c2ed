//! axpath library
//!
//! Exposes the CLI building blocks for integration testing

pub mod cli;
pub mod config;
pub mod context;
pub mod errors;
pub mod tree_file;

pub use config::Config;
pub use context::AppContext;
pub use errors::AppError;
