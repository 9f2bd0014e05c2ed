pub mod app;
pub mod commands;
pub mod config;
pub mod diff;
pub mod dispatch;
pub mod env;
pub mod id;
pub mod output;
pub mod parse;
pub mod resolve;
pub mod runtime;
pub mod validate;

pub use commands::Commands;
pub use env::CliArgs;
pub use output::OutputFormat;
