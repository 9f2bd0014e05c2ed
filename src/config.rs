//! Configuration management module
//!
//! YAML configuration with environment overrides. Every field has a default,
//! so an absent file or a partial one is fine.

use std::env;

use axpath_opaque_id::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const ENV_OPAQUE_ID_CAPACITY: &str = "AXPATH_OPAQUE_ID_CAPACITY";
pub const ENV_STRICT_VALIDATION: &str = "AXPATH_STRICT_VALIDATION";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level used when neither `--log-level` nor `RUST_LOG` is given.
    pub log_level: String,
    /// Maximum number of cached path/opaque id pairs.
    pub opaque_id_capacity: usize,
    /// Run `validate` in strict mode without passing `--strict`.
    pub strict_validation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            opaque_id_capacity: DEFAULT_CAPACITY,
            strict_validation: false,
        }
    }
}

impl Config {
    /// Applies `AXPATH_*` environment variables on top of file values.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(raw) = env::var(ENV_OPAQUE_ID_CAPACITY) {
            match raw.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => self.opaque_id_capacity = capacity,
                _ => warn!(value = %raw, "ignoring invalid {}", ENV_OPAQUE_ID_CAPACITY),
            }
        }
        if let Ok(raw) = env::var(ENV_STRICT_VALIDATION) {
            match parse_flag(&raw) {
                Some(strict) => self.strict_validation = strict,
                None => warn!(value = %raw, "ignoring invalid {}", ENV_STRICT_VALIDATION),
            }
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
