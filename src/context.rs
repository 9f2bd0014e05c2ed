use std::path::{Path, PathBuf};
use std::sync::Arc;

use axpath_opaque_id::OpaqueIdMapper;

use crate::config::Config;

/// Process-wide state, built once at startup.
///
/// The opaque id mapper lives here rather than in a global so its capacity
/// is fixed by configuration and its lifetime is the process's.
pub struct AppContext {
    config: Arc<Config>,
    config_path: PathBuf,
    opaque_ids: Arc<OpaqueIdMapper>,
}

impl AppContext {
    pub fn new(config: Config, config_path: PathBuf) -> Self {
        let opaque_ids = Arc::new(OpaqueIdMapper::with_capacity(config.opaque_id_capacity));
        Self {
            config: Arc::new(config),
            config_path,
            opaque_ids,
        }
    }

    pub fn config(&self) -> &Config {
        self.config.as_ref()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn opaque_ids(&self) -> &Arc<OpaqueIdMapper> {
        &self.opaque_ids
    }
}
