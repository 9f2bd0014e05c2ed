use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::errors::AppError;

/// Installs the global subscriber. Logs go to stderr so stdout stays
/// parseable in `--output json` mode.
pub fn init_logging(level: &str, debug: bool) -> Result<()> {
    let directive = filter_directive(level, debug, std::env::var("RUST_LOG").ok())?;
    let filter = tracing_subscriber::EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid log filter '{directive}'"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

/// `--debug` wins over everything, then `RUST_LOG`, then the configured level.
fn filter_directive(level: &str, debug: bool, from_env: Option<String>) -> Result<String> {
    if debug {
        return Ok("debug".to_string());
    }
    if let Some(directive) = from_env.filter(|directive| !directive.trim().is_empty()) {
        return Ok(directive);
    }
    let level: tracing::Level = level.parse().context("Invalid log level")?;
    Ok(level.to_string().to_ascii_lowercase())
}

pub struct LoadedConfig {
    pub config: Config,
    pub path: PathBuf,
    /// False when `path` did not exist and defaults were used.
    pub found: bool,
}

/// Default lookup order: `./config/axpath.yaml`, then
/// `<config dir>/axpath/config.yaml`.
pub fn default_config_path() -> Result<PathBuf> {
    let local_config = PathBuf::from("config/axpath.yaml");
    if local_config.exists() {
        return Ok(local_config);
    }
    let mut path = dirs::config_dir().context("Failed to get config directory")?;
    path.push("axpath");
    path.push("config.yaml");
    Ok(path)
}

/// Reads configuration and applies environment overrides.
///
/// Runs before logging is installed, so the caller reports the outcome.
pub async fn load_config(config_path: Option<&PathBuf>) -> Result<LoadedConfig> {
    let config_path = match config_path {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };

    let (mut config, found) = if config_path.exists() {
        (read_config_file(&config_path).await?, true)
    } else {
        (Config::default(), false)
    };
    config.apply_env_overrides();

    Ok(LoadedConfig {
        config,
        path: config_path,
        found,
    })
}

pub async fn read_config_file(path: &Path) -> Result<Config, AppError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| AppError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(&content).map_err(|source| AppError::ConfigFormat {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn debug_flag_overrides_rust_log() {
        let directive = filter_directive("info", true, Some("warn,axpath=error".into())).unwrap();
        assert_eq!(directive, "debug");
    }

    #[test]
    fn rust_log_beats_configured_level() {
        assert_eq!(
            filter_directive("info", false, Some("axpath=trace".into())).unwrap(),
            "axpath=trace"
        );
        assert_eq!(filter_directive("WARN", false, Some("  ".into())).unwrap(), "warn");
        assert!(filter_directive("loud", false, None).is_err());
    }

    #[tokio::test]
    #[serial]
    async fn explicit_path_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "opaque_id_capacity: 128\nlog_level: warn").unwrap();
        let path = file.path().to_path_buf();

        let loaded = load_config(Some(&path)).await.unwrap();
        assert!(loaded.found);
        assert_eq!(loaded.config.opaque_id_capacity, 128);
        assert_eq!(loaded.config.log_level, "warn");
    }

    #[tokio::test]
    #[serial]
    async fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        let loaded = load_config(Some(&path)).await.unwrap();
        assert!(!loaded.found);
        assert_eq!(loaded.config, Config::default());
    }

    #[tokio::test]
    async fn malformed_yaml_is_reported_with_its_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "opaque_id_capacity: [not, a, number]").unwrap();

        let err = read_config_file(file.path()).await.unwrap_err();
        assert!(matches!(err, AppError::ConfigFormat { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }
}
