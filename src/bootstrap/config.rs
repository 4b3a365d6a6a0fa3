//! Configuration loading and default resolution.
//!
//! [`load_config`] is pure data loading: it maps whatever the file holds into
//! [`AppConfig`]. Defaults are filled in afterwards by [`resolve_settings`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use pn_core::app_dirs::AppDirs;
use pn_core::ports::AppDirsPort;
use pn_core::AppConfig;
use pn_platform::DEFAULT_POLL_INTERVAL;

/// Effective settings after defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub poll_interval: Duration,
    pub data_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub file_logging: bool,
}

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Like [`load_config`], but a missing file yields an empty config.
pub fn load_config_or_empty(config_path: &Path) -> anyhow::Result<AppConfig> {
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config file, using defaults");
        return Ok(AppConfig::empty());
    }
    load_config(config_path)
}

/// Fill empty config values with defaults.
///
/// The data directory falls back to the platform app data root, which is
/// only queried when the config leaves it empty.
pub fn resolve_settings(
    config: &AppConfig,
    app_dirs: &dyn AppDirsPort,
) -> anyhow::Result<Settings> {
    let poll_interval = match config.poll_interval_ms {
        0 => DEFAULT_POLL_INTERVAL,
        ms => Duration::from_millis(ms),
    };

    let data_dir = if config.data_dir.as_os_str().is_empty() {
        app_dirs
            .get_app_dirs()
            .context("Failed to resolve app data directory")?
            .app_data_root
    } else {
        config.data_dir.clone()
    };
    let logs_dir = AppDirs {
        app_data_root: data_dir.clone(),
    }
    .logs_dir();

    Ok(Settings {
        poll_interval,
        data_dir,
        logs_dir,
        file_logging: config.file_logging.unwrap_or(true),
    })
}

/// Locate, load and resolve configuration.
///
/// An explicit path must exist. Without one, `config.toml` in the app data
/// root is used if present.
pub fn load_settings(
    explicit_path: Option<&Path>,
    app_dirs: &dyn AppDirsPort,
) -> anyhow::Result<Settings> {
    let config = match explicit_path {
        Some(path) => load_config(path)?,
        None => match app_dirs.get_app_dirs() {
            Ok(dirs) => load_config_or_empty(&dirs.config_file())?,
            // resolve_settings reports this if the data dir is still needed.
            Err(_) => AppConfig::empty(),
        },
    };
    resolve_settings(&config, app_dirs)
}
