//! Configuration DTO.
//!
//! Pure data mapped from TOML. Missing keys become empty values (`0`, an
//! empty path, `None`); defaults are resolved by the caller at bootstrap.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Clipboard poll interval in milliseconds. `0` when unset.
    pub poll_interval_ms: u64,

    /// Directory holding the persisted history. Empty when unset.
    pub data_dir: PathBuf,

    /// Whether logs are also written to a file. `None` when unset.
    pub file_logging: Option<bool>,
}

impl AppConfig {
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let poll_interval_ms = toml_value
            .get("watcher")
            .and_then(|w| w.get("poll_interval_ms"))
            .and_then(|v| v.as_integer())
            .unwrap_or(0);

        Ok(Self {
            poll_interval_ms: u64::try_from(poll_interval_ms).map_err(|_| {
                anyhow::anyhow!("watcher.poll_interval_ms must not be negative: {poll_interval_ms}")
            })?,
            data_dir: PathBuf::from(
                toml_value
                    .get("storage")
                    .and_then(|s| s.get("data_dir"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            file_logging: toml_value
                .get("logging")
                .and_then(|l| l.get("file_logging"))
                .and_then(|v| v.as_bool()),
        })
    }

    pub fn empty() -> Self {
        Self {
            poll_interval_ms: 0,
            data_dir: PathBuf::new(),
            file_logging: None,
        }
    }
}
