pub mod config;
#[cfg(unix)]
pub mod control;
pub mod run;
pub mod tracing;
pub mod wiring;

#[cfg(unix)]
pub use control::{try_forward, ControlServer};
pub use config::{load_config, load_config_or_empty, load_settings, resolve_settings, Settings};
pub use run::run_daemon;
pub use wiring::{build_watcher, start_engine};
