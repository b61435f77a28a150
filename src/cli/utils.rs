//! Convenience helpers shared across modes.

use std::path::Path;

use anyhow::Result;
use huenix::{Config, ConfigError, HueError, config_path};
use tracing_subscriber::EnvFilter;

/// Send logs to stderr. `RUST_LOG` overrides the verbosity flag.
pub fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load the config from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    Ok(Config::load(&path)?)
}

/// Exit status for a failed run: 2 when the bridge is not set up, 1 otherwise.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    let config_problem = err.downcast_ref::<ConfigError>().is_some()
        || matches!(err.downcast_ref::<HueError>(), Some(HueError::Config(_)));
    if config_problem { 2 } else { 1 }
}
