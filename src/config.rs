//! Bridge connection settings read from `huenix.conf`.
//!
//! The file is a plain list of `key=value` lines:
//!
//! ```text
//! api_key=0123456789abcdef
//! bridge_address=192.168.1.20
//! timeout_secs=10
//! ```

use std::env;
use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = "huenix.conf";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const PLACEHOLDER_ADDRESS: &str = "192.168.XXX.XXX";
const PLACEHOLDER_KEY: &str = "Replace me with API key.";

/// Immutable connection parameters, loaded once per process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub path: PathBuf,
    pub bridge_address: String,
    pub api_key: String,
    pub timeout: Duration,
}

/// Default location of the config file.
pub fn config_path() -> PathBuf {
    config_path_from(
        env::var_os("XDG_CONFIG_HOME").as_deref(),
        env::var_os("HOME").as_deref(),
    )
}

/// `$XDG_CONFIG_HOME/huenix`, else `$HOME/.config/huenix`, else the working directory.
fn config_path_from(xdg: Option<&OsStr>, home: Option<&OsStr>) -> PathBuf {
    if let Some(xdg) = xdg.filter(|dir| !dir.is_empty()) {
        return Path::new(xdg).join("huenix").join(CONFIG_FILE_NAME);
    }
    if let Some(home) = home.filter(|dir| !dir.is_empty()) {
        return Path::new(home)
            .join(".config")
            .join("huenix")
            .join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

impl Config {
    /// Read the config at `path`, creating a template (and failing) when it is missing.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(path, &text),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                write_template(path)?;
                Err(ConfigError::TemplateCreated(path.to_path_buf()))
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parse config text; `path` is only used for error messages.
    pub fn parse(path: &Path, text: &str) -> Result<Self, ConfigError> {
        let mut bridge_address = String::new();
        let mut api_key = String::new();
        let mut timeout = DEFAULT_TIMEOUT;

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                warn!(line = idx + 1, path = %path.display(), "ignoring config line without '='");
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();
            match key.as_str() {
                "api_key" => api_key = value.to_string(),
                "bridge_address" | "bridge_ip" => bridge_address = value.to_string(),
                "timeout_secs" => {
                    let secs: u64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                        path: path.to_path_buf(),
                        key: key.clone(),
                        value: value.to_string(),
                    })?;
                    timeout = Duration::from_secs(secs);
                }
                other => warn!(key = other, path = %path.display(), "ignoring unknown config key"),
            }
        }

        if bridge_address.is_empty() || bridge_address == PLACEHOLDER_ADDRESS {
            return Err(ConfigError::AddressUnset(path.to_path_buf()));
        }
        if api_key.is_empty() || api_key == PLACEHOLDER_KEY {
            return Err(ConfigError::KeyUnset(path.to_path_buf()));
        }

        debug!(path = %path.display(), bridge = %bridge_address, "loaded bridge config");
        Ok(Self {
            path: path.to_path_buf(),
            bridge_address,
            api_key,
            timeout,
        })
    }

    /// Root of the bridge's REST API for this key, with a trailing slash.
    pub fn base_url(&self) -> String {
        format!("http://{}/api/{}/", self.bridge_address, self.api_key)
    }
}

fn write_template(path: &Path) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let template = format!("api_key={PLACEHOLDER_KEY}\nbridge_address={PLACEHOLDER_ADDRESS}\n");
    fs::write(path, template).map_err(io_err)?;
    debug!(path = %path.display(), "wrote config template");
    Ok(())
}
