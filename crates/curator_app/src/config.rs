use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use curator_engine::{ClientSettings, DEFAULT_SERVER_URL};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "curator.ron";

/// Contents of `curator.ron`. Every field is optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuratorConfig {
    pub server_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub log_to_file: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// A missing file yields the defaults; any other problem is reported so the
/// caller can warn and fall back.
pub fn load_config(path: &Path) -> Result<CuratorConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(CuratorConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// `--server` / `CURATOR_SERVER_URL`, then the config file, then the built-in default.
pub fn resolve_server(flag: Option<&str>, config: &CuratorConfig) -> String {
    non_blank(flag)
        .or_else(|| non_blank(config.server_url.as_deref()))
        .unwrap_or(DEFAULT_SERVER_URL)
        .to_string()
}

fn non_blank(url: Option<&str>) -> Option<&str> {
    url.map(str::trim).filter(|url| !url.is_empty())
}

pub fn client_settings(flag: Option<&str>, config: &CuratorConfig) -> ClientSettings {
    let mut settings = ClientSettings::new(resolve_server(flag, config));
    if let Some(secs) = config.request_timeout_secs.filter(|secs| *secs > 0) {
        settings.request_timeout = Duration::from_secs(secs);
    }
    settings
}
