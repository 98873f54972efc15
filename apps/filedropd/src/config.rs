//! Daemon configuration.
//!
//! Stored as TOML. The path comes from `FILEDROP_CONFIG`, falling back
//! to `./filedrop.toml`; a missing file means defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use filedrop_store::{UploadLimits, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_UPLOAD_SIZE};

/// Environment variable overriding the config file location.
const CONFIG_ENV: &str = "FILEDROP_CONFIG";

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listen port (0 = auto-assign).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Staging directory uploads are written into.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    /// Hard cap on upload size in bytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,

    /// Read granularity for streaming writes.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Prepend a coarse timestamp to generated fallback names.
    #[serde(default)]
    pub timestamp_names: bool,
}

fn default_port() -> u16 {
    8000
}

fn default_storage_dir() -> String {
    "uploads".into()
}

fn default_max_upload_size() -> u64 {
    DEFAULT_MAX_UPLOAD_SIZE
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            storage_dir: default_storage_dir(),
            max_upload_size: default_max_upload_size(),
            chunk_size: default_chunk_size(),
            timestamp_names: false,
        }
    }
}

impl Config {
    /// Loads configuration from disk, or returns defaults if the file
    /// does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::debug!(path = %path.display(), "configuration file loaded");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Upload policy derived from this configuration.
    pub fn limits(&self) -> UploadLimits {
        UploadLimits {
            max_bytes: self.max_upload_size,
            chunk_size: self.chunk_size,
            timestamp_names: self.timestamp_names,
        }
    }
}

/// Returns the configuration file path.
fn config_path() -> PathBuf {
    std::env::var(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("filedrop.toml"))
}
