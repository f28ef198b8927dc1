use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::http::mime::MimeTable;

/// Server settings.
///
/// Loaded from an optional YAML file named by `WARDEN_CONFIG`, then
/// overridden by the `LISTEN` and `WARDEN_ROOT` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    /// Document root; every served file lives below it
    pub root: PathBuf,
    /// File served for directory targets
    pub index_file: String,
    /// Access log file; access entries go to `tracing` when unset
    pub access_log: Option<PathBuf>,
    pub keep_alive_timeout_secs: u64,
    pub max_header_bytes: usize,
    /// Extra extension → MIME type entries on top of the built-in table
    pub mime_types: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            root: PathBuf::from("."),
            index_file: "index.html".to_string(),
            access_log: None,
            keep_alive_timeout_secs: 15,
            max_header_bytes: 8192,
            mime_types: HashMap::new(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("WARDEN_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var("LISTEN") {
            cfg.listen_addr = listen_addr;
        }
        if let Ok(root) = std::env::var("WARDEN_ROOT") {
            cfg.root = PathBuf::from(root);
        }

        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        Self::from_yaml_str(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml_str(raw: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(raw)?;
        if cfg.index_file.is_empty() || cfg.index_file.contains(['/', '\\']) {
            anyhow::bail!("index_file must be a plain file name");
        }
        if cfg.keep_alive_timeout_secs == 0 {
            anyhow::bail!("keep_alive_timeout_secs must be at least 1");
        }
        Ok(cfg)
    }

    pub fn keep_alive_timeout(&self) -> Duration {
        Duration::from_secs(self.keep_alive_timeout_secs)
    }

    /// Built-in MIME table extended with `mime_types`.
    pub fn mime_table(&self) -> MimeTable {
        let mut table = MimeTable::default();
        table.extend(&self.mime_types);
        table
    }
}
