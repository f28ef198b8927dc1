//! Accept loop and the state shared by every connection.

use std::sync::Arc;
use std::time::Duration;

use crate::access_log::{AccessLog, FileAccessLog, TracingAccessLog};
use crate::config::Config;
use crate::static_files::Resolver;

pub mod listener;

/// Read-only state handed to each connection task.
pub struct ServerContext {
    pub resolver: Resolver,
    pub access_log: Arc<dyn AccessLog>,
    /// Longest wait for request bytes before an idle connection is closed
    pub keep_alive_timeout: Duration,
    pub max_header_bytes: usize,
}

impl ServerContext {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let access_log: Arc<dyn AccessLog> = match &cfg.access_log {
            Some(path) => Arc::new(FileAccessLog::open(path)?),
            None => Arc::new(TracingAccessLog),
        };

        Ok(Self {
            resolver: Resolver::new(&cfg.root, cfg.index_file.clone(), cfg.mime_table())?,
            access_log,
            keep_alive_timeout: cfg.keep_alive_timeout(),
            max_header_bytes: cfg.max_header_bytes,
        })
    }
}
