//! Access logging.
//!
//! Every response, including rejected requests, is reported once with the
//! client address, the raw request line and the final status.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;

use anyhow::Context;
use httpdate::fmt_http_date;

use crate::http::response::StatusCode;

pub trait AccessLog: Send + Sync {
    fn record(&self, client: &str, request_line: &str, status: StatusCode);
}

/// Formats one access log line (without the trailing newline).
pub fn format_entry(
    at: SystemTime,
    client: &str,
    request_line: &str,
    status: StatusCode,
) -> String {
    format!(
        "{} - {} - \"{}\" - {} {}",
        fmt_http_date(at),
        client,
        request_line,
        status.as_u16(),
        status.reason_phrase()
    )
}

/// Appends lines to a file. Each line is written under one lock so
/// concurrent connections never interleave.
pub struct FileAccessLog {
    file: Mutex<File>,
}

impl FileAccessLog {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open access log {}", path.display()))?;

        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AccessLog for FileAccessLog {
    fn record(&self, client: &str, request_line: &str, status: StatusCode) {
        let mut line = format_entry(SystemTime::now(), client, request_line, status);
        line.push('\n');

        let mut file = self.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = file.write_all(line.as_bytes()) {
            tracing::warn!(error = %e, "failed to write access log entry");
        }
    }
}

/// Emits access entries as `tracing` events on the `access` target.
#[derive(Debug, Default)]
pub struct TracingAccessLog;

impl AccessLog for TracingAccessLog {
    fn record(&self, client: &str, request_line: &str, status: StatusCode) {
        tracing::info!(
            target: "access",
            client,
            request = request_line,
            status = status.as_u16(),
            "{}",
            status.reason_phrase()
        );
    }
}
