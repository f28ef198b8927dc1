//! Extension to MIME type allow-list.
//!
//! Files whose extension is missing from the table are refused with
//! 415 Unsupported Media Type; there is no `application/octet-stream`
//! fallback.

use std::collections::HashMap;
use std::path::Path;

const DEFAULT_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("mjs", "application/javascript"),
    ("json", "application/json"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("ico", "image/x-icon"),
    ("svg", "image/svg+xml"),
    ("webp", "image/webp"),
    ("txt", "text/plain"),
    ("csv", "text/csv"),
    ("xml", "application/xml"),
    ("pdf", "application/pdf"),
    ("wasm", "application/wasm"),
    ("woff2", "font/woff2"),
];

#[derive(Debug, Clone)]
pub struct MimeTable {
    types: HashMap<String, String>,
}

impl MimeTable {
    /// An empty table; every lookup misses.
    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Adds or replaces a mapping. A leading dot on `ext` is ignored.
    pub fn insert(&mut self, ext: &str, mime: impl Into<String>) {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        self.types.insert(ext, mime.into());
    }

    pub fn extend<'a, I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (ext, mime) in entries {
            self.insert(ext, mime.clone());
        }
    }

    /// MIME type for the final extension of `path`, ignoring ASCII case.
    pub fn lookup(&self, path: &Path) -> Option<&str> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        self.types.get(&ext).map(|m| m.as_str())
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for (ext, mime) in DEFAULT_TYPES {
            table.insert(ext, *mime);
        }
        table
    }
}
