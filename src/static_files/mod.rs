//! Static file serving.
//!
//! - **`resolve`**: maps a root-relative request path to a [`ResourceOutcome`]
//!   while keeping every resolved path inside the document root
//! - **`conditional`**: `If-Modified-Since` evaluation
//! - **`serve`**: turns an outcome into a [`Response`](crate::http::response::Response)

use std::path::PathBuf;
use std::time::SystemTime;

pub mod conditional;
pub mod resolve;
pub mod serve;

pub use resolve::Resolver;
pub use serve::respond;

/// Metadata of a file that can be served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Canonical absolute path inside the document root
    pub path: PathBuf,
    pub size: u64,
    pub modified: SystemTime,
    pub mime_type: String,
}

/// Result of resolving a request path against the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceOutcome {
    Served(Resource),
    NotFound,
    Forbidden,
    UnsupportedType,
    IoError,
}
