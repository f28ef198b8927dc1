use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs;

use crate::http::mime::MimeTable;
use crate::static_files::{Resource, ResourceOutcome};

/// Resolves root-relative paths to files under a canonical document root.
#[derive(Debug, Clone)]
pub struct Resolver {
    root: PathBuf,
    index_file: String,
    mime: MimeTable,
}

impl Resolver {
    /// Canonicalizes `root` once; every resolved path must stay below it.
    pub fn new(
        root: impl AsRef<Path>,
        index_file: impl Into<String>,
        mime: MimeTable,
    ) -> anyhow::Result<Self> {
        let root = root.as_ref();
        let root = std::fs::canonicalize(root)
            .with_context(|| format!("document root {} is not accessible", root.display()))?;

        if !root.is_dir() {
            anyhow::bail!("document root {} is not a directory", root.display());
        }

        Ok(Self {
            root,
            index_file: index_file.into(),
            mime,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `rel` (no leading separator, no `..` segments).
    ///
    /// Symlinks are followed and the canonical target must still lie inside
    /// the root. Directories serve their index file; without one they are
    /// Forbidden since there is no directory listing. The MIME type comes
    /// from the requested name, not from where a symlink points.
    pub async fn resolve(&self, rel: &str) -> ResourceOutcome {
        let mut requested = if rel.is_empty() {
            self.root.clone()
        } else {
            self.root.join(rel)
        };

        let mut target = match self.confine(&requested).await {
            Ok(path) => path,
            Err(outcome) => return outcome,
        };

        let mut meta = match fs::metadata(&target).await {
            Ok(meta) => meta,
            Err(e) => return io_outcome(&target, e),
        };

        if meta.is_dir() {
            requested = requested.join(&self.index_file);
            target = match self.confine(&target.join(&self.index_file)).await {
                Ok(path) => path,
                Err(ResourceOutcome::NotFound) => return ResourceOutcome::Forbidden,
                Err(outcome) => return outcome,
            };
            meta = match fs::metadata(&target).await {
                Ok(meta) => meta,
                Err(e) => return io_outcome(&target, e),
            };
        }

        if !meta.is_file() {
            return ResourceOutcome::Forbidden;
        }

        let Some(mime_type) = self.mime.lookup(&requested) else {
            return ResourceOutcome::UnsupportedType;
        };

        let modified = match meta.modified() {
            Ok(t) => t,
            Err(e) => return io_outcome(&target, e),
        };

        ResourceOutcome::Served(Resource {
            mime_type: mime_type.to_string(),
            path: target,
            size: meta.len(),
            modified,
        })
    }

    async fn confine(&self, path: &Path) -> Result<PathBuf, ResourceOutcome> {
        let canonical = fs::canonicalize(path)
            .await
            .map_err(|e| io_outcome(path, e))?;

        if !canonical.starts_with(&self.root) {
            tracing::warn!(
                path = %canonical.display(),
                root = %self.root.display(),
                "resolved path escapes document root"
            );
            return Err(ResourceOutcome::Forbidden);
        }

        Ok(canonical)
    }
}

fn io_outcome(path: &Path, err: io::Error) -> ResourceOutcome {
    match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => ResourceOutcome::NotFound,
        _ => {
            tracing::warn!(path = %path.display(), error = %err, "filesystem error");
            ResourceOutcome::IoError
        }
    }
}
