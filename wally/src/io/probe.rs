//! Path-existence probes used by the existence refinements.
//!
//! The validation pipeline only asks "does this path name an existing file".
//! [`FsProbe`] answers from the local filesystem; tests substitute an
//! in-memory probe.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

/// Read-only existence predicate.
///
/// Implementations return `Ok(false)` for paths that are absent or are not
/// regular files. Any other I/O failure is returned as-is.
#[async_trait]
pub trait PathProbe: Send + Sync {
    async fn exists(&self, path: &str) -> io::Result<bool>;
}

/// Probe backed by `tokio::fs`.
#[derive(Debug, Clone, Default)]
pub struct FsProbe {
    base: Option<PathBuf>,
}

impl FsProbe {
    /// Resolve relative paths against the process working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `base`.
    pub fn in_dir(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.base {
            Some(base) => base.join(path),
            None => PathBuf::from(path),
        }
    }
}

#[async_trait]
impl PathProbe for FsProbe {
    #[instrument(skip(self))]
    async fn exists(&self, path: &str) -> io::Result<bool> {
        let resolved = self.resolve(path);
        let found = is_file(&resolved).await?;
        debug!(resolved = %resolved.display(), found, "probed path");
        Ok(found)
    }
}

async fn is_file(path: &Path) -> io::Result<bool> {
    match tokio::fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_file()),
        Err(err)
            if matches!(
                err.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
            ) =>
        {
            Ok(false)
        }
        Err(err) => Err(err),
    }
}
