//! Test-only helpers: on-disk fixtures and an in-memory path probe.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tempfile::TempDir;

use crate::io::probe::PathProbe;

pub const PROMPT_FILE: &str = "PROMPT.md";
pub const CHECK_FILE: &str = "check.sh";

/// Temporary directory holding a prompt file and a check script.
pub struct Fixtures {
    dir: TempDir,
}

impl Fixtures {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create fixture dir")?;
        let fixtures = Self { dir };
        fixtures.write(PROMPT_FILE, "Make the checks pass.\n")?;
        fixtures.write(CHECK_FILE, "#!/bin/sh\nexit 0\n")?;
        Ok(fixtures)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `name` inside the fixture dir, as a string.
    pub fn path(&self, name: &str) -> String {
        self.root().join(name).to_string_lossy().into_owned()
    }

    pub fn prompt(&self) -> String {
        self.path(PROMPT_FILE)
    }

    pub fn check(&self) -> String {
        self.path(CHECK_FILE)
    }

    pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.root().join(name);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }
}

/// Probe answering from a fixed set of paths.
///
/// Records every probed path so tests can assert which refinements ran.
#[derive(Debug, Default)]
pub struct MemoryProbe {
    files: HashSet<String>,
    faults: HashMap<String, io::ErrorKind>,
    probed: Mutex<Vec<String>>,
}

impl MemoryProbe {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Fail probes of `path` with an I/O error of `kind`.
    pub fn with_fault(mut self, path: &str, kind: io::ErrorKind) -> Self {
        self.faults.insert(path.to_string(), kind);
        self
    }

    pub fn probed(&self) -> Vec<String> {
        self.probed
            .lock()
            .map(|probed| probed.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PathProbe for MemoryProbe {
    async fn exists(&self, path: &str) -> io::Result<bool> {
        if let Ok(mut probed) = self.probed.lock() {
            probed.push(path.to_string());
        }
        if let Some(kind) = self.faults.get(path) {
            return Err(io::Error::new(*kind, format!("probe fault for {path}")));
        }
        Ok(self.files.contains(path))
    }
}
