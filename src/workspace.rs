// src/workspace.rs

//! Per-run workspace directory
//!
//! Every path the pipeline reads or writes is constructed through a method on
//! [`Workspace`], so the directory layout lives in exactly one place. A
//! workspace is exclusively owned by one run; there is no locking, and
//! re-running against a non-empty workspace is not supported (fixed filenames
//! are overwritten).

use crate::artifact::{Namespace, Side};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory owning all intermediate and final artifacts of one run
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the workspace root if it does not exist yet
    pub fn ensure(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Download destination of the primary artifact
    pub fn primary_artifact(&self, side: Side) -> PathBuf {
        self.root.join(format!("{side}.jar"))
    }

    /// Install path of a dependency library
    pub fn library(&self, relative_path: &str) -> PathBuf {
        self.root.join("libraries").join(relative_path)
    }

    /// Working directory for the bundle unpack process
    pub fn unpack_dir(&self) -> PathBuf {
        self.root.join("unpack")
    }

    /// Output of the signature-stripping rewrite
    pub fn stripped_artifact(&self, side: Side) -> PathBuf {
        self.root.join(format!("{side}-stripped.jar"))
    }

    /// Destination of a downloaded or derived mapping document
    pub fn mapping_file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Directory holding per-pass remap outputs
    pub fn build_dir(&self) -> PathBuf {
        self.root.join("build")
    }

    /// Output of the remap pass targeting the given namespace
    pub fn mapped_artifact(&self, namespace: Namespace) -> PathBuf {
        self.build_dir().join(format!("{namespace}-mapped.jar"))
    }

    /// Final decompiler output tree
    pub fn sources_dir(&self) -> PathBuf {
        self.root.join("sources")
    }
}
