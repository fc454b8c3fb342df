// src/artifact.rs

//! Artifact and namespace domain types
//!
//! An [`Artifact`] is a jar at a path inside the workspace, tagged with the
//! identifier namespace its contents are currently in. Stages never rewrite
//! an artifact in place: each one produces a new `Artifact` at a new path.

use std::fmt;
use std::path::{Path, PathBuf};

/// Identifier namespace of an artifact's contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Obfuscated names as shipped upstream
    Official,
    /// Stable intermediate names, constant across releases
    Intermediary,
    /// Human-readable names
    Named,
}

impl Namespace {
    /// String label as used in mapping headers and remapper arguments
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Official => "official",
            Self::Intermediary => "intermediary",
            Self::Named => "named",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of the version's artifacts the pipeline operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Client,
    Server,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Server => "server",
        }
    }

    /// Metadata key of this side's primary artifact download
    pub fn artifact_key(&self) -> &'static str {
        self.as_str()
    }

    /// Metadata key of this side's flat mapping table download
    pub fn mappings_key(&self) -> &'static str {
        match self {
            Self::Client => "client_mappings",
            Self::Server => "server_mappings",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A jar produced or consumed by a pipeline stage
#[derive(Debug, Clone)]
pub struct Artifact {
    path: PathBuf,
    namespace: Namespace,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, namespace: Namespace) -> Self {
        Self {
            path: path.into(),
            namespace,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }
}
