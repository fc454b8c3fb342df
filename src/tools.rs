// src/tools.rs

//! External tool discovery and the eager presence precondition
//!
//! The pipeline needs a JVM plus the remapper and decompiler jars. All three
//! are located before any network or filesystem work so a missing tool is
//! reported immediately instead of after minutes of downloading. Acquiring
//! the jars is a separate utility's job; this module only finds them.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Remapper jar expected inside the tools directory
pub const REMAPPER_JAR: &str = "tiny-remapper.jar";

/// Decompiler jar expected inside the tools directory
pub const DECOMPILER_JAR: &str = "vineflower.jar";

/// Resolved locations of every external tool the pipeline invokes
#[derive(Debug, Clone)]
pub struct ToolSet {
    pub java: PathBuf,
    pub remapper: PathBuf,
    pub decompiler: PathBuf,
}

impl ToolSet {
    /// Locate all required tools, failing on the first one missing
    pub fn locate(tools_dir: &Path) -> Result<Self> {
        let java = which::which("java")
            .map_err(|_| Error::ToolMissing("java (not found in PATH)".to_string()))?;
        debug!("Found java at {}", java.display());

        let remapper = Self::require_jar(tools_dir, REMAPPER_JAR)?;
        let decompiler = Self::require_jar(tools_dir, DECOMPILER_JAR)?;

        Ok(Self {
            java,
            remapper,
            decompiler,
        })
    }

    fn require_jar(tools_dir: &Path, name: &str) -> Result<PathBuf> {
        let path = tools_dir.join(name);
        if !path.is_file() {
            return Err(Error::ToolMissing(format!(
                "{} (expected at {})",
                name,
                path.display()
            )));
        }
        debug!("Found {} at {}", name, path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_reports_missing_jar() {
        if which::which("java").is_err() {
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(REMAPPER_JAR), b"jar").unwrap();

        // Decompiler jar absent: the precondition must name it
        let err = ToolSet::locate(dir.path()).unwrap_err();
        match err {
            Error::ToolMissing(msg) => assert!(msg.contains(DECOMPILER_JAR)),
            other => panic!("expected ToolMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_locate_finds_complete_tool_set() {
        if which::which("java").is_err() {
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(REMAPPER_JAR), b"jar").unwrap();
        std::fs::write(dir.path().join(DECOMPILER_JAR), b"jar").unwrap();

        let tools = ToolSet::locate(dir.path()).unwrap();
        assert!(tools.remapper.ends_with(REMAPPER_JAR));
        assert!(tools.decompiler.ends_with(DECOMPILER_JAR));
    }
}
