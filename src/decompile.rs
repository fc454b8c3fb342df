// src/decompile.rs

//! Decompilation stage
//!
//! Final stage: hand the fully remapped jar to the external decompiler and
//! point it at the workspace `sources/` tree. Only the exit status is
//! validated; completeness of the emitted source is the decompiler's
//! business, not ours.

use crate::artifact::Artifact;
use crate::error::{Error, Result};
use crate::process::ToolCommand;
use crate::tools::ToolSet;
use crate::workspace::Workspace;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Decompile the mapped artifact into the workspace sources directory
pub fn run(tools: &ToolSet, workspace: &Workspace, mapped: &Artifact) -> Result<PathBuf> {
    let sources = workspace.sources_dir();
    fs::create_dir_all(&sources)?;

    info!(
        "Decompiling {} into {}",
        mapped.path().display(),
        sources.display()
    );

    let output = ToolCommand::new("decompiler", &tools.java)
        .arg("-jar")
        .arg(&tools.decompiler)
        .arg(mapped.path())
        .arg(&sources)
        .run()?;

    if !output.success() {
        return Err(Error::Decompile(format!(
            "decompiler exited with {}: {}",
            output.code(),
            output.last_stderr_line()
        )));
    }

    info!("Decompiled sources written to {}", sources.display());
    Ok(sources)
}
