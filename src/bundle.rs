// src/bundle.rs

//! Self-extracting bundle detection and unpacking
//!
//! Server artifacts ship as a self-extracting bundle: a launcher jar whose
//! real payload jar sits behind a `META-INF/versions.list` index. The
//! inspector probes for that marker entry; when present it runs the bundle's
//! own entry point with the unpack directory as working directory and adopts
//! the first jar the bundle writes under `versions/` as the pipeline payload.
//! Client artifacts carry no marker and pass through unchanged.

use crate::artifact::Artifact;
use crate::error::{Error, Result};
use crate::process::ToolCommand;
use crate::tools::ToolSet;
use crate::workspace::Workspace;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::result::ZipError;
use zip::ZipArchive;

/// Archive entry whose presence marks a self-extracting bundle
pub const BUNDLE_MARKER_ENTRY: &str = "META-INF/versions.list";

/// Subdirectory of the unpack directory the bundle writes its payload into
const PAYLOAD_SCAN_SUBDIR: &str = "versions";

/// Check whether an artifact is a self-extracting bundle
pub fn is_bundled(path: &Path) -> Result<bool> {
    let file = File::open(path)
        .map_err(|e| Error::Unpack(format!("cannot open {}: {e}", path.display())))?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| Error::Unpack(format!("cannot read {} as archive: {e}", path.display())))?;

    match archive.by_name(BUNDLE_MARKER_ENTRY) {
        Ok(_) => Ok(true),
        Err(ZipError::FileNotFound) => Ok(false),
        Err(e) => Err(Error::Unpack(format!(
            "cannot probe {} for bundle marker: {e}",
            path.display()
        ))),
    }
}

/// Resolve the pipeline's working payload from the fetched artifact
///
/// Non-bundled artifacts are returned unchanged. Bundled artifacts are
/// unpacked by their own entry point as an external process, then the unpack
/// output is scanned for the payload jar.
pub fn resolve_payload(
    artifact: Artifact,
    workspace: &Workspace,
    tools: &ToolSet,
) -> Result<Artifact> {
    if !is_bundled(artifact.path())? {
        debug!("No bundle marker in {}, using artifact as-is", artifact.path().display());
        return Ok(artifact);
    }

    info!("Bundle marker found, unpacking {}", artifact.path().display());
    let unpack_dir = workspace.unpack_dir();
    fs::create_dir_all(&unpack_dir)?;

    let output = ToolCommand::new("bundle", &tools.java)
        .arg("-jar")
        .arg(artifact.path())
        .current_dir(&unpack_dir)
        .run()?;

    if !output.success() {
        return Err(Error::Unpack(format!(
            "bundle entry point exited with {}: {}",
            output.code(),
            output.last_stderr_line()
        )));
    }

    let payload = find_payload(&unpack_dir)?.ok_or_else(|| {
        Error::Unpack(format!(
            "bundle produced no payload jar under {}",
            unpack_dir.join(PAYLOAD_SCAN_SUBDIR).display()
        ))
    })?;

    info!("Unpacked payload {}", payload.display());
    Ok(Artifact::new(payload, artifact.namespace()))
}

/// First jar under the unpack output subdirectory, in path order
fn find_payload(unpack_dir: &Path) -> Result<Option<PathBuf>> {
    let scan_root = unpack_dir.join(PAYLOAD_SCAN_SUBDIR);
    if !scan_root.is_dir() {
        return Ok(None);
    }

    for entry in WalkDir::new(&scan_root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            Error::Unpack(format!("cannot scan {}: {e}", scan_root.display()))
        })?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "jar") {
            return Ok(Some(path.to_path_buf()));
        }
    }

    Ok(None)
}
