// src/fetch.rs

//! Artifact and dependency-library downloads
//!
//! The primary artifact download is fatal on any failure and always
//! overwrites whatever sits at its fixed workspace path; no prior-completion
//! check is attempted. Dependency libraries are advisory inputs for the
//! external tools, so their downloads are best-effort: already-present files
//! are kept, and any failure is logged and skipped.

use crate::artifact::{Artifact, Namespace, Side};
use crate::client::HttpClient;
use crate::error::{Error, Result};
use crate::hash;
use crate::manifest::VersionMetadata;
use crate::workspace::Workspace;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use tracing::{debug, info, warn};

/// Create the styled progress bar used for the primary artifact download
fn download_progress_bar(name: &str) -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}")
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );
    pb.set_message(name.to_string());
    pb
}

/// Download the primary artifact to its fixed workspace path
///
/// Verifies the published SHA-1 digest when the metadata carries one and
/// removes the file on mismatch so a corrupt download never survives as a
/// plausible-looking artifact.
pub fn fetch_primary(
    client: &HttpClient,
    workspace: &Workspace,
    metadata: &VersionMetadata,
    side: Side,
) -> Result<Artifact> {
    let key = side.artifact_key();
    let entry = metadata.download(key).ok_or_else(|| {
        Error::ArtifactFetch(format!(
            "version '{}' metadata has no '{}' download",
            metadata.id, key
        ))
    })?;

    let dest = workspace.primary_artifact(side);
    let pb = download_progress_bar(&format!("{} {}", metadata.id, key));

    client
        .download_file(&entry.url, &dest, Some(&pb))
        .map_err(|e| Error::ArtifactFetch(format!("{key}: {e}")))?;
    pb.finish_and_clear();

    if let Some(expected) = &entry.sha1 {
        if let Err(e) = hash::verify_file_sha1(&dest, expected) {
            let _ = fs::remove_file(&dest);
            return Err(e);
        }
    }

    info!("Fetched primary artifact to {}", dest.display());
    Ok(Artifact::new(dest, Namespace::Official))
}

/// Prefetch dependency libraries into `libraries/<path>`
///
/// Never fails the run: entries without a concrete artifact record are
/// skipped, present files are kept, and download or digest problems are
/// logged as warnings.
pub fn fetch_libraries(client: &HttpClient, workspace: &Workspace, metadata: &VersionMetadata) {
    let mut fetched = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for library in &metadata.libraries {
        let Some(artifact) = library.downloads.as_ref().and_then(|d| d.artifact.as_ref())
        else {
            debug!("Library {} has no artifact download, skipping", library.name);
            skipped += 1;
            continue;
        };

        let dest = workspace.library(&artifact.path);
        if dest.is_file() {
            debug!("Library {} already present", library.name);
            skipped += 1;
            continue;
        }

        if let Err(e) = client.download_file(&artifact.url, &dest, None) {
            warn!("Failed to fetch library {}: {}", library.name, e);
            failed += 1;
            continue;
        }

        if let Some(expected) = &artifact.sha1 {
            if let Err(e) = hash::verify_file_sha1(&dest, expected) {
                warn!("Discarding library {}: {}", library.name, e);
                let _ = fs::remove_file(&dest);
                failed += 1;
                continue;
            }
        }

        fetched += 1;
    }

    info!(
        "Library prefetch: {} fetched, {} skipped, {} failed",
        fetched, skipped, failed
    );
}
