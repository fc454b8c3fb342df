// src/sanitize.rs

//! Signature stripping
//!
//! Payload jars carry signature and certificate entries under `META-INF/`.
//! Once the remapper rewrites class contents those signatures no longer
//! match and downstream tools reject the jar as tampered, so the sanitizer
//! copies every entry except that directory into a fresh jar. Entries are
//! copied in raw (still-compressed) form, which keeps retained contents
//! byte-identical.

use crate::artifact::Artifact;
use crate::error::{Error, Result};
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};
use zip::{ZipArchive, ZipWriter};

/// Reserved metadata directory removed from the payload
pub const METADATA_DIR: &str = "META-INF/";

/// Rewrite the payload without its `META-INF/` entries
///
/// Produces a new artifact at `output_path` tagged with the input's
/// namespace; the input file is left untouched.
pub fn strip_signatures(input: &Artifact, output_path: &Path) -> Result<Artifact> {
    let reader = File::open(input.path())
        .map_err(|e| Error::Sanitize(format!("cannot open {}: {e}", input.path().display())))?;
    let mut archive = ZipArchive::new(reader).map_err(|e| {
        Error::Sanitize(format!("cannot read {} as archive: {e}", input.path().display()))
    })?;

    let writer = File::create(output_path)
        .map_err(|e| Error::Sanitize(format!("cannot create {}: {e}", output_path.display())))?;
    let mut output = ZipWriter::new(writer);

    let mut kept = 0usize;
    let mut dropped = 0usize;
    for index in 0..archive.len() {
        let entry = archive
            .by_index_raw(index)
            .map_err(|e| Error::Sanitize(format!("cannot read entry {index}: {e}")))?;

        if entry.name().starts_with(METADATA_DIR) {
            debug!("Dropping {}", entry.name());
            dropped += 1;
            continue;
        }

        output
            .raw_copy_file(entry)
            .map_err(|e| Error::Sanitize(format!("cannot copy entry: {e}")))?;
        kept += 1;
    }

    output
        .finish()
        .map_err(|e| Error::Sanitize(format!("cannot finalize {}: {e}", output_path.display())))?;

    info!(
        "Sanitized {} -> {} ({} entries kept, {} dropped)",
        input.path().display(),
        output_path.display(),
        kept,
        dropped
    );
    Ok(Artifact::new(output_path, input.namespace()))
}
