// src/mappings/direct.rs

//! Direct mapping provider
//!
//! The publisher ships a flat renaming table alongside each artifact, keyed
//! in the version metadata as `<side>_mappings`. One download, one set, one
//! remap pass from the obfuscated names straight to human-readable ones.

use crate::artifact::{Namespace, Side};
use crate::client::HttpClient;
use crate::error::{Error, Result};
use crate::hash;
use crate::manifest::VersionMetadata;
use crate::mappings::{MappingFormat, MappingSet};
use crate::workspace::Workspace;
use std::fs;
use tracing::info;

/// Workspace filename of the downloaded renaming table
pub const MAPPING_FILE: &str = "mojang_mappings.txt";

/// Download the flat renaming table named by the version metadata
pub fn resolve(
    client: &HttpClient,
    workspace: &Workspace,
    metadata: &VersionMetadata,
    side: Side,
) -> Result<MappingSet> {
    let key = side.mappings_key();
    let entry = metadata.download(key).ok_or_else(|| {
        Error::MappingUnavailable(format!(
            "version '{}' publishes no '{}' document",
            metadata.id, key
        ))
    })?;

    let dest = workspace.mapping_file(MAPPING_FILE);
    client
        .download_file(&entry.url, &dest, None)
        .map_err(|e| Error::MappingUnavailable(format!("{key}: {e}")))?;

    if let Some(expected) = &entry.sha1 {
        if let Err(e) = hash::verify_file_sha1(&dest, expected) {
            let _ = fs::remove_file(&dest);
            return Err(e);
        }
    }

    info!("Fetched {} to {}", key, dest.display());
    Ok(MappingSet::new(
        dest,
        Namespace::Official,
        Namespace::Named,
        MappingFormat::Proguard,
    ))
}
