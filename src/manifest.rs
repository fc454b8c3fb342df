// src/manifest.rs

//! Version manifest resolution
//!
//! The upstream publisher exposes a two-step lookup: a manifest listing every
//! release with the URL of its metadata document, then the per-version
//! metadata naming the artifact and mapping downloads plus the dependency
//! libraries. Both documents are fetched once per run and read-only after.

use crate::client::HttpClient;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// Default version manifest endpoint
pub const VERSION_MANIFEST_URL: &str =
    "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json";

/// Top-level manifest: every published version with its metadata URL
#[derive(Debug, Deserialize)]
pub struct VersionManifest {
    pub versions: Vec<ManifestEntry>,
}

/// One manifest row
#[derive(Debug, Deserialize)]
pub struct ManifestEntry {
    pub id: String,
    pub url: String,
}

impl VersionManifest {
    /// Look up a version identifier among the published entries
    pub fn lookup(&self, version: &str) -> Option<&ManifestEntry> {
        self.versions.iter().find(|entry| entry.id == version)
    }
}

/// Per-version metadata document
#[derive(Debug, Deserialize)]
pub struct VersionMetadata {
    pub id: String,
    #[serde(default)]
    pub downloads: HashMap<String, DownloadEntry>,
    #[serde(default)]
    pub libraries: Vec<Library>,
}

impl VersionMetadata {
    /// Download record for an artifact kind (`server`, `client_mappings`, ...)
    pub fn download(&self, kind: &str) -> Option<&DownloadEntry> {
        self.downloads.get(kind)
    }
}

/// A single downloadable resource with its published integrity data
#[derive(Debug, Deserialize)]
pub struct DownloadEntry {
    pub url: String,
    #[serde(default)]
    pub sha1: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

/// A dependency library entry
///
/// Libraries without a concrete artifact record (natives-only entries and the
/// like) are carried through deserialization but skipped by the fetcher.
#[derive(Debug, Deserialize)]
pub struct Library {
    pub name: String,
    #[serde(default)]
    pub downloads: Option<LibraryDownloads>,
}

#[derive(Debug, Deserialize)]
pub struct LibraryDownloads {
    #[serde(default)]
    pub artifact: Option<LibraryArtifact>,
}

#[derive(Debug, Deserialize)]
pub struct LibraryArtifact {
    pub url: String,
    pub path: String,
    #[serde(default)]
    pub sha1: Option<String>,
}

/// Resolve a version identifier to its metadata document
///
/// Fails with [`Error::VersionNotFound`] when the identifier is absent from
/// the manifest and [`Error::MetadataFetch`] when either document cannot be
/// retrieved or parsed. Nothing is retried.
pub fn resolve(client: &HttpClient, manifest_url: &str, version: &str) -> Result<VersionMetadata> {
    info!("Resolving version '{}'", version);

    let manifest: VersionManifest = client
        .get_json(manifest_url)
        .map_err(|e| Error::MetadataFetch(format!("manifest: {e}")))?;
    debug!("Manifest lists {} versions", manifest.versions.len());

    let entry = manifest
        .lookup(version)
        .ok_or_else(|| Error::VersionNotFound(version.to_string()))?;

    let metadata: VersionMetadata = client
        .get_json(&entry.url)
        .map_err(|e| Error::MetadataFetch(format!("version '{version}': {e}")))?;

    info!(
        "Resolved '{}' ({} downloads, {} libraries)",
        metadata.id,
        metadata.downloads.len(),
        metadata.libraries.len()
    );
    Ok(metadata)
}
