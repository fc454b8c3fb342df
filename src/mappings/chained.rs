// src/mappings/chained.rs

//! Chained mapping provider
//!
//! Human-readable names are reached through a stable intermediate namespace:
//! the intermediary layer (official → intermediary) is required and fatal
//! when missing, while the yarn named layer (intermediary → named) is
//! optional. When no named build exists for a version the chain simply ends
//! at intermediary and the pipeline still succeeds with one remap pass.
//!
//! The intermediary document is published bare only for some versions; the
//! reliable form is a maven jar containing the single entry
//! `mappings/mappings.tiny`, so a failed bare download falls back to
//! fetching the jar and extracting that entry. Named-layer builds are only
//! published gzip-compressed.

use crate::artifact::Namespace;
use crate::client::HttpClient;
use crate::error::{Error, Result};
use crate::mappings::{MappingFormat, MappingSet};
use crate::workspace::Workspace;
use flate2::read::GzDecoder;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Cursor};
use std::path::Path;
use tracing::{debug, info, warn};
use zip::result::ZipError;
use zip::ZipArchive;

/// Release listing endpoint for the intermediary layer
pub const INTERMEDIARY_META_URL: &str = "https://meta.fabricmc.net/v2/versions/intermediary";

/// Release listing endpoint for the named (yarn) layer
pub const YARN_META_URL: &str = "https://meta.fabricmc.net/v2/versions/yarn";

/// Maven root serving both layers' documents
pub const FABRIC_MAVEN_URL: &str = "https://maven.fabricmc.net";

/// Entry holding the mapping table inside the intermediary jar
const JAR_MAPPING_ENTRY: &str = "mappings/mappings.tiny";

/// Workspace filename of the intermediary mapping table
pub const INTERMEDIARY_FILE: &str = "intermediary.tiny";

/// Workspace filename of the decompressed named mapping table
pub const NAMED_FILE: &str = "yarn_mappings.tiny";

/// One row of the intermediary release listing
#[derive(Debug, Deserialize)]
struct IntermediaryRelease {
    version: String,
}

/// One row of the yarn build listing
#[derive(Debug, Deserialize)]
struct YarnBuild {
    version: String,
    build: u32,
}

/// Obtain the ordered mapping sets for the chained strategy
pub fn resolve(
    client: &HttpClient,
    workspace: &Workspace,
    version: &str,
) -> Result<Vec<MappingSet>> {
    let intermediary = fetch_intermediary(client, workspace, version)?;
    let mut sets = vec![intermediary];

    match fetch_named(client, workspace, version) {
        Ok(Some(named)) => sets.push(named),
        Ok(None) => {
            info!(
                "No named mappings published for '{}', output stays in the intermediary namespace",
                version
            );
        }
        Err(e) => return Err(e),
    }

    Ok(sets)
}

/// Fetch the required intermediary layer (official → intermediary)
fn fetch_intermediary(
    client: &HttpClient,
    workspace: &Workspace,
    version: &str,
) -> Result<MappingSet> {
    let listing_url = format!("{INTERMEDIARY_META_URL}/{version}");
    let releases: Vec<IntermediaryRelease> = client
        .get_json(&listing_url)
        .map_err(|e| Error::MappingUnavailable(format!("intermediary listing: {e}")))?;

    let release = releases.first().ok_or_else(|| {
        Error::MappingUnavailable(format!("no intermediary release for version '{version}'"))
    })?;
    debug!("Intermediary release {}", release.version);

    let dest = workspace.mapping_file(INTERMEDIARY_FILE);
    let bare_url = format!(
        "{FABRIC_MAVEN_URL}/net/fabricmc/intermediary/{v}/intermediary-{v}.tiny",
        v = release.version
    );

    match client.get_bytes(&bare_url) {
        Ok(bytes) => {
            std::fs::write(&dest, bytes)?;
            info!("Fetched intermediary mappings to {}", dest.display());
        }
        Err(e) => {
            debug!("Bare intermediary document unavailable ({e}), falling back to jar");
            let jar_url = format!(
                "{FABRIC_MAVEN_URL}/net/fabricmc/intermediary/{v}/intermediary-{v}-v2.jar",
                v = release.version
            );
            let jar = client
                .get_bytes(&jar_url)
                .map_err(|e| Error::MappingUnavailable(format!("intermediary jar: {e}")))?;
            extract_jar_entry(&jar, JAR_MAPPING_ENTRY, &dest)?;
            info!("Extracted intermediary mappings to {}", dest.display());
        }
    }

    Ok(MappingSet::new(
        dest,
        Namespace::Official,
        Namespace::Intermediary,
        MappingFormat::Tiny,
    ))
}

/// Fetch the optional named layer (intermediary → named)
///
/// Returns `Ok(None)` when no build exists or the download fails: this half
/// of the chain is advisory and its absence is a valid terminal state, not
/// an error.
fn fetch_named(
    client: &HttpClient,
    workspace: &Workspace,
    version: &str,
) -> Result<Option<MappingSet>> {
    let listing_url = format!("{YARN_META_URL}/{version}");
    let builds: Vec<YarnBuild> = match client.get_json(&listing_url) {
        Ok(builds) => builds,
        Err(e) => {
            warn!("Named mapping listing unavailable: {}", e);
            return Ok(None);
        }
    };

    let Some(latest) = builds.iter().max_by_key(|b| b.build) else {
        return Ok(None);
    };
    debug!("Named build {}", latest.version);

    let gz_url = format!(
        "{FABRIC_MAVEN_URL}/net/fabricmc/yarn/{v}/yarn-{v}-tiny.gz",
        v = latest.version
    );
    let compressed = match client.get_bytes(&gz_url) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Named mapping document unavailable: {}", e);
            return Ok(None);
        }
    };

    let dest = workspace.mapping_file(NAMED_FILE);
    gunzip_to(&compressed, &dest)?;
    info!("Fetched named mappings to {}", dest.display());

    Ok(Some(MappingSet::new(
        dest,
        Namespace::Intermediary,
        Namespace::Named,
        MappingFormat::Tiny,
    )))
}

/// Extract a single entry from an in-memory jar
fn extract_jar_entry(jar: &[u8], entry_name: &str, dest: &Path) -> Result<()> {
    let mut archive = ZipArchive::new(Cursor::new(jar))
        .map_err(|e| Error::MappingExtraction(format!("cannot read mapping jar: {e}")))?;

    let mut entry = match archive.by_name(entry_name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(Error::MappingExtraction(format!(
                "mapping jar lacks entry '{entry_name}'"
            )));
        }
        Err(e) => {
            return Err(Error::MappingExtraction(format!(
                "cannot read entry '{entry_name}': {e}"
            )));
        }
    };

    let mut output = File::create(dest)?;
    io::copy(&mut entry, &mut output)
        .map_err(|e| Error::MappingExtraction(format!("cannot extract '{entry_name}': {e}")))?;
    Ok(())
}

/// Decompress a gzip document to a file
fn gunzip_to(compressed: &[u8], dest: &Path) -> Result<()> {
    let mut decoder = GzDecoder::new(compressed);
    let mut output = File::create(dest)?;
    io::copy(&mut decoder, &mut output)
        .map_err(|e| Error::MappingExtraction(format!("cannot decompress named mappings: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn jar_with(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extract_jar_entry() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.tiny");
        let jar = jar_with(&[
            ("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0".as_slice()),
            (JAR_MAPPING_ENTRY, b"v1\tofficial\tintermediary\n".as_slice()),
        ]);

        extract_jar_entry(&jar, JAR_MAPPING_ENTRY, &dest).unwrap();
        assert_eq!(
            std::fs::read(&dest).unwrap(),
            b"v1\tofficial\tintermediary\n"
        );
    }

    #[test]
    fn test_extract_missing_entry_is_an_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.tiny");
        let jar = jar_with(&[("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0".as_slice())]);

        let err = extract_jar_entry(&jar, JAR_MAPPING_ENTRY, &dest).unwrap_err();
        assert!(matches!(err, Error::MappingExtraction(_)));
    }

    #[test]
    fn test_gunzip_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.tiny");

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"v1\tintermediary\tnamed\n").unwrap();
        let compressed = encoder.finish().unwrap();

        gunzip_to(&compressed, &dest).unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"v1\tintermediary\tnamed\n");
    }

    #[test]
    fn test_gunzip_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.tiny");

        let err = gunzip_to(b"definitely not gzip", &dest).unwrap_err();
        assert!(matches!(err, Error::MappingExtraction(_)));
    }
}
