// src/error.rs

//! Error types for the decant pipeline
//!
//! One variant per failure kind, each naming the stage it belongs to in its
//! display message. Dependency-library fetch problems are deliberately not
//! represented here: they are advisory and only ever logged as warnings.

use thiserror::Error;

/// Errors that can abort a pipeline run
#[derive(Error, Debug)]
pub enum Error {
    /// The requested version identifier is not listed in the manifest
    #[error("Version '{0}' not found in manifest")]
    VersionNotFound(String),

    /// The manifest or per-version metadata could not be retrieved or parsed
    #[error("Failed to fetch version metadata: {0}")]
    MetadataFetch(String),

    /// The primary artifact could not be downloaded
    #[error("Failed to fetch artifact: {0}")]
    ArtifactFetch(String),

    /// Bundle detection or unpacking failed
    #[error("Failed to unpack bundled artifact: {0}")]
    Unpack(String),

    /// The signature-stripping archive rewrite failed
    #[error("Failed to sanitize archive: {0}")]
    Sanitize(String),

    /// The required mapping data does not exist for this version
    #[error("Mappings unavailable: {0}")]
    MappingUnavailable(String),

    /// The fallback mapping container lacked the expected entry
    #[error("Failed to extract mappings: {0}")]
    MappingExtraction(String),

    /// The external remapper failed or produced no output
    #[error("Remapping failed: {0}")]
    Remap(String),

    /// The external decompiler failed
    #[error("Decompilation failed: {0}")]
    Decompile(String),

    /// A required external tool is absent (checked before any other work)
    #[error("Required tool missing: {0}")]
    ToolMissing(String),

    /// A downloaded file does not match its published digest
    #[error("Checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    /// HTTP transport or status failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
