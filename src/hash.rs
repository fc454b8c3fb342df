// src/hash.rs

//! File hashing for download integrity
//!
//! The upstream version metadata publishes SHA-1 digests for every download,
//! so that is the one algorithm the pipeline verifies against. Hashing is
//! streamed so artifact size never matters.

use crate::error::{Error, Result};
use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Buffer size for streamed hashing (64 KB)
const HASH_BUFFER_SIZE: usize = 65536;

/// Compute the lowercase hex SHA-1 digest of a file
pub fn sha1_file(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    sha1_reader(file)
}

/// Compute the lowercase hex SHA-1 digest of a reader's contents
pub fn sha1_reader<R: Read>(mut reader: R) -> Result<String> {
    let mut hasher = Sha1::new();
    let mut buffer = [0u8; HASH_BUFFER_SIZE];

    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Verify a file's SHA-1 digest against an expected value
///
/// Comparison is case-insensitive on the expected side since upstream
/// metadata is not consistent about digest casing.
pub fn verify_file_sha1(path: &Path, expected: &str) -> Result<()> {
    let actual = sha1_file(path)?;
    if actual != expected.to_lowercase() {
        return Err(Error::ChecksumMismatch {
            path: path.display().to_string(),
            expected: expected.to_string(),
            actual,
        });
    }
    debug!("Checksum verified for {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha1_known_value() {
        // SHA-1("abc")
        let digest = sha1_reader(&b"abc"[..]).unwrap();
        assert_eq!(digest, "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn test_sha1_empty_input() {
        let digest = sha1_reader(&b""[..]).unwrap();
        assert_eq!(digest, "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    }

    #[test]
    fn test_verify_file_accepts_matching_digest() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"abc").unwrap();

        assert!(verify_file_sha1(file.path(), "a9993e364706816aba3e25717850c26c9cd0d89d").is_ok());
        // Uppercase expected digests are accepted too
        assert!(verify_file_sha1(file.path(), "A9993E364706816ABA3E25717850C26C9CD0D89D").is_ok());
    }

    #[test]
    fn test_verify_file_rejects_mismatch() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"abc").unwrap();

        let err = verify_file_sha1(file.path(), "0000000000000000000000000000000000000000")
            .unwrap_err();
        match err {
            Error::ChecksumMismatch { expected, actual, .. } => {
                assert_eq!(expected, "0000000000000000000000000000000000000000");
                assert_eq!(actual, "a9993e364706816aba3e25717850c26c9cd0d89d");
            }
            other => panic!("expected ChecksumMismatch, got {other:?}"),
        }
    }
}
