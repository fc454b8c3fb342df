// src/client.rs

//! HTTP client for manifest and artifact downloads
//!
//! Thin wrapper around a blocking reqwest client. Nothing here retries: the
//! pipeline is fail-fast by design, and every caller decides what a failed
//! fetch means for its own stage.

use crate::error::{Error, Result};
use indicatif::ProgressBar;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Timeout for individual HTTP requests (connect and read)
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Buffer size for streaming downloads (8 KB)
const STREAM_BUFFER_SIZE: usize = 8192;

/// Blocking HTTP client shared by one pipeline run
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::Http(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Fetch a URL and deserialize the JSON response body
    pub fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("Fetching JSON from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::Http(format!("Failed to fetch {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Http(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        response
            .json()
            .map_err(|e| Error::Http(format!("Failed to parse JSON from {url}: {e}")))
    }

    /// Fetch a URL into memory
    ///
    /// Only used for small documents (mapping tables, mapping containers);
    /// artifact downloads go through [`HttpClient::download_file`] instead.
    pub fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::Http(format!("Failed to fetch {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Http(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| Error::Http(format!("Failed to read response from {url}: {e}")))?;

        Ok(bytes.to_vec())
    }

    /// Download a URL to a file, streaming through a fixed buffer
    ///
    /// Writes to a `.tmp` sibling first and renames into place so a failed
    /// transfer never leaves a half-written file at the destination path.
    pub fn download_file(
        &self,
        url: &str,
        dest_path: &Path,
        progress: Option<&ProgressBar>,
    ) -> Result<u64> {
        info!("Downloading {} to {}", url, dest_path.display());

        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::Http(format!("Failed to fetch {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Http(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        if let Some(pb) = progress {
            if let Some(total) = response.content_length() {
                pb.set_length(total);
            }
        }

        let temp_path = dest_path.with_extension("tmp");
        let mut file = File::create(&temp_path)?;

        let mut downloaded: u64 = 0;
        let mut buffer = [0u8; STREAM_BUFFER_SIZE];
        loop {
            let read = response
                .read(&mut buffer)
                .map_err(|e| Error::Http(format!("Failed to read response from {url}: {e}")))?;
            if read == 0 {
                break;
            }
            file.write_all(&buffer[..read])?;
            downloaded += read as u64;
            if let Some(pb) = progress {
                pb.set_position(downloaded);
            }
        }

        fs::rename(&temp_path, dest_path)?;

        debug!("Downloaded {} bytes to {}", downloaded, dest_path.display());
        Ok(downloaded)
    }
}
