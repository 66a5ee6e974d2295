//! Remote PDF download
//!
//! Streams a remote document into a uniquely-named temporary file.
//! The returned [`TempPdf`] guard removes the file when dropped, so
//! cleanup happens on success, error, and panic paths alike.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Download errors
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP client for fetching remote PDFs
#[derive(Clone)]
pub struct Downloader {
    client: reqwest::Client,
}

impl Downloader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetch a URL into a per-request temporary file.
    ///
    /// Any non-success status aborts before anything is written.
    pub async fn fetch_to_temp(&self, url: &str) -> Result<TempPdf, DownloadError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::BadStatus(status));
        }

        let path = std::env::temp_dir().join(format!("lector_{}.pdf", Uuid::new_v4()));
        let temp = TempPdf { path };

        let mut file = tokio::fs::File::create(temp.path()).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;

        tracing::debug!("Downloaded {} to {}", url, temp.path().display());
        Ok(temp)
    }
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}

/// A downloaded PDF on disk, removed on drop.
#[derive(Debug)]
pub struct TempPdf {
    path: PathBuf,
}

impl TempPdf {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempPdf {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to remove temp file {}: {}", self.path.display(), e);
            }
        }
    }
}
