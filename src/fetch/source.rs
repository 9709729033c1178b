/// Fetch and decode target images
///
/// `http://` and `https://` URIs go through reqwest, anything else is treated
/// as a local path (an optional `file://` prefix is stripped). Decoding is
/// CPU-bound and runs on a blocking task.
use image::RgbaImage;
use std::sync::Arc;
use tokio::task;

use crate::error::{Result, ViewerError};

const USER_AGENT: &str = concat!("quantum-scope/", env!("CARGO_PKG_VERSION"));

/// Largest encoded image accepted, remote or local
pub const MAX_IMAGE_BYTES: u64 = 32 * 1024 * 1024;

/// Where the bytes of a URI come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource<'a> {
    Remote(&'a str),
    Local(&'a str),
}

impl<'a> ImageSource<'a> {
    pub fn parse(uri: &'a str) -> Self {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            ImageSource::Remote(uri)
        } else {
            ImageSource::Local(uri.strip_prefix("file://").unwrap_or(uri))
        }
    }
}

/// Image fetcher sharing one HTTP client (and its connection pool) across
/// every load. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    client: reqwest::Client,
    max_bytes: u64,
}

impl ImageFetcher {
    pub fn new() -> Result<Self> {
        Self::with_limit(MAX_IMAGE_BYTES)
    }

    pub fn with_limit(max_bytes: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ViewerError::Client(e.to_string()))?;

        Ok(Self { client, max_bytes })
    }

    /// Fetch `uri` and decode it to RGBA8
    pub async fn fetch(self, uri: String) -> Result<Arc<RgbaImage>> {
        let bytes = self.fetch_bytes(&uri).await?;
        log::debug!("📦 Fetched {}KB from {}", bytes.len() / 1024, uri);

        let image = decode_image(uri, bytes).await?;
        Ok(Arc::new(image))
    }

    async fn fetch_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        let fetch_err = |reason: String| ViewerError::Fetch {
            uri: uri.to_string(),
            reason,
        };

        match ImageSource::parse(uri) {
            ImageSource::Remote(url) => {
                let mut response = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| fetch_err(e.to_string()))?;

                if let Some(size) = response.content_length() {
                    self.check_size(uri, size)?;
                }

                // Content-Length can be absent or wrong, so count as we go
                let mut body = Vec::new();
                while let Some(chunk) = response.chunk().await.map_err(|e| fetch_err(e.to_string()))? {
                    self.check_size(uri, (body.len() + chunk.len()) as u64)?;
                    body.extend_from_slice(&chunk);
                }
                Ok(body)
            }
            ImageSource::Local(path) => {
                let metadata = tokio::fs::metadata(path)
                    .await
                    .map_err(|e| fetch_err(e.to_string()))?;
                self.check_size(uri, metadata.len())?;

                tokio::fs::read(path).await.map_err(|e| fetch_err(e.to_string()))
            }
        }
    }

    fn check_size(&self, uri: &str, size: u64) -> Result<()> {
        if size > self.max_bytes {
            return Err(ViewerError::TooLarge {
                uri: uri.to_string(),
                size,
                limit: self.max_bytes,
            });
        }
        Ok(())
    }
}

/// Decode on a blocking task (image decoding is CPU-intensive)
async fn decode_image(uri: String, bytes: Vec<u8>) -> Result<RgbaImage> {
    task::spawn_blocking(move || {
        let decoded = image::load_from_memory(&bytes).map_err(|e| ViewerError::Decode {
            uri: uri.clone(),
            reason: e.to_string(),
        })?;

        let rgba = decoded.to_rgba8();
        log::info!("🖼️  Decoded {}x{} image from {}", rgba.width(), rgba.height(), uri);
        Ok(rgba)
    })
    .await
    .map_err(|e| ViewerError::Task(e.to_string()))?
}
