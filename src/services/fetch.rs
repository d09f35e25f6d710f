//! Page and image retrieval.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};

/// Retrieves the HTML text of a page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Downloads the raw bytes of an image.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn download(&self, url: &str) -> Result<Vec<u8>>;
}

/// `reqwest`-backed fetcher for both pages and images.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(url, format!("status {status}")));
        }
        Ok(response)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        log::debug!("GET {url}");
        Ok(self.get(url).await?.text().await?)
    }
}

#[async_trait]
impl ImageFetcher for HttpFetcher {
    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("Downloading image {url}");
        Ok(self.get(url).await?.bytes().await?.to_vec())
    }
}
