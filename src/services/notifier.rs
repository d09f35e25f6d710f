// src/services/notifier.rs

//! Post delivery to the messaging destination.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::Post;
use crate::services::fetch::ImageFetcher;

/// Outbound messaging operations.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()>;
    async fn send_photo(&self, chat_id: i64, bytes: Vec<u8>, file_name: &str) -> Result<()>;
}

/// Envelope of every Bot API response.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram Bot API transport.
pub struct TelegramTransport {
    client: Client,
    endpoint: String,
}

impl TelegramTransport {
    /// Build a transport and verify the token with `getMe`.
    pub async fn connect(client: Client, api_base: &str, token: &str) -> Result<Self> {
        let transport = Self {
            client,
            endpoint: format!("{}/bot{}", api_base.trim_end_matches('/'), token),
        };
        let response = transport
            .client
            .get(transport.method_url("getMe"))
            .send()
            .await?;
        transport.check("getMe", response).await?;
        Ok(transport)
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.endpoint, method)
    }

    async fn check(&self, method: &str, response: reqwest::Response) -> Result<()> {
        let status = response.status();
        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| AppError::transport(method, format!("status {status}: {e}")))?;
        if body.ok {
            Ok(())
        } else {
            Err(AppError::transport(
                method,
                body.description.unwrap_or_else(|| status.to_string()),
            ))
        }
    }
}

#[async_trait]
impl MessageTransport for TelegramTransport {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&serde_json::json!({ "chat_id": chat_id, "text": text }))
            .send()
            .await?;
        self.check("sendMessage", response).await
    }

    async fn send_photo(&self, chat_id: i64, bytes: Vec<u8>, file_name: &str) -> Result<()> {
        // The post URL is used verbatim as the file name.
        let form = Form::new()
            .percent_encode_noop()
            .text("chat_id", chat_id.to_string())
            .part("photo", Part::bytes(bytes).file_name(file_name.to_string()));
        let response = self
            .client
            .post(self.method_url("sendPhoto"))
            .multipart(form)
            .send()
            .await?;
        self.check("sendPhoto", response).await
    }
}

/// Sends one text message and one photo per image for a post.
pub struct Notifier<'a> {
    transport: &'a dyn MessageTransport,
    images: &'a dyn ImageFetcher,
    chat_id: i64,
}

impl<'a> Notifier<'a> {
    pub fn new(
        transport: &'a dyn MessageTransport,
        images: &'a dyn ImageFetcher,
        chat_id: i64,
    ) -> Self {
        Self {
            transport,
            images,
            chat_id,
        }
    }

    /// Deliver a post. Failures are logged and never retried.
    pub async fn notify(&self, post: &Post) {
        log::info!("Notifying {} ({} images)", post.url(), post.images().len());

        if let Err(e) = self
            .transport
            .send_text(self.chat_id, &post.message_text())
            .await
        {
            log::warn!("Failed to send text for {}: {}", post.url(), e);
        }

        for image in post.images() {
            let bytes = match self.images.download(image).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::warn!("Failed to download {image}: {e}");
                    Vec::new()
                }
            };

            if let Err(e) = self
                .transport
                .send_photo(self.chat_id, bytes, post.url())
                .await
            {
                log::warn!("Failed to send photo {image}: {e}");
            }
        }
    }
}
