//! Post data structure.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// A forum message carrying at least one embedded image.
///
/// Field names on the wire match the diagnostic output format
/// (`URL`, `Timestamp`, `Author`, `Comment`, `Images`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "PostRecord")]
pub struct Post {
    #[serde(rename = "URL")]
    url: String,

    #[serde(rename = "Timestamp")]
    timestamp_millis: i64,

    #[serde(rename = "Author")]
    author: String,

    #[serde(rename = "Comment")]
    comment: String,

    #[serde(rename = "Images")]
    images: Vec<String>,
}

/// Unchecked shape of a serialized post.
#[derive(Deserialize)]
struct PostRecord {
    #[serde(rename = "URL")]
    url: String,
    #[serde(rename = "Timestamp")]
    timestamp_millis: i64,
    #[serde(rename = "Author", default)]
    author: String,
    #[serde(rename = "Comment", default)]
    comment: String,
    #[serde(rename = "Images", default)]
    images: Vec<String>,
}

impl TryFrom<PostRecord> for Post {
    type Error = AppError;

    fn try_from(record: PostRecord) -> Result<Self> {
        Post::new(
            record.url,
            record.timestamp_millis,
            record.author,
            record.comment,
            record.images,
        )
        .ok_or_else(|| AppError::validation("post without images"))
    }
}

impl Post {
    /// Build a post, or `None` when `images` is empty.
    pub fn new(
        url: impl Into<String>,
        timestamp_millis: i64,
        author: impl Into<String>,
        comment: impl Into<String>,
        images: Vec<String>,
    ) -> Option<Self> {
        if images.is_empty() {
            return None;
        }

        Some(Self {
            url: url.into(),
            timestamp_millis,
            author: author.into(),
            comment: comment.into(),
            images,
        })
    }

    /// Absolute permalink of the message.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Posting time in Unix epoch milliseconds.
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp_millis
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Absolute image URLs in document order. Never empty.
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Text sent ahead of the photos: `"<author>: <comment>\n<url>"`.
    pub fn message_text(&self) -> String {
        format!("{}: {}\n{}", self.author, self.comment, self.url)
    }

    /// Pretty-printed diagnostic record with two-space indentation.
    pub fn to_diagnostic_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
