// src/models/selectors.rs

//! CSS selectors for scraping a forum thread page.

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// CSS selectors and attribute names used to read a thread page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadSelectors {
    /// Selector for the pagination control
    #[serde(default = "defaults::page_nav_selector")]
    pub page_nav_selector: String,

    /// Attribute on the pagination control holding the last page index
    #[serde(default = "defaults::last_page_attr")]
    pub last_page_attr: String,

    /// Selector for each message list item
    #[serde(default = "defaults::item_selector")]
    pub item_selector: String,

    /// Selector for the date/time element within an item
    #[serde(default = "defaults::timestamp_selector")]
    pub timestamp_selector: String,

    /// Attribute on the date/time element holding epoch seconds
    #[serde(default = "defaults::timestamp_attr")]
    pub timestamp_attr: String,

    /// Selector for embedded lightbox images within an item
    #[serde(default = "defaults::image_selector")]
    pub image_selector: String,

    /// Attribute on the image element holding its source URL
    #[serde(default = "defaults::image_attr")]
    pub image_attr: String,

    /// Selector for the permalink anchor within an item
    #[serde(default = "defaults::permalink_selector")]
    pub permalink_selector: String,

    /// Attribute on the item itself naming the author
    #[serde(default = "defaults::author_attr")]
    pub author_attr: String,

    /// Selector for the message body within an item
    #[serde(default = "defaults::body_selector")]
    pub body_selector: String,
}

impl Default for ThreadSelectors {
    fn default() -> Self {
        Self {
            page_nav_selector: defaults::page_nav_selector(),
            last_page_attr: defaults::last_page_attr(),
            item_selector: defaults::item_selector(),
            timestamp_selector: defaults::timestamp_selector(),
            timestamp_attr: defaults::timestamp_attr(),
            image_selector: defaults::image_selector(),
            image_attr: defaults::image_attr(),
            permalink_selector: defaults::permalink_selector(),
            author_attr: defaults::author_attr(),
            body_selector: defaults::body_selector(),
        }
    }
}

impl ThreadSelectors {
    /// Check that every selector string is valid CSS.
    pub fn validate(&self) -> Result<()> {
        for s in [
            &self.page_nav_selector,
            &self.item_selector,
            &self.timestamp_selector,
            &self.image_selector,
            &self.permalink_selector,
            &self.body_selector,
        ] {
            parse_selector(s)?;
        }
        Ok(())
    }
}

/// Parse a CSS selector, mapping failures into [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

mod defaults {
    pub fn page_nav_selector() -> String {
        ".mainContent .PageNav".into()
    }
    pub fn last_page_attr() -> String {
        "data-last".into()
    }
    pub fn item_selector() -> String {
        ".mainContent ol.messageList li".into()
    }
    pub fn timestamp_selector() -> String {
        ".DateTime".into()
    }
    pub fn timestamp_attr() -> String {
        "data-time".into()
    }
    pub fn image_selector() -> String {
        ".LbImage".into()
    }
    pub fn image_attr() -> String {
        "src".into()
    }
    pub fn permalink_selector() -> String {
        "a.hashPermalink".into()
    }
    pub fn author_attr() -> String {
        "data-author".into()
    }
    pub fn body_selector() -> String {
        ".messageText".into()
    }
}
