// src/services/posts.rs

//! Post extraction from a thread's last page.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::Result;
use crate::models::{Post, ThreadSelectors, parse_selector};
use crate::utils::resolve_url;

/// Parses message list items into [`Post`]s.
pub struct PostExtractor {
    base_url: String,
    base: Url,
    item: Selector,
    timestamp: Selector,
    image: Selector,
    permalink: Selector,
    body: Selector,
    timestamp_attr: String,
    image_attr: String,
    author_attr: String,
}

impl PostExtractor {
    pub fn new(base_url: &str, selectors: &ThreadSelectors) -> Result<Self> {
        Ok(Self {
            base_url: base_url.to_string(),
            base: Url::parse(base_url)?,
            item: parse_selector(&selectors.item_selector)?,
            timestamp: parse_selector(&selectors.timestamp_selector)?,
            image: parse_selector(&selectors.image_selector)?,
            permalink: parse_selector(&selectors.permalink_selector)?,
            body: parse_selector(&selectors.body_selector)?,
            timestamp_attr: selectors.timestamp_attr.clone(),
            image_attr: selectors.image_attr.clone(),
            author_attr: selectors.author_attr.clone(),
        })
    }

    /// Extract every post carrying a timestamp and at least one image, in document order.
    pub fn extract(&self, html: &str) -> Vec<Post> {
        let document = Html::parse_document(html);
        document
            .select(&self.item)
            .filter_map(|item| self.parse_item(&item))
            .collect()
    }

    /// Build a post from one list item.
    ///
    /// The comment is the text of the first body element only; nested
    /// matches further down the item are ignored.
    fn parse_item(&self, item: &ElementRef) -> Option<Post> {
        // Summary and placeholder items render without a timestamp.
        let seconds: i64 = self
            .child_attr(item, &self.timestamp, &self.timestamp_attr)
            .trim()
            .parse()
            .ok()?;
        let timestamp_millis = seconds.checked_mul(1000)?;

        let images: Vec<String> = item
            .select(&self.image)
            .filter_map(|img| img.value().attr(&self.image_attr))
            .map(str::trim)
            .filter(|src| !src.is_empty())
            .map(|src| resolve_url(&self.base, src))
            .collect();

        let permalink = self.child_attr(item, &self.permalink, "href");
        let author = item.value().attr(&self.author_attr).unwrap_or("");
        let comment = item
            .select(&self.body)
            .next()
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default();

        let post = Post::new(
            format!("{}/{}", self.base_url, permalink),
            timestamp_millis,
            author,
            comment.trim(),
            images,
        );
        if post.is_none() {
            log::debug!("Skipping post {permalink}: no images");
        }
        post
    }

    fn child_attr<'a>(&self, item: &ElementRef<'a>, selector: &Selector, attr: &str) -> &'a str {
        item.select(selector)
            .next()
            .and_then(|el| el.value().attr(attr))
            .unwrap_or("")
    }
}
