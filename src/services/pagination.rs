//! Last-page discovery for paginated threads.

use scraper::{Html, Selector};

use crate::error::Result;
use crate::models::{ThreadSelectors, parse_selector};

/// Reads the pagination control of a thread page.
pub struct PaginationResolver {
    page_nav: Selector,
    last_page_attr: String,
}

impl PaginationResolver {
    pub fn new(selectors: &ThreadSelectors) -> Result<Self> {
        Ok(Self {
            page_nav: parse_selector(&selectors.page_nav_selector)?,
            last_page_attr: selectors.last_page_attr.clone(),
        })
    }

    /// URL of the thread's last page, or `None` for a single-page thread.
    ///
    /// A missing, empty or non-positive last-page index means the fetched
    /// page already is the last one, so no follow-up URL is produced.
    pub fn last_page_url(&self, thread_url: &str, html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let raw = document
            .select(&self.page_nav)
            .next()?
            .value()
            .attr(&self.last_page_attr)?
            .trim();

        match raw.parse::<u32>() {
            Ok(last) if last > 0 => Some(format!("{thread_url}/page-{last}")),
            _ => {
                log::debug!("Ignoring last page index {raw:?} on {thread_url}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREAD: &str = "https://example.test/threads/foo.1";

    fn resolver() -> PaginationResolver {
        PaginationResolver::new(&ThreadSelectors::default()).unwrap()
    }

    #[test]
    fn test_reads_last_page() {
        let html = r#"<div class="mainContent"><div class="PageNav" data-last="42"></div></div>"#;
        assert_eq!(
            resolver().last_page_url(THREAD, html),
            Some("https://example.test/threads/foo.1/page-42".to_string())
        );
    }

    #[test]
    fn test_missing_page_nav_means_single_page() {
        let html = r#"<div class="mainContent"><ol class="messageList"></ol></div>"#;
        assert_eq!(resolver().last_page_url(THREAD, html), None);
    }

    #[test]
    fn test_empty_attribute_skips_follow_up() {
        let html = r#"<div class="mainContent"><div class="PageNav" data-last=""></div></div>"#;
        assert_eq!(resolver().last_page_url(THREAD, html), None);
    }

    #[test]
    fn test_page_nav_outside_main_content_ignored() {
        let html = r#"<div class="sidebar"><div class="PageNav" data-last="3"></div></div>"#;
        assert_eq!(resolver().last_page_url(THREAD, html), None);
    }
}
