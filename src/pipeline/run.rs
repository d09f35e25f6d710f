// src/pipeline/run.rs

//! One full notification pass over every topic.

use std::io::Write;

use crate::error::Result;
use crate::models::{Config, Post};
use crate::services::{
    HttpFetcher, Notifier, PageFetcher, PaginationResolver, PostExtractor, RecencyFilter,
    TelegramTransport,
};
use crate::utils::http;

use super::collect::collect_topic;

/// Counters for a single pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub topics: usize,
    pub degraded_topics: usize,
    pub extracted_posts: usize,
    pub notified_posts: usize,
}

/// Run one pass against the live site, writing diagnostics to stdout.
///
/// Unless `dry_run` is set, the bot token is read and verified first; a
/// missing or rejected token aborts before any page is fetched.
pub async fn run_once(config: &Config, dry_run: bool) -> Result<RunSummary> {
    config.validate()?;

    let client = http::create_async_client(&config.crawler)?;
    let fetcher = HttpFetcher::new(client.clone());
    let now_millis = RecencyFilter::from_config(&config.recency).now_millis();
    let mut stdout = std::io::stdout();

    if dry_run {
        return run_pipeline(config, &fetcher, None, now_millis, &mut stdout).await;
    }

    let token = Config::bot_token()?;
    let transport = TelegramTransport::connect(client, &config.notifier.api_base, &token).await?;
    let notifier = Notifier::new(&transport, &fetcher, config.notifier.chat_id);

    run_pipeline(config, &fetcher, Some(&notifier), now_millis, &mut stdout).await
}

/// Run the pipeline once.
///
/// Every extracted post is written to `out` as pretty JSON. Posts inside the
/// recency window are handed to `notifier`; with `None` nothing is sent.
/// `now_millis` must already carry the clock offset (see [`RecencyFilter::now_millis`]).
pub async fn run_pipeline<W: Write + Send>(
    config: &Config,
    pages: &dyn PageFetcher,
    notifier: Option<&Notifier<'_>>,
    now_millis: i64,
    out: &mut W,
) -> Result<RunSummary> {
    let resolver = PaginationResolver::new(&config.selectors)?;
    let extractor = PostExtractor::new(&config.site.base_url, &config.selectors)?;
    let filter = RecencyFilter::from_config(&config.recency);
    let catalog = config.catalog();

    let mut summary = RunSummary {
        topics: catalog.len(),
        ..RunSummary::default()
    };
    let mut posts: Vec<Post> = Vec::new();

    for topic in &catalog {
        let thread_url = topic.thread_url(&config.site.base_url);
        log::info!("Checking '{}' ({})", topic.name, thread_url);

        match collect_topic(pages, &resolver, &extractor, &thread_url).await {
            Ok(found) => {
                log::info!("'{}': {} posts with images", topic.name, found.len());
                posts.extend(found);
            }
            Err(e) => {
                summary.degraded_topics += 1;
                log::warn!("Skipping '{}': {}", topic.name, e);
            }
        }
    }

    summary.extracted_posts = posts.len();

    for post in &posts {
        match post.to_diagnostic_json() {
            Ok(json) => {
                if let Err(e) = writeln!(out, "{json}") {
                    log::warn!("Failed to write diagnostic for {}: {}", post.url(), e);
                }
            }
            Err(e) => log::warn!("Failed to serialize {}: {}", post.url(), e),
        }

        if !filter.qualifies(post, now_millis) {
            continue;
        }
        summary.notified_posts += 1;
        match notifier {
            Some(notifier) => notifier.notify(post).await,
            None => log::info!("Dry run, not sending {}", post.url()),
        }
    }

    log::info!(
        "Pass complete: {} topics ({} degraded), {} posts, {} notified",
        summary.topics,
        summary.degraded_topics,
        summary.extracted_posts,
        summary.notified_posts
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::AppError;
    use crate::models::Topic;
    use crate::services::{ImageFetcher, MessageTransport};

    const BASE: &str = "https://example.test";

    /// Serves canned pages and records every requested URL.
    #[derive(Default)]
    struct FakePages {
        pages: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl FakePages {
        fn with(mut self, url: &str, html: String) -> Self {
            self.pages.insert(url.to_string(), html);
            self
        }
    }

    #[async_trait]
    impl PageFetcher for FakePages {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.requested.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| AppError::fetch(url, "status 404"))
        }
    }

    #[derive(Default)]
    struct CountingTransport {
        texts: Mutex<Vec<String>>,
        photos: Mutex<usize>,
    }

    #[async_trait]
    impl MessageTransport for CountingTransport {
        async fn send_text(&self, _chat_id: i64, text: &str) -> Result<()> {
            self.texts.lock().unwrap().push(text.to_string());
            Ok(())
        }

        async fn send_photo(&self, _chat_id: i64, _bytes: Vec<u8>, _name: &str) -> Result<()> {
            *self.photos.lock().unwrap() += 1;
            Ok(())
        }
    }

    struct NoImages;

    #[async_trait]
    impl ImageFetcher for NoImages {
        async fn download(&self, url: &str) -> Result<Vec<u8>> {
            Err(AppError::fetch(url, "offline"))
        }
    }

    fn config(topics: Vec<Topic>) -> Config {
        let mut config = Config::default();
        config.site.base_url = BASE.to_string();
        config.topics = topics;
        config
    }

    fn thread_page(last: Option<u32>, items: &str) -> String {
        let nav = last
            .map(|n| format!(r#"<div class="PageNav" data-last="{n}"></div>"#))
            .unwrap_or_default();
        format!(
            r#"<div class="mainContent">{nav}<ol class="messageList">{items}</ol></div>"#
        )
    }

    fn item(author: &str, seconds: i64) -> String {
        format!(
            r#"<li data-author="{author}">
                <span class="DateTime" data-time="{seconds}"></span>
                <a class="hashPermalink" href="threads/{author}">#</a>
                <div class="messageText">hallo</div>
                <img class="LbImage" src="https://img/{author}.jpg">
            </li>"#
        )
    }

    #[tokio::test]
    async fn test_follows_pagination_and_notifies_recent_posts() {
        let now = 1_700_010_000_000;
        let pages = FakePages::default()
            .with(
                "https://example.test/threads/a.1",
                thread_page(Some(3), &item("old_first_page", now / 1000)),
            )
            .with(
                "https://example.test/threads/a.1/page-3",
                thread_page(Some(3), &(item("stale", 1_700_000_000) + &item("fresh", 1_700_008_000))),
            );
        let transport = CountingTransport::default();
        let notifier = Notifier::new(&transport, &NoImages, 1);
        let mut out = Vec::new();

        let summary = run_pipeline(
            &config(vec![Topic::new("A", "/threads/a.1")]),
            &pages,
            Some(&notifier),
            now,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(
            summary,
            RunSummary {
                topics: 1,
                degraded_topics: 0,
                extracted_posts: 2,
                notified_posts: 1,
            }
        );
        assert_eq!(
            *transport.texts.lock().unwrap(),
            vec!["fresh: hallo\nhttps://example.test/threads/fresh".to_string()]
        );
        assert_eq!(*transport.photos.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_single_page_thread_skips_follow_up_fetch() {
        let pages = FakePages::default().with(
            "https://example.test/threads/b.2",
            thread_page(None, &item("solo", 1_700_000_000)),
        );
        let mut out = Vec::new();

        let summary = run_pipeline(
            &config(vec![Topic::new("B", "/threads/b.2")]),
            &pages,
            None,
            0,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(summary.extracted_posts, 1);
        assert_eq!(
            *pages.requested.lock().unwrap(),
            vec!["https://example.test/threads/b.2".to_string()]
        );
    }

    #[tokio::test]
    async fn test_failed_topic_does_not_stop_others() {
        let pages = FakePages::default().with(
            "https://example.test/threads/ok.2",
            thread_page(None, &item("survivor", 1_700_000_000)),
        );
        let mut out = Vec::new();

        let summary = run_pipeline(
            &config(vec![
                Topic::new("Broken", "/threads/broken.1"),
                Topic::new("Ok", "/threads/ok.2"),
            ]),
            &pages,
            None,
            0,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(summary.topics, 2);
        assert_eq!(summary.degraded_topics, 1);
        assert_eq!(summary.extracted_posts, 1);
    }

    #[tokio::test]
    async fn test_failed_last_page_fetch_degrades_topic() {
        let pages = FakePages::default()
            .with(
                "https://example.test/threads/paged.1",
                thread_page(Some(4), &item("first_page_only", 1_700_000_000)),
            )
            .with(
                "https://example.test/threads/next.2",
                thread_page(None, &item("next", 1_700_000_000)),
            );
        let mut out = Vec::new();

        let summary = run_pipeline(
            &config(vec![
                Topic::new("Paged", "/threads/paged.1"),
                Topic::new("Next", "/threads/next.2"),
            ]),
            &pages,
            None,
            0,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(summary.degraded_topics, 1);
        assert_eq!(summary.extracted_posts, 1);
        assert_eq!(
            *pages.requested.lock().unwrap(),
            vec![
                "https://example.test/threads/paged.1".to_string(),
                "https://example.test/threads/paged.1/page-4".to_string(),
                "https://example.test/threads/next.2".to_string(),
            ]
        );
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"Author\": \"next\""));
        assert!(!text.contains("first_page_only"));
    }

    #[tokio::test]
    async fn test_diagnostics_emitted_for_every_post() {
        let pages = FakePages::default().with(
            "https://example.test/threads/c.3",
            thread_page(None, &(item("one", 1_600_000_000) + &item("two", 1_600_000_001))),
        );
        let mut out = Vec::new();

        // Everything is far outside the window, yet both posts are dumped.
        run_pipeline(
            &config(vec![Topic::new("C", "/threads/c.3")]),
            &pages,
            None,
            1_700_000_000_000,
            &mut out,
        )
        .await
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        let posts: Vec<Post> = serde_json::Deserializer::from_str(&text)
            .into_iter::<Post>()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        let authors: Vec<_> = posts.iter().map(|p| p.author()).collect();
        assert_eq!(authors, ["one", "two"]);
        assert!(text.contains("\n  \"Timestamp\": 1600000000000,\n"));
    }
}
