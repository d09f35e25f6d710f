//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{ThreadSelectors, Topic, TopicCatalog};

/// Environment variable holding the bot token.
pub const TOKEN_ENV: &str = "token";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Forum site settings
    #[serde(default)]
    pub site: SiteConfig,

    /// HTTP client settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Thread page selectors
    #[serde(default)]
    pub selectors: ThreadSelectors,

    /// Notification window settings
    #[serde(default)]
    pub recency: RecencyConfig,

    /// Messaging destination settings
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// Monitored threads
    #[serde(default = "defaults::topics")]
    pub topics: Vec<Topic>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.site.base_url)?;
        if self.site.base_url.ends_with('/') {
            return Err(AppError::validation(
                "site.base_url must not end with '/'",
            ));
        }
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.recency.window_millis <= 0 {
            return Err(AppError::validation("recency.window_millis must be > 0"));
        }
        if self.topics.is_empty() {
            return Err(AppError::validation("No topics defined"));
        }
        if let Some(topic) = self.topics.iter().find(|t| t.path.trim().is_empty()) {
            return Err(AppError::validation(format!(
                "Topic '{}' has an empty path",
                topic.name
            )));
        }
        self.selectors.validate()
    }

    /// The monitored threads as a catalog.
    pub fn catalog(&self) -> TopicCatalog {
        TopicCatalog::new(self.topics.clone())
    }

    /// Read the bot token from the environment.
    pub fn bot_token() -> Result<String> {
        match std::env::var(TOKEN_ENV) {
            Ok(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(AppError::config(format!(
                "environment variable '{TOKEN_ENV}' is not set"
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            crawler: CrawlerConfig::default(),
            selectors: ThreadSelectors::default(),
            recency: RecencyConfig::default(),
            notifier: NotifierConfig::default(),
            topics: defaults::topics(),
        }
    }
}

/// Forum site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site root without trailing slash
    #[serde(default = "defaults::base_url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Notification window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecencyConfig {
    /// How long after posting a message is still announced
    #[serde(default = "defaults::window_millis")]
    pub window_millis: i64,

    /// Subtracted from the wall clock before comparing (Europe/Berlin vs. site timestamps)
    #[serde(default = "defaults::clock_offset_millis")]
    pub clock_offset_millis: i64,
}

impl Default for RecencyConfig {
    fn default() -> Self {
        Self {
            window_millis: defaults::window_millis(),
            clock_offset_millis: defaults::clock_offset_millis(),
        }
    }
}

/// Messaging destination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Chat receiving the notifications
    #[serde(default = "defaults::chat_id")]
    pub chat_id: i64,

    /// Bot API root
    #[serde(default = "defaults::api_base")]
    pub api_base: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            chat_id: defaults::chat_id(),
            api_base: defaults::api_base(),
        }
    }
}

mod defaults {
    use crate::models::Topic;
    use crate::services::recency::{CLOCK_OFFSET_MILLIS, WINDOW_MILLIS};

    pub fn base_url() -> String {
        "https://www.kaffee-netz.de".into()
    }

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 6.1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/41.0.2228.0 Safari/537.36".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    pub fn window_millis() -> i64 {
        WINDOW_MILLIS
    }
    pub fn clock_offset_millis() -> i64 {
        CLOCK_OFFSET_MILLIS
    }

    pub fn chat_id() -> i64 {
        405001
    }
    pub fn api_base() -> String {
        "https://api.telegram.org".into()
    }

    pub fn topics() -> Vec<Topic> {
        vec![
            Topic::new(
                "Wie sieht eure Kaffee-Ecke aus?",
                "/threads/wie-sieht-eure-kaffee-ecke-aus.13966",
            ),
            Topic::new(
                "Der \"Ich habe gerade Kaffeekram gekauft\" Thread",
                "/threads/der-ich-habe-gerade-kaffeekram-gekauft-thread.62180",
            ),
            Topic::new(
                "Und plötzlich war da Latte Art",
                "/threads/und-ploetzlich-war-da-latte-art.7785",
            ),
            Topic::new(
                "Ich trinke gerade diesen Filterkaffee/Brühkaffee...",
                "/threads/ich-trinke-gerade-diesen-espresso.19308",
            ),
            Topic::new(
                "3rd Wave Röster und Röstungen",
                "/threads/3rd-wave-roester-und-roestungen.79568",
            ),
        ]
    }
}
