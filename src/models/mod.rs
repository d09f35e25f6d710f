// src/models/mod.rs

//! Domain models for the notifier.

mod config;
mod post;
mod selectors;
mod topic;

// Re-export all public types
pub use config::{
    Config, CrawlerConfig, NotifierConfig, RecencyConfig, SiteConfig, TOKEN_ENV,
};
pub use post::Post;
pub use selectors::{ThreadSelectors, parse_selector};
pub use topic::{Topic, TopicCatalog};
