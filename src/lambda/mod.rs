// src/lambda/mod.rs

//! AWS Lambda handler.
//!
//! Each scheduled invocation runs one notification pass:
//! 1. Reads the bot token and verifies it
//! 2. Collects the latest posts of every topic
//! 3. Prints a diagnostic record per post
//! 4. Sends the recent ones to the chat

use lambda_runtime::{Error as LambdaError, LambdaEvent};

use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::error::Result;
use crate::models::Config;
use crate::pipeline::{RunSummary, run_once};

/// Lambda response payload.
#[derive(Debug, Default, Serialize)]
pub struct NotifyResponse {
    /// Whether the pass completed
    pub success: bool,

    /// Number of topics checked
    pub topics: usize,

    /// Topics whose pages could not be fetched
    pub degraded_topics: usize,

    /// Posts with images found on last pages
    pub extracted_posts: usize,

    /// Posts inside the recency window
    pub notified_posts: usize,

    /// Execution time in milliseconds
    pub execution_time_ms: u64,
}

impl From<RunSummary> for NotifyResponse {
    fn from(summary: RunSummary) -> Self {
        Self {
            success: true,
            topics: summary.topics,
            degraded_topics: summary.degraded_topics,
            extracted_posts: summary.extracted_posts,
            notified_posts: summary.notified_posts,
            ..Default::default()
        }
    }
}

/// Main Lambda handler function. The event payload is ignored.
#[instrument(skip(event))]
pub async fn handler(event: LambdaEvent<Value>) -> std::result::Result<NotifyResponse, LambdaError> {
    let start = std::time::Instant::now();
    let (payload, _context) = event.into_parts();
    info!("Received event: {:?}", payload);

    match run_notify().await {
        Ok(summary) => {
            let mut response = NotifyResponse::from(summary);
            response.execution_time_ms = start.elapsed().as_millis() as u64;
            info!(
                "Pass completed: {} posts, {} notified in {}ms",
                response.extracted_posts, response.notified_posts, response.execution_time_ms
            );
            Ok(response)
        }
        Err(e) => {
            error!("Notification pass failed: {}", e);
            Err(e.into())
        }
    }
}

async fn run_notify() -> Result<RunSummary> {
    let config = load_lambda_config();
    run_once(&config, false).await
}

/// Load configuration suitable for Lambda environment.
fn load_lambda_config() -> Config {
    let mut config = Config::default();

    if let Ok(timeout) = std::env::var("CRAWL_TIMEOUT_SECS") {
        if let Ok(secs) = timeout.parse() {
            config.crawler.timeout_secs = secs;
        }
    }

    config
}
