//! AWS Lambda entry point for threadwatch.
//!
//! Deploy with `cargo lambda build --release --features lambda` and attach a
//! scheduled (cron) trigger.
//!
//! ## Environment Variables
//!
//! - `token`: Telegram bot token (required)
//! - `CRAWL_TIMEOUT_SECS`: HTTP request timeout
//! - `RUST_LOG`: Log level (e.g., `info`, `debug`)

use lambda_runtime::service_fn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!("threadwatch Lambda starting...");
    lambda_runtime::run(service_fn(threadwatch::lambda::handler)).await
}
