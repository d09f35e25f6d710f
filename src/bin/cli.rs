//! threadwatch CLI
//!
//! Local execution entry point. For AWS Lambda, use `threadwatch-lambda`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use threadwatch::{error::Result, models::Config, pipeline};

/// threadwatch - forum image post notifier
#[derive(Parser, Debug)]
#[command(
    name = "threadwatch",
    version,
    about = "Forwards new image posts from forum threads to Telegram"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "threadwatch.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print diagnostics only, do not send anything
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Some(Command::Validate) => {
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({} topics)", config.topics.len());
        }
        None => {
            let summary = pipeline::run_once(&config, cli.dry_run).await?;
            log::info!(
                "Done: {} posts extracted, {} notified",
                summary.extracted_posts,
                summary.notified_posts
            );
        }
    }

    Ok(())
}
