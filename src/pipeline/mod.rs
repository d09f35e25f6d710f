//! Pipeline entry points.
//!
//! - `collect_topic`: fetch one thread and extract its latest posts
//! - `run_pipeline`: one pass over all topics with diagnostics and notification

pub mod collect;
pub mod run;

pub use collect::collect_topic;
pub use run::{RunSummary, run_once, run_pipeline};
