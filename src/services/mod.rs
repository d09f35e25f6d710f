//! Service layer for the notifier.
//!
//! - Page and image retrieval (`HttpFetcher`)
//! - Last-page discovery (`PaginationResolver`)
//! - Post extraction (`PostExtractor`)
//! - Notification window (`RecencyFilter`)
//! - Delivery (`Notifier`, `TelegramTransport`)

pub mod fetch;
pub mod notifier;
mod pagination;
mod posts;
pub mod recency;

pub use fetch::{HttpFetcher, ImageFetcher, PageFetcher};
pub use notifier::{MessageTransport, Notifier, TelegramTransport};
pub use pagination::PaginationResolver;
pub use posts::PostExtractor;
pub use recency::RecencyFilter;
