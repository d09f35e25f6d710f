// src/pipeline/collect.rs

//! Per-topic collection: fetch, resolve the last page, extract.

use crate::error::Result;
use crate::models::Post;
use crate::services::{PageFetcher, PaginationResolver, PostExtractor};

/// Collect the posts on a thread's last page.
///
/// The first page is used directly when the thread has no pagination.
pub async fn collect_topic(
    pages: &dyn PageFetcher,
    resolver: &PaginationResolver,
    extractor: &PostExtractor,
    thread_url: &str,
) -> Result<Vec<Post>> {
    let first_page = pages.fetch(thread_url).await?;

    let last_page = match resolver.last_page_url(thread_url, &first_page) {
        Some(last_url) => {
            log::debug!("Last page of {thread_url} is {last_url}");
            pages.fetch(&last_url).await?
        }
        None => first_page,
    };

    Ok(extractor.extract(&last_page))
}
