//! Crawler module for listing traversal and detail extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with timeouts and connection-error classification
//! - Listing pagination and row extraction
//! - Genre and foreign-gross lookups on detail pages
//! - Overall crawl coordination

mod coordinator;
mod details;
mod fetcher;
mod listing;
mod pagination;

pub use coordinator::{run_crawl, Coordinator};
pub use details::{
    extract_foreign_gross, extract_genre, fetch_foreign_gross, fetch_genre, labeled_fields,
};
pub use fetcher::{build_http_client, is_connection_error, FetchedPage, Fetcher};
pub use listing::{extract_rows, parse_amount, ListingRow, RowCell, DATE_COLUMN, DOMESTIC_GROSS_COLUMN};
pub use pagination::count_pages;

use crate::config::Config;
use crate::output::CrawlSummary;
use crate::CrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Open the CSV output in append mode
/// 2. Build the HTTP client
/// 3. Walk every bucket's listing pages
/// 4. Fetch genre and gross details for each movie
/// 5. Return the end-of-run summary
pub async fn crawl(config: Config) -> Result<CrawlSummary, CrawlError> {
    run_crawl(config).await
}
