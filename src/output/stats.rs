//! End-of-run crawl summary

use chrono::{DateTime, Utc};

/// Counters collected while crawling
#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Buckets whose first listing page was fetched and parsed
    pub buckets_crawled: u32,

    /// Buckets abandoned because their first page failed to load
    pub buckets_skipped: u32,

    /// Listing pages parsed, across all buckets
    pub pages_crawled: u32,

    /// Movie links seen on listing pages (promotional link excluded)
    pub rows_seen: u64,

    /// Records emitted to the sink
    pub records_written: u64,

    /// Rows dropped because their link carried no usable id
    pub rows_malformed: u64,

    /// Rows that failed under the skip policy
    pub rows_failed: u64,

    /// Display names that more than one id mapped to
    pub duplicate_names: Vec<String>,
}

impl CrawlSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some((end - start).num_seconds()),
            _ => None,
        }
    }
}

/// Prints the summary to stdout
pub fn print_summary(summary: &CrawlSummary) {
    println!("=== Crawl Summary ===\n");

    if let Some(started) = summary.started_at {
        println!("Started:  {}", started.to_rfc3339());
    }
    if let Some(finished) = summary.finished_at {
        println!("Finished: {}", finished.to_rfc3339());
    }
    if let Some(seconds) = summary.duration_seconds() {
        println!("Duration: {}s", seconds);
    }
    println!();

    println!("Overview:");
    println!("  Buckets crawled: {}", summary.buckets_crawled);
    println!("  Buckets skipped: {}", summary.buckets_skipped);
    println!("  Listing pages: {}", summary.pages_crawled);
    println!("  Rows seen: {}", summary.rows_seen);
    println!("  Records written: {}", summary.records_written);
    println!("  Malformed rows: {}", summary.rows_malformed);
    println!("  Failed rows: {}", summary.rows_failed);
    println!();

    if summary.duplicate_names.is_empty() {
        println!("No duplicate display names");
    } else {
        println!("Duplicate display names ({}):", summary.duplicate_names.len());
        for name in &summary.duplicate_names {
            println!("  - {}", name);
        }
    }
}
