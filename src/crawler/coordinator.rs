//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop:
//! - Walking the alphabetical buckets in order, pausing before each one
//! - Fetching and paginating listing pages
//! - Turning listing rows into movie records via the detail pages
//! - Applying the row error policy
//! - Reporting duplicate display names at the end

use crate::config::{Config, RowErrorPolicy};
use crate::crawler::details::{fetch_foreign_gross, fetch_genre};
use crate::crawler::fetcher::{FetchedPage, Fetcher};
use crate::crawler::listing::{extract_rows, ListingRow};
use crate::crawler::pagination::count_pages;
use crate::document::Document;
use crate::movie::{MovieRecord, MovieRegistry};
use crate::output::{CrawlSummary, CsvRecordSink, RecordSink};
use crate::url::SiteUrls;
use crate::CrawlError;
use chrono::Utc;
use std::path::Path;
use std::time::Duration;

/// Main crawler coordinator structure
pub struct Coordinator<S: RecordSink> {
    config: Config,
    fetcher: Fetcher,
    urls: SiteUrls,
    registry: MovieRegistry,
    sink: S,
    summary: CrawlSummary,
}

impl Coordinator<CsvRecordSink> {
    /// Creates a coordinator that appends to the configured CSV file
    pub fn new(config: Config) -> Result<Self, CrawlError> {
        let sink = CsvRecordSink::open(
            Path::new(&config.output.csv_path),
            config.output.write_header,
        )?;
        Self::with_sink(config, sink)
    }
}

impl<S: RecordSink> Coordinator<S> {
    /// Creates a coordinator writing records to `sink`
    pub fn with_sink(config: Config, sink: S) -> Result<Self, CrawlError> {
        let fetcher = Fetcher::new(&config)?;
        let urls = SiteUrls::new(&config.crawler.base_url);

        Ok(Self {
            config,
            fetcher,
            urls,
            registry: MovieRegistry::new(),
            sink,
            summary: CrawlSummary::new(),
        })
    }

    pub fn registry(&self) -> &MovieRegistry {
        &self.registry
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn summary(&self) -> &CrawlSummary {
        &self.summary
    }

    /// Runs the full crawl over every configured bucket
    ///
    /// Stops at the first failure that is not recovered locally: a pagination
    /// link without a page number, or a bad row under the abort policy.
    pub async fn run(&mut self) -> Result<CrawlSummary, CrawlError> {
        let bucket_delay = Duration::from_millis(self.config.crawler.bucket_delay);
        self.summary.started_at = Some(Utc::now());

        for bucket in self.config.crawler.bucket_list() {
            if !bucket_delay.is_zero() {
                tokio::time::sleep(bucket_delay).await;
            }
            tracing::info!("Crawling for URLs starting with: {}", bucket);
            self.crawl_bucket(&bucket).await?;
        }

        self.sink.finish()?;
        self.summary.finished_at = Some(Utc::now());
        self.summary.duplicate_names = self.registry.duplicate_names();

        tracing::info!(
            "Finished crawling: {} records from {} listing pages",
            self.summary.records_written,
            self.summary.pages_crawled
        );
        if !self.summary.duplicate_names.is_empty() {
            tracing::warn!(
                "Display names shared by several ids: {:?}",
                self.summary.duplicate_names
            );
        }

        Ok(self.summary.clone())
    }

    /// Crawls every listing page of one bucket
    pub async fn crawl_bucket(&mut self, bucket: &str) -> Result<(), CrawlError> {
        let url = self.urls.listing(bucket);
        let Some(page) = self.fetch_listing(&url).await else {
            self.summary.buckets_skipped += 1;
            return Ok(());
        };
        if !page.is_success() {
            tracing::warn!("HTTP Status code returned: {} for url: {}", page.status, url);
            self.summary.buckets_skipped += 1;
            return Ok(());
        }

        let (num_pages, rows) = {
            let document = Document::parse_sanitized(&page.body);
            (count_pages(&document)?, extract_rows(&document))
        };
        self.summary.buckets_crawled += 1;
        tracing::debug!("Bucket {} spans {} pages", bucket, num_pages);

        self.process_rows(rows).await?;

        for num in 2..=num_pages {
            let page_url = self.urls.listing_page(bucket, num);
            let Some(page) = self.fetch_listing(&page_url).await else {
                continue;
            };
            if !page.is_success() {
                tracing::warn!("HTTP Status code returned: {} for url: {}", page.status, page_url);
            }
            self.parse_listing(&page.body).await?;
        }

        Ok(())
    }

    /// Parses one listing page and processes each movie row on it
    ///
    /// Returns the number of rows attempted.
    pub async fn parse_listing(&mut self, body: &str) -> Result<usize, CrawlError> {
        let rows = {
            let document = Document::parse_sanitized(body);
            extract_rows(&document)
        };
        self.process_rows(rows).await
    }

    async fn fetch_listing(&self, url: &str) -> Option<FetchedPage> {
        match self.fetcher.fetch(url).await {
            Ok(page) => Some(page),
            Err(e) => {
                tracing::error!("Failed to fetch listing {}: {}", url, e);
                None
            }
        }
    }

    async fn process_rows(&mut self, rows: Vec<ListingRow>) -> Result<usize, CrawlError> {
        self.summary.pages_crawled += 1;
        self.summary.rows_seen += rows.len() as u64;

        for row in &rows {
            if let Err(e) = self.process_row(row).await {
                tracing::error!("Error parsing movie: {} ({})", row.link_text, row.href);
                let error = CrawlError::in_row(row.link_text.clone(), e);
                match self.config.crawler.on_row_error {
                    RowErrorPolicy::Abort => return Err(error),
                    RowErrorPolicy::Skip => {
                        tracing::warn!("Skipping row: {}", error);
                        self.summary.rows_failed += 1;
                    }
                }
            }
        }

        Ok(rows.len())
    }

    /// Turns one listing row into a record
    ///
    /// Returns `Ok(None)` for rows whose link has no usable id.
    async fn process_row(&mut self, row: &ListingRow) -> Result<Option<MovieRecord>, CrawlError> {
        let year = row.year()?;
        let base_name = row.base_name();
        let name = self.registry.unique_name(&base_name);
        if name != base_name {
            tracing::debug!("Name collision, using '{}'", name);
        }

        let Some(id) = row.movie_id() else {
            tracing::debug!("Skipping row without a movie id: {}", row.href);
            self.summary.rows_malformed += 1;
            return Ok(None);
        };

        let genre = fetch_genre(&self.fetcher, &self.urls, &id).await?;
        let gross_usa = row.domestic_gross()?;
        let (gross_foreign, gross_foreign_mx) =
            fetch_foreign_gross(&self.fetcher, &self.urls, &id).await?;

        let record = MovieRecord::new(id, name, year, genre, gross_usa, gross_foreign, gross_foreign_mx);
        tracing::debug!("Saving info: {} -> {:?}", record.name, record);

        // Only complete records claim their id and name
        self.registry.register_identity(&record.id, &record.name);
        self.registry.insert_record(record.clone());
        self.sink.write_record(&record)?;
        self.summary.records_written += 1;

        Ok(Some(record))
    }
}

/// Convenience entry point: crawl with a CSV sink and return the summary
pub async fn run_crawl(config: Config) -> Result<CrawlSummary, CrawlError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
