//! Boxoffice crawler: alphabetical movie-database harvester
//!
//! This crate walks the alphabetical listing of a box office site, follows each
//! movie to its detail pages, and appends genre and gross figures to a CSV file.

pub mod config;
pub mod crawler;
pub mod document;
pub mod movie;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for crawler operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Error parsing movie '{row}': {source}")]
    Row {
        row: String,
        #[source]
        source: Box<CrawlError>,
    },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

impl CrawlError {
    /// Wraps an error with the rendered text of the listing row that raised it
    pub fn in_row(row: impl Into<String>, source: CrawlError) -> Self {
        CrawlError::Row {
            row: row.into(),
            source: Box::new(source),
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Page-shape errors raised while pulling fields out of a document
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Row has no column {index} (found {found} columns)")]
    MissingColumn { index: usize, found: usize },

    #[error("Invalid amount for {field}: '{value}'")]
    InvalidAmount {
        field: String,
        value: String,
        source: std::num::ParseFloatError,
    },

    #[error("Field '{field}' not found on {url}")]
    MissingField { field: String, url: String },

    #[error("Pagination link has no page number: {href}")]
    PageNumber { href: String },
}

/// Result type alias for crawler operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Coordinator};
pub use movie::{MovieRecord, MovieRegistry};
pub use output::{CrawlSummary, CsvRecordSink, RecordSink};
