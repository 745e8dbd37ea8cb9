use serde::Deserialize;

/// Main configuration structure for the crawler
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// What to do when a listing row fails to parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowErrorPolicy {
    /// Log the row and stop the whole crawl
    #[default]
    Abort,
    /// Log the row as a warning and carry on with the next one
    Skip,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Root of the movies section, e.g. `http://www.boxofficemojo.com/movies`
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Pause before each alphabetical bucket (milliseconds)
    #[serde(rename = "bucket-delay", default = "default_bucket_delay")]
    pub bucket_delay: u64,

    /// Pause before every outbound request (milliseconds, 0 disables)
    #[serde(rename = "request-delay", default)]
    pub request_delay: u64,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout", default = "default_connect_timeout")]
    pub connect_timeout: u64,

    #[serde(rename = "on-row-error", default)]
    pub on_row_error: RowErrorPolicy,

    /// Bucket order override; `None` means `NUM` then `A`..`Z`
    #[serde(default)]
    pub buckets: Option<Vec<String>>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            bucket_delay: default_bucket_delay(),
            request_delay: 0,
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
            on_row_error: RowErrorPolicy::default(),
            buckets: None,
        }
    }
}

impl CrawlerConfig {
    /// Returns the buckets to crawl, in order
    pub fn bucket_list(&self) -> Vec<String> {
        match &self.buckets {
            Some(buckets) => buckets.clone(),
            None => default_buckets(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "boxoffice-crawler".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/crawler".to_string(),
            contact_email: "crawler@example.com".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Format: CrawlerName/Version (+ContactURL; ContactEmail)
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// CSV file that receives one row per movie (opened in append mode)
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,

    /// Write a column header when the CSV file is empty
    #[serde(rename = "write-header", default)]
    pub write_header: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            write_header: false,
        }
    }
}

fn default_base_url() -> String {
    "http://www.boxofficemojo.com/movies".to_string()
}

fn default_bucket_delay() -> u64 {
    5000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_csv_path() -> String {
    "boxofficemojo.csv".to_string()
}

/// `NUM` collects titles starting with digits or symbols
pub fn default_buckets() -> Vec<String> {
    std::iter::once("NUM".to_string())
        .chain(('A'..='Z').map(|c| c.to_string()))
        .collect()
}
