//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings and timeouts
//! - Optional pacing before every outbound request
//! - Classifying transport failures so detail lookups can degrade gracefully

use crate::config::{Config, CrawlerConfig, UserAgentConfig};
use crate::CrawlError;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// A fetched page, whatever its status
#[derive(Debug)]
pub struct FetchedPage {
    /// HTTP status code
    pub status: u16,

    /// Page body content
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK.as_u16()
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `crawler` - Timeouts come from here
///
/// # Example
///
/// ```no_run
/// use boxoffice_crawler::config::{CrawlerConfig, UserAgentConfig};
/// use boxoffice_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.request_timeout))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Whether a request failed at the transport level (DNS, refused, timeout, dropped body)
pub fn is_connection_error(error: &reqwest::Error) -> bool {
    error.is_connect() || error.is_timeout() || error.is_request() || error.is_body()
}

/// Sequential page fetcher
pub struct Fetcher {
    client: Client,
    request_delay: Duration,
}

impl Fetcher {
    pub fn new(config: &Config) -> Result<Self, CrawlError> {
        let client = build_http_client(&config.user_agent, &config.crawler)?;
        Ok(Self::with_client(
            client,
            Duration::from_millis(config.crawler.request_delay),
        ))
    }

    pub fn with_client(client: Client, request_delay: Duration) -> Self {
        Self {
            client,
            request_delay,
        }
    }

    /// Fetches a URL and returns its body along with the status code
    ///
    /// Non-200 responses are not errors here; callers decide what a bad status
    /// means for them. Transport failures come back as [`CrawlError::Http`].
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, CrawlError> {
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }

        let http_error = |source: reqwest::Error| CrawlError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(http_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(http_error)?;

        Ok(FetchedPage {
            status,
            body,
        })
    }

    /// Fetches a detail page, mapping "no usable data" to `None`
    ///
    /// Connection-level failures and non-200 responses are logged and yield
    /// `None`. Any other failure propagates.
    pub async fn fetch_detail(&self, url: &str) -> Result<Option<String>, CrawlError> {
        match self.fetch(url).await {
            Ok(page) if page.is_success() => Ok(Some(page.body)),
            Ok(page) => {
                tracing::warn!("HTTP status {} for detail page {}", page.status, url);
                Ok(None)
            }
            Err(CrawlError::Http { url, source }) if is_connection_error(&source) => {
                tracing::warn!("Connection error for {}: {}", url, source);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
