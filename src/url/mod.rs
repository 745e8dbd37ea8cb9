//! URL construction and link-marker parsing
//!
//! The site exposes three kinds of pages the crawler visits:
//! - alphabetical listings: `<base>/alphabetical.htm?letter=<L>[&page=<N>]`
//! - movie detail pages: `<base>/?id=<ID>.htm`
//! - international gross pages: `<base>/?page=intl&country=MX&id=<ID>.htm`

mod query;

pub use query::{extract_movie_id, extract_year, first_number, query_value};

/// Builds page URLs relative to the configured movies root
#[derive(Debug, Clone)]
pub struct SiteUrls {
    base: String,
}

impl SiteUrls {
    /// Creates a URL builder; a trailing slash on `base` is ignored
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// First page of a bucket's listing
    pub fn listing(&self, bucket: &str) -> String {
        format!("{}/alphabetical.htm?letter={}", self.base, bucket)
    }

    /// Numbered sub-page of a bucket's listing
    pub fn listing_page(&self, bucket: &str, page: u32) -> String {
        format!("{}&page={}", self.listing(bucket), page)
    }

    /// Main page of a movie
    pub fn detail(&self, id: &str) -> String {
        format!("{}/?id={}.htm", self.base, id)
    }

    /// Mexico international-gross page of a movie
    pub fn international(&self, id: &str) -> String {
        format!("{}/?page=intl&country=MX&id={}.htm", self.base, id)
    }
}
