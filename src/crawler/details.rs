//! Per-movie detail extraction
//!
//! Two pages are consulted for every movie: its main page (for the genre) and
//! its Mexico international-gross page (for foreign and Mexico totals). Both
//! present their data as labeled fields, either `Label: Value` in a single
//! cell or a label cell followed by a value cell.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::listing::parse_amount;
use crate::document::{render_text, Document};
use crate::url::SiteUrls;
use crate::{CrawlError, ExtractError};
use scraper::{ElementRef, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("hardcoded selector is valid"));

pub const GENRE_LABEL: &str = "Genre";
pub const FOREIGN_TOTAL_LABEL: &str = "Gross To Date Foreign";
pub const COUNTRY_TOTAL_LABEL: &str = "Gross To Date Country";

/// Marker text present only when the movie played in Mexico
pub const COUNTRY_MARKER: &str = "Mexico";

/// Text of a cell, or `None` for a layout cell wrapping a nested table
fn leaf_cell_text(cell: ElementRef<'_>) -> Option<String> {
    match cell.select(&TABLE).next() {
        Some(_) => None,
        None => Some(render_text(cell)),
    }
}

/// Collects labeled fields from every table row; the first occurrence of a label wins
///
/// Only innermost cells are read. A cell holding a nested table keeps its
/// position in the row but contributes neither a label nor a value.
pub fn labeled_fields(document: &Document) -> HashMap<String, String> {
    let mut fields = HashMap::new();

    for row in document.elements("tr") {
        let cells: Vec<Option<String>> = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| matches!(el.value().name(), "td" | "th"))
            .map(leaf_cell_text)
            .collect();
        let cell = |i: usize| cells.get(i).and_then(Option::as_deref).unwrap_or("");

        for (i, text) in cells.iter().enumerate() {
            let Some(text) = text.as_deref() else {
                continue;
            };
            let (label, value) = match text.split_once(':') {
                Some((label, value)) if value.trim().is_empty() => (label.trim(), cell(i + 1)),
                Some((label, value)) => (label.trim(), value.trim()),
                None if cells.len() == 2 && i == 0 => (text, cell(1)),
                None => continue,
            };

            if !label.is_empty() && !value.is_empty() {
                fields
                    .entry(label.to_string())
                    .or_insert_with(|| value.to_string());
            }
        }
    }

    fields
}

/// Genre from a sanitized main page; empty when the page has no genre at all
pub fn extract_genre(document: &Document, url: &str) -> Result<String, ExtractError> {
    if !document.contains_text(GENRE_LABEL) {
        return Ok(String::new());
    }

    labeled_fields(document)
        .remove(GENRE_LABEL)
        .ok_or_else(|| ExtractError::MissingField {
            field: GENRE_LABEL.to_string(),
            url: url.to_string(),
        })
}

/// `(foreign total, Mexico total)` from a sanitized international page
///
/// A page that never mentions Mexico means no theatrical run there: `(0, 0)`.
pub fn extract_foreign_gross(document: &Document, url: &str) -> Result<(f64, f64), ExtractError> {
    if !document.contains_text(COUNTRY_MARKER) {
        return Ok((0.0, 0.0));
    }

    let fields = labeled_fields(document);
    let amount = |label: &str| -> Result<f64, ExtractError> {
        let text = fields.get(label).ok_or_else(|| ExtractError::MissingField {
            field: label.to_string(),
            url: url.to_string(),
        })?;
        parse_amount(label, text)
    };

    Ok((amount(FOREIGN_TOTAL_LABEL)?, amount(COUNTRY_TOTAL_LABEL)?))
}

/// Fetches and parses a movie's genre
///
/// Connection failures and bad statuses yield an empty genre.
pub async fn fetch_genre(fetcher: &Fetcher, urls: &SiteUrls, id: &str) -> Result<String, CrawlError> {
    let url = urls.detail(id);
    tracing::debug!("Fetching genre from {}", url);

    let Some(body) = fetcher.fetch_detail(&url).await? else {
        return Ok(String::new());
    };

    let document = Document::parse_sanitized(&body);
    Ok(extract_genre(&document, &url)?)
}

/// Fetches and parses a movie's foreign and Mexico gross
///
/// Connection failures and bad statuses yield `(0, 0)`.
pub async fn fetch_foreign_gross(
    fetcher: &Fetcher,
    urls: &SiteUrls,
    id: &str,
) -> Result<(f64, f64), CrawlError> {
    let url = urls.international(id);
    tracing::debug!("Fetching foreign gross from {}", url);

    let Some(body) = fetcher.fetch_detail(&url).await? else {
        return Ok((0.0, 0.0));
    };

    let document = Document::parse_sanitized(&body);
    Ok(extract_foreign_gross(&document, &url)?)
}
