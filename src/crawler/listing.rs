//! Alphabetical listing rows
//!
//! A listing page is a table with one row per movie. The movie link sits in
//! the first column, domestic gross in column 2 and the release date in
//! column 6. Rows are pulled out of the document into owned [`ListingRow`]
//! values so the document can be dropped before any detail page is fetched.

use crate::document::{enclosing, find_link, render_text, Document};
use crate::url::{extract_movie_id, extract_year, query_value};
use crate::ExtractError;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

/// Column holding domestic gross
pub const DOMESTIC_GROSS_COLUMN: usize = 2;

/// Column holding the release date (or a future-year link)
pub const DATE_COLUMN: usize = 6;

static TD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("hardcoded selector is valid"));

/// One table cell of a listing row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowCell {
    /// Rendered text of the cell
    pub text: String,

    /// Text of a link to a specific release date, if any
    pub date_link: Option<String>,

    /// Target of a link to a release year (unreleased titles), if any
    pub year_link: Option<String>,
}

impl RowCell {
    fn from_element(cell: ElementRef<'_>) -> Self {
        Self {
            text: render_text(cell),
            date_link: find_link(cell, "date=").map(render_text),
            year_link: find_link(cell, "yr=")
                .and_then(|link| link.value().attr("href"))
                .map(str::to_string),
        }
    }

    /// Release year shown in this cell
    ///
    /// A date link wins over a year link, which wins over the plain text.
    pub fn year(&self) -> Option<u32> {
        if let Some(date) = &self.date_link {
            return extract_year(date);
        }
        if let Some(href) = &self.year_link {
            return extract_year(query_value(href, "yr").unwrap_or(href.as_str()));
        }
        extract_year(&self.text)
    }
}

/// A movie link together with the cells of the row it sits in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingRow {
    /// Rendered text of the movie link
    pub link_text: String,

    /// Raw `href` of the movie link
    pub href: String,

    pub cells: Vec<RowCell>,
}

impl ListingRow {
    pub fn cell(&self, index: usize) -> Result<&RowCell, ExtractError> {
        self.cells.get(index).ok_or(ExtractError::MissingColumn {
            index,
            found: self.cells.len(),
        })
    }

    /// Release year from the date column; `None` when it carries no year
    pub fn year(&self) -> Result<Option<u32>, ExtractError> {
        Ok(self.cell(DATE_COLUMN)?.year())
    }

    /// Link text with literal double quotes removed
    pub fn base_name(&self) -> String {
        self.link_text.replace('"', "")
    }

    /// Canonical id, or `None` for rows whose link does not carry exactly one id
    pub fn movie_id(&self) -> Option<String> {
        extract_movie_id(&self.href)
    }

    pub fn domestic_gross(&self) -> Result<f64, ExtractError> {
        let cell = self.cell(DOMESTIC_GROSS_COLUMN)?;
        parse_amount("domestic gross", &cell.text)
    }
}

/// Extracts one row per movie link on a listing page
///
/// The first link carrying an `id=` marker is a promotional placement and is
/// always dropped.
pub fn extract_rows(document: &Document) -> Vec<ListingRow> {
    document
        .links_containing("id=")
        .into_iter()
        .skip(1)
        .map(|link| ListingRow {
            link_text: render_text(link),
            href: link.value().attr("href").unwrap_or_default().to_string(),
            cells: enclosing(link, "tr")
                .map(|row| row.select(&TD).map(RowCell::from_element).collect())
                .unwrap_or_default(),
        })
        .collect()
}

/// Parses a money cell: `"$1,234,567*"` becomes `1234567.0`, `"n/a"` becomes `0.0`
pub fn parse_amount(field: &str, text: &str) -> Result<f64, ExtractError> {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '*' | '$' | ','))
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.eq_ignore_ascii_case("n/a") {
        return Ok(0.0);
    }

    cleaned
        .parse::<f64>()
        .map_err(|source| ExtractError::InvalidAmount {
            field: field.to_string(),
            value: text.to_string(),
            source,
        })
}
