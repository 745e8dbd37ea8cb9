//! Movie records and the in-memory registries built during a crawl

mod registry;

pub use registry::MovieRegistry;

/// Everything the crawler learns about one listing row
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    /// Canonical id taken from the detail link
    pub id: String,

    /// Display name, unique within one crawl run
    pub name: String,

    /// Release year; `None` when the date column carries no four-digit year
    pub year: Option<u32>,

    /// Genre label from the detail page, empty when unavailable
    pub genre: String,

    /// Domestic plus all foreign gross
    pub gross_total: f64,

    /// Foreign gross across all markets
    pub gross_foreign: f64,

    /// Gross in Mexico
    pub gross_foreign_mx: f64,

    /// Domestic gross
    pub gross_usa: f64,
}

impl MovieRecord {
    /// Builds a record, fixing `gross_total` as domestic plus all foreign gross
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        year: Option<u32>,
        genre: impl Into<String>,
        gross_usa: f64,
        gross_foreign: f64,
        gross_foreign_mx: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            year,
            genre: genre.into(),
            gross_total: gross_usa + gross_foreign,
            gross_foreign,
            gross_foreign_mx,
            gross_usa,
        }
    }
}
