//! Output module for crawl results
//!
//! This module handles:
//! - Appending movie records to the CSV file as they are produced
//! - Collecting and printing end-of-run statistics

mod csv_output;
pub mod stats;
mod traits;

pub use csv_output::{format_amount, CsvRecordSink, CSV_HEADER};
pub use stats::{print_summary, CrawlSummary};
pub use traits::{OutputError, OutputResult, RecordSink};
