//! Append-only CSV sink
//!
//! Row layout: `name, year, genre, grossTotal, grossForeignMX, grossUSA, id`.
//! Quoting follows the field's type rather than its content: text fields are
//! always quoted (a title like `1917` included), numbers never are. The file
//! is opened in append mode so an interrupted crawl can be resumed into the
//! same file.

use crate::movie::MovieRecord;
use crate::output::traits::{OutputResult, RecordSink};
use csv::{QuoteStyle, Writer, WriterBuilder};
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Column names, written only when requested and the file is empty
pub const CSV_HEADER: [&str; 7] = [
    "name",
    "year",
    "genre",
    "gross_total",
    "gross_foreign_mx",
    "gross_usa",
    "id",
];

pub struct CsvRecordSink {
    writer: Writer<File>,
    rows_written: u64,
}

impl CsvRecordSink {
    /// Opens (or creates) `path` for appending
    pub fn open(path: &Path, write_header: bool) -> OutputResult<Self> {
        let existing_len = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        // Quotes are applied per field in `quote_text`
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .from_writer(file);

        if write_header && existing_len == 0 {
            writer.write_record(CSV_HEADER.map(quote_text))?;
            writer.flush()?;
        }

        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    /// Rows appended by this sink (not counting rows already in the file)
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }
}

impl RecordSink for CsvRecordSink {
    fn write_record(&mut self, record: &MovieRecord) -> OutputResult<()> {
        let year = record.year.unwrap_or(0).to_string();
        self.writer.write_record([
            quote_text(&record.name),
            year,
            quote_text(&record.genre),
            format_amount(record.gross_total),
            format_amount(record.gross_foreign_mx),
            format_amount(record.gross_usa),
            quote_text(&record.id),
        ])?;
        self.writer.flush()?;
        self.rows_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Wraps a text field in double quotes, doubling any embedded quote
pub fn quote_text(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// Formats an amount keeping the decimal point, e.g. `1234567.0`
pub fn format_amount(value: f64) -> String {
    format!("{:?}", value)
}
