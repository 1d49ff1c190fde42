use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use csv::{ReaderBuilder, Trim};

use crate::data::model::{CellValue, Column, Table, UploadedFile};
use crate::error::ParseError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse an uploaded file with the default parser configuration.
pub fn parse_table(upload: &UploadedFile) -> Result<Table, ParseError> {
    CsvTableParser::new().parse_upload(upload)
}

// ---------------------------------------------------------------------------
// CsvTableParser – upload payload to Table
// ---------------------------------------------------------------------------

/// Turns an uploaded payload into a [`Table`].
///
/// Upload contents travel as `"<content-type prefix>,<base64 payload>"`.
/// The prefix is discarded, the payload is base64-decoded into UTF-8 text
/// and read as delimited data whose first row names the columns.
pub struct CsvTableParser {
    /// Field delimiter (default: comma).
    delimiter: u8,
    /// Trim whitespace around headers and fields (default: on).
    trim: bool,
    /// Filename extensions accepted as delimited text, lowercase.
    extensions: Vec<String>,
}

impl Default for CsvTableParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
            extensions: vec!["csv".to_string(), "txt".to_string()],
        }
    }
}

impl CsvTableParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions.iter().map(|e| e.to_ascii_lowercase()).collect();
        self
    }

    /// Check that the filename carries a recognized extension.
    ///
    /// Matching is on the final extension only, case-insensitively, so
    /// `report.CSV` passes while `report.csv.bak` does not.
    pub fn check_format(&self, filename: &str) -> Result<(), ParseError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        if self.extensions.iter().any(|e| *e == extension) {
            Ok(())
        } else {
            Err(ParseError::UnsupportedFormat {
                filename: filename.to_string(),
            })
        }
    }

    /// Decode and parse one upload into a [`Table`].
    pub fn parse_upload(&self, upload: &UploadedFile) -> Result<Table, ParseError> {
        self.check_format(&upload.filename)?;
        let text = decode_data_uri(&upload.contents)?;
        self.parse_text(&text)
    }

    /// Parse delimited text, first row as headers, into a [`Table`].
    ///
    /// Every data row must have exactly as many fields as the header;
    /// ragged input is rejected rather than padded.
    pub fn parse_text(&self, text: &str) -> Result<Table, ParseError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ParseError::CsvSyntax {
                reason: format!("header row: {e}"),
            })?
            .iter()
            .map(|h| h.to_string())
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ParseError::CsvSyntax {
                reason: "no header row".to_string(),
            });
        }

        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column::new(name, Vec::new()))
            .collect();

        for (row_no, result) in reader.records().enumerate() {
            let record = result.map_err(|e| ParseError::CsvSyntax {
                reason: format!("row {row_no}: {e}"),
            })?;
            for (column, field) in columns.iter_mut().zip(record.iter()) {
                column.values.push(CellValue::from_text(field));
            }
        }

        Ok(Table::from_columns(columns))
    }
}

/// Split a data-URI style payload on its first comma and base64-decode the
/// remainder into UTF-8 text.
fn decode_data_uri(contents: &str) -> Result<String, ParseError> {
    let (_, payload) = contents
        .split_once(',')
        .ok_or_else(|| decode_error("payload has no `,` separator".to_string()))?;
    let bytes = BASE64
        .decode(payload)
        .map_err(|e| decode_error(format!("invalid base64: {e}")))?;
    String::from_utf8(bytes).map_err(|e| decode_error(format!("payload is not UTF-8: {e}")))
}

fn decode_error(reason: String) -> ParseError {
    log::warn!("upload decode failed: {reason}");
    ParseError::Decode { reason }
}
