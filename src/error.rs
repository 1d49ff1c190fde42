//! Error types for upload parsing, series transforms, and chart rendering.

use thiserror::Error;

/// Error returned when an uploaded payload cannot be turned into a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Transport encoding was malformed: missing `,` separator, invalid
    /// base64, or decoded bytes that are not UTF-8 text.
    #[error("could not decode upload payload: {reason}")]
    Decode { reason: String },
    /// Filename does not carry a recognized delimited-text extension.
    #[error("unrecognized file format: {filename}")]
    UnsupportedFormat { filename: String },
    /// Decoded text is not well-formed delimited content (ragged rows,
    /// unreadable header row).
    #[error("malformed CSV content: {reason}")]
    CsvSyntax { reason: String },
}

/// Error returned when a plot series cannot be derived from a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A required column (`Index`, `Timestep`, `Value`) is absent.
    #[error("missing column {name}")]
    MissingColumn { name: String },
    /// A selected row holds a cell that cannot be read as a number.
    #[error("column {column}, row {row}: {text:?} is not numeric")]
    NonNumericCell {
        column: String,
        row: usize,
        text: String,
    },
}

/// A user-entered parameter that could not be coerced to its numeric type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value for parameter `{param}`: {text:?}")]
pub struct InvalidParameterError {
    /// Which parameter the offending text was entered for.
    pub param: &'static str,
    /// The text as the user typed it.
    pub text: String,
}

/// Failure while rendering a series to an SVG chart.
#[derive(Debug, Error)]
#[error("failed to render plot: {0}")]
pub struct PlotError(pub String);

impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for PlotError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        PlotError(value.to_string())
    }
}
