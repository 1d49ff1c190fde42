use std::str::FromStr;

use crate::data::model::{CellValue, Column, Table, INDEX_COLUMN, TIMESTEP_COLUMN, VALUE_COLUMN};
use crate::error::{InvalidParameterError, TransformError};

// ---------------------------------------------------------------------------
// Transform parameters: which sensor, and the affine map for its readings
// ---------------------------------------------------------------------------

/// User-selected transform inputs: sensor `index`, multiplier `a`, offset `b`.
///
/// Each reading of the selected sensor is mapped to `value * a + b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParams {
    /// Sensor identifier matched against the `Index` column. Non-negative.
    pub index: i64,
    /// Multiplier applied to each reading.
    pub a: f64,
    /// Offset added after the multiplication.
    pub b: f64,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            index: 0,
            a: 1.0,
            b: 1.0,
        }
    }
}

impl TransformParams {
    /// Build params from raw text inputs; `None` means "not entered" and
    /// falls back to the default for that parameter.
    ///
    /// Entered text goes through [`parse_numeric_input`], so a blank entry
    /// coerces to `0` rather than failing. A negative sensor index is
    /// rejected.
    pub fn from_inputs(
        index: Option<&str>,
        a: Option<&str>,
        b: Option<&str>,
    ) -> Result<Self, InvalidParameterError> {
        let defaults = Self::default();

        let index = match index {
            Some(text) => {
                let value: i64 = parse_numeric_input("index", text)?;
                if value < 0 {
                    return Err(InvalidParameterError {
                        param: "index",
                        text: text.to_string(),
                    });
                }
                value
            }
            None => defaults.index,
        };
        let a = match a {
            Some(text) => parse_numeric_input("a", text)?,
            None => defaults.a,
        };
        let b = match b {
            Some(text) => parse_numeric_input("b", text)?,
            None => defaults.b,
        };

        Ok(Self { index, a, b })
    }
}

/// Coerce user-entered text into a number.
///
/// Blank input (empty or whitespace-only) counts as zero; anything else
/// must parse as `T`, otherwise the error names the parameter and echoes
/// the offending text.
pub fn parse_numeric_input<T>(param: &'static str, text: &str) -> Result<T, InvalidParameterError>
where
    T: FromStr + Default,
{
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    trimmed.parse().map_err(|_| InvalidParameterError {
        param,
        text: text.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Plot series: the chart-ready output of the transform
// ---------------------------------------------------------------------------

/// One chart point: the row's timestep and its transformed reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub timestep: f64,
    pub value: f64,
}

/// Ordered `(timestep, value)` pairs for one sensor, in source-table order.
///
/// An empty series is a legitimate result: the table simply has no rows
/// for the requested sensor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotSeries {
    pub points: Vec<PlotPoint>,
}

impl PlotSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points as `(x, y)` tuples, the shape chart backends want.
    pub fn xy(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().map(|p| (p.timestep, p.value))
    }
}

// ---------------------------------------------------------------------------
// Series computation
// ---------------------------------------------------------------------------

/// Filter the table to rows of one sensor and apply the affine map.
///
/// A row is selected when its `Index` cell holds exactly the queried
/// integer; float-typed cells never match, mirroring an exact-equality
/// comparison with no numeric coercion. Selected rows must carry numeric
/// `Timestep` and `Value` cells. The input table is only read, never
/// modified.
pub fn compute_series(
    table: &Table,
    params: &TransformParams,
) -> Result<PlotSeries, TransformError> {
    let index_column = require_column(table, INDEX_COLUMN)?;
    let timestep_column = require_column(table, TIMESTEP_COLUMN)?;
    let value_column = require_column(table, VALUE_COLUMN)?;

    let mut points = Vec::new();
    for row in 0..table.n_rows() {
        let selected = matches!(
            index_column.values[row],
            CellValue::Integer(i) if i == params.index
        );
        if !selected {
            continue;
        }

        let timestep = numeric_cell(&timestep_column.values[row], TIMESTEP_COLUMN, row)?;
        let value = numeric_cell(&value_column.values[row], VALUE_COLUMN, row)?;
        points.push(PlotPoint {
            timestep,
            value: value * params.a + params.b,
        });
    }

    Ok(PlotSeries { points })
}

fn require_column<'t>(table: &'t Table, name: &str) -> Result<&'t Column, TransformError> {
    table.column(name).ok_or_else(|| TransformError::MissingColumn {
        name: name.to_string(),
    })
}

fn numeric_cell(cell: &CellValue, column: &str, row: usize) -> Result<f64, TransformError> {
    cell.as_f64().ok_or_else(|| TransformError::NonNumericCell {
        column: column.to_string(),
        row,
        text: cell.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::CsvTableParser;

    fn sensor_table() -> Table {
        CsvTableParser::new()
            .parse_text("Index,Timestep,Value\n0,1,10\n0,2,20\n1,1,5\n")
            .unwrap()
    }

    fn series_of(table: &Table, index: i64, a: f64, b: f64) -> PlotSeries {
        compute_series(table, &TransformParams { index, a, b }).unwrap()
    }

    fn assert_points(series: &PlotSeries, expected: &[(f64, f64)]) {
        assert_eq!(series.len(), expected.len());
        for (point, (x, y)) in series.points.iter().zip(expected) {
            assert!((point.timestep - x).abs() < 1e-9);
            assert!((point.value - y).abs() < 1e-9);
        }
    }

    #[test]
    fn affine_transform_on_selected_sensor() {
        let table = sensor_table();
        assert_points(&series_of(&table, 0, 2.0, 1.0), &[(1.0, 21.0), (2.0, 41.0)]);
        assert_points(&series_of(&table, 1, 1.0, 1.0), &[(1.0, 6.0)]);
    }

    #[test]
    fn unmatched_sensor_yields_empty_series() {
        let table = sensor_table();
        assert!(series_of(&table, 5, 1.0, 1.0).is_empty());
    }

    #[test]
    fn identity_transform_preserves_raw_pairs_in_order() {
        let table = sensor_table();
        assert_points(&series_of(&table, 0, 1.0, 0.0), &[(1.0, 10.0), (2.0, 20.0)]);
    }

    #[test]
    fn empty_table_yields_empty_series() {
        let table = CsvTableParser::new()
            .parse_text("Index,Timestep,Value\n")
            .unwrap();
        assert!(series_of(&table, 0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn float_index_cells_never_match_integer_query() {
        let table = CsvTableParser::new()
            .parse_text("Index,Timestep,Value\n0.0,1,10\n")
            .unwrap();
        assert!(series_of(&table, 0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let table = CsvTableParser::new()
            .parse_text("Index,Timestep\n0,1\n")
            .unwrap();
        let err = compute_series(&table, &TransformParams::default()).unwrap_err();
        assert_eq!(
            err,
            TransformError::MissingColumn {
                name: "Value".to_string()
            }
        );
    }

    #[test]
    fn non_numeric_reading_in_selected_row_is_an_error() {
        let table = CsvTableParser::new()
            .parse_text("Index,Timestep,Value\n0,1,broken\n")
            .unwrap();
        let err = compute_series(&table, &TransformParams::default()).unwrap_err();
        assert!(matches!(err, TransformError::NonNumericCell { row: 0, .. }));
    }

    #[test]
    fn non_numeric_reading_in_unselected_row_is_ignored() {
        let table = CsvTableParser::new()
            .parse_text("Index,Timestep,Value\n7,1,broken\n0,2,20\n")
            .unwrap();
        assert_points(&series_of(&table, 0, 1.0, 0.0), &[(2.0, 20.0)]);
        assert_points(&series_of(&table, 0, 1.0, 1.0), &[(2.0, 21.0)]);
    }

    #[test]
    fn blank_input_coerces_to_zero() {
        assert_eq!(parse_numeric_input::<i64>("index", "").unwrap(), 0);
        assert_eq!(parse_numeric_input::<i64>("index", "  ").unwrap(), 0);
        assert_eq!(parse_numeric_input::<i64>("index", "5").unwrap(), 5);
        assert!((parse_numeric_input::<f64>("a", " 2.5 ").unwrap() - 2.5).abs() < 1e-9);
        assert!(parse_numeric_input::<i64>("index", "abc").is_err());
    }

    #[test]
    fn params_fall_back_to_defaults_when_not_entered() {
        let params = TransformParams::from_inputs(None, None, None).unwrap();
        assert_eq!(params, TransformParams::default());
        assert_eq!(params.index, 0);
        assert!((params.a - 1.0).abs() < 1e-9);
        assert!((params.b - 1.0).abs() < 1e-9);
    }

    #[test]
    fn entered_blank_params_coerce_to_zero() {
        let params = TransformParams::from_inputs(Some(""), Some(""), Some("")).unwrap();
        assert_eq!(params.index, 0);
        assert!((params.a - 0.0).abs() < 1e-9);
        assert!((params.b - 0.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_parameter_names_the_culprit() {
        let err = TransformParams::from_inputs(None, Some("two"), None).unwrap_err();
        assert_eq!(err.param, "a");
        assert_eq!(err.text, "two");
    }

    #[test]
    fn negative_index_is_rejected() {
        let err = TransformParams::from_inputs(Some("-3"), None, None).unwrap_err();
        assert_eq!(err.param, "index");
        assert_eq!(err.text, "-3");
    }
}
