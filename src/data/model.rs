use std::fmt;

use serde::Serialize;
use serde_json::Value as JsonValue;

/// Name of the column carrying the integer sensor identifier.
pub const INDEX_COLUMN: &str = "Index";
/// Name of the column carrying the ordinal time value (the x axis).
pub const TIMESTEP_COLUMN: &str = "Timestep";
/// Name of the column carrying the numeric sensor reading.
pub const VALUE_COLUMN: &str = "Value";

// ---------------------------------------------------------------------------
// UploadedFile – one upload event from the presentation layer
// ---------------------------------------------------------------------------

/// An uploaded file as handed over by the presentation layer: the payload in
/// data-URI form (`"<content-type-prefix>,<base64-payload>"`) plus the
/// original filename. Created per upload, discarded after parsing.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub contents: String,
    pub filename: String,
}

impl UploadedFile {
    pub fn new(contents: impl Into<String>, filename: impl Into<String>) -> Self {
        UploadedFile {
            contents: contents.into(),
            filename: filename.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// CellValue – a single cell in a table column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common CSV-inferred dtypes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl CellValue {
    /// Guess the type of a raw CSV field. Empty text is `Null`; integers win
    /// over floats so `Index`-style columns keep exact integer identity.
    pub fn from_text(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::String(s.to_string())
    }

    /// Try to interpret the value as an `f64` for numeric processing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// The field text written on CSV re-serialization; `Null` round-trips
    /// back to an empty field.
    fn csv_field(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Column / Table – the parsed dataset
// ---------------------------------------------------------------------------

/// A named column of cell values.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }
}

/// The full parsed table: an ordered sequence of named columns with rows
/// positionally aligned across them. Immutable once produced; transforms
/// borrow it and build derived series.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<Column>,
}

impl Table {
    /// Build a table from pre-aligned columns. Panics if the columns do not
    /// all have the same number of values.
    pub fn from_columns(columns: Vec<Column>) -> Self {
        assert!(
            columns.windows(2).all(|w| w[0].values.len() == w[1].values.len()),
            "columns have unequal row counts"
        );
        Table { columns }
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Whether the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Re-serialize the table as CSV text (header row first).
    pub fn to_csv_string(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(self.columns.iter().map(|c| c.name.as_str()))?;
        for row in 0..self.n_rows() {
            writer.write_record(self.columns.iter().map(|c| c.values[row].csv_field()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Row-oriented JSON view (`[{"Index": 0, "Timestep": 1, ...}, ...]`),
    /// the shape data-table widgets consume.
    pub fn to_records(&self) -> JsonValue {
        let records: Vec<JsonValue> = (0..self.n_rows())
            .map(|row| {
                let mut record = serde_json::Map::with_capacity(self.n_columns());
                for col in &self.columns {
                    let value =
                        serde_json::to_value(&col.values[row]).unwrap_or(JsonValue::Null);
                    record.insert(col.name.clone(), value);
                }
                JsonValue::Object(record)
            })
            .collect();
        JsonValue::Array(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::from_columns(vec![
            Column::new(
                INDEX_COLUMN,
                vec![CellValue::Integer(0), CellValue::Integer(1)],
            ),
            Column::new(
                TIMESTEP_COLUMN,
                vec![CellValue::Integer(1), CellValue::Integer(2)],
            ),
            Column::new(
                VALUE_COLUMN,
                vec![CellValue::Float(10.5), CellValue::Null],
            ),
        ])
    }

    #[test]
    fn guesses_cell_types_from_text() {
        assert_eq!(CellValue::from_text(""), CellValue::Null);
        assert_eq!(CellValue::from_text("5"), CellValue::Integer(5));
        assert_eq!(CellValue::from_text("-3"), CellValue::Integer(-3));
        assert_eq!(CellValue::from_text("2.5"), CellValue::Float(2.5));
        assert_eq!(CellValue::from_text("1e3"), CellValue::Float(1000.0));
        assert_eq!(CellValue::from_text("true"), CellValue::Bool(true));
        assert_eq!(
            CellValue::from_text("roof"),
            CellValue::String("roof".to_string())
        );
    }

    #[test]
    fn as_f64_covers_numeric_variants_only() {
        assert_eq!(CellValue::Integer(4).as_f64(), Some(4.0));
        assert_eq!(CellValue::Float(2.5).as_f64(), Some(2.5));
        assert_eq!(CellValue::Bool(true).as_f64(), None);
        assert_eq!(CellValue::String("4".into()).as_f64(), None);
        assert_eq!(CellValue::Null.as_f64(), None);
    }

    #[test]
    #[should_panic(expected = "unequal row counts")]
    fn rejects_columns_with_unequal_row_counts() {
        Table::from_columns(vec![
            Column::new(INDEX_COLUMN, vec![CellValue::Integer(0)]),
            Column::new(VALUE_COLUMN, Vec::new()),
        ]);
    }

    #[test]
    fn table_shape_accessors() {
        let table = sample_table();
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.n_columns(), 3);
        assert!(!table.is_empty());
        assert_eq!(table.column_names(), vec!["Index", "Timestep", "Value"]);
        assert!(table.column("Value").is_some());
        assert!(table.column("value").is_none());
    }

    #[test]
    fn csv_serialization_writes_header_and_rows() {
        let csv = sample_table().to_csv_string().unwrap();
        assert_eq!(csv, "Index,Timestep,Value\n0,1,10.5\n1,2,\n");
    }

    #[test]
    fn records_view_matches_row_orientation() {
        let records = sample_table().to_records();
        assert_eq!(
            records,
            serde_json::json!([
                {"Index": 0, "Timestep": 1, "Value": 10.5},
                {"Index": 1, "Timestep": 2, "Value": null},
            ])
        );
    }
}
