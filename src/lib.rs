//! Sensor data inspection core: decode an uploaded CSV into a typed table,
//! filter one sensor's readings by its `Index`, and map each reading through
//! `value * a + b` into a chart-ready series.
//!
//! Both steps are stateless and sit behind two calls: [`parse_table`] (or a
//! configured [`CsvTableParser`]) and [`compute_series`].
//!
//! # Example
//! ```
//! use sensorscope::{compute_series, CsvTableParser, TransformParams};
//!
//! let table = CsvTableParser::new()
//!     .parse_text("Index,Timestep,Value\n0,1,10\n0,2,20\n1,1,5\n")
//!     .unwrap();
//!
//! let params = TransformParams { index: 0, a: 2.0, b: 1.0 };
//! let series = compute_series(&table, &params).unwrap();
//!
//! let points: Vec<(f64, f64)> = series.xy().collect();
//! assert_eq!(points, vec![(1.0, 21.0), (2.0, 41.0)]);
//! ```

pub mod data;
pub mod error;
pub mod plot;

// Re-export the public API
pub use data::loader::{parse_table, CsvTableParser};
pub use data::model::{
    CellValue, Column, Table, UploadedFile, INDEX_COLUMN, TIMESTEP_COLUMN, VALUE_COLUMN,
};
pub use data::transform::{
    compute_series, parse_numeric_input, PlotPoint, PlotSeries, TransformParams,
};
pub use error::{InvalidParameterError, ParseError, PlotError, TransformError};
