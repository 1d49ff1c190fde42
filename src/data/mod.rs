/// Data layer: core types, upload parsing, and the sensor transform.
///
/// Architecture:
/// ```text
///  base64 upload payload
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode + parse CSV → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   Table   │  named columns of typed cells
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ transform  │  filter by sensor index, Value * a + b → PlotSeries
///   └───────────┘
/// ```
pub mod loader;
pub mod model;
pub mod transform;
