//! Command-line front end: parse a CSV of sensor readings, select one
//! sensor, transform its values, and print the series plus the table.

use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use clap::Parser;
use thiserror::Error;

use sensorscope::plot::{render_scatter_svg, PlotStyle};
use sensorscope::{
    compute_series, parse_table, InvalidParameterError, ParseError, PlotError, PlotSeries, Table,
    TransformError, TransformParams, UploadedFile, TIMESTEP_COLUMN, VALUE_COLUMN,
};

#[derive(Parser)]
#[command(name = "sensorscope")]
#[command(version, about = "Filter sensor readings from a CSV, apply value * a + b, plot the series")]
struct Args {
    /// Input CSV with `Index,Timestep,Value` columns
    #[arg(short, long)]
    file: PathBuf,

    /// Sensor index to select (default 0; blank counts as 0)
    #[arg(short, long)]
    index: Option<String>,

    /// Multiplier for each reading (default 1; blank counts as 0)
    #[arg(short, long)]
    a: Option<String>,

    /// Offset added to each reading (default 1; blank counts as 0)
    #[arg(short, long)]
    b: Option<String>,

    /// Write a scatter chart of the series to this SVG file
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Print the table as JSON records instead of aligned text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read input file: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Param(#[from] InvalidParameterError),
    #[error(transparent)]
    Plot(#[from] PlotError),
}

impl CliError {
    /// Exit status: 1 for input/output I/O, 2 for parse or transform
    /// failures, 3 for unparsable parameter text.
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Io(_) | CliError::Plot(_) => 1,
            CliError::Parse(_) | CliError::Transform(_) => 2,
            CliError::Param(_) => 3,
        }
    }
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

/// One full request: coerce parameters, read and parse the file, compute
/// the series, optionally render the chart, and return the text output.
///
/// Parameter text is validated before the file is opened, so bad text is
/// reported even when the file is also missing.
fn run(args: &Args) -> Result<String, CliError> {
    let params = TransformParams::from_inputs(
        args.index.as_deref(),
        args.a.as_deref(),
        args.b.as_deref(),
    )?;

    let bytes = fs::read(&args.file)?;
    // Same payload shape a browser upload event delivers.
    let upload = UploadedFile::new(data_uri(&bytes), filename_of(&args.file));
    let table = parse_table(&upload)?;
    log::info!(
        "Parsed {} rows x {} columns from {}",
        table.n_rows(),
        table.n_columns(),
        upload.filename
    );

    let series = compute_series(&table, &params)?;

    if let Some(path) = &args.plot {
        let style = PlotStyle {
            caption: format!("Sensor {}", params.index),
            ..PlotStyle::default()
        };
        render_scatter_svg(&series, path, &style)?;
        log::info!("Wrote chart to {}", path.display());
    }

    let mut out = series_csv(&series);
    out.push('\n');
    out.push_str(&upload.filename);
    out.push('\n');
    if args.json {
        out.push_str(&format!("{:#}\n", table.to_records()));
    } else {
        out.push_str(&format_table(&table));
    }
    Ok(out)
}

fn data_uri(bytes: &[u8]) -> String {
    format!("data:text/csv;base64,{}", BASE64.encode(bytes))
}

fn filename_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// The transformed series as `Timestep,Value` CSV lines.
fn series_csv(series: &PlotSeries) -> String {
    let mut out = format!("{TIMESTEP_COLUMN},{VALUE_COLUMN}\n");
    for point in &series.points {
        out.push_str(&format!("{},{}\n", point.timestep, point.value));
    }
    out
}

/// Fixed-width text rendering of the table, header row first.
fn format_table(table: &Table) -> String {
    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.name.len()).collect();
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(table.n_rows());
    for row in 0..table.n_rows() {
        let cells: Vec<String> = table
            .columns
            .iter()
            .map(|c| c.values[row].to_string())
            .collect();
        for (width, cell) in widths.iter_mut().zip(&cells) {
            *width = (*width).max(cell.len());
        }
        rows.push(cells);
    }

    let header: Vec<String> = table.columns.iter().map(|c| c.name.clone()).collect();
    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    for cells in &rows {
        push_row(&mut out, cells, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(&format!("{cell:<width$}"));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
