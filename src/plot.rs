use std::path::Path;

use plotters::prelude::*;

use crate::data::transform::PlotSeries;
use crate::error::PlotError;

// ---------------------------------------------------------------------------
// Chart styling
// ---------------------------------------------------------------------------

/// Styling knobs for the rendered scatter chart.
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub caption: String,
    pub x_label: String,
    pub y_label: String,
    /// Point radius in pixels.
    pub point_size: i32,
    pub point_color: RGBColor,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            caption: "Sensor readings".to_string(),
            x_label: "Timestep".to_string(),
            y_label: "Value".to_string(),
            point_size: 4,
            point_color: BLUE,
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the series as an SVG scatter chart at `path`.
///
/// An empty series still renders: the axes fall back to a unit range so
/// the output is always a well-formed chart.
pub fn render_scatter_svg(
    series: &PlotSeries,
    path: &Path,
    style: &PlotStyle,
) -> Result<(), PlotError> {
    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let ((x_min, x_max), (y_min, y_max)) = axis_bounds(series);

    let mut chart = ChartBuilder::on(&root)
        .caption(&style.caption, ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(&style.x_label)
        .y_desc(&style.y_label)
        .draw()?;

    chart.draw_series(
        series
            .xy()
            .map(|(x, y)| Circle::new((x, y), style.point_size, style.point_color.filled())),
    )?;

    root.present()?;
    Ok(())
}

/// Axis bounds covering every point, widened when degenerate so the
/// plotting area never has zero extent.
fn axis_bounds(series: &PlotSeries) -> ((f64, f64), (f64, f64)) {
    if series.is_empty() {
        return ((0.0, 1.0), (0.0, 1.0));
    }

    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for (x, y) in series.xy() {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    (widen(x_min, x_max), widen(y_min, y_max))
}

fn widen(min: f64, max: f64) -> (f64, f64) {
    if (max - min).abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::transform::PlotPoint;

    fn series(points: &[(f64, f64)]) -> PlotSeries {
        PlotSeries {
            points: points
                .iter()
                .map(|&(timestep, value)| PlotPoint { timestep, value })
                .collect(),
        }
    }

    #[test]
    fn writes_scatter_points_as_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.svg");
        let style = PlotStyle::default();
        render_scatter_svg(&series(&[(1.0, 21.0), (2.0, 41.0)]), &path, &style).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("circle"));
    }

    #[test]
    fn empty_series_still_renders_a_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.svg");
        render_scatter_svg(&series(&[]), &path, &PlotStyle::default()).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn single_point_gets_non_degenerate_axes() {
        let ((x_min, x_max), (y_min, y_max)) = axis_bounds(&series(&[(3.0, 7.0)]));
        assert!(x_min < x_max);
        assert!(y_min < y_max);
        assert!(x_min < 3.0 && 3.0 < x_max);
        assert!(y_min < 7.0 && 7.0 < y_max);
    }

    #[test]
    fn bounds_cover_all_points() {
        let ((x_min, x_max), (y_min, y_max)) =
            axis_bounds(&series(&[(1.0, -5.0), (4.0, 12.0), (2.0, 3.0)]));
        assert!((x_min - 1.0).abs() < 1e-9);
        assert!((x_max - 4.0).abs() < 1e-9);
        assert!((y_min + 5.0).abs() < 1e-9);
        assert!((y_max - 12.0).abs() < 1e-9);
    }
}
