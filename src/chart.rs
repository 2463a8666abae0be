use crate::error::{DashboardError, Result};
use crate::products::ProductTable;
use plotters::prelude::*;
use serde::Serialize;

/// Chart kinds the dashboard can render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
    Scatter,
    Pie,
}

impl ChartKind {
    /// Maps the user-facing selector to a kind. Anything unrecognized yields
    /// `None`: the dashboard shows no chart for it rather than failing.
    pub fn parse(selector: &str) -> Option<Self> {
        match selector {
            "bar" => Some(ChartKind::Bar),
            "line" => Some(ChartKind::Line),
            "scatter" => Some(ChartKind::Scatter),
            "pie" => Some(ChartKind::Pie),
            _ => None,
        }
    }
}

/// Declarative description of one chart: kind plus data bindings, independent
/// of the rendering backend.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartSpec {
    /// Categories are the titles in table order; bar heights are the prices.
    Bar {
        categories: Vec<String>,
        values: Vec<f64>,
    },
    /// x is the 0-based row position, y the price; points are connected and
    /// individually marked.
    Line { points: Vec<(usize, f64)> },
    /// x labels are the titles, y the prices; points only, no connecting line.
    Scatter {
        labels: Vec<String>,
        values: Vec<f64>,
    },
    /// Slice labels are the titles, slice magnitudes the prices.
    Pie {
        labels: Vec<String>,
        values: Vec<f64>,
    },
}

impl ChartSpec {
    pub fn from_table(table: &ProductTable, kind: ChartKind) -> Self {
        let titles = || table.rows().iter().map(|r| r.titulo.clone()).collect();
        let prices = || table.rows().iter().map(|r| r.preco).collect();
        match kind {
            ChartKind::Bar => ChartSpec::Bar {
                categories: titles(),
                values: prices(),
            },
            ChartKind::Line => ChartSpec::Line {
                points: table
                    .rows()
                    .iter()
                    .enumerate()
                    .map(|(i, r)| (i, r.preco))
                    .collect(),
            },
            ChartKind::Scatter => ChartSpec::Scatter {
                labels: titles(),
                values: prices(),
            },
            ChartKind::Pie => ChartSpec::Pie {
                labels: titles(),
                values: prices(),
            },
        }
    }
}

/// Builds the chart specification for a table and a selector, or `None` when
/// the selector names no known chart kind.
pub fn build_chart(table: &ProductTable, selector: &str) -> Option<ChartSpec> {
    ChartKind::parse(selector).map(|kind| ChartSpec::from_table(table, kind))
}

/// Styling options for chart rendering.
#[derive(Clone, Debug)]
pub struct ChartOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: "Top 5 Produtos".to_string(),
            width: 800,
            height: 600,
        }
    }
}

const PALETTE: [RGBColor; 5] = [BLUE, RED, GREEN, MAGENTA, CYAN];

/// Renders a chart specification to PNG bytes.
///
/// The bitmap backend wants a file path, so the image goes through a scratch
/// file that is removed when the handle drops.
pub fn render_chart(spec: &ChartSpec, options: &ChartOptions) -> Result<Vec<u8>> {
    let tmp = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .map_err(chart_err)?;
    let path = tmp.path().to_path_buf();

    match spec {
        ChartSpec::Bar { categories, values } => render_bar(&path, options, categories, values)?,
        ChartSpec::Line { points } => render_line(&path, options, points)?,
        ChartSpec::Scatter { labels, values } => render_scatter(&path, options, labels, values)?,
        ChartSpec::Pie { labels, values } => render_pie(&path, options, labels, values)?,
    }

    std::fs::read(&path).map_err(chart_err)
}

fn render_bar(
    path: &std::path::Path,
    options: &ChartOptions,
    categories: &[String],
    values: &[f64],
) -> Result<()> {
    let root = BitMapBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let (min_y, max_y) = value_bounds(values);
    // at least one segment so the axis survives an empty table
    let x_end = categories.len().max(1) as u32;
    let mut chart = ChartBuilder::on(&root)
        .caption(&options.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((0u32..x_end).into_segmented(), min_y..max_y)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_labels(categories.len().max(1))
        .x_label_formatter(&|pos| match pos {
            SegmentValue::CenterOf(i) => categories
                .get(*i as usize)
                .cloned()
                .unwrap_or_default(),
            _ => String::new(),
        })
        .y_desc("preco")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(values.iter().enumerate().map(|(i, v)| {
            Rectangle::new(
                [
                    (SegmentValue::Exact(i as u32), 0.0),
                    (SegmentValue::Exact(i as u32 + 1), *v),
                ],
                BLUE.filled(),
            )
        }))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)
}

fn render_line(
    path: &std::path::Path,
    options: &ChartOptions,
    points: &[(usize, f64)],
) -> Result<()> {
    let root = BitMapBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let values: Vec<f64> = points.iter().map(|(_, y)| *y).collect();
    let (min_y, max_y) = value_bounds(&values);
    let max_x = points.last().map(|(i, _)| *i as f64).unwrap_or(0.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(&options.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..max_x + 1.0, min_y..max_y)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("posição")
        .y_desc("preco")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(
            points.iter().map(|&(i, y)| (i as f64, y)),
            &BLUE,
        ))
        .map_err(chart_err)?;

    // lines+markers: a dot on every data point as well
    chart
        .draw_series(
            points
                .iter()
                .map(|&(i, y)| Circle::new((i as f64, y), 4, BLUE.filled())),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)
}

fn render_scatter(
    path: &std::path::Path,
    options: &ChartOptions,
    labels: &[String],
    values: &[f64],
) -> Result<()> {
    let root = BitMapBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let (min_y, max_y) = value_bounds(values);
    let x_end = labels.len().max(1) as u32;
    let mut chart = ChartBuilder::on(&root)
        .caption(&options.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((0u32..x_end).into_segmented(), min_y..max_y)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_labels(labels.len().max(1))
        .x_label_formatter(&|pos| match pos {
            SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .y_desc("preco")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(values.iter().enumerate().map(|(i, v)| {
            Circle::new((SegmentValue::CenterOf(i as u32), *v), 5, GREEN.filled())
        }))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)
}

fn render_pie(
    path: &std::path::Path,
    options: &ChartOptions,
    labels: &[String],
    values: &[f64],
) -> Result<()> {
    let root = BitMapBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;
    let root = root
        .titled(&options.title, ("sans-serif", 30))
        .map_err(chart_err)?;

    let center = (options.width as i32 / 2, options.height as i32 / 2);
    let radius = f64::from(options.width.min(options.height)) * 0.35;
    let colors: Vec<RGBColor> = (0..values.len())
        .map(|i| PALETTE[i % PALETTE.len()])
        .collect();

    let mut pie = Pie::new(&center, &radius, values, &colors, labels);
    pie.label_style(("sans-serif", 18).into_font());
    root.draw(&pie).map_err(chart_err)?;

    root.present().map_err(chart_err)
}

/// Y axis bounds with a little headroom; keeps degenerate inputs (empty
/// tables, all-equal values) from producing an empty range.
fn value_bounds(values: &[f64]) -> (f64, f64) {
    let min = values.iter().cloned().fold(0.0f64, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let max = if max.is_finite() { max } else { 0.0 };
    (min, max + 1.0)
}

fn chart_err<E: std::fmt::Display>(err: E) -> DashboardError {
    DashboardError::Chart(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::ProductRecord;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    fn table() -> ProductTable {
        ProductTable::new(vec![
            ProductRecord::new("Teclado", 199.9),
            ProductRecord::new("Mouse", 89.5),
            ProductRecord::new("Monitor", 1200.0),
        ])
    }

    #[test]
    fn known_selectors_parse() {
        assert_eq!(ChartKind::parse("bar"), Some(ChartKind::Bar));
        assert_eq!(ChartKind::parse("line"), Some(ChartKind::Line));
        assert_eq!(ChartKind::parse("scatter"), Some(ChartKind::Scatter));
        assert_eq!(ChartKind::parse("pie"), Some(ChartKind::Pie));
    }

    #[test]
    fn unknown_selector_builds_no_chart() {
        assert_eq!(build_chart(&table(), "histogram"), None);
        assert_eq!(build_chart(&table(), ""), None);
        // selectors are exact: no case folding
        assert_eq!(build_chart(&table(), "Bar"), None);
    }

    #[test]
    fn bar_spec_keeps_table_order() {
        let spec = build_chart(&table(), "bar").unwrap();
        match spec {
            ChartSpec::Bar { categories, values } => {
                assert_eq!(categories, vec!["Teclado", "Mouse", "Monitor"]);
                assert_eq!(values, vec![199.9, 89.5, 1200.0]);
            }
            other => panic!("expected bar spec, got {other:?}"),
        }
    }

    #[test]
    fn line_spec_uses_row_positions() {
        let spec = build_chart(&table(), "line").unwrap();
        match spec {
            ChartSpec::Line { points } => {
                assert_eq!(points, vec![(0, 199.9), (1, 89.5), (2, 1200.0)]);
            }
            other => panic!("expected line spec, got {other:?}"),
        }
    }

    #[test]
    fn renders_every_kind_to_png() {
        let options = ChartOptions {
            width: 320,
            height: 240,
            ..ChartOptions::default()
        };
        for selector in ["bar", "line", "scatter", "pie"] {
            let spec = build_chart(&table(), selector).unwrap();
            let png = render_chart(&spec, &options).unwrap();
            assert_eq!(&png[..8], &PNG_MAGIC, "bad PNG header for {selector}");
        }
    }

    #[test]
    fn empty_table_still_renders() {
        let empty = ProductTable::default();
        let spec = build_chart(&empty, "bar").unwrap();
        let png = render_chart(&spec, &ChartOptions::default()).unwrap();
        assert_eq!(&png[..8], &PNG_MAGIC);
    }
}
