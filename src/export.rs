use std::ops::Range;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::color::series_plotters;
use crate::layout::{Figure, GridShape, Layout, Panel};

/// Write every figure as a PNG into `dir`, creating it if needed.
pub fn export_figures(figures: &[Figure], dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    figures
        .iter()
        .map(|figure| {
            let path = dir.join(file_name(figure.title()));
            export_figure(figure, &path)
                .with_context(|| format!("rendering '{}'", figure.title()))?;
            log::info!("Wrote {}", path.display());
            Ok(path)
        })
        .collect()
}

/// Render one figure to `path`. Layouts stack top to bottom under the title.
pub fn export_figure(figure: &Figure, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, figure.size()).into_drawing_area();
    root.fill(&WHITE)?;
    let body = root.titled(figure.title(), ("sans-serif", 24))?;

    let areas = body.split_evenly((figure.layouts().len().max(1), 1));
    for (layout, area) in figure.layouts().iter().zip(&areas) {
        draw_layout(layout, area)?;
    }

    root.present()?;
    Ok(())
}

fn draw_layout(layout: &Layout, area: &DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()> {
    let dim = area.dim_in_pixel();
    for panel in layout.panels() {
        let (offset, size) = cell_area(layout.shape(), panel, dim);
        draw_panel(panel, &area.clone().shrink(offset, size))?;
    }
    Ok(())
}

/// Pixel (offset, size) of `panel` inside an area of `dim`. Cells are equal;
/// remainder pixels stay on the right and bottom edges.
fn cell_area(shape: GridShape, panel: &Panel, dim: (u32, u32)) -> ((u32, u32), (u32, u32)) {
    let cell_w = dim.0 / shape.columns as u32;
    let cell_h = dim.1 / shape.rows as u32;
    let cell = panel.cell();
    let (row_span, col_span) = panel.span();
    (
        (cell.col as u32 * cell_w, cell.row as u32 * cell_h),
        (col_span as u32 * cell_w, row_span as u32 * cell_h),
    )
}

fn draw_panel(panel: &Panel, area: &DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()> {
    let (x_range, y_range) = bounds(panel);

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60);
    if let Some(title) = panel.title() {
        builder.caption(title, ("sans-serif", 18));
    }
    let mut chart = builder.build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(panel.x_label())
        .y_desc(panel.y_label())
        .draw()?;

    let count = panel.series().len();
    for (i, series) in panel.series().iter().enumerate() {
        let color = series_plotters(i, count);
        let points: Vec<(f64, f64)> = series.points.iter().map(|p| (p[0], p[1])).collect();

        // A lone sample draws no line segment, mark it instead.
        if points.len() == 1 {
            chart.draw_series(points.iter().map(|&p| Circle::new(p, 4, color.filled())))?;
        }
        let drawn = chart.draw_series(LineSeries::new(points, &color))?;
        if let Some(name) = &series.name {
            drawn
                .label(name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }
    }

    if count > 1 {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}

/// Axis ranges covering every finite point of the panel, padded by 5%.
fn bounds(panel: &Panel) -> (Range<f64>, Range<f64>) {
    let finite = || {
        panel
            .series()
            .iter()
            .flat_map(|s| s.points.iter())
            .filter(|p| p[0].is_finite() && p[1].is_finite())
    };
    (
        padded(finite().map(|p| p[0])),
        padded(finite().map(|p| p[1])),
    )
}

fn padded(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min > max {
        return 0.0..1.0;
    }
    let span = max - min;
    let pad = if span > 0.0 {
        span * 0.05
    } else if min != 0.0 {
        min.abs() * 0.1
    } else {
        0.5
    };
    (min - pad)..(max + pad)
}

/// `"Propriétés de la grille"` → `"propriétés_de_la_grille.png"`.
fn file_name(title: &str) -> String {
    let stem: Vec<String> = title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();
    if stem.is_empty() {
        "figure.png".to_string()
    } else {
        format!("{}.png", stem.join("_"))
    }
}
