use std::hash::Hash;

use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::color::series_color32;
use crate::layout::Panel;

// ---------------------------------------------------------------------------
// Panel plot
// ---------------------------------------------------------------------------

/// Render one panel: optional title above, one line per bound series.
pub fn panel_plot(ui: &mut Ui, id_salt: impl Hash, panel: &Panel) {
    if let Some(title) = panel.title() {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.strong(title);
        });
    }

    let count = panel.series().len();
    let mut plot = Plot::new(id_salt)
        .x_axis_label(panel.x_label())
        .y_axis_label(panel.y_label())
        .height(ui.available_height())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if count > 1 {
        plot = plot.legend(Legend::default());
    }

    plot.show(ui, |plot_ui| {
        for (i, series) in panel.series().iter().enumerate() {
            let color = series_color32(i, count);

            let points: PlotPoints = series.points.iter().copied().collect();
            let mut line = Line::new(points).color(color).width(1.5);
            if let Some(name) = &series.name {
                line = line.name(name);
            }
            plot_ui.line(line);

            // A single sample has no segment to draw.
            if series.len() == 1 {
                plot_ui.points(Points::new(series.points.clone()).radius(3.0).color(color));
            }
        }
    });
}
