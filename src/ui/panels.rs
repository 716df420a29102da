use eframe::egui::{self, Pos2, Rect, Sense, Ui, UiBuilder, Vec2};

use crate::layout::{Figure, GridShape, Layout, Panel};
use crate::ui::plot;

/// Gap between neighbouring panels, in points.
const GAP: f32 = 8.0;

// ---------------------------------------------------------------------------
// Figure view – title plus stacked grids
// ---------------------------------------------------------------------------

/// Render a whole figure into the remaining space of `ui`.
pub fn figure_view(ui: &mut Ui, figure_index: usize, figure: &Figure) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(figure.title());
    });
    ui.separator();

    let area = ui.available_rect_before_wrap();
    let layouts = figure.layouts();
    if layouts.is_empty() {
        return;
    }

    let band = area.height() / layouts.len() as f32;
    for (layout_index, layout) in layouts.iter().enumerate() {
        let top = area.top() + band * layout_index as f32;
        let rect = Rect::from_min_size(Pos2::new(area.left(), top), Vec2::new(area.width(), band));
        layout_grid(ui, rect, layout, |ui, panel| {
            let cell = panel.cell();
            plot::panel_plot(ui, (figure_index, layout_index, cell.row, cell.col), panel);
        });
    }

    ui.allocate_rect(area, Sense::hover());
}

/// Place every panel of `layout` on its cell rectangle inside `rect`.
/// Unused cells stay blank.
fn layout_grid(ui: &mut Ui, rect: Rect, layout: &Layout, mut draw: impl FnMut(&mut Ui, &Panel)) {
    for panel in layout.panels() {
        let cell_rect = panel_rect(rect, layout.shape(), panel);
        let mut child = ui.new_child(
            UiBuilder::new()
                .max_rect(cell_rect)
                .layout(egui::Layout::top_down(egui::Align::Min)),
        );
        child.set_clip_rect(cell_rect);
        draw(&mut child, panel);
    }
}

/// Screen rectangle of a panel, spans included, shrunk by half a gap per side.
pub fn panel_rect(rect: Rect, shape: GridShape, panel: &Panel) -> Rect {
    let cell_w = rect.width() / shape.columns as f32;
    let cell_h = rect.height() / shape.rows as f32;
    let cell = panel.cell();
    let (row_span, col_span) = panel.span();

    let min = Pos2::new(
        rect.left() + cell_w * cell.col as f32,
        rect.top() + cell_h * cell.row as f32,
    );
    let size = Vec2::new(cell_w * col_span as f32, cell_h * row_span as f32);
    Rect::from_min_size(min, size).shrink(GAP / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GridCell;

    #[test]
    fn panel_rect_follows_cell_and_span() {
        let mut layout = Layout::new(GridShape::new(2, 2).unwrap());
        let a = layout.add_panel(GridCell::new(1, 1)).unwrap();
        let b = layout.add_spanning_panel(GridCell::new(0, 0), 1, 2).unwrap();
        let area = Rect::from_min_size(Pos2::ZERO, Vec2::new(200.0, 100.0));

        let ra = panel_rect(area, layout.shape(), layout.panel(a).unwrap());
        assert_eq!(ra.min, Pos2::new(104.0, 54.0));
        assert_eq!(ra.max, Pos2::new(196.0, 96.0));

        let rb = panel_rect(area, layout.shape(), layout.panel(b).unwrap());
        assert_eq!(rb.width(), 192.0);
        assert_eq!(rb.height(), 42.0);
    }
}
