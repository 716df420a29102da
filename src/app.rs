use eframe::egui;

use crate::layout::Figure;
use crate::state::ViewerState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ThermoPlotApp {
    pub state: ViewerState,
}

impl ThermoPlotApp {
    pub fn new(figures: Vec<Figure>) -> Self {
        Self {
            state: ViewerState::new(figures),
        }
    }
}

impl eframe::App for ThermoPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Secondary figures: one OS window each ----
        let secondary: Vec<usize> = self.state.secondary().collect();
        for index in secondary {
            let figure = &self.state.figures[index];
            let (w, h) = figure.size();
            let builder = egui::ViewportBuilder::default()
                .with_title(figure.title())
                .with_inner_size([w as f32, h as f32]);

            let close = ctx.show_viewport_immediate(
                egui::ViewportId::from_hash_of(("figure", index)),
                builder,
                |ctx, _class| {
                    egui::CentralPanel::default().show(ctx, |ui| {
                        panels::figure_view(ui, index, figure);
                    });
                    ctx.input(|i| i.viewport().close_requested())
                },
            );
            if close {
                self.state.close(index);
            }
        }

        // ---- Root window: first figure ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.figures.first() {
            Some(figure) => panels::figure_view(ui, 0, figure),
            None => {
                ui.centered_and_justified(|ui| {
                    ui.heading("No figure to display");
                });
            }
        });
    }
}
