use anyhow::{anyhow, Result};
use eframe::egui;

use crate::app::ThermoPlotApp;
use crate::config::OutputTarget;
use crate::export::export_figures;
use crate::layout::Figure;

/// Hand finished figures to the selected backend. For [`OutputTarget::Window`]
/// this blocks until the root window is closed.
pub fn render(figures: Vec<Figure>, target: &OutputTarget) -> Result<()> {
    match target {
        OutputTarget::Window => show_windows(figures),
        OutputTarget::Png { dir } => {
            let written = export_figures(&figures, dir)?;
            log::info!("Exported {} figures to {}", written.len(), dir.display());
            Ok(())
        }
    }
}

fn show_windows(figures: Vec<Figure>) -> Result<()> {
    let (w, h) = figures.first().map_or((1200, 800), Figure::size);
    let title = figures
        .first()
        .map_or_else(|| "thermoplot".to_string(), |f| f.title().to_string());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([w as f32, h as f32])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(ThermoPlotApp::new(figures)))),
    )
    .map_err(|e| anyhow!("display failed: {e}"))
}
