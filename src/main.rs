use std::path::Path;

use anyhow::{Context, Result};
use thermoplot::config::{PlotConfig, CONFIG_FILE};
use thermoplot::data::loader::load_sweep;
use thermoplot::data::model::SweepKind;
use thermoplot::figures::sweep_figure;
use thermoplot::render::render;

/// Temperature and magnetic-field sweeps, one figure each.
fn main() -> Result<()> {
    env_logger::init();

    let config = PlotConfig::load_or_default(Path::new(CONFIG_FILE))?;

    // Load everything before any figure is built.
    let sweeps = [SweepKind::Temperature, SweepKind::MagneticField]
        .into_iter()
        .map(|kind| {
            let path = config.data_path(kind.file_name());
            load_sweep(&path, config.delimiter_byte(), kind)
                .with_context(|| format!("loading {kind} sweep"))
        })
        .collect::<Result<Vec<_>>>()?;

    let figures = sweeps
        .iter()
        .map(|sweep| sweep_figure(sweep, config.figure_size))
        .collect::<Result<Vec<_>>>()?;

    render(figures, &config.output)
}
