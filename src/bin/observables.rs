use std::path::Path;

use anyhow::{Context, Result};
use thermoplot::config::{PlotConfig, CONFIG_FILE};
use thermoplot::data::loader::load_vectors;
use thermoplot::data::model::SweepKind;
use thermoplot::figures::{observables_figure, observables_needed};
use thermoplot::render::render;

/// One vector per file (T.csv, E.csv, ...), one 2×2 figure.
fn main() -> Result<()> {
    env_logger::init();

    let config = PlotConfig::load_or_default(Path::new(CONFIG_FILE))?;

    let set = load_vectors(
        &config.data_dir,
        SweepKind::Temperature,
        &observables_needed(),
        config.delimiter_byte(),
    )
    .context("loading observable vectors")?;

    let figure = observables_figure(&set, config.figure_size)?;
    render(vec![figure], &config.output)
}
