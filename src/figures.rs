use anyhow::{Context, Result};

use crate::binder::{bind, bind_observable, AxisLabels};
use crate::data::model::{Observable, ObservableSet, SweepKind, SweepTable};
use crate::layout::{Figure, GridCell, GridShape, Layout};

/// (cell, y observable) of every panel in a sweep figure.
type Placement = (GridCell, Observable);

const TEMPERATURE_PANELS: [Placement; 6] = [
    (GridCell::new(0, 0), Observable::Energy),
    (GridCell::new(0, 1), Observable::Magnetization),
    (GridCell::new(1, 0), Observable::EnergySq),
    (GridCell::new(1, 1), Observable::MagnetizationSq),
    (GridCell::new(2, 0), Observable::SpecificHeat),
    (GridCell::new(2, 1), Observable::Susceptibility),
];

// (1, 0) is left empty on purpose.
const FIELD_PANELS: [Placement; 3] = [
    (GridCell::new(0, 0), Observable::Energy),
    (GridCell::new(0, 1), Observable::Magnetization),
    (GridCell::new(1, 1), Observable::MagnetizationSq),
];

const OBSERVABLE_PANELS: [Placement; 4] = [
    (GridCell::new(0, 0), Observable::Energy),
    (GridCell::new(1, 0), Observable::EnergySq),
    (GridCell::new(0, 1), Observable::MagnetizationAbs),
    (GridCell::new(1, 1), Observable::MagnetizationSq),
];

/// Build the figure of a matrix-per-sweep file: 3×2 for a temperature
/// sweep, 2×2 with one unused cell for a magnetic-field sweep.
pub fn sweep_figure(sweep: &SweepTable, size: (u32, u32)) -> Result<Figure> {
    let (shape, placements): (GridShape, &[Placement]) = match sweep.kind() {
        SweepKind::Temperature => (GridShape::new(3, 2)?, &TEMPERATURE_PANELS[..]),
        SweepKind::MagneticField => (GridShape::new(2, 2)?, &FIELD_PANELS[..]),
    };

    let mut layout = Layout::new(shape);
    for &(cell, observable) in placements {
        let id = layout.add_panel(cell)?;
        let panel = layout
            .panel_mut(id)
            .context("panel vanished right after allocation")?;
        bind_observable(panel, sweep, Observable::Control, observable)
            .with_context(|| format!("binding {observable:?} at {cell}"))?;
    }

    let mut figure = Figure::new(sweep.kind().title(), size);
    figure.add_layout(layout);
    log::info!(
        "Built {} figure with {} panels",
        sweep.kind(),
        placements.len()
    );
    Ok(figure)
}

/// Build the 2×2 figure of the one-vector-per-file workflow: E, E², |M|
/// and M² against the control vector. Only the bottom row carries x labels.
pub fn observables_figure(set: &ObservableSet, size: (u32, u32)) -> Result<Figure> {
    let shape = GridShape::new(2, 2)?;
    let control = set.column(Observable::Control)?;
    set.check_lengths(Observable::Control)?;

    let mut layout = Layout::new(shape);
    for &(cell, observable) in &OBSERVABLE_PANELS {
        let id = layout.add_panel(cell)?;
        let panel = layout
            .panel_mut(id)
            .context("panel vanished right after allocation")?;

        let labels = if cell.row + 1 == shape.rows {
            AxisLabels::new(set.kind().control_label(), observable.label())
        } else {
            AxisLabels::y_only(observable.label())
        };
        panel.set_labels(&labels);

        let y = set.column(observable)?;
        bind(panel, control, y, Some(observable.label()))
            .with_context(|| format!("binding {observable:?} against {:?}", Observable::Control))?;
    }

    let mut figure = Figure::new(set.kind().title(), size);
    figure.add_layout(layout);
    log::info!("Built observables figure from {} vectors", set.len());
    Ok(figure)
}

/// Observables the vector workflow reads. M is loaded and length-checked
/// even though no panel plots it.
pub fn observables_needed() -> Vec<Observable> {
    [Observable::Control, Observable::Magnetization]
        .into_iter()
        .chain(OBSERVABLE_PANELS.iter().map(|&(_, o)| o))
        .collect()
}
