use crate::data::model::{Observable, ObservableTable, SweepTable};
use crate::error::BindingError;
use crate::layout::{Panel, Series};

// ---------------------------------------------------------------------------
// Column selection
// ---------------------------------------------------------------------------

/// A checked reference to one column of a loaded table.
#[derive(Debug, Clone, Copy)]
pub struct ColumnRef<'a> {
    table: &'a ObservableTable,
    index: usize,
    values: &'a [f64],
}

impl<'a> ColumnRef<'a> {
    pub fn new(table: &'a ObservableTable, index: usize) -> Result<Self, BindingError> {
        let values = table
            .column(index)
            .ok_or(BindingError::ColumnOutOfRange {
                index,
                columns: table.column_count(),
            })?;
        Ok(ColumnRef {
            table,
            index,
            values,
        })
    }

    pub fn table(&self) -> &'a ObservableTable {
        self.table
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Axis text
// ---------------------------------------------------------------------------

/// Text attached to a panel. `None` keeps whatever the panel already shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisLabels {
    pub x: Option<String>,
    pub y: Option<String>,
    pub title: Option<String>,
}

impl AxisLabels {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        AxisLabels {
            x: Some(x.into()),
            y: Some(y.into()),
            title: None,
        }
    }

    /// Only a y label; used for panels whose x axis is described elsewhere.
    pub fn y_only(y: impl Into<String>) -> Self {
        AxisLabels {
            y: Some(y.into()),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Binding
// ---------------------------------------------------------------------------

/// Append the series `(x[i], y[i])` to `panel`.
///
/// Both columns must have the same number of rows. Prior series on the
/// panel are kept.
pub fn bind<'p>(
    panel: &'p mut Panel,
    x: ColumnRef<'_>,
    y: ColumnRef<'_>,
    name: Option<&str>,
) -> Result<&'p Series, BindingError> {
    if x.len() != y.len() {
        return Err(BindingError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }

    let points = x
        .values()
        .iter()
        .zip(y.values())
        .map(|(&xi, &yi)| [xi, yi])
        .collect();
    panel.push_series(Series {
        name: name.map(str::to_string),
        points,
    });

    log::debug!(
        "Bound {}[{}] against {}[{}] on panel {}",
        y.table().source().display(),
        y.index(),
        x.table().source().display(),
        x.index(),
        panel.cell()
    );
    Ok(&panel.series()[panel.series().len() - 1])
}

/// Bind two named observables of a sweep and label the axes after them.
pub fn bind_observable<'p>(
    panel: &'p mut Panel,
    sweep: &SweepTable,
    x: Observable,
    y: Observable,
) -> Result<&'p Series, BindingError> {
    let x_col = sweep.column(x)?;
    let y_col = sweep.column(y)?;
    panel.set_labels(&AxisLabels::new(
        axis_label(sweep, x),
        axis_label(sweep, y),
    ));
    bind(panel, x_col, y_col, Some(y.label()))
}

fn axis_label(sweep: &SweepTable, observable: Observable) -> &'static str {
    match observable {
        Observable::Control => sweep.kind().control_label(),
        other => other.label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SweepKind;
    use crate::layout::{GridCell, GridShape, Layout};

    fn panel() -> Panel {
        let mut layout = Layout::new(GridShape::new(1, 1).unwrap());
        let id = layout.add_panel(GridCell::new(0, 0)).unwrap();
        layout.panel(id).unwrap().clone()
    }

    fn table(columns: Vec<Vec<f64>>) -> ObservableTable {
        ObservableTable::from_columns("t.csv", columns)
    }

    #[test]
    fn series_has_one_point_per_row() {
        let t = table(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let mut p = panel();
        let series = bind(
            &mut p,
            ColumnRef::new(&t, 0).unwrap(),
            ColumnRef::new(&t, 1).unwrap(),
            None,
        )
        .unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.points[2], [3.0, 6.0]);
    }

    #[test]
    fn column_out_of_range() {
        let t = table(vec![vec![1.0], vec![2.0]]);
        assert_eq!(
            ColumnRef::new(&t, 2).unwrap_err(),
            BindingError::ColumnOutOfRange { index: 2, columns: 2 }
        );
    }

    #[test]
    fn length_mismatch_is_not_truncated() {
        let tx = table(vec![vec![1.0, 2.0, 3.0]]);
        let ty = table(vec![vec![1.0, 2.0]]);
        let mut p = panel();
        let err = bind(
            &mut p,
            ColumnRef::new(&tx, 0).unwrap(),
            ColumnRef::new(&ty, 0).unwrap(),
            None,
        )
        .unwrap_err();
        assert_eq!(err, BindingError::LengthMismatch { x_len: 3, y_len: 2 });
        assert!(p.series().is_empty());
    }

    #[test]
    fn repeated_binds_append() {
        let t = table(vec![vec![0.0, 1.0], vec![2.0, 3.0], vec![4.0, 5.0]]);
        let x = ColumnRef::new(&t, 0).unwrap();
        let mut p = panel();
        bind(&mut p, x, ColumnRef::new(&t, 1).unwrap(), Some("a")).unwrap();
        bind(&mut p, x, ColumnRef::new(&t, 2).unwrap(), Some("b")).unwrap();
        assert_eq!(p.series().len(), 2);
        assert_eq!(p.series()[0].name.as_deref(), Some("a"));
        assert_eq!(p.series()[1].points, vec![[0.0, 4.0], [1.0, 5.0]]);
    }

    #[test]
    fn observable_binding_sets_labels() {
        let t = table((0..8).map(|c| vec![c as f64]).collect());
        let sweep = SweepTable::new_unchecked(SweepKind::Temperature, t);
        let mut p = panel();
        bind_observable(&mut p, &sweep, Observable::Control, Observable::Susceptibility)
            .unwrap();
        assert_eq!(p.x_label(), "Température [K]");
        assert_eq!(p.y_label(), "χ");
        assert_eq!(p.series()[0].points, vec![[0.0, 7.0]]);
    }
}
