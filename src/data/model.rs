use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::binder::ColumnRef;
use crate::error::BindingError;

// ---------------------------------------------------------------------------
// ObservableTable – a rectangular numeric matrix read from one file
// ---------------------------------------------------------------------------

/// How a table should be read: a single sequence or a rows×columns matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableShape {
    /// One column, or one row, of `len` values.
    Vector(usize),
    Matrix { rows: usize, columns: usize },
}

/// Immutable numeric table, stored column-major so a column is a slice.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservableTable {
    source: PathBuf,
    rows: usize,
    columns: Vec<Vec<f64>>,
}

impl ObservableTable {
    /// Build a table from columns of equal length.
    pub fn from_columns(source: impl Into<PathBuf>, columns: Vec<Vec<f64>>) -> Self {
        let rows = columns.first().map_or(0, Vec::len);
        debug_assert!(columns.iter().all(|c| c.len() == rows));
        ObservableTable {
            source: source.into(),
            rows,
            columns,
        }
    }

    /// Build a table from already validated, rectangular rows.
    pub(crate) fn from_rows(source: impl Into<PathBuf>, rows: &[Vec<f64>]) -> Self {
        let width = rows.first().map_or(0, Vec::len);
        let columns = (0..width)
            .map(|c| rows.iter().map(|row| row[c]).collect())
            .collect();
        Self::from_columns(source, columns)
    }

    /// File the table was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn shape(&self) -> TableShape {
        match (self.rows, self.columns.len()) {
            (rows, 1) => TableShape::Vector(rows),
            (1, columns) => TableShape::Vector(columns),
            (rows, columns) => TableShape::Matrix { rows, columns },
        }
    }

    pub fn column(&self, index: usize) -> Option<&[f64]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Turn a single-row table into a single-column one. Tables that are
    /// already one column are returned unchanged; true matrices come back
    /// as `Err` untouched.
    pub(crate) fn into_column_vector(self) -> Result<Self, Self> {
        match (self.rows, self.columns.len()) {
            (_, 1) => Ok(self),
            (1, _) => {
                let values = self.columns.into_iter().map(|c| c[0]).collect();
                Ok(Self::from_columns(self.source, vec![values]))
            }
            _ => Err(self),
        }
    }
}

// ---------------------------------------------------------------------------
// Observable – named column positions of the sweep files
// ---------------------------------------------------------------------------

/// Physical quantities written by the simulation, in sweep-file column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Observable {
    /// Independent variable: temperature or magnetic field.
    Control,
    Energy,
    EnergySq,
    Magnetization,
    MagnetizationSq,
    MagnetizationAbs,
    SpecificHeat,
    Susceptibility,
}

impl Observable {
    pub const ALL: [Observable; 8] = [
        Observable::Control,
        Observable::Energy,
        Observable::EnergySq,
        Observable::Magnetization,
        Observable::MagnetizationSq,
        Observable::MagnetizationAbs,
        Observable::SpecificHeat,
        Observable::Susceptibility,
    ];

    /// Column position in a sweep file. There is no header row, so this
    /// table is the only place column identity is defined.
    pub fn column(self) -> usize {
        match self {
            Observable::Control => 0,
            Observable::Energy => 1,
            Observable::EnergySq => 2,
            Observable::Magnetization => 3,
            Observable::MagnetizationSq => 4,
            Observable::MagnetizationAbs => 5,
            Observable::SpecificHeat => 6,
            Observable::Susceptibility => 7,
        }
    }

    /// Axis label. `Control` has no label of its own, see [`SweepKind::control_label`].
    pub fn label(self) -> &'static str {
        match self {
            Observable::Control => "",
            Observable::Energy => "E",
            Observable::EnergySq => "E²",
            Observable::Magnetization => "M",
            Observable::MagnetizationSq => "M²",
            Observable::MagnetizationAbs => "|M|",
            Observable::SpecificHeat => "C_V",
            Observable::Susceptibility => "χ",
        }
    }

    /// File holding this observable in the one-vector-per-file layout.
    pub fn vector_file(self) -> Option<&'static str> {
        match self {
            Observable::Control => Some("T.csv"),
            Observable::Energy => Some("E.csv"),
            Observable::EnergySq => Some("E_sq.csv"),
            Observable::Magnetization => Some("M.csv"),
            Observable::MagnetizationSq => Some("M_sq.csv"),
            Observable::MagnetizationAbs => Some("M_abs.csv"),
            Observable::SpecificHeat | Observable::Susceptibility => None,
        }
    }
}

// ---------------------------------------------------------------------------
// SweepKind – which control parameter a sweep varies
// ---------------------------------------------------------------------------

/// The field sweep stops after the squared magnetization.
const FIELD_OBSERVABLES: [Observable; 5] = [
    Observable::Control,
    Observable::Energy,
    Observable::EnergySq,
    Observable::Magnetization,
    Observable::MagnetizationSq,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SweepKind {
    Temperature,
    MagneticField,
}

impl SweepKind {
    /// Default file name written by the simulation.
    pub fn file_name(self) -> &'static str {
        match self {
            SweepKind::Temperature => "temp_data.csv",
            SweepKind::MagneticField => "magn_data.csv",
        }
    }

    pub fn control_label(self) -> &'static str {
        match self {
            SweepKind::Temperature => "Température [K]",
            SweepKind::MagneticField => "Champ magnétique [T]",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SweepKind::Temperature => "Propriétés de la grille en fonction de la température",
            SweepKind::MagneticField => {
                "Propriétés de la grille en fonction du champ magnétique"
            }
        }
    }

    /// Observables a file of this kind must carry.
    pub fn observables(self) -> &'static [Observable] {
        match self {
            SweepKind::Temperature => &Observable::ALL,
            SweepKind::MagneticField => &FIELD_OBSERVABLES,
        }
    }

    /// Minimum column count, derived from [`Self::observables`].
    pub fn required_columns(self) -> usize {
        self.observables()
            .iter()
            .map(|o| o.column() + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn carries(self, observable: Observable) -> bool {
        self.observables().contains(&observable)
    }
}

impl fmt::Display for SweepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepKind::Temperature => write!(f, "temperature"),
            SweepKind::MagneticField => write!(f, "magnetic-field"),
        }
    }
}

// ---------------------------------------------------------------------------
// SweepTable – a validated matrix-per-sweep table
// ---------------------------------------------------------------------------

/// A sweep file whose column count has been checked against its kind.
/// Only [`crate::data::loader::load_sweep`] and tests construct one.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepTable {
    kind: SweepKind,
    table: ObservableTable,
}

impl SweepTable {
    pub(crate) fn new_unchecked(kind: SweepKind, table: ObservableTable) -> Self {
        SweepTable { kind, table }
    }

    pub fn kind(&self) -> SweepKind {
        self.kind
    }

    pub fn table(&self) -> &ObservableTable {
        &self.table
    }

    /// Resolve a named observable to its column.
    pub fn column(&self, observable: Observable) -> Result<ColumnRef<'_>, BindingError> {
        if !self.kind.carries(observable) {
            return Err(BindingError::MissingObservable {
                kind: self.kind,
                observable,
            });
        }
        ColumnRef::new(&self.table, observable.column())
    }
}

// ---------------------------------------------------------------------------
// ObservableSet – one vector file per observable
// ---------------------------------------------------------------------------

/// Per-observable vectors of one sweep, aligned by row index.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservableSet {
    kind: SweepKind,
    vectors: BTreeMap<Observable, ObservableTable>,
}

impl ObservableSet {
    pub fn new(kind: SweepKind) -> Self {
        ObservableSet {
            kind,
            vectors: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, observable: Observable, vector: ObservableTable) {
        self.vectors.insert(observable, vector);
    }

    pub fn kind(&self) -> SweepKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn get(&self, observable: Observable) -> Option<&ObservableTable> {
        self.vectors.get(&observable)
    }

    pub fn column(&self, observable: Observable) -> Result<ColumnRef<'_>, BindingError> {
        let table = self
            .vectors
            .get(&observable)
            .ok_or(BindingError::MissingObservable {
                kind: self.kind,
                observable,
            })?;
        ColumnRef::new(table, 0)
    }

    /// Every vector must have as many rows as `reference`, plotted or not.
    pub fn check_lengths(&self, reference: Observable) -> Result<(), BindingError> {
        let x_len = self.column(reference)?.len();
        match self.vectors.values().map(ObservableTable::rows).find(|&n| n != x_len) {
            Some(y_len) => Err(BindingError::LengthMismatch { x_len, y_len }),
            None => Ok(()),
        }
    }
}
