use std::fmt;

use crate::binder::AxisLabels;
use crate::error::LayoutError;

// ---------------------------------------------------------------------------
// Grid geometry
// ---------------------------------------------------------------------------

/// A (row, column) position, 0-indexed from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
}

impl GridCell {
    pub const fn new(row: usize, col: usize) -> Self {
        GridCell { row, col }
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    pub rows: usize,
    pub columns: usize,
}

impl GridShape {
    pub fn new(rows: usize, columns: usize) -> Result<Self, LayoutError> {
        if rows == 0 || columns == 0 {
            return Err(LayoutError::EmptyGrid { rows, columns });
        }
        Ok(GridShape { rows, columns })
    }

    pub fn contains(&self, cell: GridCell) -> bool {
        cell.row < self.rows && cell.col < self.columns
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.columns).map(move |col| GridCell { row, col }))
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

// ---------------------------------------------------------------------------
// Panel – one chart area
// ---------------------------------------------------------------------------

/// A drawn line: points in bind order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: Option<String>,
    pub points: Vec<[f64; 2]>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A chart area anchored at a grid cell, possibly spanning several.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    cell: GridCell,
    row_span: usize,
    col_span: usize,
    title: Option<String>,
    x_label: String,
    y_label: String,
    series: Vec<Series>,
}

impl Panel {
    fn new(cell: GridCell, row_span: usize, col_span: usize) -> Self {
        Panel {
            cell,
            row_span,
            col_span,
            title: None,
            x_label: String::new(),
            y_label: String::new(),
            series: Vec::new(),
        }
    }

    pub fn cell(&self) -> GridCell {
        self.cell
    }

    /// (rows, columns) covered, at least (1, 1).
    pub fn span(&self) -> (usize, usize) {
        (self.row_span, self.col_span)
    }

    pub fn covers(&self, cell: GridCell) -> bool {
        (self.cell.row..self.cell.row + self.row_span).contains(&cell.row)
            && (self.cell.col..self.cell.col + self.col_span).contains(&cell.col)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Replace the axis text. Empty labels leave the current text in place.
    pub fn set_labels(&mut self, labels: &AxisLabels) {
        if let Some(x) = &labels.x {
            self.x_label = x.clone();
        }
        if let Some(y) = &labels.y {
            self.y_label = y.clone();
        }
        if labels.title.is_some() {
            self.title = labels.title.clone();
        }
    }

    pub(crate) fn push_series(&mut self, series: Series) {
        self.series.push(series);
    }
}

// ---------------------------------------------------------------------------
// Layout – a fixed grid of panels
// ---------------------------------------------------------------------------

/// Index of a panel inside its [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelId(usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    shape: GridShape,
    panels: Vec<Panel>,
}

impl Layout {
    pub fn new(shape: GridShape) -> Self {
        Layout {
            shape,
            panels: Vec::new(),
        }
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Allocate a single-cell panel.
    pub fn add_panel(&mut self, cell: GridCell) -> Result<PanelId, LayoutError> {
        self.add_spanning_panel(cell, 1, 1)
    }

    /// Allocate a panel covering `row_span`×`col_span` cells from `cell`.
    pub fn add_spanning_panel(
        &mut self,
        cell: GridCell,
        row_span: usize,
        col_span: usize,
    ) -> Result<PanelId, LayoutError> {
        let out_of_bounds = LayoutError::OutOfBounds {
            cell,
            row_span,
            col_span,
            shape: self.shape,
        };
        if row_span == 0 || col_span == 0 {
            return Err(out_of_bounds);
        }
        if !self.shape.contains(cell)
            || row_span > self.shape.rows - cell.row
            || col_span > self.shape.columns - cell.col
        {
            return Err(out_of_bounds);
        }

        let candidate = Panel::new(cell, row_span, col_span);
        if let Some(taken) = self
            .shape
            .cells()
            .filter(|c| candidate.covers(*c))
            .find(|c| self.occupant(*c).is_some())
        {
            return Err(LayoutError::CellOccupied(taken));
        }

        self.panels.push(candidate);
        Ok(PanelId(self.panels.len() - 1))
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(id.0)
    }

    pub fn panel_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        self.panels.get_mut(id.0)
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Panel covering `cell`, if any.
    pub fn occupant(&self, cell: GridCell) -> Option<PanelId> {
        self.panels.iter().position(|p| p.covers(cell)).map(PanelId)
    }

    /// Cells no panel covers. An unused cell is a valid layout state.
    pub fn unused_cells(&self) -> Vec<GridCell> {
        self.shape
            .cells()
            .filter(|c| self.occupant(*c).is_none())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Figure – ownership root for layouts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    title: String,
    /// Width and height in pixels.
    size: (u32, u32),
    layouts: Vec<Layout>,
}

impl Figure {
    pub fn new(title: impl Into<String>, size: (u32, u32)) -> Self {
        Figure {
            title: title.into(),
            size,
            layouts: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Attach a layout; layouts stack top to bottom.
    pub fn add_layout(&mut self, layout: Layout) -> usize {
        self.layouts.push(layout);
        self.layouts.len() - 1
    }

    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    pub fn layout_mut(&mut self, index: usize) -> Option<&mut Layout> {
        self.layouts.get_mut(index)
    }
}
