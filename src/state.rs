use crate::layout::Figure;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// Figures on display, independent of rendering. The first figure owns the
/// root window; every other one has its own closable window.
pub struct ViewerState {
    pub figures: Vec<Figure>,

    /// Whether each figure's window is still open.
    open: Vec<bool>,
}

impl ViewerState {
    pub fn new(figures: Vec<Figure>) -> Self {
        let open = vec![true; figures.len()];
        Self { figures, open }
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open.get(index).copied().unwrap_or(false)
    }

    /// Mark a secondary figure window as dismissed.
    pub fn close(&mut self, index: usize) {
        if let Some(flag) = self.open.get_mut(index) {
            if *flag {
                log::info!("Closed figure '{}'", self.figures[index].title());
            }
            *flag = false;
        }
    }

    pub fn open_count(&self) -> usize {
        self.open.iter().filter(|o| **o).count()
    }

    /// Indices of figures shown in their own viewport.
    pub fn secondary(&self) -> impl Iterator<Item = usize> + '_ {
        (1..self.figures.len()).filter(move |&i| self.is_open(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(n: usize) -> ViewerState {
        ViewerState::new(
            (0..n)
                .map(|i| Figure::new(format!("fig {i}"), (100, 100)))
                .collect(),
        )
    }

    #[test]
    fn every_figure_starts_open() {
        let s = state(3);
        assert_eq!(s.open_count(), 3);
        assert_eq!(s.secondary().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn closing_removes_from_secondary() {
        let mut s = state(3);
        s.close(1);
        s.close(1);
        s.close(7);
        assert!(!s.is_open(1));
        assert_eq!(s.open_count(), 2);
        assert_eq!(s.secondary().collect::<Vec<_>>(), vec![2]);
    }
}
