use std::collections::HashSet;

use crate::grid::color::Color;

/// Integer cell coordinate `(x, y)` inside a grid
pub type CellCoord = (u32, u32);

/// Colors and labels of every cell, plus the cells changed since the last draw.
///
/// Cell `(0, 0)` is the bottom-left cell; y grows upward. Writes outside
/// `[0, width) x [0, height)` are dropped without an error so hosts can
/// write past their own boundaries freely.
#[derive(Clone, Debug)]
pub struct GridState {
    width: u32,
    height: u32,
    colors: Vec<Color>,
    texts: Vec<Option<String>>,
    dirty: HashSet<CellCoord>,
}

impl GridState {
    /// Create a grid with every cell set to `initial`.
    ///
    /// Callers validate dimensions; a zero-sized grid is still a valid, empty table.
    pub fn new(width: u32, height: u32, initial: Color) -> Self {
        let cell_count = width as usize * height as usize;
        Self {
            width,
            height,
            colors: vec![initial; cell_count],
            texts: vec![None; cell_count],
            dirty: HashSet::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Map signed coordinates to an in-bounds cell, if any
    pub fn cell_at(&self, x: i64, y: i64) -> Option<CellCoord> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some((x as u32, y as u32))
    }

    fn index(&self, (x, y): CellCoord) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Color of a cell, `None` outside the grid
    pub fn color(&self, x: i64, y: i64) -> Option<Color> {
        self.cell_at(x, y).map(|cell| self.cell_color(cell))
    }

    /// Label of a cell, `None` outside the grid or when unset
    pub fn text(&self, x: i64, y: i64) -> Option<&str> {
        let cell = self.cell_at(x, y)?;
        self.texts[self.index(cell)].as_deref()
    }

    /// Color of a cell already known to be in range
    pub(crate) fn cell_color(&self, cell: CellCoord) -> Color {
        self.colors[self.index(cell)]
    }

    /// Store a color and mark the cell dirty. Out-of-bounds writes are ignored.
    pub fn set_color(&mut self, x: i64, y: i64, color: Color) {
        let Some(cell) = self.cell_at(x, y) else {
            log::trace!("Ignoring color write outside grid at ({}, {})", x, y);
            return;
        };
        let index = self.index(cell);
        self.colors[index] = color;
        self.dirty.insert(cell);
    }

    /// Store a color without scheduling an incremental draw
    pub(crate) fn store_color(&mut self, cell: CellCoord, color: Color) {
        let index = self.index(cell);
        self.colors[index] = color;
    }

    /// Store a label. Labels never mark cells dirty. Out-of-bounds writes are ignored.
    pub fn set_text(&mut self, x: i64, y: i64, text: impl Into<String>) {
        let Some(cell) = self.cell_at(x, y) else {
            log::trace!("Ignoring text write outside grid at ({}, {})", x, y);
            return;
        };
        let index = self.index(cell);
        self.texts[index] = Some(text.into());
    }

    /// Cells waiting for an incremental draw
    pub fn dirty(&self) -> &HashSet<CellCoord> {
        &self.dirty
    }

    /// Hand over the dirty set, leaving it empty
    pub fn take_dirty(&mut self) -> HashSet<CellCoord> {
        std::mem::take(&mut self.dirty)
    }

    pub fn clear_dirty(&mut self) {
        self.dirty.clear();
    }

    /// All cells in column-major order, with their colors
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, Color)> + '_ {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| ((x, y), self.cell_color((x, y)))))
    }

    /// Independent copy of colors and labels with nothing pending a draw
    pub fn snapshot(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            colors: self.colors.clone(),
            texts: self.texts.clone(),
            dirty: HashSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = GridState::new(10, 4, Color::WHITE);
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.cells().count(), 40);
        assert!(grid.cells().all(|(_, color)| color == Color::WHITE));
        assert!(grid.dirty().is_empty());
    }

    #[test]
    fn test_set_color_marks_dirty() {
        let mut grid = GridState::new(5, 5, Color::WHITE);
        grid.set_color(1, 2, Color::RED);
        grid.set_color(1, 2, Color::BLUE);
        grid.set_color(3, 0, Color::GREEN);

        assert_eq!(grid.color(1, 2), Some(Color::BLUE));
        assert_eq!(grid.color(3, 0), Some(Color::GREEN));
        assert_eq!(grid.dirty().len(), 2);
        assert!(grid.dirty().contains(&(1, 2)));
    }

    #[test]
    fn test_out_of_bounds_writes_are_ignored() {
        let mut grid = GridState::new(4, 3, Color::WHITE);
        let before: Vec<_> = grid.cells().collect();

        grid.set_color(-1, 0, Color::RED);
        grid.set_color(4, 0, Color::RED);
        grid.set_color(0, 3, Color::RED);
        grid.set_color(0, -7, Color::RED);
        grid.set_text(4, 2, "nope");
        grid.set_text(-1, -1, "nope");

        let after: Vec<_> = grid.cells().collect();
        assert_eq!(before, after);
        assert!(grid.dirty().is_empty());
        assert!(grid.cells().all(|((x, y), _)| grid.text(x as i64, y as i64).is_none()));
    }

    #[test]
    fn test_reads_outside_grid_return_none() {
        let mut grid = GridState::new(10, 10, Color::WHITE);
        grid.set_color(0, 1, Color::RED);
        grid.set_text(0, 1, "row one");

        // (width, 0) must not alias the first cell of the next row
        assert_eq!(grid.color(10, 0), None);
        assert_eq!(grid.text(10, 0), None);
        assert_eq!(grid.color(0, 10), None);
        assert_eq!(grid.text(0, 10), None);
        assert_eq!(grid.color(-1, 0), None);
        assert_eq!(grid.color(i64::MAX, i64::MAX), None);

        let small = GridState::new(4, 4, Color::WHITE);
        assert_eq!(small.color(0, 4), None);
        assert_eq!(small.color(3, 3), Some(Color::WHITE));
    }

    #[test]
    fn test_text_does_not_mark_dirty() {
        let mut grid = GridState::new(3, 3, Color::WHITE);
        grid.set_text(2, 1, "alive");
        assert_eq!(grid.text(2, 1), Some("alive"));
        assert_eq!(grid.text(1, 2), None);
        assert!(grid.dirty().is_empty());
    }

    #[test]
    fn test_take_dirty_empties_set() {
        let mut grid = GridState::new(3, 3, Color::WHITE);
        grid.set_color(0, 0, Color::RED);
        let taken = grid.take_dirty();
        assert_eq!(taken.len(), 1);
        assert!(grid.dirty().is_empty());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut original = GridState::new(3, 2, Color::WHITE);
        original.set_color(2, 1, Color::RED);
        original.set_text(0, 1, "label");

        let mut copy = original.snapshot();
        assert_eq!(copy.color(2, 1), Some(Color::RED));
        assert_eq!(copy.text(0, 1), Some("label"));
        assert!(copy.dirty().is_empty());

        copy.set_color(2, 1, Color::BLUE);
        copy.set_text(0, 1, "changed");
        assert_eq!(original.color(2, 1), Some(Color::RED));
        assert_eq!(original.text(0, 1), Some("label"));
    }
}
