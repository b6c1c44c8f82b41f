//! The render [`Grid`] and frame diffing.
//!
//! A model draws into a `Grid` every update; the app loop diffs it against
//! the previous one with [`compute_frame`] and hands only the changed cells
//! to the driver.

use crate::cell::{Cell, Style};
use crate::geom::{Pos, Range};

/// A 2D grid of render [`Cell`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
}

impl Grid {
    /// Create a grid of the given size filled with default cells.
    pub fn new(rows: i32, cols: i32) -> Self {
        let bounds = Range::with_size(rows, cols);
        Self {
            cells: vec![Cell::default(); bounds.len()],
            bounds,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows()
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols()
    }

    #[inline]
    fn index(&self, p: Pos) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.row as usize * self.cols() as usize + p.col as usize)
    }

    /// Read the cell at `p`; default cell outside bounds.
    pub fn at(&self, p: Pos) -> Cell {
        self.index(p).map(|i| self.cells[i]).unwrap_or_default()
    }

    /// Set the cell at `p`. No-op outside bounds; drawing past the screen
    /// edge simply clips.
    pub fn set(&mut self, p: Pos, cell: Cell) {
        if let Some(i) = self.index(p) {
            self.cells[i] = cell;
        }
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Write `text` left to right starting at `p`, clipped to the row.
    /// Returns the number of characters actually drawn.
    pub fn print(&mut self, p: Pos, text: &str, style: Style) -> usize {
        let mut drawn = 0;
        for (i, ch) in text.chars().enumerate() {
            let q = p.shift(0, i as i32);
            if q.col >= self.cols() {
                break;
            }
            if self.index(q).is_some() {
                self.set(q, Cell::new(ch, style));
                drawn += 1;
            }
        }
        drawn
    }

    /// Copy every cell of `src` into `self`. Both grids must have the same
    /// size; otherwise `self` takes over `src` wholesale.
    pub fn copy_from(&mut self, src: &Grid) {
        if self.bounds == src.bounds {
            self.cells.copy_from_slice(&src.cells);
        } else {
            self.clone_from(src);
        }
    }

    /// Row-major iterator over `(Pos, Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub cell: Cell,
    pub pos: Pos,
}

/// A set of cell changes (a diff frame).
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub rows: i32,
    pub cols: i32,
}

/// Compute the cells of `curr` that differ from `prev`.
///
/// When the sizes differ every cell of `curr` is reported.
pub fn compute_frame(prev: &Grid, curr: &Grid) -> Frame {
    let resized = prev.bounds != curr.bounds;
    let cells = curr
        .iter()
        .filter(|&(p, c)| resized || prev.at(p) != c)
        .map(|(pos, cell)| FrameCell { cell, pos })
        .collect();
    Frame {
        cells,
        rows: curr.rows(),
        cols: curr.cols(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_and_at() {
        let g = Grid::new(3, 4);
        assert_eq!((g.rows(), g.cols()), (3, 4));
        assert_eq!(g.at(Pos::new(0, 0)), Cell::default());
        assert_eq!(g.at(Pos::new(10, 10)), Cell::default());
    }

    #[test]
    fn set_clips_outside() {
        let mut g = Grid::new(2, 2);
        g.set(Pos::new(1, 1), Cell::default().with_char('X'));
        g.set(Pos::new(5, 5), Cell::default().with_char('Y'));
        assert_eq!(g.at(Pos::new(1, 1)).ch, 'X');
        assert_eq!(g.iter().filter(|(_, c)| c.ch == 'Y').count(), 0);
    }

    #[test]
    fn print_clips_at_row_end() {
        let mut g = Grid::new(1, 4);
        let n = g.print(Pos::new(0, 1), "hello", Style::default());
        assert_eq!(n, 3);
        let row: String = g.iter().map(|(_, c)| c.ch).collect();
        assert_eq!(row, " hel");
    }

    #[test]
    fn compute_frame_reports_changes_only() {
        let a = Grid::new(2, 3);
        let mut b = Grid::new(2, 3);
        b.set(Pos::new(0, 1), Cell::default().with_char('A'));
        let frame = compute_frame(&a, &b);
        assert_eq!(frame.cells.len(), 1);
        assert_eq!(frame.cells[0].pos, Pos::new(0, 1));
        assert_eq!(frame.cells[0].cell.ch, 'A');
    }

    #[test]
    fn compute_frame_after_resize_reports_everything() {
        let a = Grid::new(1, 1);
        let b = Grid::new(2, 2);
        assert_eq!(compute_frame(&a, &b).cells.len(), 4);
    }

    #[test]
    fn copy_from_makes_frames_empty() {
        let mut a = Grid::new(2, 2);
        let mut b = Grid::new(2, 2);
        b.fill(Cell::default().with_char('.'));
        a.copy_from(&b);
        assert!(compute_frame(&a, &b).cells.is_empty());
    }
}
