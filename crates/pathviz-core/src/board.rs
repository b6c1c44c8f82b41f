//! The [`Board`] is the grid model a search runs against.
//!
//! A board is a fixed-size 2D array of [`CellState`]s. The user places walls,
//! the start and the goal; searches write [`CellState::Frontier`] and
//! [`CellState::Path`] marks back into it as they progress.

use std::fmt;
use std::str::FromStr;

use crate::geom::{Pos, Range};

// ---------------------------------------------------------------------------
// CellState
// ---------------------------------------------------------------------------

/// The state of a single board cell.
///
/// The discriminants are stable and used as compact cell codes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum CellState {
    #[default]
    Empty = 0,
    /// Shadow marking left by earlier exploration.
    Visited = 1,
    Wall = 2,
    Start = 3,
    Goal = 4,
    Path = 5,
    Frontier = 6,
}

impl CellState {
    /// Whether a search may move through this cell.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Whether this is a mark written by a search (cleared on reset).
    #[inline]
    pub const fn is_mark(self) -> bool {
        matches!(self, Self::Visited | Self::Path | Self::Frontier)
    }

    /// The stable numeric code of this state.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Character used by the text layout format.
    pub const fn to_char(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Visited => ':',
            Self::Wall => '#',
            Self::Start => 'S',
            Self::Goal => 'G',
            Self::Path => '*',
            Self::Frontier => '+',
        }
    }

    /// Inverse of [`to_char`](Self::to_char).
    pub const fn from_char(ch: char) -> Option<Self> {
        Some(match ch {
            '.' => Self::Empty,
            ':' => Self::Visited,
            '#' => Self::Wall,
            'S' => Self::Start,
            'G' => Self::Goal,
            '*' => Self::Path,
            '+' => Self::Frontier,
            _ => return None,
        })
    }
}

impl TryFrom<u8> for CellState {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, u8> {
        Ok(match code {
            0 => Self::Empty,
            1 => Self::Visited,
            2 => Self::Wall,
            3 => Self::Start,
            4 => Self::Goal,
            5 => Self::Path,
            6 => Self::Frontier,
            other => return Err(other),
        })
    }
}

// ---------------------------------------------------------------------------
// BoardError
// ---------------------------------------------------------------------------

/// Errors reported by [`Board`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// The board does not hold exactly one start and one goal.
    #[error("invalid grid: found {starts} start(s) and {goals} goal(s)")]
    Invalid { starts: usize, goals: usize },

    /// A write targeted a position outside the board.
    #[error("position {pos} is outside the {rows}x{cols} board")]
    OutOfBounds { pos: Pos, rows: i32, cols: i32 },

    /// A text layout could not be parsed.
    #[error("layout line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// A fixed-size grid of [`CellState`]s, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Vec<CellState>,
    bounds: Range,
}

impl Board {
    /// Create a board of `rows` × `cols` empty cells.
    ///
    /// Negative dimensions are clamped to zero.
    pub fn new(rows: i32, cols: i32) -> Self {
        let bounds = Range::with_size(rows, cols);
        Self {
            cells: vec![CellState::Empty; bounds.len()],
            bounds,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols()
    }

    /// The bounding range, anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Whether `p` lies on the board.
    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Pos) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.row as usize * self.cols() as usize + p.col as usize)
    }

    /// The state at `p`, or `None` if `p` is off the board.
    #[inline]
    pub fn get(&self, p: Pos) -> Option<CellState> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Set the state at `p`.
    ///
    /// Writes outside the board are rejected and leave it unchanged.
    pub fn set(&mut self, p: Pos, state: CellState) -> Result<(), BoardError> {
        match self.index(p) {
            Some(i) => {
                self.cells[i] = state;
                Ok(())
            }
            None => Err(BoardError::OutOfBounds {
                pos: p,
                rows: self.rows(),
                cols: self.cols(),
            }),
        }
    }

    /// Whether `p` is on the board and not a wall.
    #[inline]
    pub fn is_passable(&self, p: Pos) -> bool {
        self.get(p).is_some_and(CellState::is_passable)
    }

    /// Row-major iterator over `(Pos, CellState)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, CellState)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Position of the first cell (row-major) in `state`.
    pub fn find(&self, state: CellState) -> Option<Pos> {
        self.iter().find(|&(_, c)| c == state).map(|(p, _)| p)
    }

    /// Whether the board holds exactly one start and exactly one goal.
    pub fn is_valid(&self) -> bool {
        self.count(CellState::Start) == 1 && self.count(CellState::Goal) == 1
    }

    /// The `(start, goal)` pair of a valid board.
    pub fn endpoints(&self) -> Result<(Pos, Pos), BoardError> {
        let starts = self.count(CellState::Start);
        let goals = self.count(CellState::Goal);
        if starts != 1 || goals != 1 {
            return Err(BoardError::Invalid { starts, goals });
        }
        match (self.find(CellState::Start), self.find(CellState::Goal)) {
            (Some(start), Some(goal)) => Ok((start, goal)),
            _ => Err(BoardError::Invalid { starts, goals }),
        }
    }

    /// Clear every search mark back to [`CellState::Empty`].
    ///
    /// Walls, the start and the goal are left untouched.
    pub fn clear_marks(&mut self) {
        for c in self.cells.iter_mut().filter(|c| c.is_mark()) {
            *c = CellState::Empty;
        }
    }

    /// Reset every cell to [`CellState::Empty`].
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Empty);
    }
}

impl fmt::Display for Board {
    /// One line per row, one character per cell (see [`CellState::to_char`]).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cols = self.cols().max(1) as usize;
        for (i, row) in self.cells.chunks(cols).enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for c in row {
                write!(f, "{}", c.to_char())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parse a text layout. Blank lines and surrounding whitespace are
    /// ignored; every remaining row must have the same width.
    fn from_str(s: &str) -> Result<Self, BoardError> {
        let lines: Vec<(usize, &str)> = s
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty())
            .collect();

        let cols = lines.first().map_or(0, |(_, l)| l.chars().count());
        let mut board = Board::new(lines.len() as i32, cols as i32);

        for (row, &(line, text)) in lines.iter().enumerate() {
            let width = text.chars().count();
            if width != cols {
                return Err(BoardError::Parse {
                    line,
                    reason: format!("expected {cols} cells, found {width}"),
                });
            }
            for (col, ch) in text.chars().enumerate() {
                let state = CellState::from_char(ch).ok_or_else(|| BoardError::Parse {
                    line,
                    reason: format!("unknown cell {ch:?}"),
                })?;
                board.set(Pos::new(row as i32, col as i32), state)?;
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_empty() {
        let b = Board::new(3, 4);
        assert_eq!(b.rows(), 3);
        assert_eq!(b.cols(), 4);
        assert!(b.iter().all(|(_, c)| c == CellState::Empty));
    }

    #[test]
    fn set_and_get() {
        let mut b = Board::new(3, 4);
        b.set(Pos::new(2, 3), CellState::Wall).unwrap();
        assert_eq!(b.get(Pos::new(2, 3)), Some(CellState::Wall));
        assert_eq!(b.get(Pos::new(3, 0)), None);
        assert!(!b.is_passable(Pos::new(2, 3)));
        assert!(b.is_passable(Pos::new(0, 0)));
        assert!(!b.is_passable(Pos::new(-1, 0)));
    }

    #[test]
    fn out_of_bounds_write_is_rejected() {
        let mut b = Board::new(2, 2);
        let before = b.clone();
        let err = b.set(Pos::new(2, 0), CellState::Wall).unwrap_err();
        assert_eq!(
            err,
            BoardError::OutOfBounds {
                pos: Pos::new(2, 0),
                rows: 2,
                cols: 2
            }
        );
        assert_eq!(b, before);
    }

    #[test]
    fn validation_counts_start_and_goal() {
        let mut b = Board::new(3, 3);
        assert!(!b.is_valid());
        assert_eq!(
            b.endpoints(),
            Err(BoardError::Invalid {
                starts: 0,
                goals: 0
            })
        );

        b.set(Pos::new(0, 0), CellState::Start).unwrap();
        b.set(Pos::new(2, 2), CellState::Goal).unwrap();
        assert!(b.is_valid());
        assert_eq!(b.endpoints(), Ok((Pos::new(0, 0), Pos::new(2, 2))));

        b.set(Pos::new(1, 1), CellState::Start).unwrap();
        assert!(!b.is_valid());
        assert_eq!(
            b.endpoints(),
            Err(BoardError::Invalid {
                starts: 2,
                goals: 1
            })
        );
    }

    #[test]
    fn clear_marks_keeps_layout() {
        let mut b: Board = "S+*\n#:G".parse().unwrap();
        b.clear_marks();
        assert_eq!(b.to_string(), "S..\n#.G");
    }

    #[test]
    fn clear_marks_is_idempotent() {
        let mut once: Board = "S+*.\n#::G\n++#*".parse().unwrap();
        once.clear_marks();
        let mut twice = once.clone();
        twice.clear_marks();
        assert_eq!(once, twice);
        assert_eq!(twice.count(CellState::Wall), 2);
        assert_eq!(twice.count(CellState::Start), 1);
        assert_eq!(twice.count(CellState::Goal), 1);
    }

    #[test]
    fn clear_wipes_everything() {
        let mut b: Board = "S#\n+G".parse().unwrap();
        b.clear();
        assert_eq!(b.count(CellState::Empty), 4);
    }

    #[test]
    fn parse_and_display_round_trip() {
        let text = "S.#\n.+G\n*:.";
        let b: Board = text.parse().unwrap();
        assert_eq!(b.get(Pos::new(0, 0)), Some(CellState::Start));
        assert_eq!(b.get(Pos::new(0, 2)), Some(CellState::Wall));
        assert_eq!(b.get(Pos::new(1, 2)), Some(CellState::Goal));
        assert_eq!(b.to_string(), text);
    }

    #[test]
    fn parse_ignores_indentation_and_blank_lines() {
        let b: Board = "
            S..
            ..G
        "
        .parse()
        .unwrap();
        assert_eq!((b.rows(), b.cols()), (2, 3));
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = "S..\n.G".parse::<Board>().unwrap_err();
        assert!(matches!(err, BoardError::Parse { line: 2, .. }));
    }

    #[test]
    fn parse_rejects_unknown_cells() {
        let err = "S.x\n..G".parse::<Board>().unwrap_err();
        assert!(matches!(err, BoardError::Parse { line: 1, .. }));
    }

    #[test]
    fn cell_codes_are_stable() {
        for code in 0..=6u8 {
            let state = CellState::try_from(code).unwrap();
            assert_eq!(state.code(), code);
            assert_eq!(CellState::from_char(state.to_char()), Some(state));
        }
        assert_eq!(CellState::try_from(7), Err(7));
    }
}
