//! Random wall placement.

use pathviz_core::{Board, BoardError, CellState, Pos};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A seeded RNG when `seed` is given, an OS-seeded one otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Turn each Empty cell into a Wall with probability `density`. Returns the
/// number of walls placed.
pub fn scatter_walls<R: Rng>(board: &mut Board, rng: &mut R, density: f64) -> usize {
    let density = density.clamp(0.0, 1.0);
    let empty: Vec<Pos> = board
        .iter()
        .filter(|&(_, c)| c == CellState::Empty)
        .map(|(p, _)| p)
        .collect();
    let mut placed = 0;
    for p in empty {
        if rng.random_bool(density) && board.set(p, CellState::Wall).is_ok() {
            placed += 1;
        }
    }
    placed
}

/// An empty `rows` x `cols` board with the start in the top-left corner and
/// the goal in the bottom-right one. Fails on a board with no cells.
pub fn corner_board(rows: i32, cols: i32) -> Result<Board, BoardError> {
    let mut board = Board::new(rows, cols);
    let bounds = board.bounds();
    board.set(bounds.min, CellState::Start)?;
    board.set(bounds.max.shift(-1, -1), CellState::Goal)?;
    Ok(board)
}

/// A [`corner_board`] with random walls everywhere else.
pub fn random_board<R: Rng>(
    rows: i32,
    cols: i32,
    rng: &mut R,
    density: f64,
) -> Result<Board, BoardError> {
    let mut board = corner_board(rows, cols)?;
    scatter_walls(&mut board, rng, density);
    Ok(board)
}
