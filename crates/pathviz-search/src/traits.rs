use pathviz_core::{Board, Pos};

/// Neighbour enumeration for a searchable grid.
pub trait Pather {
    /// Append the passable neighbours of `p` into `buf`, in search order.
    /// The caller clears `buf` before calling.
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>);
}

impl Pather for Board {
    /// Up, down, left, right; off-board and wall cells are skipped.
    ///
    /// Reads the board as it is right now, nothing is cached between calls.
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>) {
        for n in p.neighbors_4() {
            if self.is_passable(n) {
                buf.push(n);
            }
        }
    }
}
