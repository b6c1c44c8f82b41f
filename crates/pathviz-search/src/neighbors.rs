use pathviz_core::Pos;

use crate::traits::Pather;

/// Collect the passable neighbours of `p`, in search order.
pub fn neighbors<P: Pather>(pather: &P, p: Pos) -> Vec<Pos> {
    let mut buf = Vec::with_capacity(4);
    pather.neighbors(p, &mut buf);
    buf
}

/// Reusable cursor over the neighbours of the node being expanded.
///
/// A search loads the neighbour list once per expansion and then consumes
/// it one position at a time, possibly across several steps.
#[derive(Debug, Clone)]
pub struct Neighbors {
    buf: Vec<Pos>,
    next: usize,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
            next: 0,
        }
    }

    /// Replace the cursor contents with the neighbours of `p`.
    pub fn load<P: Pather>(&mut self, pather: &P, p: Pos) {
        self.buf.clear();
        self.next = 0;
        pather.neighbors(p, &mut self.buf);
    }

    /// Neighbours not consumed yet.
    pub fn remaining(&self) -> &[Pos] {
        &self.buf[self.next..]
    }
}

impl Iterator for Neighbors {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        let p = self.buf.get(self.next).copied()?;
        self.next += 1;
        Some(p)
    }
}
