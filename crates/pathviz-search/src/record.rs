use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use pathviz_core::Pos;

/// Per-algorithm cost data carried by a [`SearchRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cost {
    /// Breadth-first search keeps no cost.
    Unweighted,
    /// Greedy best-first search: heuristic distance to the goal.
    Greedy { h: i32 },
    /// A*: steps from the start, heuristic, and their sum.
    ///
    /// `f` is fixed when the node is first opened. A later relaxation lowers
    /// `g` without refreshing `f`.
    Astar { g: i32, h: i32, f: i32 },
}

impl Cost {
    /// Steps from the start for A* records, zero otherwise.
    #[inline]
    pub fn g(self) -> i32 {
        match self {
            Self::Astar { g, .. } => g,
            _ => 0,
        }
    }

    /// The priority a record was queued with, if it has one.
    #[inline]
    pub fn key(self) -> Option<i32> {
        match self {
            Self::Unweighted => None,
            Self::Greedy { h } => Some(h),
            Self::Astar { f, .. } => Some(f),
        }
    }
}

/// What a search knows about one discovered position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchRecord {
    /// Predecessor on the discovered path; `None` for the start.
    pub parent: Option<Pos>,
    pub cost: Cost,
    /// In the open set, waiting to be expanded.
    pub open: bool,
    /// Already expanded; never reopened.
    pub closed: bool,
}

impl SearchRecord {
    /// A record that is neither open nor closed yet.
    #[inline]
    pub const fn new(parent: Option<Pos>, cost: Cost) -> Self {
        Self {
            parent,
            cost,
            open: false,
            closed: false,
        }
    }
}

/// Search records of one run, keyed by position.
pub type Records = HashMap<Pos, SearchRecord>;

// ---------------------------------------------------------------------------
// Open set
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct OpenEntry {
    key: i32,
    seq: u64,
    pos: Pos,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the smallest key, and among equal
        // keys the earliest insertion.
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of open positions: minimum key first, ties broken by
/// insertion order.
///
/// Keys are never updated once inserted, so this pops in exactly the order a
/// first-minimum linear scan over an insertion-ordered list would.
#[derive(Debug, Default)]
pub struct OpenSet {
    heap: BinaryHeap<OpenEntry>,
    seq: u64,
}

impl OpenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: i32, pos: Pos) {
        self.heap.push(OpenEntry {
            key,
            seq: self.seq,
            pos,
        });
        self.seq += 1;
    }

    pub fn pop(&mut self) -> Option<Pos> {
        self.heap.pop().map(|e| e.pos)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_smallest_key_first() {
        let mut open = OpenSet::new();
        open.push(5, Pos::new(0, 0));
        open.push(2, Pos::new(1, 1));
        open.push(9, Pos::new(2, 2));
        assert_eq!(open.len(), 3);
        assert_eq!(open.pop(), Some(Pos::new(1, 1)));
        assert_eq!(open.pop(), Some(Pos::new(0, 0)));
        assert_eq!(open.pop(), Some(Pos::new(2, 2)));
        assert_eq!(open.pop(), None);
        assert!(open.is_empty());
    }

    #[test]
    fn equal_keys_pop_in_insertion_order() {
        let mut open = OpenSet::new();
        let order = [
            Pos::new(3, 0),
            Pos::new(0, 3),
            Pos::new(1, 1),
            Pos::new(2, 9),
        ];
        for p in order {
            open.push(4, p);
        }
        let popped: Vec<_> = std::iter::from_fn(|| open.pop()).collect();
        assert_eq!(popped, order);
    }

    #[test]
    fn late_smaller_key_overtakes_older_entries() {
        let mut open = OpenSet::new();
        open.push(6, Pos::new(0, 0));
        open.push(6, Pos::new(0, 1));
        assert_eq!(open.pop(), Some(Pos::new(0, 0)));
        open.push(4, Pos::new(0, 2));
        open.push(6, Pos::new(0, 3));
        assert_eq!(open.pop(), Some(Pos::new(0, 2)));
        assert_eq!(open.pop(), Some(Pos::new(0, 1)));
        assert_eq!(open.pop(), Some(Pos::new(0, 3)));
    }

    #[test]
    fn cost_accessors() {
        assert_eq!(Cost::Unweighted.key(), None);
        assert_eq!(Cost::Greedy { h: 3 }.key(), Some(3));
        let a = Cost::Astar { g: 2, h: 5, f: 7 };
        assert_eq!(a.key(), Some(7));
        assert_eq!(a.g(), 2);
        assert_eq!(Cost::Greedy { h: 3 }.g(), 0);
    }
}
