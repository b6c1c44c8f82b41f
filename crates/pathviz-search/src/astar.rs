use pathviz_core::Board;

use crate::distance::manhattan;
use crate::record::{Cost, SearchRecord};
use crate::search::{Discovery, Search};

impl Search {
    /// One A* step.
    ///
    /// A neighbour seen for the first time is opened with `g + 1` from the
    /// node being expanded and reported. An open neighbour reachable more
    /// cheaply takes the new `g` and parent, but keeps the priority it was
    /// queued with and is not reported again.
    pub(crate) fn astar_step(&mut self, board: &mut Board) -> Option<Discovery> {
        while let Some((current, adj)) = self.next_open_edge(board) {
            let g = self.records.get(&current).map_or(0, |r| r.cost.g()) + 1;
            let goal = self.goal;
            let rec = self
                .records
                .entry(adj)
                .or_insert_with(|| SearchRecord::new(None, Cost::Astar { g: 0, h: 0, f: 0 }));
            if rec.closed {
                continue;
            }

            if !rec.open {
                let h = manhattan(adj, goal);
                let f = g + h;
                rec.parent = Some(current);
                rec.cost = Cost::Astar { g, h, f };
                rec.open = true;
                self.open.push(f, adj);
                return Some(self.discover(adj, board));
            }

            if let Cost::Astar { g: old, h, f } = rec.cost {
                if g < old {
                    rec.cost = Cost::Astar { g, h, f };
                    rec.parent = Some(current);
                }
            }
        }
        None
    }
}
