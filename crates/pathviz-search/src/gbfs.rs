use pathviz_core::Board;

use crate::distance::manhattan;
use crate::record::{Cost, SearchRecord};
use crate::search::{Discovery, Search};

impl Search {
    /// One greedy best-first step.
    ///
    /// Every neighbour that is not closed takes the node being expanded as
    /// its parent, even when it is already open. Only the first sighting
    /// queues and reports it. Path costs are never compared, so the route
    /// found is not necessarily the shortest.
    pub(crate) fn greedy_step(&mut self, board: &mut Board) -> Option<Discovery> {
        while let Some((current, adj)) = self.next_open_edge(board) {
            let rec = self
                .records
                .entry(adj)
                .or_insert_with(|| SearchRecord::new(None, Cost::Greedy { h: 0 }));
            if rec.closed {
                continue;
            }
            rec.parent = Some(current);
            if rec.open {
                continue;
            }

            let h = manhattan(adj, self.goal);
            rec.cost = Cost::Greedy { h };
            rec.open = true;
            self.open.push(h, adj);
            return Some(self.discover(adj, board));
        }
        None
    }
}
