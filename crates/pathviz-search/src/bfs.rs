use pathviz_core::Board;

use crate::record::{Cost, SearchRecord};
use crate::search::{Discovery, Search, Status};

impl Search {
    /// One breadth-first step.
    ///
    /// The goal is recorded and the search ends the moment it shows up as a
    /// neighbour; it is never queued. Other positions are recorded, queued and
    /// reported the first time they are seen.
    pub(crate) fn bfs_step(&mut self, board: &mut Board) -> Option<Discovery> {
        loop {
            let Some(current) = self.current else {
                let Some(next) = self.queue.pop_front() else {
                    self.status = Status::Exhausted;
                    return None;
                };
                self.expand(next, board);
                continue;
            };

            let Some(adj) = self.pending.next() else {
                self.current = None;
                continue;
            };

            if adj == self.goal {
                self.records
                    .insert(adj, SearchRecord::new(Some(current), Cost::Unweighted));
                self.status = Status::Found;
                return None;
            }

            if adj != self.start && !self.records.contains_key(&adj) {
                self.records
                    .insert(adj, SearchRecord::new(Some(current), Cost::Unweighted));
                self.queue.push_back(adj);
                return Some(self.discover(adj, board));
            }
        }
    }
}
