//! Bidirectional breadth-first search.
//!
//! Two searches grow level by level, one from the start and one from the
//! target. Each round the start side expands its whole frontier first; the
//! target side then walks its frontier and, before expanding a cell, checks
//! whether the start side has already reached it. The first such cell is the
//! meeting cell, and the path is stitched together from the two sets of
//! parent links.
//!
//! On a 4-connected grid every cycle has even length, so the start and
//! target distances of any cell differ in parity by exactly the parity of the
//! shortest path. That rules out a meeting cell one level too deep: whichever
//! frontier cell is checked first, the meeting is always on a shortest path.

use crate::adjacency::Adjacency;
use crate::outcome::{CellPath, SearchStats};
use crate::search::SearchSide;

/// A single bidirectional search over a prebuilt [`Adjacency`].
///
/// `start` and `target` must be distinct, in-bounds cells.
#[derive(Debug)]
pub struct BidirBfs<'a> {
    adj: &'a Adjacency,
    start: SearchSide,
    target: SearchSide,
    /// Last level expanded; 0 before the first round.
    depth: u32,
}

impl<'a> BidirBfs<'a> {
    pub fn new(adj: &'a Adjacency, start: usize, target: usize) -> Self {
        debug_assert_ne!(start, target);
        Self {
            adj,
            start: SearchSide::new(adj.len(), start),
            target: SearchSide::new(adj.len(), target),
            depth: 0,
        }
    }

    /// Grow both searches until they meet. Returns the meeting cell, or
    /// `None` once either side runs out of cells to expand.
    pub fn run(&mut self) -> Option<usize> {
        while !self.start.is_exhausted() && !self.target.is_exhausted() {
            let level = self.depth + 1;
            self.start.expand(self.adj, level);

            let start = &self.start;
            let met = self
                .target
                .expand_until(self.adj, level, |cell| start.is_visited(cell));
            self.depth = level;
            if let Some(meeting) = met {
                log::trace!("searches met at cell {meeting} in round {level}");
                return Some(meeting);
            }

            log::trace!(
                "round {level}: start frontier {}, target frontier {}",
                self.start.frontier().len(),
                self.target.frontier().len()
            );
        }
        None
    }

    /// Reconstruct the path through `meeting`, a cell reached by both sides.
    pub fn path_through(&self, meeting: usize) -> CellPath {
        // meeting -> target, already in forward order.
        let mut target_path = Vec::new();
        let mut cell = meeting;
        while let Some(parent) = self.target.parent(cell) {
            target_path.push(cell);
            cell = parent;
        }
        target_path.push(self.target.origin());

        // meeting's parent -> start, excluding the start itself.
        let mut cells = Vec::new();
        let mut next = self.start.parent(meeting);
        while let Some(cell) = next {
            next = self.start.parent(cell);
            if next.is_some() {
                cells.push(cell);
            }
        }
        cells.reverse();
        cells.extend(target_path);

        let start_depth = self.start.distance(meeting).unwrap_or(0);
        let target_depth = self.target.distance(meeting).unwrap_or(0);
        CellPath::new(cells, meeting, start_depth, target_depth)
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            depth: self.depth,
            start_visited: self.start.visited_count(),
            target_visited: self.target.visited_count(),
        }
    }
}
