//! Per-direction BFS bookkeeping.

use crate::adjacency::Adjacency;

/// The state of one breadth-first search: distances and parent links for
/// every cell, plus the frontier of the current depth.
///
/// Distances and parents are written once, on first discovery.
#[derive(Debug, Clone)]
pub struct SearchSide {
    origin: usize,
    dist: Vec<Option<u32>>,
    parent: Vec<Option<usize>>,
    frontier: Vec<usize>,
    next: Vec<usize>,
    visited: usize,
}

impl SearchSide {
    /// Start a search over `len` cells from `origin`, which gets distance 0
    /// and no parent.
    pub fn new(len: usize, origin: usize) -> Self {
        let mut dist = vec![None; len];
        dist[origin] = Some(0);
        Self {
            origin,
            dist,
            parent: vec![None; len],
            frontier: vec![origin],
            next: Vec::new(),
            visited: 1,
        }
    }

    #[inline]
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Distance from the origin, or `None` if not reached yet.
    #[inline]
    pub fn distance(&self, cell: usize) -> Option<u32> {
        self.dist[cell]
    }

    /// The cell `cell` was first discovered from. `None` for the origin and
    /// for unvisited cells.
    #[inline]
    pub fn parent(&self, cell: usize) -> Option<usize> {
        self.parent[cell]
    }

    #[inline]
    pub fn is_visited(&self, cell: usize) -> bool {
        self.dist[cell].is_some()
    }

    /// Cells discovered at the most recent depth.
    #[inline]
    pub fn frontier(&self) -> &[usize] {
        &self.frontier
    }

    /// Whether the frontier is empty, i.e. nothing is left to expand.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Number of cells reached so far, origin included.
    #[inline]
    pub fn visited_count(&self) -> usize {
        self.visited
    }

    /// Expand the whole frontier by one level, assigning `depth` to every
    /// newly discovered cell, then make those cells the new frontier.
    pub fn expand(&mut self, adj: &Adjacency, depth: u32) {
        self.expand_until(adj, depth, |_| false);
    }

    /// Like [`expand`](Self::expand), but `stop` is consulted for each
    /// frontier cell before that cell is expanded. The first cell for which
    /// it returns `true` is returned immediately; the pass is abandoned and
    /// the frontier is left in place.
    pub fn expand_until(
        &mut self,
        adj: &Adjacency,
        depth: u32,
        mut stop: impl FnMut(usize) -> bool,
    ) -> Option<usize> {
        self.next.clear();

        for k in 0..self.frontier.len() {
            let cell = self.frontier[k];
            if stop(cell) {
                return Some(cell);
            }
            for n in adj.neighbors(cell) {
                if self.dist[n].is_some() {
                    continue;
                }
                self.dist[n] = Some(depth);
                self.parent[n] = Some(cell);
                self.next.push(n);
                self.visited += 1;
            }
        }

        std::mem::swap(&mut self.frontier, &mut self.next);
        None
    }
}
