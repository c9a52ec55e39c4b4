//! Adjacency table built from a traversability map.

use meetpath_core::{MapView, Point};

/// One of the four cardinal movement directions.
///
/// The discriminant is the slot the direction occupies in an
/// [`Adjacency`] entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Right = 0,
    Up = 1,
    Left = 2,
    Down = 3,
}

impl Direction {
    /// All directions in slot order.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Up,
        Direction::Left,
        Direction::Down,
    ];

    /// Unit step for this direction (Y grows down).
    #[inline]
    pub const fn offset(self) -> Point {
        match self {
            Direction::Right => Point::new(1, 0),
            Direction::Up => Point::new(0, -1),
            Direction::Left => Point::new(-1, 0),
            Direction::Down => Point::new(0, 1),
        }
    }
}

/// Up to four traversable neighbours per cell, stored as
/// `[right, up, left, down]`.
///
/// Only open cells have entries, and an entry only ever points at an open
/// cell, so the relation is symmetric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency {
    slots: Vec<[Option<usize>; 4]>,
}

impl Adjacency {
    /// Build the table for every cell of `map`.
    pub fn build(map: MapView<'_>) -> Self {
        let (w, h) = (map.width(), map.height());
        let mut slots = vec![[None; 4]; map.len()];

        for (i, entry) in slots.iter_mut().enumerate() {
            if !map.is_open_idx(i) {
                continue;
            }
            let (x, y) = (i % w, i / w);
            // Borders are decided from the column/row, never by probing.
            let candidates = [
                (x + 1 < w).then(|| i + 1),
                (y > 0).then(|| i - w),
                (x > 0).then(|| i - 1),
                (y + 1 < h).then(|| i + w),
            ];
            for (slot, candidate) in entry.iter_mut().zip(candidates) {
                *slot = candidate.filter(|&n| map.is_open_idx(n));
            }
        }

        Self { slots }
    }

    /// Number of cells covered by the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The neighbour of `cell` in direction `dir`, if traversable.
    #[inline]
    pub fn neighbor(&self, cell: usize, dir: Direction) -> Option<usize> {
        self.slots[cell][dir as usize]
    }

    /// Traversable neighbours of `cell` in right, up, left, down order.
    #[inline]
    pub fn neighbors(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        self.slots[cell].iter().flatten().copied()
    }

    /// Number of directed edges (each undirected edge counts twice).
    pub fn edge_count(&self) -> usize {
        self.slots
            .iter()
            .map(|entry| entry.iter().flatten().count())
            .sum()
    }
}
