use meetpath_core::Point;

/// Return code of [`find_path`](crate::find_path) when start and target are
/// not connected.
pub const NO_PATH: i32 = -1;

/// A path found by the bidirectional search.
///
/// The cells are linear indices, ordered from the first step after the start
/// up to and including the target; the start cell itself is not listed. The
/// path length is therefore the number of moves.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellPath {
    cells: Vec<usize>,
    meeting: usize,
    start_depth: u32,
    target_depth: u32,
}

impl CellPath {
    pub(crate) fn new(cells: Vec<usize>, meeting: usize, start_depth: u32, target_depth: u32) -> Self {
        debug_assert_eq!(cells.len(), (start_depth + target_depth) as usize);
        Self {
            cells,
            meeting,
            start_depth,
            target_depth,
        }
    }

    #[inline]
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<usize> {
        self.cells
    }

    /// Number of moves from start to target.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell where the two searches met.
    #[inline]
    pub fn meeting(&self) -> usize {
        self.meeting
    }

    /// Distance from the start to the meeting cell.
    #[inline]
    pub fn start_depth(&self) -> u32 {
        self.start_depth
    }

    /// Distance from the meeting cell to the target.
    #[inline]
    pub fn target_depth(&self) -> u32 {
        self.target_depth
    }

    /// The path as points on a map of the given width.
    pub fn points(&self, width: usize) -> Vec<Point> {
        self.cells
            .iter()
            .map(|&c| Point::new((c % width) as i32, (c / width) as i32))
            .collect()
    }
}

/// Result of a shortest-path query.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathOutcome {
    /// Start and target are the same cell; nothing to do.
    SameCell,
    /// A shortest path.
    Found(CellPath),
    /// The target cannot be reached from the start.
    NoPath,
}

impl PathOutcome {
    /// The integer form of the outcome: the path length, `0` for
    /// [`SameCell`](Self::SameCell) or [`NO_PATH`] when unreachable.
    pub fn code(&self) -> i32 {
        match self {
            PathOutcome::SameCell => 0,
            PathOutcome::Found(path) => path.len() as i32,
            PathOutcome::NoPath => NO_PATH,
        }
    }

    pub fn path(&self) -> Option<&CellPath> {
        match self {
            PathOutcome::Found(path) => Some(path),
            _ => None,
        }
    }

    /// Copy the path into `out` if it fits and return [`code`](Self::code).
    ///
    /// A path longer than `out` leaves `out` untouched; the caller sees the
    /// true length and can retry with a larger buffer.
    pub fn write_to(&self, out: &mut [i32]) -> i32 {
        if let PathOutcome::Found(path) = self {
            if path.len() <= out.len() {
                for (slot, &cell) in out.iter_mut().zip(path.cells()) {
                    *slot = cell as i32;
                }
            }
        }
        self.code()
    }
}

/// Counters describing how much work a search did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Last BFS depth expanded.
    pub depth: u32,
    /// Cells reached from the start, start included.
    pub start_visited: usize,
    /// Cells reached from the target, target included.
    pub target_visited: usize,
}

impl SearchStats {
    pub fn visited(&self) -> usize {
        self.start_visited + self.target_visited
    }
}
