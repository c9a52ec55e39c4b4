//! Binary traversability maps.
//!
//! A map is a row-major array of flag bytes, one per cell: `1` means the cell
//! is open, any other value means it is blocked. [`MapView`] borrows such an
//! array (this is what the search routines consume), [`WalkMap`] owns one.

use std::fmt;
use std::str::FromStr;

use crate::geom::{Point, Range};

/// Flag byte of an open (walkable) cell.
pub const OPEN: u8 = 1;
/// Flag byte written for a blocked cell. Any non-[`OPEN`] byte is blocked.
pub const BLOCKED: u8 = 0;

/// Character used for open cells in the ASCII map format.
pub const OPEN_CHAR: char = '.';
/// Character used for blocked cells in the ASCII map format.
pub const BLOCKED_CHAR: char = '#';

// ---------------------------------------------------------------------------
// MapError
// ---------------------------------------------------------------------------

/// Errors raised while constructing a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The flag array does not hold `width * height` bytes.
    SizeMismatch { expected: usize, actual: usize },
    /// `width * height` overflows `usize`.
    TooLarge { width: usize, height: usize },
    /// An ASCII row has a different length than the first row.
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// An ASCII map contains a character other than `.` or `#`.
    InvalidChar { row: usize, col: usize, ch: char },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::SizeMismatch { expected, actual } => {
                write!(f, "map has {actual} cells, expected {expected}")
            }
            MapError::TooLarge { width, height } => {
                write!(f, "map size {width}x{height} overflows")
            }
            MapError::RaggedRow {
                row,
                expected,
                actual,
            } => write!(f, "row {row} has {actual} cells, expected {expected}"),
            MapError::InvalidChar { row, col, ch } => {
                write!(f, "invalid map character {ch:?} at row {row}, column {col}")
            }
        }
    }
}

impl std::error::Error for MapError {}

fn cell_count(width: usize, height: usize) -> Result<usize, MapError> {
    width
        .checked_mul(height)
        .ok_or(MapError::TooLarge { width, height })
}

// ---------------------------------------------------------------------------
// MapView
// ---------------------------------------------------------------------------

/// Borrowed, read-only view of a traversability map.
///
/// Cell `(x, y)` lives at linear index `x + y * width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapView<'a> {
    flags: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> MapView<'a> {
    /// Wrap a flag slice without validation.
    ///
    /// The caller guarantees `flags.len() >= width * height`; cells past
    /// `width * height` are ignored.
    #[inline]
    pub fn new(flags: &'a [u8], width: usize, height: usize) -> Self {
        debug_assert!(flags.len() >= width * height);
        Self {
            flags,
            width,
            height,
        }
    }

    /// Wrap a flag slice, checking that it covers `width * height` cells.
    pub fn try_new(flags: &'a [u8], width: usize, height: usize) -> Result<Self, MapError> {
        let expected = cell_count(width, height)?;
        if flags.len() < expected {
            return Err(MapError::SizeMismatch {
                expected,
                actual: flags.len(),
            });
        }
        Ok(Self {
            flags: &flags[..expected],
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The raw flag bytes, row-major.
    #[inline]
    pub fn flags(&self) -> &'a [u8] {
        &self.flags[..self.len()]
    }

    /// The map rectangle, anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Convert a `Point` to a linear index. Returns `None` if out of bounds.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        let (x, y) = (p.x as usize, p.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(x + y * self.width)
    }

    /// Convert a linear index back to a `Point`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        Point::new((idx % self.width) as i32, (idx / self.width) as i32)
    }

    /// Whether the cell at linear index `idx` is open.
    #[inline]
    pub fn is_open_idx(&self, idx: usize) -> bool {
        self.flags[idx] == OPEN
    }

    /// Whether `p` is inside the map and open.
    #[inline]
    pub fn is_open(&self, p: Point) -> bool {
        self.idx(p).is_some_and(|i| self.is_open_idx(i))
    }
}

// ---------------------------------------------------------------------------
// WalkMap
// ---------------------------------------------------------------------------

/// Owned traversability map.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkMap {
    width: usize,
    height: usize,
    flags: Vec<u8>,
}

impl WalkMap {
    /// Create a map with every cell blocked.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, false)
    }

    /// Create a map with every cell set to `open`.
    pub fn filled(width: usize, height: usize, open: bool) -> Self {
        let flag = if open { OPEN } else { BLOCKED };
        Self {
            width,
            height,
            flags: vec![flag; width * height],
        }
    }

    /// Take ownership of a row-major flag array of exactly `width * height`
    /// bytes.
    pub fn from_flags(width: usize, height: usize, flags: Vec<u8>) -> Result<Self, MapError> {
        let expected = cell_count(width, height)?;
        if flags.len() != expected {
            return Err(MapError::SizeMismatch {
                expected,
                actual: flags.len(),
            });
        }
        Ok(Self {
            width,
            height,
            flags,
        })
    }

    /// Parse an ASCII map: one line per row, `.` open and `#` blocked.
    ///
    /// Blank lines before and after the map are ignored.
    pub fn from_ascii(s: &str) -> Result<Self, MapError> {
        let rows: Vec<&str> = s
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .skip_while(|l| l.trim().is_empty())
            .collect();
        let rows = match rows.iter().rposition(|l| !l.trim().is_empty()) {
            Some(last) => &rows[..=last],
            None => &[][..],
        };

        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut flags = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let actual = line.chars().count();
            if actual != width {
                return Err(MapError::RaggedRow {
                    row,
                    expected: width,
                    actual,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let flag = match ch {
                    OPEN_CHAR => OPEN,
                    BLOCKED_CHAR => BLOCKED,
                    _ => return Err(MapError::InvalidChar { row, col, ch }),
                };
                flags.push(flag);
            }
        }
        Ok(Self {
            width,
            height: rows.len(),
            flags,
        })
    }

    /// Render the map in the ASCII format accepted by
    /// [`from_ascii`](Self::from_ascii).
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.flags.chunks(self.width.max(1)).take(self.height) {
            for &flag in row {
                out.push(if flag == OPEN { OPEN_CHAR } else { BLOCKED_CHAR });
            }
            out.push('\n');
        }
        out
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The map rectangle, anchored at the origin.
    pub fn bounds(&self) -> Range {
        self.view().bounds()
    }

    /// Borrow the map as a [`MapView`].
    #[inline]
    pub fn view(&self) -> MapView<'_> {
        MapView::new(&self.flags, self.width, self.height)
    }

    /// The raw flag bytes, row-major.
    #[inline]
    pub fn flags(&self) -> &[u8] {
        &self.flags
    }

    /// Whether `p` is inside the map and open.
    pub fn is_open(&self, p: Point) -> bool {
        self.view().is_open(p)
    }

    /// Open or block the cell at `p`. Does nothing if out of bounds.
    pub fn set_open(&mut self, p: Point, open: bool) {
        if let Some(i) = self.view().idx(p) {
            self.flags[i] = if open { OPEN } else { BLOCKED };
        }
    }

    /// Number of open cells.
    pub fn open_count(&self) -> usize {
        self.flags.iter().filter(|&&f| f == OPEN).count()
    }
}

impl FromStr for WalkMap {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ascii(s)
    }
}

impl fmt::Display for WalkMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ascii())
    }
}
