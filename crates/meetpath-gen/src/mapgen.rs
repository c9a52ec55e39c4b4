//! Map generation algorithms.
//!
//! Provides three generators:
//! - **Random Walk Cave**: a drunk walk from the centre opens cells.
//! - **Cellular Automata Cave**: random walls smoothed with cellular
//!   automata rules.
//! - **Noise**: every cell independently open with a fixed probability.

use meetpath_core::{Point, WalkMap};
use rand::{Rng, RngExt};

/// Trait for choosing a random neighbor during random-walk cave generation.
pub trait RandomWalker {
    /// Given a position `p`, return a random neighbor using `rng`.
    fn neighbor(&self, p: Point, rng: &mut impl Rng) -> Point;
}

/// A simple 4-directional random walker.
pub struct FourDirectionWalker;

impl RandomWalker for FourDirectionWalker {
    fn neighbor(&self, p: Point, rng: &mut impl Rng) -> Point {
        let dirs = p.neighbors_4();
        dirs[rng.random_range(0..dirs.len())]
    }
}

/// A rule for one iteration of cellular automata smoothing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellularAutomataRule {
    /// If a cell has >= this many wall neighbors in the 1-ring (8 neighbors),
    /// it becomes a wall.
    pub w_cutoff1: i32,
    /// If a cell has <= this many wall neighbors in the 2-ring
    /// (24 neighbors), it becomes a wall.
    pub w_cutoff2: i32,
    /// Whether cells outside the map count as walls.
    pub walls_out_of_range: bool,
    /// How many times to apply this rule.
    pub reps: usize,
}

impl Default for CellularAutomataRule {
    fn default() -> Self {
        Self {
            w_cutoff1: 5,
            w_cutoff2: 2,
            walls_out_of_range: true,
            reps: 4,
        }
    }
}

/// Map generator operating on a [`WalkMap`].
pub struct MapGen<R: Rng> {
    pub rng: R,
    pub map: WalkMap,
}

impl<R: Rng> MapGen<R> {
    /// Create a generator over a fully blocked map of the given size.
    pub fn new(width: usize, height: usize, rng: R) -> Self {
        Self::with_map(WalkMap::new(width, height), rng)
    }

    /// Create a generator over an existing map.
    pub fn with_map(map: WalkMap, rng: R) -> Self {
        Self { rng, map }
    }

    /// Give up the generator and keep the map.
    pub fn into_map(self) -> WalkMap {
        self.map
    }

    /// Open cells with a random walk.
    ///
    /// Starting from the centre of the map, perform up to `walks` random
    /// walks, opening every cell visited, until the proportion of open cells
    /// reaches `fill_pct` (0.0–1.0) of the total area.
    ///
    /// Returns the number of cells opened.
    pub fn random_walk_cave(
        &mut self,
        walker: &impl RandomWalker,
        fill_pct: f64,
        walks: usize,
    ) -> usize {
        let bounds = self.map.bounds();
        let total = bounds.len();
        if total == 0 {
            return 0;
        }
        let target = (total as f64 * fill_pct) as usize;
        let already_open = self.map.open_count();
        let mut carved = 0usize;

        let start = Point::new(bounds.width() / 2, bounds.height() / 2);

        'walks: for _ in 0..walks {
            let mut pos = start;
            let step_limit = total * 4; // per walk

            for _ in 0..step_limit {
                if already_open + carved >= target {
                    break 'walks;
                }

                if !self.map.is_open(pos) {
                    self.map.set_open(pos, true);
                    carved += 1;
                }

                // Walk to a neighbor, staying put at the border.
                let next = walker.neighbor(pos, &mut self.rng);
                if bounds.contains(next) {
                    pos = next;
                }
            }
        }

        log::debug!("random walk opened {carved} of {total} cells");
        carved
    }

    /// Generate a cave using cellular automata.
    ///
    /// 1. Initialize each cell randomly: `wall_init_pct` chance of being
    ///    blocked, otherwise open.
    /// 2. Apply each rule in `rules` for its specified number of repetitions.
    ///
    /// Returns the number of open cells in the final map.
    pub fn cellular_automata_cave(
        &mut self,
        wall_init_pct: f64,
        rules: &[CellularAutomataRule],
    ) -> usize {
        let bounds = self.map.bounds();

        // Step 1: random initialization.
        for p in bounds.iter() {
            let r: f64 = self.rng.random();
            self.map.set_open(p, r >= wall_init_pct);
        }

        // Step 2: apply rules, computing each generation into a scratch map.
        let mut scratch = self.map.clone();
        for rule in rules {
            for _ in 0..rule.reps {
                for p in bounds.iter() {
                    let walls1 = self.count_walls_ring(p, 1, rule.walls_out_of_range);
                    let walls2 = self.count_walls_ring(p, 2, rule.walls_out_of_range);
                    let wall = walls1 >= rule.w_cutoff1 || walls2 <= rule.w_cutoff2;
                    scratch.set_open(p, !wall);
                }
                std::mem::swap(&mut self.map, &mut scratch);
            }
        }

        let open = self.map.open_count();
        log::debug!("cellular automata left {open} of {} cells open", bounds.len());
        open
    }

    /// Open each cell independently with probability `open_pct`.
    ///
    /// Returns the number of open cells.
    pub fn noise(&mut self, open_pct: f64) -> usize {
        for p in self.map.bounds().iter() {
            let r: f64 = self.rng.random();
            self.map.set_open(p, r < open_pct);
        }
        self.map.open_count()
    }

    /// Count blocked cells within Chebyshev distance `radius` of `center`.
    fn count_walls_ring(&self, center: Point, radius: i32, walls_out_of_range: bool) -> i32 {
        let bounds = self.map.bounds();
        let mut count = 0;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let p = center.shift(dx, dy);
                if bounds.contains(p) {
                    if !self.map.is_open(p) {
                        count += 1;
                    }
                } else if walls_out_of_range {
                    count += 1;
                }
            }
        }
        count
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn rule_round_trip() {
        let rule = CellularAutomataRule {
            w_cutoff1: 6,
            w_cutoff2: 1,
            walls_out_of_range: false,
            reps: 2,
        };
        let json = serde_json::to_string(&rule).unwrap();
        let back: CellularAutomataRule = serde_json::from_str(&json).unwrap();
        assert_eq!(rule, back);
    }

    #[test]
    fn rules_load_from_json() {
        let json = r#"[{"w_cutoff1":5,"w_cutoff2":2,"walls_out_of_range":true,"reps":4}]"#;
        let rules: Vec<CellularAutomataRule> = serde_json::from_str(json).unwrap();
        assert_eq!(rules, vec![CellularAutomataRule::default()]);
    }
}
