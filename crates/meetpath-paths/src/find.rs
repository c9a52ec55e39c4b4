//! Entry points: the flat, buffer-filling [`find_path`] and the typed
//! [`shortest_path`].

use meetpath_core::{MapView, Point};

use crate::adjacency::Adjacency;
use crate::bidir::BidirBfs;
use crate::outcome::{NO_PATH, PathOutcome, SearchStats};

/// Find the shortest 4-directional path from `start` to `target`.
///
/// `map` holds `width * height` flag bytes in row-major order (`1` open,
/// anything else blocked).
///
/// Returns the number of moves on the path, `0` when `start == target`, or
/// `-1` when the target cannot be reached. If the path fits in `out`, its
/// cells (as indices `x + y * width`, from the first step up to and
/// including the target) are written to the front of `out`; otherwise `out`
/// is left untouched and the caller can retry with a buffer of the returned
/// length.
///
/// Negative dimensions, a short `map` and endpoints outside the grid are
/// reported as `-1`.
pub fn find_path(
    start: Point,
    target: Point,
    map: &[u8],
    width: i32,
    height: i32,
    out: &mut [i32],
) -> i32 {
    if start == target {
        return 0;
    }
    let (Ok(w), Ok(h)) = (usize::try_from(width), usize::try_from(height)) else {
        log::warn!("find_path: negative map size {width}x{height}");
        return NO_PATH;
    };
    let view = match MapView::try_new(map, w, h) {
        Ok(view) => view,
        Err(err) => {
            log::warn!("find_path: {err}");
            return NO_PATH;
        }
    };
    shortest_path(view, start, target).write_to(out)
}

/// Typed form of [`find_path`].
pub fn shortest_path(map: MapView<'_>, start: Point, target: Point) -> PathOutcome {
    shortest_path_with_stats(map, start, target).0
}

/// [`shortest_path`], also reporting how much of the map each side explored.
pub fn shortest_path_with_stats(
    map: MapView<'_>,
    start: Point,
    target: Point,
) -> (PathOutcome, SearchStats) {
    if start == target {
        return (PathOutcome::SameCell, SearchStats::default());
    }
    let (Some(si), Some(ti)) = (map.idx(start), map.idx(target)) else {
        log::warn!(
            "endpoint outside {}x{} map: {start} -> {target}",
            map.width(),
            map.height()
        );
        return (PathOutcome::NoPath, SearchStats::default());
    };

    let adj = Adjacency::build(map);
    let mut bfs = BidirBfs::new(&adj, si, ti);
    let outcome = match bfs.run() {
        Some(meeting) => PathOutcome::Found(bfs.path_through(meeting)),
        None => PathOutcome::NoPath,
    };
    let stats = bfs.stats();

    log::debug!(
        "{start} -> {target}: length {}, depth {}, visited {}+{}",
        outcome.code(),
        stats.depth,
        stats.start_visited,
        stats.target_visited
    );
    (outcome, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::distance_map;
    use meetpath_core::WalkMap;
    use meetpath_gen::{CellularAutomataRule, FourDirectionWalker, MapGen};
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};
    use std::collections::HashSet;

    /// Run `find_path` on an owned map with a buffer large enough for any
    /// path on it.
    fn run(map: &WalkMap, start: Point, target: Point) -> (i32, Vec<i32>) {
        let mut out = vec![-1; map.flags().len()];
        let len = find_path(
            start,
            target,
            map.flags(),
            map.width() as i32,
            map.height() as i32,
            &mut out,
        );
        (len, out)
    }

    /// Check that `cells` is a valid path from `start` to `target`.
    fn assert_valid_path(map: &WalkMap, start: Point, target: Point, cells: &[i32]) {
        let view = map.view();
        let points: Vec<Point> = cells.iter().map(|&c| view.point(c as usize)).collect();
        let mut prev = start;
        let mut seen = HashSet::from([start]);
        for &p in &points {
            assert!(prev.is_adjacent_4(p), "{prev} -> {p} is not a step");
            assert!(map.is_open(p), "{p} is blocked");
            assert!(seen.insert(p), "{p} repeats");
            prev = p;
        }
        assert_eq!(points.last(), Some(&target));
    }

    /// Compare the engine against a plain BFS for one pair of endpoints.
    fn check_pair(map: &WalkMap, start: Point, target: Point) {
        let view = map.view();
        let (len, out) = run(map, start, target);
        if start == target {
            assert_eq!(len, 0);
            return;
        }
        let dist = distance_map(view, start)[view.idx(target).unwrap()];
        match dist {
            None => assert_eq!(len, -1, "{start} -> {target} should be unreachable"),
            Some(d) => {
                assert_eq!(len, d as i32, "{start} -> {target} not shortest");
                assert_valid_path(map, start, target, &out[..len as usize]);
            }
        }
        let (back, _) = run(map, target, start);
        assert_eq!(back, len, "asymmetric lengths for {start} <-> {target}");
    }

    fn random_open_point(map: &WalkMap, rng: &mut StdRng) -> Point {
        let w = map.width() as i32;
        let h = map.height() as i32;
        loop {
            let p = Point::new(rng.random_range(0..w), rng.random_range(0..h));
            if map.is_open(p) {
                return p;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Fixed scenarios
    // -----------------------------------------------------------------------

    #[test]
    fn open_3x3_corner_to_corner() {
        let map = WalkMap::filled(3, 3, true);
        let (len, out) = run(&map, Point::new(0, 0), Point::new(2, 2));
        assert_eq!(len, 4);
        assert_eq!(&out[..4], &[1, 2, 5, 8]);
        assert!(out[4..].iter().all(|&c| c == -1));
    }

    #[test]
    fn blocked_middle_row_isolates() {
        let map = WalkMap::from_flags(3, 3, vec![1, 1, 1, 0, 0, 0, 1, 1, 1]).unwrap();
        let (len, out) = run(&map, Point::new(0, 0), Point::new(2, 2));
        assert_eq!(len, -1);
        assert!(out.iter().all(|&c| c == -1));
    }

    #[test]
    fn short_buffer_is_untouched() {
        let map = WalkMap::filled(3, 3, true);
        let mut out = [42];
        let len = find_path(Point::new(0, 0), Point::new(2, 2), map.flags(), 3, 3, &mut out);
        assert_eq!(len, 4);
        assert_eq!(out, [42]);

        // Retrying with the reported length succeeds.
        let mut out = vec![0; len as usize];
        assert_eq!(
            find_path(Point::new(0, 0), Point::new(2, 2), map.flags(), 3, 3, &mut out),
            4
        );
        assert_eq!(out, vec![1, 2, 5, 8]);
    }

    #[test]
    fn exact_fit_buffer() {
        let map = WalkMap::filled(4, 1, true);
        let mut out = [0; 3];
        assert_eq!(find_path(Point::new(0, 0), Point::new(3, 0), map.flags(), 4, 1, &mut out), 3);
        assert_eq!(out, [1, 2, 3]);
    }

    #[test]
    fn same_cell_never_writes() {
        let map = WalkMap::from_ascii(".#\n..\n").unwrap();
        let mut out = [7; 4];
        for p in map.bounds() {
            assert_eq!(find_path(p, p, map.flags(), 2, 2, &mut out), 0);
        }
        assert_eq!(out, [7; 4]);
        // Short-circuits before looking at the map at all.
        assert_eq!(find_path(Point::new(9, 9), Point::new(9, 9), &[], -3, 0, &mut out), 0);
        assert_eq!(out, [7; 4]);
    }

    #[test]
    fn detour_around_wall() {
        let map = WalkMap::from_ascii(
            "
.....
.###.
.#...
.#.##
...#.
",
        )
        .unwrap();
        let start = Point::new(2, 3);
        let target = Point::new(4, 2);
        let (len, out) = run(&map, start, target);
        // (2,3) -> (2,2) -> (3,2) -> (4,2)
        assert_eq!(len, 3);
        assert_valid_path(&map, start, target, &out[..3]);

        // From (0,2) both ways round the wall take 8 moves.
        let (len, out) = run(&map, Point::new(0, 2), target);
        assert_eq!(len, 8);
        assert_valid_path(&map, Point::new(0, 2), target, &out[..8]);

        // The bottom-right pocket is sealed.
        assert_eq!(run(&map, Point::new(0, 0), Point::new(4, 4)).0, -1);
    }

    #[test]
    fn blocked_endpoints() {
        let map = WalkMap::from_ascii("..#\n").unwrap();
        assert_eq!(run(&map, Point::new(0, 0), Point::new(2, 0)).0, -1);
        assert_eq!(run(&map, Point::new(2, 0), Point::new(0, 0)).0, -1);
    }

    #[test]
    fn malformed_input_is_no_path() {
        let map = WalkMap::filled(3, 3, true);
        let mut out = [5; 8];
        let a = Point::new(0, 0);
        let b = Point::new(2, 2);
        assert_eq!(find_path(a, b, map.flags(), -3, 3, &mut out), -1);
        assert_eq!(find_path(a, b, &map.flags()[..8], 3, 3, &mut out), -1);
        assert_eq!(find_path(a, Point::new(3, 0), map.flags(), 3, 3, &mut out), -1);
        assert_eq!(find_path(Point::new(-1, 0), b, map.flags(), 3, 3, &mut out), -1);
        assert_eq!(out, [5; 8]);
    }

    #[test]
    fn typed_api_matches_flat() {
        let map = WalkMap::filled(3, 3, true);
        let (outcome, stats) =
            shortest_path_with_stats(map.view(), Point::new(0, 0), Point::new(2, 2));
        let path = outcome.path().unwrap();
        assert_eq!(path.cells(), &[1, 2, 5, 8]);
        assert_eq!(path.points(3).last(), Some(&Point::new(2, 2)));
        assert_eq!(stats.depth, 3);
        assert!(stats.visited() <= 2 * 9);

        assert_eq!(
            shortest_path(map.view(), Point::new(1, 1), Point::new(1, 1)),
            PathOutcome::SameCell
        );
        assert_eq!(
            shortest_path(map.view(), Point::new(1, 1), Point::new(7, 1)),
            PathOutcome::NoPath
        );
    }

    // -----------------------------------------------------------------------
    // Many equal-length shortest paths: the meeting must never be one level
    // too deep, whichever order the target frontier is walked in.
    // -----------------------------------------------------------------------

    #[test]
    fn open_rooms_all_pairs() {
        for (w, h) in [(1, 6), (2, 2), (3, 3), (4, 5), (6, 3), (7, 7)] {
            let map = WalkMap::filled(w, h, true);
            for a in map.bounds() {
                for b in map.bounds() {
                    let (len, out) = run(&map, a, b);
                    let manhattan = (a.x - b.x).abs() + (a.y - b.y).abs();
                    assert_eq!(len, manhattan, "{a} -> {b} in {w}x{h}");
                    if len > 0 {
                        assert_valid_path(&map, a, b, &out[..len as usize]);
                    }
                }
            }
        }
    }

    #[test]
    fn ladder_all_pairs() {
        // Two corridors joined by rungs: lots of equal-length alternatives.
        let map = WalkMap::from_ascii(
            "
.........
.#.#.#.#.
.........
#.#.#.#.#
.........
",
        )
        .unwrap();
        let open: Vec<Point> = map.bounds().iter().filter(|&p| map.is_open(p)).collect();
        for &a in &open {
            for &b in &open {
                check_pair(&map, a, b);
            }
        }
    }

    #[test]
    fn random_noise_maps() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for round in 0..40 {
            let w = rng.random_range(1..14);
            let h = rng.random_range(1..14);
            let mut mg = MapGen::new(w, h, StdRng::seed_from_u64(round));
            if mg.noise(0.65) == 0 {
                continue;
            }
            let map = mg.into_map();
            for _ in 0..12 {
                let a = random_open_point(&map, &mut rng);
                let b = random_open_point(&map, &mut rng);
                check_pair(&map, a, b);
            }
        }
    }

    #[test]
    fn random_caves() {
        let mut rng = StdRng::seed_from_u64(42);
        for round in 0..8 {
            let mut mg = MapGen::new(40, 20, StdRng::seed_from_u64(round));
            let open = if round % 2 == 0 {
                mg.random_walk_cave(&FourDirectionWalker, 0.45, 20)
            } else {
                mg.cellular_automata_cave(0.45, &[CellularAutomataRule::default()])
            };
            if open == 0 {
                continue;
            }
            let map = mg.into_map();
            for _ in 0..20 {
                let a = random_open_point(&map, &mut rng);
                let b = random_open_point(&map, &mut rng);
                check_pair(&map, a, b);
            }
        }
    }
}
