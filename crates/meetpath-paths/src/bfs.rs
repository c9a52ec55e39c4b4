use std::collections::VecDeque;

use meetpath_core::{MapView, Point};

use crate::adjacency::Adjacency;

/// Compute a single-source breadth-first distance map.
///
/// Each step has cost 1. Entry `i` holds the distance from `origin` to cell
/// `i`, or `None` if it is unreachable. An `origin` outside the map yields
/// an all-`None` map; a blocked `origin` reaches only itself.
pub fn distance_map(map: MapView<'_>, origin: Point) -> Vec<Option<u32>> {
    let mut dist = vec![None; map.len()];
    let Some(oi) = map.idx(origin) else {
        return dist;
    };
    let adj = Adjacency::build(map);

    let mut queue: VecDeque<usize> = VecDeque::new();
    dist[oi] = Some(0);
    queue.push_back(oi);

    while let Some(ci) = queue.pop_front() {
        let nd = dist[ci].map_or(0, |d| d + 1);
        for ni in adj.neighbors(ci) {
            if dist[ni].is_some() {
                continue;
            }
            dist[ni] = Some(nd);
            queue.push_back(ni);
        }
    }

    dist
}

#[cfg(test)]
mod tests {
    use super::*;
    use meetpath_core::WalkMap;

    #[test]
    fn open_grid_is_manhattan() {
        let map = WalkMap::filled(4, 3, true);
        let view = map.view();
        let dist = distance_map(view, Point::new(1, 1));
        for p in view.bounds() {
            let expected = ((p.x - 1).abs() + (p.y - 1).abs()) as u32;
            assert_eq!(dist[view.idx(p).unwrap()], Some(expected));
        }
    }

    #[test]
    fn walls_force_detours() {
        let map = WalkMap::from_ascii(
            "
...
##.
...
",
        )
        .unwrap();
        let view = map.view();
        let dist = distance_map(view, Point::new(0, 0));
        assert_eq!(dist[view.idx(Point::new(0, 2)).unwrap()], Some(6));
        assert_eq!(dist[view.idx(Point::new(0, 1)).unwrap()], None);
    }

    #[test]
    fn unreachable_and_out_of_range_origins() {
        let map = WalkMap::from_ascii(".#.\n").unwrap();
        let dist = distance_map(map.view(), Point::new(0, 0));
        assert_eq!(dist, vec![Some(0), None, None]);

        let blocked = distance_map(map.view(), Point::new(1, 0));
        assert_eq!(blocked, vec![None, Some(0), None]);

        let outside = distance_map(map.view(), Point::new(9, 9));
        assert!(outside.iter().all(Option::is_none));
    }
}
