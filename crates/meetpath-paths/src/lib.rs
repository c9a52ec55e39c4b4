//! Shortest paths on binary grid maps with bidirectional breadth-first
//! search.
//!
//! A query runs in two phases:
//!
//! 1. [`Adjacency::build`] turns the map into a table of up to four
//!    traversable neighbours per cell (right, up, left, down).
//! 2. [`BidirBfs`] grows one search from the start and one from the target,
//!    level by level, until they meet, then stitches the path together from
//!    both sets of parent links.
//!
//! Every query owns its table and search state; nothing is cached between
//! calls.
//!
//! # Entry points
//!
//! | Function | Returns |
//! |---|---|
//! | [`find_path`] | `i32` length / `0` / `-1`, path written into a caller buffer |
//! | [`shortest_path`] | [`PathOutcome`] |
//! | [`shortest_path_with_stats`] | [`PathOutcome`] and [`SearchStats`] |
//! | [`distance_map`] | single-source BFS distances |

mod adjacency;
mod bfs;
mod bidir;
mod find;
mod outcome;
mod search;

pub use adjacency::{Adjacency, Direction};
pub use bfs::distance_map;
pub use bidir::BidirBfs;
pub use find::{find_path, shortest_path, shortest_path_with_stats};
pub use outcome::{CellPath, NO_PATH, PathOutcome, SearchStats};
pub use search::SearchSide;
