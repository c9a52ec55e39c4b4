//! Map generators for *meetpath*: random-walk caves, cellular-automata caves
//! and uniform noise, all producing [`WalkMap`](meetpath_core::WalkMap)s.

pub mod mapgen;

pub use mapgen::{CellularAutomataRule, FourDirectionWalker, MapGen, RandomWalker};
