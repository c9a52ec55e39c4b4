//! **meetpath-core**: core types for grid pathfinding.
//!
//! This crate provides the foundational types used across the *meetpath*
//! workspace: geometry primitives and binary traversability maps, both as
//! borrowed views over caller-owned flag arrays and as owned maps that can
//! be parsed from and rendered to ASCII.

pub mod geom;
pub mod map;

pub use geom::{Point, Range, RangeIter};
pub use map::{BLOCKED, MapError, MapView, OPEN, WalkMap};
