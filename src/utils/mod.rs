//! # Utilities Module
//!
//! Utility types for grids, pathfinding and serialization helpers.

pub mod grid;
pub mod path;
pub mod serde_pairs;

pub use grid::*;
pub use path::*;
