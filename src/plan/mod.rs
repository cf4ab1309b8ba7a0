//! Tile planning.

/// Tile grid and view measurement.
pub mod geometry;
