//! Tile grid geometry

pub mod grid;

pub use grid::{Direction, GridPosition, Rect, TileRect};
