//! Tile grid geometry: positions, rectangles and cardinal directions
//!
//! Coordinates are in tile units with `y` growing downward, so `Up` is `-y`.

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;

/// Slack used when converting continuous rectangles to covered tiles
const TILE_EPSILON: f32 = 1e-4;

/// Integer tile coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance, admissible for 4-connected unit-cost movement
    pub fn manhattan_distance(&self, other: &Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Neighbor one tile away in the given direction
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// The 4 cardinal neighbors in `Direction::ALL` order
    pub fn neighbors(&self) -> [GridPosition; 4] {
        Direction::ALL.map(|d| self.step(d))
    }

    /// Direction of an adjacent tile, if `other` is exactly one step away
    pub fn direction_to(&self, other: &Self) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| self.step(*d) == *other)
    }
}

/// Axis-aligned rectangle of whole tiles (`x..x+w`, `y..y+h`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl TileRect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn contains(&self, position: GridPosition) -> bool {
        position.x >= self.x
            && position.y >= self.y
            && position.x < self.right()
            && position.y < self.bottom()
    }

    pub fn intersects(&self, other: &TileRect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Shift by whole tiles
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// The one-tile-wide strip touching this rectangle on the given side
    pub fn adjacent_strip(&self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::new(self.x, self.y - 1, self.w, 1),
            Direction::Down => Self::new(self.x, self.bottom(), self.w, 1),
            Direction::Left => Self::new(self.x - 1, self.y, 1, self.h),
            Direction::Right => Self::new(self.right(), self.y, 1, self.h),
        }
    }

    /// All tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = GridPosition> + '_ {
        (self.y..self.bottom()).flat_map(move |y| (self.x..self.right()).map(move |x| GridPosition::new(x, y)))
    }
}

/// Continuous rectangle in tile units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// A rectangle covering exactly one tile
    pub fn tile(position: GridPosition) -> Self {
        Self::new(position.x as f32, position.y as f32, 1.0, 1.0)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Tile containing the center point
    pub fn center_tile(&self) -> GridPosition {
        let c = self.center();
        GridPosition::new(c.x.floor() as i32, c.y.floor() as i32)
    }

    /// Smallest tile rectangle covering this rectangle
    pub fn covered_tiles(&self) -> TileRect {
        let x0 = (self.x + TILE_EPSILON).floor() as i32;
        let y0 = (self.y + TILE_EPSILON).floor() as i32;
        let x1 = (self.x + self.w - TILE_EPSILON).ceil() as i32;
        let y1 = (self.y + self.h - TILE_EPSILON).ceil() as i32;
        TileRect::new(x0, y0, (x1 - x0).max(1), (y1 - y0).max(1))
    }

    /// Extent along the horizontal axis
    pub fn span_x(&self) -> (f32, f32) {
        (self.x, self.x + self.w)
    }

    /// Extent along the vertical axis
    pub fn span_y(&self) -> (f32, f32) {
        (self.y, self.y + self.h)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    /// Is the top-left corner on whole tile coordinates (within `epsilon`)?
    pub fn is_tile_aligned(&self, epsilon: f32) -> bool {
        (self.x - self.x.round()).abs() <= epsilon && (self.y - self.y.round()).abs() <= epsilon
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }
}

/// Cardinal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Fixed enumeration order used wherever directions are scanned in turn
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// Unit tile offset
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    pub fn clockwise(&self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    pub fn counter_clockwise(&self) -> Self {
        self.clockwise().opposite()
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Would turning from `self` to `other` be a 90 degree turn?
    pub fn is_perpendicular(&self, other: Direction) -> bool {
        self.is_vertical() != other.is_vertical()
    }

    /// Index into `Direction::ALL`
    pub fn index(&self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    /// Inverse of `index`, wrapping
    pub fn from_index(index: usize) -> Self {
        Direction::ALL[index % 4]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let a = GridPosition::new(1, 2);
        let b = GridPosition::new(4, -2);
        assert_eq!(a.manhattan_distance(&b), 7);
        assert_eq!(a.manhattan_distance(&a), 0);
    }

    #[test]
    fn test_neighbors_follow_direction_order() {
        let n = GridPosition::new(5, 5).neighbors();
        assert_eq!(n[0], GridPosition::new(5, 4));
        assert_eq!(n[1], GridPosition::new(6, 5));
        assert_eq!(n[2], GridPosition::new(5, 6));
        assert_eq!(n[3], GridPosition::new(4, 5));
    }

    #[test]
    fn test_direction_to() {
        let a = GridPosition::new(0, 0);
        assert_eq!(a.direction_to(&GridPosition::new(0, 1)), Some(Direction::Down));
        assert_eq!(a.direction_to(&GridPosition::new(-1, 0)), Some(Direction::Left));
        assert_eq!(a.direction_to(&GridPosition::new(1, 1)), None);
    }

    #[test]
    fn test_adjacent_strip() {
        let footprint = TileRect::new(4, 4, 2, 2);
        assert_eq!(footprint.adjacent_strip(Direction::Up), TileRect::new(4, 3, 2, 1));
        assert_eq!(footprint.adjacent_strip(Direction::Down), TileRect::new(4, 6, 2, 1));
        assert_eq!(footprint.adjacent_strip(Direction::Left), TileRect::new(3, 4, 1, 2));
        assert_eq!(footprint.adjacent_strip(Direction::Right), TileRect::new(6, 4, 1, 2));
    }

    #[test]
    fn test_covered_tiles_aligned_and_straddling() {
        assert_eq!(Rect::new(2.0, 3.0, 1.0, 1.0).covered_tiles(), TileRect::new(2, 3, 1, 1));
        assert_eq!(Rect::new(2.5, 3.0, 1.0, 1.0).covered_tiles(), TileRect::new(2, 3, 2, 1));
    }

    #[test]
    fn test_tile_rect_intersects() {
        let a = TileRect::new(0, 0, 3, 3);
        assert!(a.intersects(&TileRect::new(2, 2, 1, 1)));
        assert!(!a.intersects(&TileRect::new(3, 0, 1, 1)));
        assert_eq!(a.tiles().count(), 9);
    }

    #[test]
    fn test_direction_rotation() {
        assert_eq!(Direction::Up.clockwise(), Direction::Right);
        assert_eq!(Direction::Up.counter_clockwise(), Direction::Left);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert!(Direction::Up.is_perpendicular(Direction::Left));
        assert!(!Direction::Up.is_perpendicular(Direction::Down));
        for d in Direction::ALL {
            assert_eq!(Direction::from_index(d.index()), d);
        }
    }

    #[test]
    fn test_tile_alignment() {
        assert!(Rect::new(3.0, 7.0, 1.0, 1.0).is_tile_aligned(0.01));
        assert!(!Rect::new(3.4, 7.0, 1.0, 1.0).is_tile_aligned(0.01));
    }
}
