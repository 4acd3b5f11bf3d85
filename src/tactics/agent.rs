//! Agent record handed to a decision policy each think-tick

use serde::{Deserialize, Serialize};

use crate::core::types::{Faction, ObjectId, Vec2};
use crate::spatial::grid::{Direction, GridPosition, Rect, TileRect};
use crate::tactics::level::{LevelObject, LevelView, ObjectKind};

/// Snapshot of the tank a policy is deciding for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: ObjectId,
    pub faction: Faction,
    pub bounds: Rect,
    pub facing: Direction,
    /// Shells clear concrete
    pub armor_piercing: bool,
    /// False while immobilized (the gun still works)
    pub can_move: bool,
    /// Which player a classic bot hunts
    pub assigned_player: usize,
}

impl Agent {
    pub fn new(id: ObjectId, faction: Faction, bounds: Rect, facing: Direction) -> Self {
        Self {
            id,
            faction,
            bounds,
            facing,
            armor_piercing: false,
            can_move: true,
            assigned_player: 0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    /// Tile the agent is considered to stand on for pathfinding
    pub fn tile(&self) -> GridPosition {
        self.bounds.center_tile()
    }

    pub fn footprint(&self) -> TileRect {
        self.bounds.covered_tiles()
    }

    pub fn is_centered(&self, epsilon: f32) -> bool {
        self.bounds.is_tile_aligned(epsilon)
    }

    pub fn distance_to(&self, object: &LevelObject) -> f32 {
        self.center().distance(&object.bounds.center())
    }

    pub fn is_hostile(&self, object: &LevelObject) -> bool {
        object.faction().is_some_and(|f| f != self.faction)
    }

    /// Is the strip directly ahead impassable (edge, obstacle or another tank)?
    pub fn is_blocked_ahead(&self, heading: Direction, level: &dyn LevelView) -> bool {
        let strip = self.footprint().adjacent_strip(heading);
        let bounds = level.tile_bounds();
        if strip.tiles().any(|tile| !bounds.contains(tile) || level.is_obstructed(tile)) {
            return true;
        }
        level
            .objects_overlapping(strip)
            .iter()
            .any(|o| o.id != self.id && matches!(o.kind, ObjectKind::Tank { .. }))
    }
}
