//! Level collaborator interface
//!
//! The decision engine only reads the world through `LevelView`. It never
//! mutates objects; it returns orders for the game loop to apply.

use serde::{Deserialize, Serialize};

use crate::core::types::{Faction, ObjectId};
use crate::spatial::grid::{GridPosition, Rect, TileRect};

/// Map terrain types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    /// Breakable by any shell
    Brick,
    /// Breakable only by armor-piercing shells
    Concrete,
    Water,
    Ice,
    Forest,
}

impl Terrain {
    /// Does this terrain stop shells at all?
    pub fn stops_shells(&self) -> bool {
        matches!(self, Terrain::Brick | Terrain::Concrete)
    }

    /// Can a shell of this kind clear it?
    pub fn destructible_by(&self, armor_piercing: bool) -> bool {
        match self {
            Terrain::Brick => true,
            Terrain::Concrete => armor_piercing,
            _ => false,
        }
    }

    /// Does this terrain block tank movement?
    pub fn obstructs_movement(&self) -> bool {
        matches!(self, Terrain::Brick | Terrain::Concrete | Terrain::Water)
    }
}

/// What a level object is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Terrain(Terrain),
    Tank { faction: Faction },
    Projectile { faction: Faction, armor_piercing: bool },
    Bonus,
    /// The protected structure; its faction defends it
    Objective { faction: Faction },
}

/// Anything placed on the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub bounds: Rect,
    /// Marked by the level when the object leaves play
    pub removed: bool,
}

impl LevelObject {
    pub fn new(id: ObjectId, kind: ObjectKind, bounds: Rect) -> Self {
        Self {
            id,
            kind,
            bounds,
            removed: false,
        }
    }

    pub fn is_live(&self) -> bool {
        !self.removed
    }

    pub fn faction(&self) -> Option<Faction> {
        match self.kind {
            ObjectKind::Tank { faction }
            | ObjectKind::Projectile { faction, .. }
            | ObjectKind::Objective { faction } => Some(faction),
            _ => None,
        }
    }

    /// Tile used as a pathfinding endpoint
    pub fn tile(&self) -> GridPosition {
        self.bounds.center_tile()
    }
}

/// Read-only queries the decision engine needs from the level
pub trait LevelView {
    /// Map extent in tiles
    fn tile_bounds(&self) -> TileRect;

    /// Live objects whose footprint overlaps the region, in level order
    fn objects_overlapping(&self, region: TileRect) -> Vec<&LevelObject>;

    /// Tiles tanks cannot traverse
    fn obstructed_tiles(&self) -> Vec<GridPosition>;

    fn is_obstructed(&self, tile: GridPosition) -> bool;

    fn live_bonuses(&self) -> Vec<&LevelObject>;

    /// Live tanks of one faction
    fn live_tanks(&self, faction: Faction) -> Vec<&LevelObject>;

    /// Player tank a bot with this assignment index should hunt
    fn assigned_player_target(&self, index: usize) -> Option<&LevelObject>;

    fn objective_structure(&self) -> Option<&LevelObject>;

    /// Lookup by id, including removed objects
    fn object(&self, id: ObjectId) -> Option<&LevelObject>;

    /// Externally rotated index driving classic bot behavior
    fn period_index(&self) -> usize;
}
