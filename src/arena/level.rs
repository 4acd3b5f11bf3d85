//! In-memory level: a flat object list behind `LevelView`

use ahash::{AHashMap, AHashSet};

use crate::core::error::{Result, TacticsError};
use crate::core::types::{Faction, ObjectId};
use crate::spatial::grid::{GridPosition, Rect, TileRect};
use crate::tactics::level::{LevelObject, LevelView, ObjectKind, Terrain};

/// Level of fixed size holding every object ever placed
///
/// Removed objects stay in the list flagged `removed`, so ids keep resolving
/// for liveness checks. Queries walk only the live slots.
#[derive(Debug, Clone)]
pub struct Arena {
    width: i32,
    height: i32,
    objects: Vec<LevelObject>,
    index: AHashMap<ObjectId, usize>,
    /// Slots of objects still in play, ascending
    live_slots: Vec<usize>,
    next_id: u32,
    assigned_players: Vec<ObjectId>,
    objective: Option<ObjectId>,
    period_index: usize,
}

impl Arena {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
            objects: Vec::new(),
            index: AHashMap::new(),
            live_slots: Vec::new(),
            next_id: 1,
            assigned_players: Vec::new(),
            objective: None,
            period_index: 0,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn insert(&mut self, kind: ObjectKind, bounds: Rect) -> ObjectId {
        let id = ObjectId::new(self.next_id);
        self.next_id += 1;
        let slot = self.objects.len();
        self.index.insert(id, slot);
        self.live_slots.push(slot);
        self.objects.push(LevelObject::new(id, kind, bounds));
        id
    }

    /// One tile of terrain
    pub fn add_terrain(&mut self, tile: GridPosition, terrain: Terrain) -> ObjectId {
        self.insert(ObjectKind::Terrain(terrain), Rect::tile(tile))
    }

    /// Terrain over every tile of a rectangle
    pub fn fill_terrain(&mut self, region: TileRect, terrain: Terrain) -> Vec<ObjectId> {
        region.tiles().map(|tile| self.add_terrain(tile, terrain)).collect::<Vec<_>>()
    }

    pub fn add_tank(&mut self, faction: Faction, bounds: Rect) -> ObjectId {
        self.insert(ObjectKind::Tank { faction }, bounds)
    }

    pub fn add_projectile(&mut self, faction: Faction, armor_piercing: bool, bounds: Rect) -> ObjectId {
        self.insert(ObjectKind::Projectile { faction, armor_piercing }, bounds)
    }

    pub fn add_bonus(&mut self, tile: GridPosition) -> ObjectId {
        self.insert(ObjectKind::Bonus, Rect::tile(tile))
    }

    /// Place the protected structure, replacing any previous one
    pub fn set_objective(&mut self, faction: Faction, tile: GridPosition) -> ObjectId {
        if let Some(previous) = self.objective.take() {
            self.mark_removed(previous);
        }
        let id = self.insert(ObjectKind::Objective { faction }, Rect::tile(tile));
        self.objective = Some(id);
        id
    }

    /// Make `player` the hunt target for bots assigned `index`
    pub fn assign_player(&mut self, index: usize, player: ObjectId) -> Result<()> {
        if !self.index.contains_key(&player) {
            return Err(TacticsError::ObjectNotFound(player));
        }
        if self.assigned_players.len() <= index {
            self.assigned_players.resize(index + 1, player);
        }
        self.assigned_players[index] = player;
        Ok(())
    }

    /// Number of assigned player slots
    pub fn assigned_player_count(&self) -> usize {
        self.assigned_players.len()
    }

    /// Flag an object as out of play
    pub fn remove(&mut self, id: ObjectId) -> Result<()> {
        if self.mark_removed(id) {
            Ok(())
        } else {
            Err(TacticsError::ObjectNotFound(id))
        }
    }

    fn mark_removed(&mut self, id: ObjectId) -> bool {
        let Some(&slot) = self.index.get(&id) else {
            return false;
        };
        if let Some(object) = self.objects.get_mut(slot) {
            object.removed = true;
        }
        if let Ok(pos) = self.live_slots.binary_search(&slot) {
            self.live_slots.remove(pos);
        }
        true
    }

    /// Number of objects still in play
    pub fn live_count(&self) -> usize {
        self.live().count()
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut LevelObject> {
        let slot = *self.index.get(&id)?;
        self.objects.get_mut(slot)
    }

    /// Every object, removed ones included, in placement order
    pub fn objects(&self) -> &[LevelObject] {
        &self.objects
    }

    pub fn set_period_index(&mut self, index: usize) {
        self.period_index = index;
    }

    pub fn advance_period(&mut self) {
        self.period_index = self.period_index.wrapping_add(1);
        tracing::debug!(period = self.period_index, "period advanced");
    }

    fn live(&self) -> impl Iterator<Item = &LevelObject> {
        self.live_slots
            .iter()
            .filter_map(|&slot| self.objects.get(slot))
            .filter(|o| o.is_live())
    }
}

impl LevelView for Arena {
    fn tile_bounds(&self) -> TileRect {
        TileRect::new(0, 0, self.width, self.height)
    }

    fn objects_overlapping(&self, region: TileRect) -> Vec<&LevelObject> {
        self.live()
            .filter(|o| o.bounds.covered_tiles().intersects(&region))
            .collect()
    }

    fn obstructed_tiles(&self) -> Vec<GridPosition> {
        let mut tiles: AHashSet<GridPosition> = AHashSet::new();
        for object in self.live() {
            if let ObjectKind::Terrain(terrain) = object.kind {
                if terrain.obstructs_movement() {
                    tiles.extend(object.bounds.covered_tiles().tiles());
                }
            }
        }
        let mut tiles: Vec<GridPosition> = tiles.into_iter().collect();
        tiles.sort();
        tiles
    }

    fn is_obstructed(&self, tile: GridPosition) -> bool {
        let region = TileRect::new(tile.x, tile.y, 1, 1);
        self.live().any(|o| match o.kind {
            ObjectKind::Terrain(terrain) => {
                terrain.obstructs_movement() && o.bounds.covered_tiles().intersects(&region)
            }
            _ => false,
        })
    }

    fn live_bonuses(&self) -> Vec<&LevelObject> {
        self.live().filter(|o| matches!(o.kind, ObjectKind::Bonus)).collect()
    }

    fn live_tanks(&self, faction: Faction) -> Vec<&LevelObject> {
        self.live()
            .filter(|o| matches!(o.kind, ObjectKind::Tank { faction: f } if f == faction))
            .collect()
    }

    fn assigned_player_target(&self, index: usize) -> Option<&LevelObject> {
        if self.assigned_players.is_empty() {
            return None;
        }
        let id = self.assigned_players[index % self.assigned_players.len()];
        self.object(id).filter(|o| o.is_live())
    }

    fn objective_structure(&self) -> Option<&LevelObject> {
        self.objective.and_then(|id| self.object(id)).filter(|o| o.is_live())
    }

    fn object(&self, id: ObjectId) -> Option<&LevelObject> {
        self.index.get(&id).and_then(|&slot| self.objects.get(slot))
    }

    fn period_index(&self) -> usize {
        self.period_index
    }
}
