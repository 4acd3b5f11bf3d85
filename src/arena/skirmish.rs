//! Fixed-timestep skirmish driving tanks with decision policies
//!
//! Each tick every live tank thinks (in spawn order) and its order is applied
//! immediately, then shells fly. The loop is deterministic for a seed.

use serde::{Deserialize, Serialize};

use crate::arena::level::Arena;
use crate::core::config::TacticsConfig;
use crate::core::error::{Result, TacticsError};
use crate::core::types::{Faction, ObjectId, Tick};
use crate::spatial::grid::{Direction, GridPosition, Rect, TileRect};
use crate::tactics::agent::Agent;
use crate::tactics::alignment::bounds_after_turn;
use crate::tactics::level::{LevelView, ObjectKind, Terrain};
use crate::tactics::order::Order;
use crate::tactics::policy::{build_policy, DecisionPolicy, PolicyKind};
use crate::tactics::random::SeededRandom;

/// Movement and timing constants for the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkirmishSettings {
    /// Tank travel per tick (tile units); a power of two keeps tiles reachable exactly
    pub tank_speed: f32,
    /// Shell travel per tick (tile units), at most one tile
    pub shell_speed: f32,
    /// Ticks between classic period advances
    pub period_ticks: Tick,
}

impl Default for SkirmishSettings {
    fn default() -> Self {
        Self {
            tank_speed: 0.125,
            shell_speed: 0.25,
            period_ticks: 512,
        }
    }
}

impl SkirmishSettings {
    pub fn validate(&self) -> Result<()> {
        if !(self.tank_speed > 0.0 && self.tank_speed <= 1.0) {
            return Err(TacticsError::InvalidConfig("tank_speed must be in (0, 1]".into()));
        }
        if !(self.shell_speed > 0.0 && self.shell_speed <= 1.0) {
            return Err(TacticsError::InvalidConfig("shell_speed must be in (0, 1]".into()));
        }
        if self.period_ticks == 0 {
            return Err(TacticsError::InvalidConfig("period_ticks must be positive".into()));
        }
        Ok(())
    }
}

/// Log entry for skirmish events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkirmishEvent {
    pub tick: Tick,
    pub event_type: SkirmishEventType,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SkirmishEventType {
    TankDestroyed { tank: ObjectId, by: ObjectId },
    TerrainDestroyed { terrain: ObjectId },
    ObjectiveDestroyed { by: ObjectId },
    BonusCollected { tank: ObjectId, bonus: ObjectId },
    PeriodAdvanced { index: usize },
}

/// A tank paired with the policy steering it
pub struct Combatant {
    pub agent: Agent,
    pub policy: Box<dyn DecisionPolicy>,
    shell: Option<ObjectId>,
    shots_fired: u32,
    kills: u32,
    bonuses_collected: u32,
}

struct Shell {
    id: ObjectId,
    owner: ObjectId,
    faction: Faction,
    direction: Direction,
    armor_piercing: bool,
}

/// Per-tank summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankReport {
    pub id: ObjectId,
    pub faction: Faction,
    pub policy: PolicyKind,
    pub alive: bool,
    pub shots_fired: u32,
    pub kills: u32,
    pub bonuses_collected: u32,
    pub final_tile: GridPosition,
    pub last_path_len: usize,
}

/// Outcome of a skirmish run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkirmishReport {
    pub seed: u64,
    pub ticks: Tick,
    pub winner: Option<Faction>,
    pub objective_destroyed: bool,
    pub terrain_destroyed: u32,
    pub tanks: Vec<TankReport>,
    pub events: Vec<SkirmishEvent>,
}

pub struct Skirmish {
    arena: Arena,
    config: TacticsConfig,
    settings: SkirmishSettings,
    rng: SeededRandom,
    seed: u64,
    tick: Tick,
    combatants: Vec<Combatant>,
    shells: Vec<Shell>,
    events: Vec<SkirmishEvent>,
    /// Faction whose objective fell
    objective_lost: Option<Faction>,
    terrain_destroyed: u32,
}

impl Skirmish {
    pub fn new(arena: Arena, config: TacticsConfig, settings: SkirmishSettings, seed: u64) -> Result<Self> {
        config.validate()?;
        settings.validate()?;
        Ok(Self {
            arena,
            config,
            settings,
            rng: SeededRandom::new(seed),
            seed,
            tick: 0,
            combatants: Vec::new(),
            shells: Vec::new(),
            events: Vec::new(),
            objective_lost: None,
            terrain_destroyed: 0,
        })
    }

    /// Standard 13x13 map: brick columns, a walled player objective at the
    /// bottom, two player tanks and three bots
    pub fn standard(
        config: TacticsConfig,
        settings: SkirmishSettings,
        seed: u64,
        player_policy: PolicyKind,
        bot_policy: PolicyKind,
    ) -> Result<Self> {
        let mut arena = Arena::new(13, 13);
        for x in [2, 4, 8, 10] {
            arena.fill_terrain(TileRect::new(x, 2, 1, 4), Terrain::Brick);
            arena.fill_terrain(TileRect::new(x, 7, 1, 3), Terrain::Brick);
        }
        arena.add_terrain(GridPosition::new(6, 6), Terrain::Concrete);
        arena.add_terrain(GridPosition::new(0, 6), Terrain::Water);
        arena.add_terrain(GridPosition::new(12, 6), Terrain::Water);
        arena.fill_terrain(TileRect::new(6, 3, 1, 2), Terrain::Forest);
        arena.add_terrain(GridPosition::new(6, 9), Terrain::Ice);
        for tile in [(5, 11), (6, 11), (7, 11), (5, 12), (7, 12)] {
            arena.add_terrain(GridPosition::new(tile.0, tile.1), Terrain::Brick);
        }
        arena.set_objective(Faction::Players, GridPosition::new(6, 12));
        arena.add_bonus(GridPosition::new(3, 6));
        arena.add_bonus(GridPosition::new(9, 6));

        let mut skirmish = Self::new(arena, config, settings, seed)?;
        skirmish.spawn_tank(Faction::Players, GridPosition::new(4, 12), Direction::Up, player_policy)?;
        skirmish.spawn_tank(Faction::Players, GridPosition::new(8, 12), Direction::Up, player_policy)?;
        for x in [0, 6, 12] {
            skirmish.spawn_tank(Faction::Bots, GridPosition::new(x, 0), Direction::Down, bot_policy)?;
        }
        Ok(skirmish)
    }

    /// Place a one-tile tank and attach a freshly built policy
    ///
    /// Player tanks take the next assignment slot; bots are assigned to the
    /// players round-robin.
    pub fn spawn_tank(
        &mut self,
        faction: Faction,
        tile: GridPosition,
        facing: Direction,
        kind: PolicyKind,
    ) -> Result<ObjectId> {
        let bounds = Rect::tile(tile);
        let id = self.arena.add_tank(faction, bounds);
        let mut agent = Agent::new(id, faction, bounds, facing);

        match faction {
            Faction::Players => {
                let slot = self.arena.assigned_player_count();
                self.arena.assign_player(slot, id)?;
            }
            Faction::Bots => {
                let bots = self.combatants.iter().filter(|c| c.agent.faction == Faction::Bots).count();
                agent.assigned_player = bots;
            }
        }

        let policy = build_policy(kind, &self.config, &mut self.rng)?;
        tracing::debug!(?id, ?faction, policy = %kind, ?tile, "tank spawned");
        self.combatants.push(Combatant {
            agent,
            policy,
            shell: None,
            shots_fired: 0,
            kills: 0,
            bonuses_collected: 0,
        });
        Ok(id)
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn events(&self) -> &[SkirmishEvent] {
        &self.events
    }

    fn is_live(&self, id: ObjectId) -> bool {
        self.arena.object(id).is_some_and(|o| o.is_live())
    }

    fn log_event(&mut self, event_type: SkirmishEventType, description: String) {
        tracing::debug!(tick = self.tick, %description, "skirmish event");
        self.events.push(SkirmishEvent {
            tick: self.tick,
            event_type,
            description,
        });
    }

    /// Winning faction, once decided
    pub fn outcome(&self) -> Option<Faction> {
        if let Some(loser) = self.objective_lost {
            return Some(loser.opponent());
        }
        let players = self.arena.live_tanks(Faction::Players).len();
        let bots = self.arena.live_tanks(Faction::Bots).len();
        match (players, bots) {
            (0, _) => Some(Faction::Bots),
            (_, 0) => Some(Faction::Players),
            _ => None,
        }
    }

    /// Advance one tick
    pub fn step(&mut self) {
        for i in 0..self.combatants.len() {
            if !self.is_live(self.combatants[i].agent.id) {
                continue;
            }
            let combatant = &mut self.combatants[i];
            let order = combatant.policy.think(&combatant.agent, &self.arena, &mut self.rng);
            self.apply_order(i, order);
        }

        self.advance_shells();

        self.tick += 1;
        if self.tick % self.settings.period_ticks == 0 {
            self.arena.advance_period();
            let index = self.arena.period_index();
            self.log_event(SkirmishEventType::PeriodAdvanced { index }, format!("period {index}"));
        }
    }

    /// Run until a faction wins or `max_ticks` elapse
    pub fn run(&mut self, max_ticks: Tick) -> SkirmishReport {
        while self.tick < max_ticks && self.outcome().is_none() {
            self.step();
        }
        tracing::info!(ticks = self.tick, winner = ?self.outcome(), "skirmish finished");
        self.report()
    }

    pub fn report(&self) -> SkirmishReport {
        let tanks = self
            .combatants
            .iter()
            .map(|c| TankReport {
                id: c.agent.id,
                faction: c.agent.faction,
                policy: c.policy.kind(),
                alive: self.is_live(c.agent.id),
                shots_fired: c.shots_fired,
                kills: c.kills,
                bonuses_collected: c.bonuses_collected,
                final_tile: c.agent.tile(),
                last_path_len: c.policy.last_path().len(),
            })
            .collect();

        SkirmishReport {
            seed: self.seed,
            ticks: self.tick,
            winner: self.outcome(),
            objective_destroyed: self.objective_lost.is_some(),
            terrain_destroyed: self.terrain_destroyed,
            tanks,
            events: self.events.clone(),
        }
    }

    fn apply_order(&mut self, index: usize, order: Order) {
        let mut agent = self.combatants[index].agent.clone();

        if let Some(heading) = order.heading() {
            if heading != agent.facing {
                agent.bounds = bounds_after_turn(&agent, heading);
                agent.facing = heading;
            }
            if agent.can_move {
                let (dx, dy) = heading.delta();
                let speed = self.settings.tank_speed;
                let candidate = agent.bounds.translate(dx as f32 * speed, dy as f32 * speed);
                if self.can_occupy(agent.id, &candidate) {
                    agent.bounds = candidate;
                }
            }
            if let Some(object) = self.arena.object_mut(agent.id) {
                object.bounds = agent.bounds;
            }
        }

        self.combatants[index].agent = agent;
        self.collect_bonuses(index);

        if order.shoots() {
            self.fire(index);
        }
    }

    /// Inside the map, off obstructed tiles and clear of other tanks
    fn can_occupy(&self, id: ObjectId, bounds: &Rect) -> bool {
        let width = self.arena.width() as f32;
        let height = self.arena.height() as f32;
        if bounds.x < 0.0 || bounds.y < 0.0 || bounds.x + bounds.w > width || bounds.y + bounds.h > height {
            return false;
        }
        if bounds.covered_tiles().tiles().any(|tile| self.arena.is_obstructed(tile)) {
            return false;
        }
        !self.arena.objects().iter().any(|o| {
            o.is_live() && o.id != id && matches!(o.kind, ObjectKind::Tank { .. }) && o.bounds.intersects(bounds)
        })
    }

    fn collect_bonuses(&mut self, index: usize) {
        let tank = self.combatants[index].agent.id;
        let bounds = self.combatants[index].agent.bounds;
        let picked: Vec<ObjectId> = self
            .arena
            .live_bonuses()
            .into_iter()
            .filter(|b| b.bounds.intersects(&bounds))
            .map(|b| b.id)
            .collect();

        for bonus in picked {
            self.remove_object(bonus);
            self.combatants[index].bonuses_collected += 1;
            self.log_event(
                SkirmishEventType::BonusCollected { tank, bonus },
                format!("{tank:?} collected {bonus:?}"),
            );
        }
    }

    /// One shell in flight per tank
    fn fire(&mut self, index: usize) {
        if let Some(shell) = self.combatants[index].shell {
            if self.is_live(shell) {
                return;
            }
        }

        let agent = &self.combatants[index].agent;
        let width = self.config.shell_width;
        let (dx, dy) = agent.facing.delta();
        let center = agent.center();
        let front_x = center.x + dx as f32 * agent.bounds.w / 2.0;
        let front_y = center.y + dy as f32 * agent.bounds.h / 2.0;
        let bounds = Rect::new(front_x - width / 2.0, front_y - width / 2.0, width, width);

        let owner = agent.id;
        let faction = agent.faction;
        let direction = agent.facing;
        let armor_piercing = agent.armor_piercing;
        let id = self.arena.add_projectile(faction, armor_piercing, bounds);
        tracing::trace!(?owner, ?id, ?direction, "shell fired");

        let combatant = &mut self.combatants[index];
        combatant.shell = Some(id);
        combatant.shots_fired += 1;
        self.shells.push(Shell {
            id,
            owner,
            faction,
            direction,
            armor_piercing,
        });
    }

    fn advance_shells(&mut self) {
        let mut shells = std::mem::take(&mut self.shells);
        shells.retain(|shell| self.advance_shell(shell));
        self.shells = shells;
    }

    /// Move one shell and resolve its impacts; false once it is gone
    fn advance_shell(&mut self, shell: &Shell) -> bool {
        if !self.is_live(shell.id) {
            return false;
        }
        let (dx, dy) = shell.direction.delta();
        let speed = self.settings.shell_speed;
        let Some(object) = self.arena.object_mut(shell.id) else {
            return false;
        };
        object.bounds = object.bounds.translate(dx as f32 * speed, dy as f32 * speed);
        let bounds = object.bounds;

        let width = self.arena.width() as f32;
        let height = self.arena.height() as f32;
        if bounds.x + bounds.w <= 0.0 || bounds.y + bounds.h <= 0.0 || bounds.x >= width || bounds.y >= height {
            self.remove_object(shell.id);
            return false;
        }

        let hits: Vec<(ObjectId, ObjectKind)> = self
            .arena
            .objects()
            .iter()
            .filter(|o| o.is_live() && o.id != shell.id && o.id != shell.owner && o.bounds.intersects(&bounds))
            .map(|o| (o.id, o.kind))
            .collect();

        let mut stopped = false;
        for (id, kind) in hits {
            match kind {
                ObjectKind::Terrain(terrain) if terrain.stops_shells() => {
                    stopped = true;
                    if terrain.destructible_by(shell.armor_piercing) {
                        self.remove_object(id);
                        self.terrain_destroyed += 1;
                        self.log_event(
                            SkirmishEventType::TerrainDestroyed { terrain: id },
                            format!("{terrain:?} {id:?} destroyed"),
                        );
                    }
                }
                ObjectKind::Tank { faction } => {
                    stopped = true;
                    if faction != shell.faction {
                        self.remove_object(id);
                        if let Some(owner) = self.combatants.iter_mut().find(|c| c.agent.id == shell.owner) {
                            owner.kills += 1;
                        }
                        self.log_event(
                            SkirmishEventType::TankDestroyed { tank: id, by: shell.owner },
                            format!("{id:?} destroyed by {:?}", shell.owner),
                        );
                    }
                }
                ObjectKind::Objective { faction } => {
                    stopped = true;
                    if faction != shell.faction {
                        self.remove_object(id);
                        self.objective_lost = Some(faction);
                        self.log_event(
                            SkirmishEventType::ObjectiveDestroyed { by: shell.owner },
                            format!("objective destroyed by {:?}", shell.owner),
                        );
                    }
                }
                ObjectKind::Projectile { faction, .. } if faction != shell.faction => {
                    stopped = true;
                    self.remove_object(id);
                }
                _ => {}
            }
        }

        if stopped {
            self.remove_object(shell.id);
        }
        !stopped
    }

    fn remove_object(&mut self, id: ObjectId) {
        if let Err(err) = self.arena.remove(id) {
            tracing::warn!(%err, "remove failed");
        }
    }
}
