//! Aggressive policy: A* toward bonuses first, then hostile tanks

use crate::core::config::TacticsConfig;
use crate::core::error::Result;
use crate::core::types::ObjectId;
use crate::pathfinding::PathFinder;
use crate::spatial::grid::{Direction, GridPosition};
use crate::tactics::agent::Agent;
use crate::tactics::level::{LevelObject, LevelView, ObjectKind};
use crate::tactics::order::Order;
use crate::tactics::random::{choose, random_direction, RandomSource};
use crate::tactics::sightline::ScanSet;
use crate::tactics::target::RememberedTarget;

use super::{reflex, routine_shot, Cadence, DecisionPolicy, PolicyKind, Reflex};

enum Route {
    Step(Direction),
    Arrived,
    NoPath,
}

pub struct AggressivePolicy {
    config: TacticsConfig,
    finder: PathFinder,
    target: RememberedTarget,
    cadence: Cadence,
}

impl AggressivePolicy {
    pub fn new(config: &TacticsConfig, rng: &mut dyn RandomSource) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            finder: PathFinder::from_config(&config.pathfinding)?,
            config: config.clone(),
            target: RememberedTarget::new(),
            cadence: Cadence::new(Order::for_heading(random_direction(rng))),
        })
    }

    /// Fresh pick: a random live bonus, else a random hostile tank
    fn pick_target(&mut self, agent: &Agent, level: &dyn LevelView, rng: &mut dyn RandomSource) {
        let bonuses = level.live_bonuses();
        if let Some(bonus) = choose(rng, &bonuses) {
            self.target.remember(bonus);
            tracing::debug!(agent = ?agent.id, target = ?bonus.id, "targeting bonus");
            return;
        }

        let hostiles = level.live_tanks(agent.faction.opponent());
        match choose(rng, &hostiles) {
            Some(hostile) => {
                self.target.remember(hostile);
                tracing::debug!(agent = ?agent.id, target = ?hostile.id, "targeting hostile");
            }
            None => self.target.forget(),
        }
    }

    /// Keep the current target unless a bonus appeared while chasing something else
    fn refresh_target(&mut self, agent: &Agent, level: &dyn LevelView, rng: &mut dyn RandomSource) {
        match self.target.resolve(level) {
            None => self.pick_target(agent, level, rng),
            Some(current) if !matches!(current.kind, ObjectKind::Bonus) => {
                let bonuses = level.live_bonuses();
                if let Some(bonus) = choose(rng, &bonuses) {
                    self.target.remember(bonus);
                    tracing::debug!(agent = ?agent.id, target = ?bonus.id, "switching to bonus");
                }
            }
            Some(_) => {}
        }
    }

    fn route(&mut self, agent: &Agent, target: &LevelObject, level: &dyn LevelView) -> Route {
        let start = agent.tile();
        let goal = target.tile();
        if start == goal {
            return Route::Arrived;
        }

        let mut obstacles = level.obstructed_tiles();
        obstacles.retain(|tile| *tile != start && *tile != goal);

        self.finder.set_bounds(Some(level.tile_bounds()));
        if self.finder.calculate(start, goal, &obstacles).is_none() {
            return Route::NoPath;
        }

        match self.finder.next_step().and_then(|next| start.direction_to(&next)) {
            Some(direction) => Route::Step(direction),
            None => Route::Arrived,
        }
    }

    fn routine(
        &mut self,
        agent: &Agent,
        level: &dyn LevelView,
        scans: &ScanSet<'_>,
        rng: &mut dyn RandomSource,
    ) -> Order {
        let mut heading = self.cadence.heading(agent);

        if agent.is_centered(self.config.center_epsilon) {
            self.refresh_target(agent, level, rng);
            if let Some(target) = self.target.resolve(level) {
                match self.route(agent, target, level) {
                    Route::Step(direction) => heading = direction,
                    Route::Arrived => {}
                    Route::NoPath => {
                        tracing::debug!(agent = ?agent.id, target = ?target.id, "no path to target");
                        self.target.forget();
                        heading = random_direction(rng);
                    }
                }
            }
        }

        let blocked = agent.is_blocked_ahead(heading, level);
        if blocked && rng.one_in(self.config.aggressive.blocked_reaction_one_in) {
            if rng.one_in(2) {
                self.pick_target(agent, level, rng);
            } else if rng.one_in(2) {
                heading = heading.clockwise();
            } else {
                heading = heading.counter_clockwise();
            }
        }

        let shoot = routine_shot(scans.get(heading), blocked, self.config.aggressive.shot_one_in, rng);
        Order::encode(heading, shoot)
    }
}

impl DecisionPolicy for AggressivePolicy {
    fn think(&mut self, agent: &Agent, level: &dyn LevelView, rng: &mut dyn RandomSource) -> Order {
        if let Some(order) = self.cadence.skip() {
            return order;
        }
        self.target.invalidate_removed(level);

        let order = match reflex(agent, level, &self.config, rng) {
            Reflex::Act(order) => order,
            Reflex::Routine(scans) => self.routine(agent, level, &scans, rng),
        };
        tracing::trace!(agent = ?agent.id, ?order, "aggressive order");
        self.cadence.remember(order)
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Aggressive
    }

    fn last_path(&self) -> &[GridPosition] {
        self.finder.last_path()
    }

    fn remembered_target(&self) -> Option<ObjectId> {
        self.target.id()
    }
}
