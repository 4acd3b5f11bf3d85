//! Common policy: axis-delta steering toward a remembered target

use crate::core::config::TacticsConfig;
use crate::core::error::Result;
use crate::core::types::ObjectId;
use crate::tactics::agent::Agent;
use crate::tactics::level::{LevelObject, LevelView};
use crate::tactics::order::Order;
use crate::tactics::random::{choose, random_direction, random_other_direction, RandomSource};
use crate::tactics::sightline::ScanSet;
use crate::tactics::target::RememberedTarget;

use super::{axis_delta_heading, reflex, routine_shot, Cadence, DecisionPolicy, PolicyKind, Reflex};

pub struct CommonPolicy {
    config: TacticsConfig,
    target: RememberedTarget,
    cadence: Cadence,
}

impl CommonPolicy {
    pub fn new(config: &TacticsConfig, rng: &mut dyn RandomSource) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            target: RememberedTarget::new(),
            cadence: Cadence::new(Order::for_heading(random_direction(rng))),
        })
    }

    /// Remembered object if still live, else a random bonus, else a random hostile tank
    fn pick_target<'a>(
        &mut self,
        agent: &Agent,
        level: &'a dyn LevelView,
        rng: &mut dyn RandomSource,
    ) -> Option<&'a LevelObject> {
        if let Some(current) = self.target.resolve(level) {
            return Some(current);
        }

        let bonuses = level.live_bonuses();
        let picked = match choose(rng, &bonuses).copied() {
            Some(bonus) => Some(bonus),
            None => {
                let hostiles = level.live_tanks(agent.faction.opponent());
                choose(rng, &hostiles).copied()
            }
        };

        match picked {
            Some(object) => {
                tracing::debug!(agent = ?agent.id, target = ?object.id, "new target");
                self.target.remember(object);
            }
            None => self.target.forget(),
        }
        picked
    }

    fn routine(
        &mut self,
        agent: &Agent,
        level: &dyn LevelView,
        scans: &ScanSet<'_>,
        rng: &mut dyn RandomSource,
    ) -> Order {
        let mut heading = self.cadence.heading(agent);

        if agent.is_centered(self.config.center_epsilon) && rng.one_in(self.config.common.retarget_one_in) {
            match self.pick_target(agent, level, rng) {
                Some(target) => {
                    if let Some(direction) =
                        axis_delta_heading(agent, &target.bounds, self.config.center_epsilon, rng)
                    {
                        heading = direction;
                    }
                }
                None => heading = random_direction(rng),
            }
        }

        let blocked = agent.is_blocked_ahead(heading, level);
        if blocked && rng.one_in(self.config.common.blocked_turn_one_in) {
            heading = random_other_direction(rng, heading);
        }

        let shoot = routine_shot(scans.get(heading), blocked, self.config.common.shot_one_in, rng);
        Order::encode(heading, shoot)
    }
}

impl DecisionPolicy for CommonPolicy {
    fn think(&mut self, agent: &Agent, level: &dyn LevelView, rng: &mut dyn RandomSource) -> Order {
        if let Some(order) = self.cadence.skip() {
            return order;
        }
        self.target.invalidate_removed(level);

        let order = match reflex(agent, level, &self.config, rng) {
            Reflex::Act(order) => order,
            Reflex::Routine(scans) => self.routine(agent, level, &scans, rng),
        };
        tracing::trace!(agent = ?agent.id, ?order, "common order");
        self.cadence.remember(order)
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Common
    }

    fn remembered_target(&self) -> Option<ObjectId> {
        self.target.id()
    }
}
