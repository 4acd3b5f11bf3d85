//! Classic bot policy: the level period decides what the bot hunts

use serde::{Deserialize, Serialize};

use crate::core::config::TacticsConfig;
use crate::core::error::Result;
use crate::tactics::agent::Agent;
use crate::tactics::level::{LevelObject, LevelView};
use crate::tactics::order::Order;
use crate::tactics::random::{random_direction, random_other_direction, RandomSource};
use crate::tactics::sightline::ScanSet;

use super::{axis_delta_heading, reflex, Cadence, DecisionPolicy, PolicyKind, Reflex};

/// What a classic bot does during the current level period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HuntMode {
    /// Wander, turning at random
    Patrol,
    /// Close in on the assigned player's tank
    HuntPlayer,
    /// Close in on the protected objective
    HuntObjective,
}

impl HuntMode {
    /// Periods cycle patrol, hunt player, hunt objective
    pub fn from_period(index: usize) -> Self {
        match index % 3 {
            0 => HuntMode::Patrol,
            1 => HuntMode::HuntPlayer,
            _ => HuntMode::HuntObjective,
        }
    }

    fn target<'a>(&self, agent: &Agent, level: &'a dyn LevelView) -> Option<&'a LevelObject> {
        let target = match self {
            HuntMode::Patrol => None,
            HuntMode::HuntPlayer => level.assigned_player_target(agent.assigned_player),
            HuntMode::HuntObjective => level.objective_structure(),
        };
        target.filter(|o| o.is_live())
    }
}

pub struct ClassicPolicy {
    config: TacticsConfig,
    cadence: Cadence,
}

impl ClassicPolicy {
    pub fn new(config: &TacticsConfig, rng: &mut dyn RandomSource) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            cadence: Cadence::new(Order::for_heading(random_direction(rng))),
        })
    }

    fn routine(
        &mut self,
        agent: &Agent,
        level: &dyn LevelView,
        _scans: &ScanSet<'_>,
        rng: &mut dyn RandomSource,
    ) -> Order {
        let mut heading = self.cadence.heading(agent);
        let mode = HuntMode::from_period(level.period_index());

        if agent.is_centered(self.config.center_epsilon) {
            match mode.target(agent, level) {
                Some(target) => {
                    if let Some(direction) =
                        axis_delta_heading(agent, &target.bounds, self.config.center_epsilon, rng)
                    {
                        heading = direction;
                    }
                }
                None => {
                    if rng.one_in(self.config.classic.patrol_turn_one_in) {
                        heading = random_direction(rng);
                    }
                }
            }
        }

        if agent.is_blocked_ahead(heading, level) && rng.one_in(self.config.classic.blocked_turn_one_in) {
            heading = random_other_direction(rng, heading);
        }

        let shoot = rng.one_in(self.config.classic.shot_one_in);
        Order::encode(heading, shoot)
    }
}

impl DecisionPolicy for ClassicPolicy {
    fn think(&mut self, agent: &Agent, level: &dyn LevelView, rng: &mut dyn RandomSource) -> Order {
        if let Some(order) = self.cadence.skip() {
            return order;
        }

        let order = match reflex(agent, level, &self.config, rng) {
            Reflex::Act(order) => order,
            Reflex::Routine(scans) => self.routine(agent, level, &scans, rng),
        };
        tracing::trace!(agent = ?agent.id, ?order, "classic order");
        self.cadence.remember(order)
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Classic
    }
}
