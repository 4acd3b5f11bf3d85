//! Decision policies - per-tick tactics for bot and AI-driven player tanks
//!
//! Architecture: trait + shared reflexes
//! - `DecisionPolicy` is the swappable per-agent strategy
//! - `Cadence` holds the half-rate think toggle and the last order
//! - `reflex` covers the immobile branch and danger/enemy reactions that all
//!   variants share; only routine movement differs per variant

mod aggressive;
mod classic;
mod common;

pub use aggressive::AggressivePolicy;
pub use classic::{ClassicPolicy, HuntMode};
pub use common::CommonPolicy;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::config::TacticsConfig;
use crate::core::error::{Result, TacticsError};
use crate::core::types::ObjectId;
use crate::spatial::grid::{Direction, GridPosition, Rect};
use crate::tactics::agent::Agent;
use crate::tactics::alignment::{alignment, correction};
use crate::tactics::level::{LevelObject, LevelView};
use crate::tactics::order::Order;
use crate::tactics::random::RandomSource;
use crate::tactics::sightline::{scan_direction, ScanSet, Sighting};

/// Per-agent decision strategy, invoked once per simulation tick
pub trait DecisionPolicy {
    /// Decide this tick's order
    fn think(&mut self, agent: &Agent, level: &dyn LevelView, rng: &mut dyn RandomSource) -> Order;

    fn kind(&self) -> PolicyKind;

    /// Most recent computed path, target first (diagnostic overlay)
    fn last_path(&self) -> &[GridPosition] {
        &[]
    }

    /// Object the policy is currently moving toward
    fn remembered_target(&self) -> Option<ObjectId> {
        None
    }
}

/// The policy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyKind {
    /// Pathfinding toward bonuses and hostiles
    Aggressive,
    /// Axis-delta heading toward a remembered target
    Common,
    /// Period-driven bot behavior
    Classic,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolicyKind::Aggressive => "aggressive",
            PolicyKind::Common => "common",
            PolicyKind::Classic => "classic",
        };
        f.write_str(name)
    }
}

impl FromStr for PolicyKind {
    type Err = TacticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "aggressive" => Ok(PolicyKind::Aggressive),
            "common" => Ok(PolicyKind::Common),
            "classic" => Ok(PolicyKind::Classic),
            _ => Err(TacticsError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Build a boxed policy of the given kind
pub fn build_policy(
    kind: PolicyKind,
    config: &TacticsConfig,
    rng: &mut dyn RandomSource,
) -> Result<Box<dyn DecisionPolicy>> {
    let policy: Box<dyn DecisionPolicy> = match kind {
        PolicyKind::Aggressive => Box::new(AggressivePolicy::new(config, rng)?),
        PolicyKind::Common => Box::new(CommonPolicy::new(config, rng)?),
        PolicyKind::Classic => Box::new(ClassicPolicy::new(config, rng)?),
    };
    Ok(policy)
}

/// Half-rate thinking: every other call re-emits the last movement
#[derive(Debug, Clone)]
pub struct Cadence {
    skip_next: bool,
    last_order: Order,
}

impl Cadence {
    pub fn new(initial: Order) -> Self {
        Self {
            skip_next: false,
            last_order: initial,
        }
    }

    /// Advance the toggle; on a skipped tick returns the order to re-emit
    pub fn skip(&mut self) -> Option<Order> {
        let skip = self.skip_next;
        self.skip_next = !self.skip_next;
        skip.then(|| self.last_order.movement())
    }

    pub fn remember(&mut self, order: Order) -> Order {
        self.last_order = order;
        order
    }

    pub fn last_order(&self) -> Order {
        self.last_order
    }

    /// Heading to keep when nothing changes it
    pub fn heading(&self, agent: &Agent) -> Direction {
        self.last_order.heading().unwrap_or(agent.facing)
    }
}

/// Outcome of the shared reflexes
pub enum Reflex<'a> {
    /// Immobile or reacting to a threat; the order is final
    Act(Order),
    /// Nothing urgent; the variant's routine movement decides
    Routine(ScanSet<'a>),
}

/// Immobile branch, then danger, then closest enemy
pub fn reflex<'a>(
    agent: &Agent,
    level: &'a dyn LevelView,
    config: &TacticsConfig,
    rng: &mut dyn RandomSource,
) -> Reflex<'a> {
    if !agent.can_move {
        return Reflex::Act(immobile_order(agent, level, config, rng));
    }

    let scans = ScanSet::scan(agent, level);

    if let Some((direction, threat)) = scans.danger() {
        let order = react_to_danger(agent, direction, threat, config.shell_width);
        tracing::trace!(agent = ?agent.id, ?direction, threat = ?threat.id, ?order, "danger");
        return Reflex::Act(order);
    }

    if let Some((direction, enemy)) = scans.closest_enemy(agent) {
        let order = react_to_enemy(agent, direction, enemy, config.shell_width);
        tracing::trace!(agent = ?agent.id, ?direction, enemy = ?enemy.id, ?order, "enemy");
        return Reflex::Act(order);
    }

    Reflex::Routine(scans)
}

/// Fire along the current facing only; never move
fn immobile_order(
    agent: &Agent,
    level: &dyn LevelView,
    config: &TacticsConfig,
    rng: &mut dyn RandomSource,
) -> Order {
    match scan_direction(agent, agent.facing, level) {
        Sighting::Danger(_) | Sighting::Enemy(_) => Order::shoot(),
        Sighting::Forbidden => Order::empty(),
        Sighting::None if rng.one_in(config.immobile.shot_one_in) => Order::shoot(),
        Sighting::None => Order::empty(),
    }
}

/// Shoot an aligned shell, otherwise sidestep out of its lane
pub fn react_to_danger(agent: &Agent, direction: Direction, threat: &LevelObject, shell_width: f32) -> Order {
    let ordering = alignment(agent, direction, &threat.bounds, shell_width);
    match correction(direction, ordering) {
        Some(toward) => Order::for_heading(toward.opposite()),
        None if agent.facing == direction => Order::shoot(),
        None => Order::encode(direction, true),
    }
}

/// Line up with an enemy, then advance on it firing
pub fn react_to_enemy(agent: &Agent, direction: Direction, enemy: &LevelObject, shell_width: f32) -> Order {
    let ordering = alignment(agent, direction, &enemy.bounds, shell_width);
    match correction(direction, ordering) {
        Some(toward) => Order::for_heading(toward),
        None => Order::encode(direction, true),
    }
}

/// Heading that closes the gap to `target` along one axis
///
/// When both axes differ the axis is chosen uniformly.
pub fn axis_delta_heading(
    agent: &Agent,
    target: &Rect,
    epsilon: f32,
    rng: &mut dyn RandomSource,
) -> Option<Direction> {
    let delta = target.center() - agent.center();
    let (dx, dy) = (delta.x, delta.y);

    let horizontal = (dx.abs() > epsilon).then(|| if dx > 0.0 { Direction::Right } else { Direction::Left });
    let vertical = (dy.abs() > epsilon).then(|| if dy > 0.0 { Direction::Down } else { Direction::Up });

    match (horizontal, vertical) {
        (Some(h), Some(v)) => Some(if rng.one_in(2) { h } else { v }),
        (h, v) => h.or(v),
    }
}

/// Routine shot along the chosen heading
pub fn routine_shot(sighting: Sighting<'_>, blocked: bool, shot_one_in: u32, rng: &mut dyn RandomSource) -> bool {
    !sighting.is_forbidden() && (blocked || rng.one_in(shot_one_in))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Faction;
    use crate::tactics::level::ObjectKind;
    use crate::tactics::random::SeededRandom;

    fn agent_at(x: f32, y: f32, facing: Direction) -> Agent {
        Agent::new(ObjectId(1), Faction::Players, Rect::new(x, y, 1.0, 1.0), facing)
    }

    fn shell_at(x: f32, y: f32) -> LevelObject {
        LevelObject::new(
            ObjectId(9),
            ObjectKind::Projectile { faction: Faction::Bots, armor_piercing: false },
            Rect::new(x, y, 0.25, 0.25),
        )
    }

    #[test]
    fn test_cadence_alternates() {
        let mut cadence = Cadence::new(Order::MOVE_LEFT);
        assert_eq!(cadence.skip(), None);
        cadence.remember(Order::encode(Direction::Up, true));
        assert_eq!(cadence.skip(), Some(Order::MOVE_UP));
        assert_eq!(cadence.skip(), None);
    }

    #[test]
    fn test_cadence_heading_falls_back_to_facing() {
        let cadence = Cadence::new(Order::shoot());
        assert_eq!(cadence.heading(&agent_at(0.0, 0.0, Direction::Down)), Direction::Down);
    }

    #[test]
    fn test_danger_aligned_and_facing_shoots_in_place() {
        let agent = agent_at(5.0, 5.0, Direction::Up);
        let order = react_to_danger(&agent, Direction::Up, &shell_at(5.375, 2.0), 0.25);
        assert_eq!(order, Order::SHOOT);
    }

    #[test]
    fn test_danger_aligned_not_facing_turns_and_shoots() {
        let agent = agent_at(5.0, 5.0, Direction::Left);
        let order = react_to_danger(&agent, Direction::Up, &shell_at(5.375, 2.0), 0.25);
        assert_eq!(order, Order::MOVE_UP | Order::SHOOT);
    }

    #[test]
    fn test_danger_misaligned_dodges_away() {
        let agent = agent_at(5.0, 5.0, Direction::Up);
        // Shell clips the tank's right edge but misses the firing line
        let order = react_to_danger(&agent, Direction::Up, &shell_at(5.8, 2.0), 0.25);
        assert_eq!(order, Order::MOVE_LEFT);
    }

    #[test]
    fn test_enemy_misaligned_turns_toward() {
        let agent = agent_at(5.0, 5.0, Direction::Up);
        let enemy = LevelObject::new(
            ObjectId(3),
            ObjectKind::Tank { faction: Faction::Bots },
            Rect::new(5.8, 1.0, 1.0, 1.0),
        );
        let order = react_to_enemy(&agent, Direction::Up, &enemy, 0.25);
        assert_eq!(order, Order::MOVE_RIGHT);
        assert!(!order.shoots());
    }

    #[test]
    fn test_enemy_aligned_advances_firing() {
        let agent = agent_at(5.0, 5.0, Direction::Up);
        let enemy = LevelObject::new(
            ObjectId(3),
            ObjectKind::Tank { faction: Faction::Bots },
            Rect::new(5.0, 9.0, 1.0, 1.0),
        );
        let order = react_to_enemy(&agent, Direction::Down, &enemy, 0.25);
        assert_eq!(order, Order::MOVE_DOWN | Order::SHOOT);
    }

    #[test]
    fn test_axis_delta_single_axis() {
        let mut rng = SeededRandom::new(1);
        let agent = agent_at(2.0, 2.0, Direction::Up);
        let right = Rect::new(7.0, 2.0, 1.0, 1.0);
        assert_eq!(axis_delta_heading(&agent, &right, 0.01, &mut rng), Some(Direction::Right));
        let above = Rect::new(2.0, 0.0, 1.0, 1.0);
        assert_eq!(axis_delta_heading(&agent, &above, 0.01, &mut rng), Some(Direction::Up));
        let same = Rect::new(2.0, 2.0, 1.0, 1.0);
        assert_eq!(axis_delta_heading(&agent, &same, 0.01, &mut rng), None);
    }

    #[test]
    fn test_axis_delta_both_axes_picks_one() {
        let mut rng = SeededRandom::new(8);
        let agent = agent_at(2.0, 2.0, Direction::Up);
        let target = Rect::new(6.0, 6.0, 1.0, 1.0);
        for _ in 0..20 {
            let heading = axis_delta_heading(&agent, &target, 0.01, &mut rng);
            assert!(matches!(heading, Some(Direction::Right | Direction::Down)));
        }
    }

    #[test]
    fn test_policy_kind_parse() {
        assert_eq!("Aggressive".parse::<PolicyKind>().ok(), Some(PolicyKind::Aggressive));
        assert_eq!(PolicyKind::Classic.to_string(), "classic");
        assert!(matches!("sniper".parse::<PolicyKind>(), Err(TacticsError::UnknownPolicy(_))));
    }
}
