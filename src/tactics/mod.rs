//! Tactical reasoning layer
//!
//! Per think-tick a policy scans the four sightlines from its agent, reacts
//! to shells and enemies in view, otherwise moves toward its target, and
//! returns an `Order` bitmask for the game loop to apply.

pub mod agent;
pub mod alignment;
pub mod level;
pub mod order;
pub mod policy;
pub mod random;
pub mod sightline;
pub mod target;

pub use agent::Agent;
pub use level::{LevelObject, LevelView, ObjectKind, Terrain};
pub use order::Order;
pub use policy::{build_policy, DecisionPolicy, PolicyKind};
pub use random::{RandomSource, SeededRandom};
pub use sightline::{scan_direction, ScanSet, ShotPriority, Sighting};
