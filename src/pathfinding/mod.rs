//! Grid pathfinding - A* over 4-connected tiles with an indexed open set

pub mod finder;
pub mod frontier;
pub mod node;

pub use finder::{path_steps, PathFinder};
pub use frontier::Frontier;
pub use node::{heuristic, PathNode};
