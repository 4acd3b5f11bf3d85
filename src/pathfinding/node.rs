//! Search node for the grid A*

use crate::spatial::grid::GridPosition;

/// A discovered grid position with its route costs
///
/// Nodes are never mutated in place; a cheaper route to the same position
/// produces a new node that replaces the old one in the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathNode {
    pub position: GridPosition,
    /// Cost accumulated from the start (g)
    pub traverse_distance: u32,
    /// g + heuristic to the target (f)
    pub estimated_total_cost: u32,
}

impl PathNode {
    pub fn new(position: GridPosition, traverse_distance: u32, target: GridPosition) -> Self {
        Self {
            position,
            traverse_distance,
            estimated_total_cost: traverse_distance + heuristic(position, target),
        }
    }

    /// Remaining estimate (f - g)
    pub fn heuristic(&self) -> u32 {
        self.estimated_total_cost.saturating_sub(self.traverse_distance)
    }
}

/// Manhattan distance between two tiles
#[inline]
pub fn heuristic(from: GridPosition, to: GridPosition) -> u32 {
    from.manhattan_distance(&to)
}
