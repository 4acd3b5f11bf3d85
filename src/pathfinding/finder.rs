//! A* pathfinding over a 4-connected tile grid
//!
//! One `PathFinder` is built per agent and reused: its frontier, ignored set
//! and link map are cleared on every call instead of reallocated.

use ahash::{AHashMap, AHashSet};

use crate::core::config::PathfindingConfig;
use crate::core::error::{Result, TacticsError};
use crate::pathfinding::frontier::Frontier;
use crate::pathfinding::node::PathNode;
use crate::spatial::grid::{GridPosition, TileRect};

/// Cost of moving to an adjacent tile
const STEP_COST: u32 = 1;

/// Reusable grid A* search
#[derive(Debug)]
pub struct PathFinder {
    max_steps: usize,
    bounds: Option<TileRect>,
    frontier: Frontier,
    /// Closed positions and obstacles
    ignored: AHashSet<GridPosition>,
    /// Position -> position it was reached from
    links: AHashMap<GridPosition, GridPosition>,
    /// Last successful path, target first
    path: Vec<GridPosition>,
}

impl PathFinder {
    /// Create a finder with a step budget and initial buffer capacity
    ///
    /// Both values must be positive.
    pub fn new(max_steps: usize, initial_capacity: usize) -> Result<Self> {
        if max_steps == 0 {
            return Err(TacticsError::InvalidConfig(
                "path finder max_steps must be positive".into(),
            ));
        }
        if initial_capacity == 0 {
            return Err(TacticsError::InvalidConfig(
                "path finder initial_capacity must be positive".into(),
            ));
        }

        Ok(Self {
            max_steps,
            bounds: None,
            frontier: Frontier::with_capacity(initial_capacity),
            ignored: AHashSet::with_capacity(initial_capacity),
            links: AHashMap::with_capacity(initial_capacity),
            path: Vec::new(),
        })
    }

    pub fn from_config(config: &PathfindingConfig) -> Result<Self> {
        Self::new(config.max_steps, config.initial_capacity)
    }

    /// Restrict expansion to a tile rectangle
    pub fn with_bounds(mut self, bounds: TileRect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn set_bounds(&mut self, bounds: Option<TileRect>) {
        self.bounds = bounds;
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Search for a shortest path from `start` to `target`
    ///
    /// Obstacle positions are never expanded. The returned path begins with
    /// `target` and ends with `start`; `None` means the frontier ran dry or
    /// the step budget was spent.
    pub fn calculate<'a, I>(
        &mut self,
        start: GridPosition,
        target: GridPosition,
        obstacles: I,
    ) -> Option<&[GridPosition]>
    where
        I: IntoIterator<Item = &'a GridPosition>,
    {
        self.frontier.clear();
        self.ignored.clear();
        self.links.clear();
        self.path.clear();

        self.frontier.enqueue(PathNode::new(start, 0, target));
        self.ignored.extend(obstacles.into_iter().copied());

        if start != target && self.ignored.contains(&target) {
            tracing::debug!(?target, "path target is listed as an obstacle");
        }

        let mut steps = 0;
        let mut found = false;

        while steps < self.max_steps {
            let Some(current) = self.frontier.dequeue() else {
                break;
            };
            steps += 1;
            self.ignored.insert(current.position);

            if current.position == target {
                found = true;
                break;
            }

            for neighbor in current.position.neighbors() {
                if self.ignored.contains(&neighbor) {
                    continue;
                }
                if let Some(bounds) = self.bounds {
                    if !bounds.contains(neighbor) {
                        continue;
                    }
                }

                let distance = current.traverse_distance + STEP_COST;
                match self.frontier.try_get(neighbor).copied() {
                    None => {
                        self.frontier.enqueue(PathNode::new(neighbor, distance, target));
                        self.links.insert(neighbor, current.position);
                    }
                    Some(existing) if existing.traverse_distance > distance => {
                        self.frontier.modify(PathNode::new(neighbor, distance, target));
                        self.links.insert(neighbor, current.position);
                    }
                    Some(_) => {}
                }
            }
        }

        if !found {
            tracing::trace!(?start, ?target, steps, "no path");
            return None;
        }

        self.reconstruct(target);
        tracing::trace!(?start, ?target, steps, length = self.path.len(), "path found");
        Some(&self.path)
    }

    fn reconstruct(&mut self, target: GridPosition) {
        let mut current = target;
        self.path.push(current);
        while let Some(&previous) = self.links.get(&current) {
            self.path.push(previous);
            current = previous;
        }
    }

    /// Path from the most recent successful search (empty after a failure)
    pub fn last_path(&self) -> &[GridPosition] {
        &self.path
    }

    /// The waypoint right after the start of the last path
    pub fn next_step(&self) -> Option<GridPosition> {
        let len = self.path.len();
        if len < 2 {
            return None;
        }
        Some(self.path[len - 2])
    }
}

/// Number of moves in a target-first path
pub fn path_steps(path: &[GridPosition]) -> usize {
    path.len().saturating_sub(1)
}
