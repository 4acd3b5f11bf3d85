//! Firing-line alignment along the axis perpendicular to a shot
//!
//! Tanks snap to the tile grid on a 90 degree turn, so the firing line is
//! computed from the position the agent would hold after turning.

use std::cmp::Ordering;

use crate::spatial::grid::{Direction, Rect};
use crate::tactics::agent::Agent;

/// Closed segment on one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn centered(center: f32, width: f32) -> Self {
        Self::new(center - width / 2.0, center + width / 2.0)
    }

    /// Extent of a rectangle across a shot travelling in `direction`
    pub fn across(rect: &Rect, direction: Direction) -> Self {
        let (min, max) = if direction.is_vertical() { rect.span_x() } else { rect.span_y() };
        Self::new(min, max)
    }
}

/// `Less` when `a` lies strictly before `b`, `Greater` strictly after, else `Equal`
pub fn compare_intervals(a: Interval, b: Interval) -> Ordering {
    if a.max < b.min {
        Ordering::Less
    } else if a.min > b.max {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Bounds the agent would occupy once facing `direction`
pub fn bounds_after_turn(agent: &Agent, direction: Direction) -> Rect {
    let mut bounds = agent.bounds;
    if agent.facing.is_perpendicular(direction) {
        if direction.is_vertical() {
            bounds.x = bounds.x.round();
        } else {
            bounds.y = bounds.y.round();
        }
    }
    bounds
}

/// Extent of a shell fired toward `direction`, across its flight axis
pub fn firing_interval(agent: &Agent, direction: Direction, shell_width: f32) -> Interval {
    let bounds = bounds_after_turn(agent, direction);
    let center = bounds.center();
    let axis_center = if direction.is_vertical() { center.x } else { center.y };
    Interval::centered(axis_center, shell_width)
}

/// Would a shell fired toward `direction` meet `target`?
///
/// `Less` means the target lies on the positive side of the firing line
/// (right or below), `Greater` the negative side.
pub fn alignment(agent: &Agent, direction: Direction, target: &Rect, shell_width: f32) -> Ordering {
    compare_intervals(
        firing_interval(agent, direction, shell_width),
        Interval::across(target, direction),
    )
}

/// Sideways move that shifts the firing line toward the target
pub fn correction(direction: Direction, ordering: Ordering) -> Option<Direction> {
    match (direction.is_vertical(), ordering) {
        (_, Ordering::Equal) => None,
        (true, Ordering::Less) => Some(Direction::Right),
        (true, Ordering::Greater) => Some(Direction::Left),
        (false, Ordering::Less) => Some(Direction::Down),
        (false, Ordering::Greater) => Some(Direction::Up),
    }
}
