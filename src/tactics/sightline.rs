//! Sightline scanning along the four cardinal directions
//!
//! A scan walks outward strip by strip from the agent's footprint and
//! classifies the first decisive thing a shell fired that way would meet.

use crate::spatial::grid::Direction;
use crate::tactics::agent::Agent;
use crate::tactics::level::{LevelObject, LevelView, ObjectKind};

/// Classification of a line of fire, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShotPriority {
    None,
    Forbidden,
    Enemy,
    Danger,
}

/// Result of scanning one direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sighting<'a> {
    /// Nothing worth a shot, or the view is blocked
    None,
    /// Firing would hit the protected objective or a friendly tank
    Forbidden,
    Enemy(&'a LevelObject),
    /// A hostile shell on the line
    Danger(&'a LevelObject),
}

impl<'a> Sighting<'a> {
    pub fn priority(&self) -> ShotPriority {
        match self {
            Sighting::None => ShotPriority::None,
            Sighting::Forbidden => ShotPriority::Forbidden,
            Sighting::Enemy(_) => ShotPriority::Enemy,
            Sighting::Danger(_) => ShotPriority::Danger,
        }
    }

    pub fn target(&self) -> Option<&'a LevelObject> {
        match *self {
            Sighting::Enemy(object) | Sighting::Danger(object) => Some(object),
            _ => None,
        }
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Sighting::Forbidden)
    }
}

/// Scan outward from the agent until something decisive or the map edge
///
/// Each strip is judged as a whole. A hostile shell anywhere in the strip is
/// `Danger` whatever else shares it. Otherwise impassable terrain and own
/// units decide in level order, and a hostile unit is `Enemy` once the strip
/// has been read without an earlier verdict.
pub fn scan_direction<'a>(agent: &Agent, direction: Direction, level: &'a dyn LevelView) -> Sighting<'a> {
    let bounds = level.tile_bounds();
    let (dx, dy) = direction.delta();
    let mut strip = agent.footprint().adjacent_strip(direction);
    let mut destructible_seen = false;

    while strip.intersects(&bounds) {
        let objects: Vec<&'a LevelObject> = level
            .objects_overlapping(strip)
            .into_iter()
            .filter(|o| o.id != agent.id && !o.removed)
            .collect();

        let shell = objects
            .iter()
            .copied()
            .find(|o| matches!(o.kind, ObjectKind::Projectile { faction, .. } if faction != agent.faction));
        if let Some(shell) = shell {
            return Sighting::Danger(shell);
        }

        let mut enemy: Option<&'a LevelObject> = None;
        for object in objects {
            match object.kind {
                ObjectKind::Terrain(terrain) if terrain.stops_shells() => {
                    if !terrain.destructible_by(agent.armor_piercing) {
                        return Sighting::None;
                    }
                    destructible_seen = true;
                }
                ObjectKind::Terrain(_) | ObjectKind::Bonus | ObjectKind::Projectile { .. } => {}
                ObjectKind::Tank { faction } | ObjectKind::Objective { faction } => {
                    if faction == agent.faction {
                        if !destructible_seen {
                            return Sighting::Forbidden;
                        }
                    } else if enemy.is_none() {
                        enemy = Some(object);
                    }
                }
            }
        }

        if let Some(enemy) = enemy {
            return Sighting::Enemy(enemy);
        }

        strip = strip.translate(dx, dy);
    }

    Sighting::None
}

/// Sightings in all four directions for one think-tick
#[derive(Debug, Clone, Copy)]
pub struct ScanSet<'a> {
    sightings: [Sighting<'a>; 4],
}

impl<'a> ScanSet<'a> {
    pub fn scan(agent: &Agent, level: &'a dyn LevelView) -> Self {
        Self {
            sightings: Direction::ALL.map(|d| scan_direction(agent, d, level)),
        }
    }

    pub fn get(&self, direction: Direction) -> Sighting<'a> {
        self.sightings[direction.index()]
    }

    /// First direction, in `Direction::ALL` order, reporting danger
    pub fn danger(&self) -> Option<(Direction, &'a LevelObject)> {
        Direction::ALL.into_iter().find_map(|d| match self.get(d) {
            Sighting::Danger(object) => Some((d, object)),
            _ => None,
        })
    }

    /// Enemy sighting whose target is nearest the agent
    pub fn closest_enemy(&self, agent: &Agent) -> Option<(Direction, &'a LevelObject)> {
        Direction::ALL
            .into_iter()
            .filter_map(|d| match self.get(d) {
                Sighting::Enemy(object) => Some((d, object)),
                _ => None,
            })
            .min_by(|(_, a), (_, b)| agent.distance_to(a).total_cmp(&agent.distance_to(b)))
    }
}
