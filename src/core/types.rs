//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Stable identifier for level objects (tanks, shells, terrain, bonuses)
///
/// Policies hold these instead of references so a removed object can be
/// detected on the next think-tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl ObjectId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Side a tank, shell or objective belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Players,
    Bots,
}

impl Faction {
    /// The side this faction fights against
    pub fn opponent(&self) -> Faction {
        match self {
            Faction::Players => Faction::Bots,
            Faction::Bots => Faction::Players,
        }
    }
}

/// 2D position in tile units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}
