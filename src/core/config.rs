//! Tactics configuration with documented constants
//!
//! All tuning knobs for the decision policies are collected here. Chances
//! are expressed as "one in N" rolls, so larger values make an event rarer.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{Result, TacticsError};

/// Path finder sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathfindingConfig {
    /// Maximum number of nodes expanded per search
    ///
    /// The only bound against runaway searches on maze-like maps. Should be
    /// at least the number of traversable tiles in the area of interest.
    pub max_steps: usize,

    /// Initial capacity of the frontier, ignored set and link map
    pub initial_capacity: usize,
}

impl Default for PathfindingConfig {
    fn default() -> Self {
        Self {
            max_steps: 4096,
            initial_capacity: 256,
        }
    }
}

/// Immobilized tanks can still turn their gun on what is in front of them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImmobileConfig {
    /// Chance of a speculative shot when nothing is in sight
    pub shot_one_in: u32,
}

impl Default for ImmobileConfig {
    fn default() -> Self {
        Self { shot_one_in: 16 }
    }
}

/// Pathfinding-driven policy used for AI-controlled player tanks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggressiveConfig {
    /// Chance of a routine shot along the chosen heading
    pub shot_one_in: u32,
    /// Chance of reacting (re-target or 90 degree turn) when blocked ahead
    pub blocked_reaction_one_in: u32,
}

impl Default for AggressiveConfig {
    fn default() -> Self {
        Self {
            shot_one_in: 8,
            blocked_reaction_one_in: 4,
        }
    }
}

/// Heading-delta policy without pathfinding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommonConfig {
    /// Chance of picking or refreshing a target on a centered tick
    pub retarget_one_in: u32,
    /// Chance of a heading change when blocked ahead
    pub blocked_turn_one_in: u32,
    /// Chance of a routine shot along the chosen heading
    pub shot_one_in: u32,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            retarget_one_in: 8,
            blocked_turn_one_in: 4,
            shot_one_in: 8,
        }
    }
}

/// Period-driven bot policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassicConfig {
    /// Chance of a random heading while patrolling on a centered tick
    pub patrol_turn_one_in: u32,
    /// Chance of a heading change when blocked ahead
    pub blocked_turn_one_in: u32,
    /// Chance of firing on any routine tick
    pub shot_one_in: u32,
}

impl Default for ClassicConfig {
    fn default() -> Self {
        Self {
            patrol_turn_one_in: 16,
            blocked_turn_one_in: 4,
            shot_one_in: 12,
        }
    }
}

/// Complete tactics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TacticsConfig {
    #[serde(default)]
    pub pathfinding: PathfindingConfig,
    #[serde(default)]
    pub immobile: ImmobileConfig,
    #[serde(default)]
    pub aggressive: AggressiveConfig,
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub classic: ClassicConfig,

    /// Width of a shell across its flight axis (tile units)
    ///
    /// Alignment checks compare this interval, centered on the tank, with
    /// the target's bounding box.
    #[serde(default = "default_shell_width")]
    pub shell_width: f32,

    /// Tolerance for treating a tank as centered on a tile (tile units)
    #[serde(default = "default_center_epsilon")]
    pub center_epsilon: f32,
}

fn default_shell_width() -> f32 {
    0.25
}

fn default_center_epsilon() -> f32 {
    0.01
}

impl Default for TacticsConfig {
    fn default() -> Self {
        Self {
            pathfinding: PathfindingConfig::default(),
            immobile: ImmobileConfig::default(),
            aggressive: AggressiveConfig::default(),
            common: CommonConfig::default(),
            classic: ClassicConfig::default(),
            shell_width: default_shell_width(),
            center_epsilon: default_center_epsilon(),
        }
    }
}

impl TacticsConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a config from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse and validate a config from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: TacticsConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.pathfinding.max_steps == 0 {
            return Err(TacticsError::InvalidConfig(
                "pathfinding.max_steps must be positive".into(),
            ));
        }
        if self.pathfinding.initial_capacity == 0 {
            return Err(TacticsError::InvalidConfig(
                "pathfinding.initial_capacity must be positive".into(),
            ));
        }

        let chances = [
            ("immobile.shot_one_in", self.immobile.shot_one_in),
            ("aggressive.shot_one_in", self.aggressive.shot_one_in),
            (
                "aggressive.blocked_reaction_one_in",
                self.aggressive.blocked_reaction_one_in,
            ),
            ("common.retarget_one_in", self.common.retarget_one_in),
            ("common.blocked_turn_one_in", self.common.blocked_turn_one_in),
            ("common.shot_one_in", self.common.shot_one_in),
            ("classic.patrol_turn_one_in", self.classic.patrol_turn_one_in),
            ("classic.blocked_turn_one_in", self.classic.blocked_turn_one_in),
            ("classic.shot_one_in", self.classic.shot_one_in),
        ];
        if let Some((name, _)) = chances.iter().find(|(_, n)| *n == 0) {
            return Err(TacticsError::InvalidConfig(format!(
                "{} must be at least 1",
                name
            )));
        }

        if !(self.shell_width > 0.0 && self.shell_width <= 1.0) {
            return Err(TacticsError::InvalidConfig(format!(
                "shell_width ({}) must be in (0, 1]",
                self.shell_width
            )));
        }
        if !(self.center_epsilon >= 0.0 && self.center_epsilon < 0.5) {
            return Err(TacticsError::InvalidConfig(format!(
                "center_epsilon ({}) must be in [0, 0.5)",
                self.center_epsilon
            )));
        }

        Ok(())
    }
}
