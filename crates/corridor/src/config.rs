//! Game configuration
//!
//! All gameplay tuning lives here. Values load from an optional TOML file
//! (`corridor.toml` next to the binary); a missing or partial file falls
//! back to the defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file was read but is not valid TOML for this schema
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level game configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Corridor geometry
    pub stage: StageConfig,
    /// Player settings
    pub player: PlayerConfig,
    /// Match rules (health, timers)
    pub rules: RulesConfig,
    /// Enemy settings
    pub enemies: EnemyConfig,
    /// Obstacle settings
    pub obstacles: ObstacleConfig,
    /// Power-up settings
    pub powerups: PowerUpConfig,
    /// Fireball settings
    pub fireballs: FireballConfig,
    /// Exit door settings
    pub door: DoorConfig,
    /// Simulation driver settings
    pub sim: SimConfig,
}

impl GameConfig {
    /// Default config file name looked up by [`Self::load_or_default`]
    pub const DEFAULT_PATH: &'static str = "corridor.toml";

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Load `corridor.toml` if present, otherwise return defaults
    pub fn load_or_default() -> Self {
        if Path::new(Self::DEFAULT_PATH).exists() {
            match Self::load(Self::DEFAULT_PATH) {
                Ok(config) => return config,
                Err(e) => log::warn!("ignoring {}: {}", Self::DEFAULT_PATH, e),
            }
        }
        Self::default()
    }
}

/// The flat corridor the run takes place in
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Y coordinate of the ground plane
    pub ground_y: f32,
    /// Far end of the corridor along X
    pub max_x: f32,
    /// The fixed Z lane every entity lives on
    pub lane_z: f32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            ground_y: 0.0,
            max_x: 100.0,
            lane_z: 0.0,
        }
    }
}

/// Player settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Collider extent (width, height, depth)
    pub size: [f32; 3],
    /// Forward run speed in units per second
    pub run_speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: [1.0, 2.0, 1.0],
            run_speed: 5.0,
        }
    }
}

/// Match rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Starting and maximum health
    pub max_health: u32,
    /// How long an invincibility power-up lasts, in seconds
    pub invincibility_duration: f32,
    /// Match length in seconds; reaching zero loses the run
    pub game_duration: f32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_health: 3,
            invincibility_duration: 5.0,
            game_duration: 180.0,
        }
    }
}

/// Enemy settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// How many enemies to spawn
    pub count: usize,
    /// Enemy footprint (X/Z extent and contact radius)
    pub size: f32,
    /// Enemy collider height
    pub height: f32,
    /// Patrol speed in units per second
    pub move_speed: f32,
    /// Shortest patrol leg
    pub min_move_distance: f32,
    /// Longest patrol leg
    pub max_move_distance: f32,
    /// Minimum spacing between spawned enemies (doubled for the check)
    pub spawn_padding: f32,
    /// Damage dealt on player contact
    pub damage: u32,
    /// Seconds between contact damage ticks
    pub damage_cooldown: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            count: 5,
            size: 1.0,
            height: 1.0,
            move_speed: 2.0,
            min_move_distance: 3.0,
            max_move_distance: 8.0,
            spawn_padding: 2.0,
            damage: 1,
            damage_cooldown: 1.0,
        }
    }
}

/// Obstacle settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    /// How many obstacles to spawn (one per corridor section)
    pub count: usize,
    /// Obstacle cube edge length
    pub size: f32,
    /// Margin kept from section edges when placing
    pub spawn_padding: f32,
    /// Lowest spawn height above the ground
    pub min_height: f32,
    /// Highest spawn height above the ground
    pub max_height: f32,
    /// Probability that an obstacle is deadly
    pub deadly_chance: f64,
    /// Extra X/Y margin applied to the overlap test
    pub collision_padding: f32,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            count: 10,
            size: 1.0,
            spawn_padding: 2.0,
            min_height: 1.0,
            max_height: 5.0,
            deadly_chance: 0.3,
            collision_padding: 0.1,
        }
    }
}

/// Power-up settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpConfig {
    /// How many power-ups to attempt to spawn (one per corridor section)
    pub count: usize,
    /// Power-up extent and pickup radius
    pub size: f32,
    /// Spawn height above the ground
    pub height: f32,
    /// Margin kept from section edges when placing
    pub spawn_padding: f32,
    /// Multiplier on `size` for the obstacle-clearance check
    pub clearance_factor: f32,
    /// Placement attempts per section before giving up
    pub max_attempts: usize,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            count: 10,
            size: 0.5,
            height: 1.0,
            spawn_padding: 2.0,
            clearance_factor: 1.5,
            max_attempts: 10,
        }
    }
}

/// Fireball settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FireballConfig {
    /// Flight speed in units per second
    pub speed: f32,
    /// Fireball extent and hit radius
    pub size: f32,
    /// Seconds before a fireball burns out
    pub lifetime: f32,
    /// Vertical offset above the spawn origin
    pub spawn_height: f32,
    /// How far past the stage ends a fireball may fly before culling
    pub cull_margin: f32,
}

impl Default for FireballConfig {
    fn default() -> Self {
        Self {
            speed: 10.0,
            size: 0.5,
            lifetime: 3.0,
            spawn_height: 1.5,
            cull_margin: 5.0,
        }
    }
}

/// Exit door settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    /// Door cube edge length
    pub size: f32,
    /// Distance past the farthest object the door spawns at
    pub spawn_distance: f32,
    /// Extra X/Y margin applied to the win check
    pub collision_padding: f32,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            size: 1.0,
            spawn_distance: 10.0,
            collision_padding: 0.1,
        }
    }
}

/// Simulation driver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed timestep in seconds
    pub timestep: f32,
    /// Hard cap on simulated frames
    pub max_frames: u64,
    /// RNG seed for deterministic spawns; random when absent
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 60.0,
            max_frames: 20_000,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tuning_constants() {
        let config = GameConfig::default();
        assert_eq!(config.rules.max_health, 3);
        assert_eq!(config.enemies.count, 5);
        assert_eq!(config.obstacles.count, 10);
        assert!((config.fireballs.lifetime - 3.0).abs() < f32::EPSILON);
        assert!((config.rules.game_duration - 180.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: GameConfig = toml::from_str(
            r#"
            [enemies]
            count = 2
            move_speed = 4.5
            "#,
        )
        .unwrap();

        assert_eq!(config.enemies.count, 2);
        assert!((config.enemies.move_speed - 4.5).abs() < f32::EPSILON);
        // Untouched sections keep their defaults
        assert_eq!(config.rules.max_health, 3);
        assert_eq!(config.powerups.count, 10);
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let result = toml::from_str::<GameConfig>("enemies = \"lots\"");
        assert!(result.is_err());
    }
}
