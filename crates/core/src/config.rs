//! Tunable constants for dungeon generation and the simulation loop.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub width: usize,
    pub height: usize,
    pub min_rooms: usize,
    /// Extra rooms are drawn from `0..extra_room_randomness`.
    pub extra_room_randomness: usize,
    pub room_min_width: usize,
    pub room_min_height: usize,
    /// Added room size is drawn from `0..room_size_randomness` per axis.
    pub room_size_randomness: usize,
    pub hardness_seeds: usize,
    pub smoothing_passes: u32,
    pub max_attempts: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 21,
            min_rooms: 6,
            extra_room_randomness: 4,
            room_min_width: 4,
            room_min_height: 3,
            room_size_randomness: 6,
            hardness_seeds: 10,
            smoothing_passes: 2,
            max_attempts: 500,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub monster_count_min: u32,
    pub monster_count_max: u32,
    /// Fixed monster count overriding the random range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monster_count: Option<u32>,
    pub player_speed: u32,
    pub monster_speed_min: u32,
    pub monster_speed_max: u32,
    pub dig_strength: u8,
    pub generation: GenerationConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            monster_count_min: 5,
            monster_count_max: 10,
            monster_count: None,
            player_speed: 10,
            monster_speed_min: 5,
            monster_speed_max: 20,
            dig_strength: 85,
            generation: GenerationConfig::default(),
        }
    }
}

impl GameConfig {
    /// Rejects ranges the simulation cannot sample from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monster_count_min > self.monster_count_max {
            return Err(ConfigError::EmptyRange {
                field: "monster_count",
                min: self.monster_count_min,
                max: self.monster_count_max,
            });
        }
        if self.monster_speed_min > self.monster_speed_max {
            return Err(ConfigError::EmptyRange {
                field: "monster_speed",
                min: self.monster_speed_min,
                max: self.monster_speed_max,
            });
        }
        if self.monster_speed_min == 0 {
            return Err(ConfigError::ZeroSpeed { field: "monster_speed_min" });
        }
        if self.player_speed == 0 {
            return Err(ConfigError::ZeroSpeed { field: "player_speed" });
        }
        Ok(())
    }
}
