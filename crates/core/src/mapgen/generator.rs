//! Generation pipeline: stone, smoothing, rooms, border, corridors, stairs, player cell.

use crate::config::GenerationConfig;
use crate::dungeon::Dungeon;
use crate::error::GenerationError;
use crate::rng::DungeonRng;

use super::corridors::connect_rooms;
use super::hardness::{fill_stone, smooth_hardness};
use super::layout::place_rooms;
use super::model::GeneratedLevel;
use super::placement::{place_staircases, random_location};

pub struct MapGenerator {
    config: GenerationConfig,
}

impl MapGenerator {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    /// One generation attempt. A failed attempt leaves nothing behind; callers retry with the
    /// same stream.
    pub fn generate(&self, rng: &mut DungeonRng) -> Result<GeneratedLevel, GenerationError> {
        let config = &self.config;
        if config.width < 3 || config.height < 3 {
            return Err(GenerationError::InvalidDimensions {
                width: config.width,
                height: config.height,
            });
        }

        let mut dungeon = Dungeon::new(config.width, config.height);
        fill_stone(&mut dungeon, config.hardness_seeds, rng);
        smooth_hardness(&mut dungeon, config.smoothing_passes);
        place_rooms(&mut dungeon, config, rng)?;
        dungeon.seal_border();
        connect_rooms(&mut dungeon, rng)?;
        place_staircases(&mut dungeon, rng)?;
        let player_start = random_location(&dungeon, rng).ok_or(GenerationError::NoFreeCell)?;

        Ok(GeneratedLevel { dungeon, player_start })
    }
}
