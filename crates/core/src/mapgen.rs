//! Procedural level generation split into coherent submodules.

pub mod model;
pub mod placement;

mod corridors;
mod generator;
mod hardness;
mod layout;

use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::rng::DungeonRng;

pub use generator::MapGenerator;
pub use model::GeneratedLevel;
pub use placement::{is_open_room_cell, random_location};

/// Retries generation on the same stream until an attempt succeeds or the budget runs out.
pub fn generate_level(
    config: &GenerationConfig,
    rng: &mut DungeonRng,
) -> Result<GeneratedLevel, GenerationError> {
    let generator = MapGenerator::new(config.clone());
    let attempts = config.max_attempts.max(1);
    for attempt in 1..=attempts {
        match generator.generate(rng) {
            Ok(level) => {
                log::debug!(
                    "generated {}x{} dungeon with {} rooms on attempt {attempt}",
                    config.width,
                    config.height,
                    level.dungeon.rooms().len()
                );
                return Ok(level);
            }
            Err(err @ GenerationError::InvalidDimensions { .. }) => return Err(err),
            Err(err) => log::debug!("dungeon generation attempt {attempt} failed: {err}"),
        }
    }
    Err(GenerationError::AttemptsExhausted { attempts })
}
