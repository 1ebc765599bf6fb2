//! Game construction and per-level population.

use super::*;
use crate::dungeon_file::SavedDungeon;
use crate::error::SimError;
use crate::mapgen::{GeneratedLevel, generate_level, random_location};

impl Game {
    pub fn new(seed: u64, config: GameConfig) -> Result<Self, SimError> {
        config.validate()?;
        let mut rng = DungeonRng::from_seed(seed);
        let level = generate_level(&config.generation, &mut rng)?;
        Self::from_level(seed, config, rng, level)
    }

    /// Starts on a loaded dungeon; monsters are spawned fresh from `seed`.
    pub fn from_saved(seed: u64, config: GameConfig, saved: SavedDungeon) -> Result<Self, SimError> {
        config.validate()?;
        let level = GeneratedLevel { dungeon: saved.dungeon, player_start: saved.player };
        Self::from_level(seed, config, DungeonRng::from_seed(seed), level)
    }

    fn from_level(
        seed: u64,
        config: GameConfig,
        rng: DungeonRng,
        level: GeneratedLevel,
    ) -> Result<Self, SimError> {
        let state = GameState::new(level, config.player_speed)?;
        let mut game = Self {
            seed,
            config,
            rng,
            state,
            scheduler: TurnScheduler::new(),
            log: Vec::new(),
            pending_player: None,
            outcome: None,
            monster_turns: 0,
            player_turns: 0,
        };
        game.populate_level()?;
        Ok(game)
    }

    /// Fresh queue for the current level: the player at 0, each new monster at its speed.
    pub(super) fn populate_level(&mut self) -> Result<(), SimError> {
        self.scheduler = TurnScheduler::new();
        self.scheduler.schedule(self.state.player_id, 0);

        let count = match self.config.monster_count {
            Some(count) => count,
            None => self
                .rng
                .range_inclusive(self.config.monster_count_min, self.config.monster_count_max),
        };
        let spawned = self.spawn_monsters(count);
        self.state.refresh_cost_fields()?;

        self.log.push(LogEvent::LevelEntered { depth: self.state.depth, monsters: spawned });
        log::info!(
            "entered depth {} with {spawned} monsters, player at {:?}",
            self.state.depth,
            self.state.player_pos()
        );
        Ok(())
    }

    fn spawn_monsters(&mut self, count: u32) -> usize {
        let mut spawned = 0;
        for _ in 0..count {
            let Some(pos) = random_location(&self.state.dungeon, &mut self.rng) else {
                log::warn!("no free room cell left; placed {spawned} of {count} monsters");
                break;
            };
            let traits = MonsterTraits::from_bits_truncate((self.rng.next_u64() & 0x0F) as u8);
            let speed = self
                .rng
                .range_inclusive(self.config.monster_speed_min, self.config.monster_speed_max);
            let id = self.state.spawn_actor(ActorKind::Monster(MonsterMind::new(traits)), pos, speed);
            self.scheduler.schedule(id, speed);
            spawned += 1;
        }
        spawned
    }
}
