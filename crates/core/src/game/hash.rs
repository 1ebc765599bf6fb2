//! Stable snapshot hashing for deterministic verification.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.monster_turns);
        hasher.write_u64(self.player_turns);
        hasher.write_i32(self.state.depth);
        hasher.write_u8(match self.outcome {
            None => 0,
            Some(Outcome::Win) => 1,
            Some(Outcome::Lose) => 2,
            Some(Outcome::Quit) => 3,
        });
        for cell in self.state.dungeon.cells() {
            hasher.write_u8(cell.kind as u8);
            hasher.write_u8(cell.hardness);
        }
        for actor in self.state.actors.values() {
            hasher.write_i32(actor.pos.x);
            hasher.write_i32(actor.pos.y);
            hasher.write_u32(actor.speed);
            hasher.write_u8(u8::from(actor.alive));
            if let Some(mind) = actor.mind() {
                hasher.write_u8(mind.traits.bits());
                if let Some(seen) = mind.last_seen_player {
                    hasher.write_i32(seen.x);
                    hasher.write_i32(seen.y);
                }
            }
        }
        hasher.finish()
    }
}
