use slotmap::SlotMap;

use crate::dungeon::Dungeon;
use crate::error::HeapError;
use crate::mapgen::GeneratedLevel;
use crate::pathfinding::CostFields;
use crate::types::*;

#[derive(Clone, Debug)]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,
    pub pos: Pos,
    pub speed: u32,
    pub alive: bool,
}

impl Actor {
    pub fn is_player(&self) -> bool {
        self.kind == ActorKind::Player
    }

    pub fn mind(&self) -> Option<&MonsterMind> {
        match &self.kind {
            ActorKind::Monster(mind) => Some(mind),
            ActorKind::Player => None,
        }
    }

    pub fn mind_mut(&mut self) -> Option<&mut MonsterMind> {
        match &mut self.kind {
            ActorKind::Monster(mind) => Some(mind),
            ActorKind::Player => None,
        }
    }

    /// `@` for the player, the hex digit of the trait bits for monsters.
    pub fn glyph(&self) -> char {
        match self.kind {
            ActorKind::Player => '@',
            ActorKind::Monster(mind) => {
                char::from_digit(u32::from(mind.traits.bits()), 16).unwrap_or('?')
            }
        }
    }
}

pub struct GameState {
    pub dungeon: Dungeon,
    pub actors: SlotMap<ActorId, Actor>,
    pub player_id: ActorId,
    pub cost_fields: CostFields,
    pub depth: i32,
}

impl GameState {
    pub fn new(level: GeneratedLevel, player_speed: u32) -> Result<Self, HeapError> {
        let GeneratedLevel { dungeon, player_start } = level;
        let cost_fields = CostFields::compute(&dungeon, player_start)?;
        let mut state = Self {
            dungeon,
            actors: SlotMap::with_key(),
            player_id: ActorId::default(),
            cost_fields,
            depth: 0,
        };
        state.player_id = state.spawn_actor(ActorKind::Player, player_start, player_speed);
        Ok(state)
    }

    pub fn player(&self) -> &Actor {
        &self.actors[self.player_id]
    }

    pub fn player_pos(&self) -> Pos {
        self.player().pos
    }

    pub fn spawn_actor(&mut self, kind: ActorKind, pos: Pos, speed: u32) -> ActorId {
        let id = self.actors.insert(Actor { id: ActorId::default(), kind, pos, speed, alive: true });
        self.actors[id].id = id;
        self.dungeon.set_occupant(pos, Some(id));
        id
    }

    /// Marks the actor dead and vacates its cell. The arena entry stays until reaped.
    pub fn kill_actor(&mut self, id: ActorId) {
        let Some(actor) = self.actors.get_mut(id) else {
            return;
        };
        actor.alive = false;
        let pos = actor.pos;
        if self.dungeon.occupant_at(pos) == Some(id) {
            self.dungeon.set_occupant(pos, None);
        }
    }

    pub fn move_actor(&mut self, id: ActorId, to: Pos) {
        let Some(actor) = self.actors.get_mut(id) else {
            return;
        };
        let from = actor.pos;
        actor.pos = to;
        if self.dungeon.occupant_at(from) == Some(id) {
            self.dungeon.set_occupant(from, None);
        }
        self.dungeon.set_occupant(to, Some(id));
    }

    /// Drops the actor from the arena, vacating its cell if it still holds it.
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        let actor = self.actors.remove(id)?;
        if self.dungeon.occupant_at(actor.pos) == Some(id) {
            self.dungeon.set_occupant(actor.pos, None);
        }
        Some(actor)
    }

    /// Swaps in a new level, keeping only the player.
    pub fn install_level(&mut self, level: GeneratedLevel) -> Result<(), HeapError> {
        let player_id = self.player_id;
        self.actors.retain(|id, _| id == player_id);
        self.dungeon = level.dungeon;
        let player = &mut self.actors[player_id];
        player.pos = level.player_start;
        self.dungeon.set_occupant(level.player_start, Some(player_id));
        self.refresh_cost_fields()
    }

    pub fn refresh_cost_fields(&mut self) -> Result<(), HeapError> {
        self.cost_fields = CostFields::compute(&self.dungeon, self.player_pos())?;
        Ok(())
    }

    pub fn living_monsters(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values().filter(|actor| actor.alive && !actor.is_player())
    }
}
