//! Monster turn decisions: pick a target, pick a neighbouring cell, then apply the move.
//! Targeting is an ordered rule list; the erratic override is a separate coin flip.
//! It does not schedule turns or recompute cost fields.

use crate::dungeon::{DigOutcome, Dungeon};
use crate::pathfinding::{CostField, CostFields, Traversal, UNREACHABLE};
use crate::rng::DungeonRng;
use crate::state::GameState;
use crate::types::{ActorId, LogEvent, MonsterMind, MonsterTraits, Pos};

use super::sight::{has_line_of_sight, step_toward};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetRule {
    Telepathy,
    LineOfSight,
    Memory,
}

/// Evaluated in order; the first rule that yields a position wins.
pub const TARGET_RULES: [TargetRule; 3] =
    [TargetRule::Telepathy, TargetRule::LineOfSight, TargetRule::Memory];

impl TargetRule {
    fn evaluate(self, dungeon: &Dungeon, pos: Pos, mind: &MonsterMind, player: Pos) -> Option<Pos> {
        match self {
            Self::Telepathy => mind.traits.contains(MonsterTraits::TELEPATHIC).then_some(player),
            Self::LineOfSight => has_line_of_sight(dungeon, pos, player).then_some(player),
            Self::Memory => mind.last_seen_player,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target {
    pub pos: Pos,
    pub rule: TargetRule,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonsterPlan {
    pub target: Option<Target>,
    pub destination: Option<Pos>,
    pub erratic: bool,
}

impl MonsterPlan {
    pub fn saw_player(&self) -> bool {
        self.target.is_some_and(|target| target.rule == TargetRule::LineOfSight)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Stayed,
    Moved { to: Pos },
    Dug { at: Pos, remaining: u8 },
    Killed { victim: ActorId, at: Pos, was_player: bool },
}

pub fn select_target(dungeon: &Dungeon, pos: Pos, mind: &MonsterMind, player: Pos) -> Option<Target> {
    TARGET_RULES.iter().find_map(|&rule| {
        rule.evaluate(dungeon, pos, mind, player).map(|target| Target { pos: target, rule })
    })
}

fn traversal_for(traits: MonsterTraits) -> Traversal {
    if traits.contains(MonsterTraits::TUNNELING) { Traversal::Tunneling } else { Traversal::Walking }
}

/// Lowest-valued in-bounds neighbour; equal values go to a later non-Stone cell.
pub fn descend_cost_field(dungeon: &Dungeon, field: &CostField, pos: Pos) -> Option<Pos> {
    let mut best: Option<(Pos, u32)> = None;
    for next in pos.neighbors8() {
        let value = field.distance(next);
        if value == UNREACHABLE {
            continue;
        }
        let better = match best {
            None => true,
            Some((_, best_value)) => {
                value < best_value || (value == best_value && !dungeon.is_stone(next))
            }
        };
        if better {
            best = Some((next, value));
        }
    }
    best.map(|(next, _)| next)
}

fn step_for_target(
    dungeon: &Dungeon,
    fields: &CostFields,
    pos: Pos,
    traits: MonsterTraits,
    target: Pos,
) -> Option<Pos> {
    if traits.contains(MonsterTraits::INTELLIGENT) {
        return descend_cost_field(dungeon, fields.field(traversal_for(traits)), pos);
    }
    let next = step_toward(pos, target);
    let tunneling = traits.contains(MonsterTraits::TUNNELING);
    if next == pos || dungeon.is_immutable(next) || (dungeon.is_stone(next) && !tunneling) {
        return None;
    }
    Some(next)
}

/// Uniform choice among mutable neighbours, Stone only for tunnelers.
pub fn random_open_neighbor(
    dungeon: &Dungeon,
    pos: Pos,
    tunneling: bool,
    rng: &mut DungeonRng,
) -> Option<Pos> {
    let open: Vec<Pos> = pos
        .neighbors8()
        .into_iter()
        .filter(|&next| !dungeon.is_immutable(next) && (tunneling || !dungeon.is_stone(next)))
        .collect();
    if open.is_empty() {
        return None;
    }
    Some(open[rng.below(open.len())])
}

pub fn plan_monster_turn(
    dungeon: &Dungeon,
    fields: &CostFields,
    pos: Pos,
    mind: &MonsterMind,
    player: Pos,
    rng: &mut DungeonRng,
) -> MonsterPlan {
    let target = select_target(dungeon, pos, mind, player);
    let mut destination =
        target.and_then(|target| step_for_target(dungeon, fields, pos, mind.traits, target.pos));

    let erratic = mind.traits.contains(MonsterTraits::ERRATIC) && rng.coin_flip();
    if erratic {
        let tunneling = mind.traits.contains(MonsterTraits::TUNNELING);
        destination = random_open_neighbor(dungeon, pos, tunneling, rng);
    }

    MonsterPlan { target, destination, erratic }
}

/// Applies a plan to the live state. Sightings are remembered even when the move is erratic.
pub(crate) fn apply_monster_plan(
    state: &mut GameState,
    id: ActorId,
    plan: &MonsterPlan,
    dig_strength: u8,
    log: &mut Vec<LogEvent>,
) -> MoveResult {
    let player_pos = state.player_pos();
    let Some(actor) = state.actors.get_mut(id) else {
        return MoveResult::Stayed;
    };
    let from = actor.pos;
    let Some(mind) = actor.mind_mut() else {
        return MoveResult::Stayed;
    };
    if plan.saw_player() {
        mind.last_seen_player = Some(player_pos);
    }

    let Some(to) = plan.destination.filter(|&to| to != from) else {
        return MoveResult::Stayed;
    };
    if mind.last_seen_player == Some(to) {
        mind.last_seen_player = None;
    }
    let tunneling = mind.traits.contains(MonsterTraits::TUNNELING);

    if state.dungeon.is_stone(to) {
        if !tunneling {
            return MoveResult::Stayed;
        }
        match state.dungeon.dig(to, dig_strength) {
            DigOutcome::Opened => {}
            DigOutcome::Weakened { remaining } => {
                log.push(LogEvent::TunnelDug { by: id, at: to, remaining });
                return MoveResult::Dug { at: to, remaining };
            }
            DigOutcome::Refused => return MoveResult::Stayed,
        }
    }

    let victim = state.dungeon.occupant_at(to).filter(|&victim| victim != id);
    if let Some(victim) = victim {
        state.kill_actor(victim);
        log.push(LogEvent::ActorKilled { killer: id, victim, at: to });
    }
    state.move_actor(id, to);
    match victim {
        Some(victim) => MoveResult::Killed { victim, at: to, was_player: victim == state.player_id },
        None => MoveResult::Moved { to },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::{monster_at, open_arena_state, walled_corridor_state};
    use crate::types::CellKind;

    fn plan_for(state: &GameState, id: ActorId, seed: u64) -> MonsterPlan {
        let actor = &state.actors[id];
        let mind = *actor.mind().expect("monster");
        plan_monster_turn(
            &state.dungeon,
            &state.cost_fields,
            actor.pos,
            &mind,
            state.player_pos(),
            &mut DungeonRng::from_seed(seed),
        )
    }

    #[test]
    fn telepathic_monster_targets_player_through_stone() {
        let mut state = walled_corridor_state();
        let player = state.player_pos();
        let id = monster_at(&mut state, Pos { y: 5, x: 9 }, MonsterTraits::TELEPATHIC, 10);
        assert!(!has_line_of_sight(&state.dungeon, Pos { y: 5, x: 9 }, player));

        let plan = plan_for(&state, id, 1);
        assert_eq!(plan.target, Some(Target { pos: player, rule: TargetRule::Telepathy }));
        assert!(!plan.saw_player());
    }

    #[test]
    fn sighting_is_remembered_and_memory_is_used_later() {
        let mut state = open_arena_state(Pos { y: 3, x: 2 });
        let id = monster_at(&mut state, Pos { y: 3, x: 8 }, MonsterTraits::empty(), 10);
        let plan = plan_for(&state, id, 2);
        assert_eq!(plan.target.map(|t| t.rule), Some(TargetRule::LineOfSight));
        assert_eq!(plan.destination, Some(Pos { y: 3, x: 7 }));

        let mut log = Vec::new();
        let result = apply_monster_plan(&mut state, id, &plan, 85, &mut log);
        assert_eq!(result, MoveResult::Moved { to: Pos { y: 3, x: 7 } });
        let remembered = state.actors[id].mind().and_then(|mind| mind.last_seen_player);
        assert_eq!(remembered, Some(Pos { y: 3, x: 2 }));

        state.dungeon.set_stone(Pos { y: 3, x: 5 }, 100);
        state.dungeon.set_stone(Pos { y: 2, x: 6 }, 100);
        state.dungeon.set_stone(Pos { y: 4, x: 6 }, 100);
        let mind = *state.actors[id].mind().expect("monster");
        let target = select_target(&state.dungeon, Pos { y: 3, x: 7 }, &mind, state.player_pos());
        assert_eq!(target, Some(Target { pos: Pos { y: 3, x: 2 }, rule: TargetRule::Memory }));
    }

    #[test]
    fn unseen_player_without_memory_gives_no_target() {
        let mut state = walled_corridor_state();
        let id = monster_at(&mut state, Pos { y: 5, x: 9 }, MonsterTraits::INTELLIGENT, 10);
        let plan = plan_for(&state, id, 3);
        assert_eq!(plan, MonsterPlan { target: None, destination: None, erratic: false });
    }

    #[test]
    fn blocked_non_tunneler_cancels_its_step() {
        let mut state = open_arena_state(Pos { y: 3, x: 2 });
        let id = monster_at(&mut state, Pos { y: 3, x: 6 }, MonsterTraits::empty(), 10);
        if let Some(mind) = state.actors[id].mind_mut() {
            mind.last_seen_player = Some(Pos { y: 3, x: 2 });
        }
        state.dungeon.set_stone(Pos { y: 3, x: 5 }, 40);

        let plan = plan_for(&state, id, 4);
        assert_eq!(plan.target.map(|t| t.rule), Some(TargetRule::Memory));
        assert_eq!(plan.destination, None);
        let mut log = Vec::new();
        assert_eq!(apply_monster_plan(&mut state, id, &plan, 85, &mut log), MoveResult::Stayed);
        assert_eq!(state.actors[id].pos, Pos { y: 3, x: 6 });
    }

    #[test]
    fn tunneler_digs_for_several_turns_before_stepping_in() {
        let mut state = open_arena_state(Pos { y: 3, x: 2 });
        let wall = Pos { y: 3, x: 5 };
        state.dungeon.set_stone(wall, 200);
        let id = monster_at(&mut state, Pos { y: 3, x: 6 }, MonsterTraits::TUNNELING, 10);
        if let Some(mind) = state.actors[id].mind_mut() {
            mind.last_seen_player = Some(Pos { y: 3, x: 2 });
        }

        let mut log = Vec::new();
        let mut results = Vec::new();
        for seed in 0..3 {
            let plan = plan_for(&state, id, seed);
            assert_eq!(plan.destination, Some(wall));
            results.push(apply_monster_plan(&mut state, id, &plan, 85, &mut log));
        }
        assert_eq!(
            results,
            vec![
                MoveResult::Dug { at: wall, remaining: 115 },
                MoveResult::Dug { at: wall, remaining: 30 },
                MoveResult::Moved { to: wall },
            ]
        );
        assert_eq!(state.dungeon.kind_at(wall), CellKind::Hall);
        assert_eq!(state.dungeon.occupant_at(wall), Some(id));
    }

    #[test]
    fn intelligent_monster_follows_the_walking_field() {
        let mut state = open_arena_state(Pos { y: 3, x: 2 });
        state.dungeon.set_stone(Pos { y: 3, x: 5 }, 40);
        state.refresh_cost_fields().expect("solve");
        let id = monster_at(
            &mut state,
            Pos { y: 3, x: 6 },
            MonsterTraits::INTELLIGENT | MonsterTraits::TELEPATHIC,
            10,
        );
        let plan = plan_for(&state, id, 5);
        let next = plan.destination.expect("route around the stone exists");
        assert_ne!(next, Pos { y: 3, x: 5 });
        assert_eq!(next.x, 5);
        assert_eq!(
            state.cost_fields.walking.distance(next),
            state.cost_fields.walking.distance(Pos { y: 3, x: 6 }) - 1
        );
    }

    #[test]
    fn equal_field_values_prefer_a_non_stone_neighbour() {
        let mut state = open_arena_state(Pos { y: 3, x: 2 });
        let stone = Pos { y: 4, x: 4 };
        state.dungeon.set_stone(stone, 10);
        let fields = CostFields::compute(&state.dungeon, state.player_pos()).expect("solve");
        let from = Pos { y: 3, x: 5 };
        assert_eq!(fields.tunneling.distance(stone), fields.tunneling.distance(Pos { y: 3, x: 4 }));
        let chosen = descend_cost_field(&state.dungeon, &fields.tunneling, from)
            .expect("finite neighbours exist");
        assert!(!state.dungeon.is_stone(chosen));
        assert_eq!(fields.tunneling.distance(chosen), 2);
    }

    #[test]
    fn moving_onto_the_player_kills_them() {
        let mut state = open_arena_state(Pos { y: 3, x: 2 });
        let id = monster_at(&mut state, Pos { y: 3, x: 3 }, MonsterTraits::empty(), 10);
        let plan = plan_for(&state, id, 6);
        assert_eq!(plan.destination, Some(Pos { y: 3, x: 2 }));

        let mut log = Vec::new();
        let result = apply_monster_plan(&mut state, id, &plan, 85, &mut log);
        assert_eq!(
            result,
            MoveResult::Killed { victim: state.player_id, at: Pos { y: 3, x: 2 }, was_player: true }
        );
        assert!(!state.player().alive);
        assert_eq!(state.dungeon.occupant_at(Pos { y: 3, x: 2 }), Some(id));
        let remembered = state.actors[id].mind().and_then(|mind| mind.last_seen_player);
        assert_eq!(remembered, None, "reaching the remembered cell clears the memory");
    }

    #[test]
    fn erratic_override_picks_an_open_neighbour() {
        let mut state = open_arena_state(Pos { y: 6, x: 9 });
        let origin = Pos { y: 2, x: 2 };
        let id = monster_at(&mut state, origin, MonsterTraits::ERRATIC, 10);
        let mut erratic_turns = 0;
        for seed in 0..32 {
            let plan = plan_for(&state, id, seed);
            if plan.erratic {
                erratic_turns += 1;
                let to = plan.destination.expect("open neighbours exist");
                assert!(origin.neighbors8().contains(&to));
                assert!(!state.dungeon.is_stone(to));
            }
        }
        assert!(erratic_turns > 0 && erratic_turns < 32);
    }

    fn entomb(state: &mut GameState, pos: Pos) {
        for next in pos.neighbors8() {
            state.dungeon.set_stone(next, 60);
        }
    }

    #[test]
    fn erratic_walker_boxed_in_by_stone_stays_put() {
        let mut state = open_arena_state(Pos { y: 6, x: 9 });
        let origin = Pos { y: 3, x: 3 };
        entomb(&mut state, origin);
        let id = monster_at(&mut state, origin, MonsterTraits::ERRATIC, 10);

        let mut erratic_turns = 0;
        for seed in 0..32 {
            let plan = plan_for(&state, id, seed);
            erratic_turns += usize::from(plan.erratic);
            assert_eq!(plan.target, None);
            assert_eq!(plan.destination, None, "seed {seed}");
        }
        assert!(erratic_turns > 0);
    }

    #[test]
    fn erratic_tunneler_may_turn_into_stone() {
        let mut state = open_arena_state(Pos { y: 6, x: 9 });
        let origin = Pos { y: 3, x: 3 };
        entomb(&mut state, origin);
        let traits = MonsterTraits::ERRATIC | MonsterTraits::TUNNELING;
        let id = monster_at(&mut state, origin, traits, 10);

        let mut into_stone = 0;
        for seed in 0..32 {
            let plan = plan_for(&state, id, seed);
            if plan.erratic {
                let to = plan.destination.expect("stone neighbours are open to a tunneler");
                assert!(origin.neighbors8().contains(&to));
                assert!(state.dungeon.is_stone(to));
                into_stone += 1;
            } else {
                assert_eq!(plan.destination, None);
            }
        }
        assert!(into_stone > 0);
    }

    #[test]
    fn intelligent_walker_without_a_finite_neighbour_cancels() {
        let mut state = walled_corridor_state();
        let origin = Pos { y: 5, x: 9 };
        let traits = MonsterTraits::INTELLIGENT | MonsterTraits::TELEPATHIC;
        let id = monster_at(&mut state, origin, traits, 10);
        let walking = &state.cost_fields.walking;
        assert!(origin.neighbors8().iter().all(|&next| walking.distance(next) == UNREACHABLE));

        let plan = plan_for(&state, id, 7);
        assert_eq!(plan.target.map(|target| target.rule), Some(TargetRule::Telepathy));
        assert_eq!(plan.destination, None);
        let mut log = Vec::new();
        assert_eq!(apply_monster_plan(&mut state, id, &plan, 85, &mut log), MoveResult::Stayed);
        assert_eq!(state.actors[id].pos, origin);
    }
}
