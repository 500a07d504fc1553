//! Probabilistic item spawning
//!
//! One spawn attempt per tick, independent across ticks. All draws come from
//! the state's seeded RNG, in a fixed order, so runs replay exactly.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Item, ItemKind};
use crate::consts::*;

/// Roll the per-tick spawn chance and push at most one new item
pub fn try_spawn(state: &mut GameState) {
    if state.rng.random::<f32>() >= SPAWN_CHANCE {
        return;
    }

    // Both rolls always happen, even for the single-variant bonus category,
    // so the draw sequence does not depend on the outcome.
    let category: u32 = state.rng.random_range(1..=10);
    let variant: u32 = state.rng.random_range(1..=2);

    let kind = match category {
        // Good (60%)
        1..=6 => {
            if variant == 1 {
                ItemKind::FrogEye
            } else {
                ItemKind::Mushroom
            }
        }
        // Bad (30%)
        7..=9 => {
            if variant == 1 {
                ItemKind::Rock
            } else {
                ItemKind::Slime
            }
        }
        // Bonus (10%)
        _ => ItemKind::Potion,
    };

    let x = state.rng.random_range(0.0..=(PLAYFIELD_WIDTH - ITEM_SIZE));
    let fall_speed = state.rng.random_range(MIN_FALL_SPEED..=MAX_FALL_SPEED) as f32;

    let id = state.next_entity_id();
    state.items.push(Item {
        id,
        kind,
        pos: Vec2::new(x, ITEM_SPAWN_Y),
        fall_speed,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_most_one_spawn_per_attempt() {
        let mut state = GameState::new(1);
        for _ in 0..1000 {
            let before = state.items.len();
            try_spawn(&mut state);
            assert!(state.items.len() <= before + 1);
        }
    }

    #[test]
    fn test_spawned_items_are_well_formed() {
        let mut state = GameState::new(0xA1C4E);
        for _ in 0..20_000 {
            try_spawn(&mut state);
        }
        assert!(!state.items.is_empty());

        for item in &state.items {
            assert!(item.pos.x >= 0.0);
            assert!(item.pos.x <= PLAYFIELD_WIDTH - ITEM_SIZE);
            assert_eq!(item.pos.y, ITEM_SPAWN_Y);
            assert!(item.fall_speed >= MIN_FALL_SPEED as f32);
            assert!(item.fall_speed <= MAX_FALL_SPEED as f32);
        }
    }

    #[test]
    fn test_all_kinds_eventually_spawn() {
        // ~400 spawns at p=0.02; every category shows up with any seed
        let mut state = GameState::new(99);
        for _ in 0..20_000 {
            try_spawn(&mut state);
        }
        for kind in [
            ItemKind::FrogEye,
            ItemKind::Mushroom,
            ItemKind::Rock,
            ItemKind::Slime,
            ItemKind::Potion,
        ] {
            assert!(
                state.items.iter().any(|i| i.kind == kind),
                "no {kind:?} spawned"
            );
        }
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = GameState::new(12345);
        let mut b = GameState::new(12345);
        for _ in 0..5_000 {
            try_spawn(&mut a);
            try_spawn(&mut b);
        }
        assert_eq!(a.items.len(), b.items.len());
        for (x, y) in a.items.iter().zip(&b.items) {
            assert_eq!(x.kind, y.kind);
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.fall_speed, y.fall_speed);
        }
    }
}
