//! Fixed timestep simulation tick
//!
//! Advances the game deterministically: input movement, counters, spawning,
//! item physics, collision resolution, off-screen cleanup, phase transitions.

use rand::Rng;

use super::spawn;
use super::state::{GameEvent, GamePhase, GameState, ItemKind};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Dash modifier (held); only honored when the cooldown is 0
    pub dash: bool,
    /// Start the run from the menu
    pub start: bool,
    /// Restart after game over
    pub restart: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Menu => {
            if input.start {
                state.phase = GamePhase::Playing;
            }
        }

        GamePhase::Playing => {
            state.time_ticks += 1;

            // Cooldown counts down before the dash gate, so a dash tick ends
            // with the cooldown at exactly DASH_COOLDOWN_TICKS.
            if state.dash_cooldown > 0 {
                state.dash_cooldown -= 1;
            }

            let mut speed = BASE_MOVE_SPEED;
            if input.dash && state.dash_cooldown == 0 {
                speed = DASH_SPEED;
                state.dash_cooldown = DASH_COOLDOWN_TICKS;
                state.events.push(GameEvent::DashUsed);
            }
            if input.left {
                state.cauldron.pos.x -= speed;
            }
            if input.right {
                state.cauldron.pos.x += speed;
            }
            state.cauldron.clamp_to_playfield();

            if state.score > state.high_score {
                state.high_score = state.score;
            }

            spawn::try_spawn(state);

            // Gravity: simple linear fall, no acceleration
            for item in &mut state.items {
                item.pos.y += item.fall_speed;
            }

            resolve_catches(state);
            cleanup_missed(state);

            if state.vitality == 0 {
                state.phase = GamePhase::GameOver;
                state.events.push(GameEvent::GameOver);
            }
        }

        GamePhase::GameOver => {
            if input.restart {
                let high_score = state.high_score;
                // Derive the next run's seed from the old RNG so a whole
                // session replays from the initial seed alone.
                let next_seed: u64 = state.rng.random();
                *state = GameState::new(next_seed);
                state.high_score = high_score;
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::RunRestarted);
            }
        }
    }
}

/// Resolve cauldron/item collisions, applying each item's effect atomically
/// and removing it in the same pass (spawn order preserved).
fn resolve_catches(state: &mut GameState) {
    let cauldron = state.cauldron.rect();
    let items = std::mem::take(&mut state.items);
    let mut survivors = Vec::with_capacity(items.len());

    for item in items {
        if item.rect().overlaps(&cauldron) {
            apply_catch(state, item.kind);
        } else {
            survivors.push(item);
        }
    }

    state.items = survivors;
}

fn apply_catch(state: &mut GameState, kind: ItemKind) {
    match kind {
        ItemKind::FrogEye | ItemKind::Mushroom => {
            state.combo += 1;
            state.score += GOOD_CATCH_SCORE * state.combo as u64;
        }
        ItemKind::Rock | ItemKind::Slime => {
            state.vitality = state.vitality.saturating_sub(1);
            state.combo = 0;
        }
        ItemKind::Potion => {
            state.score += BONUS_SCORE;
            state.combo += BONUS_COMBO_GAIN;
        }
    }
    state.best_combo = state.best_combo.max(state.combo);
    state.events.push(GameEvent::Caught(kind));
}

/// Drop items that fell past the bottom edge. Losing a good ingredient
/// breaks the combo; it never costs vitality.
fn cleanup_missed(state: &mut GameState) {
    let mut dropped_good = false;
    state.items.retain(|item| {
        if item.pos.y > PLAYFIELD_HEIGHT {
            if item.kind.is_good() {
                dropped_good = true;
            }
            false
        } else {
            true
        }
    });
    if dropped_good {
        state.combo = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Item;
    use glam::Vec2;
    use proptest::prelude::*;

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.phase = GamePhase::Playing;
        state
    }

    /// Place an item over the cauldron and run one tick so it gets caught
    fn catch(state: &mut GameState, kind: ItemKind) {
        let id = state.next_entity_id();
        let pos = Vec2::new(state.cauldron.pos.x + 10.0, CAULDRON_Y - 10.0);
        state.items.push(Item {
            id,
            kind,
            pos,
            fall_speed: 1.0,
        });
        tick(state, &TickInput::default());
    }

    #[test]
    fn test_menu_to_playing() {
        let mut state = GameState::new(1);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.time_ticks, 0);

        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_scoring_scenario() {
        // Bad, then two goods, then a bonus: the combo/score ladder
        let mut state = playing_state(2);

        catch(&mut state, ItemKind::Rock);
        assert_eq!(state.vitality, 2);
        assert_eq!(state.combo, 0);
        assert_eq!(state.score, 0);

        catch(&mut state, ItemKind::FrogEye);
        assert_eq!(state.combo, 1);
        assert_eq!(state.score, 10);

        catch(&mut state, ItemKind::Mushroom);
        assert_eq!(state.combo, 2);
        assert_eq!(state.score, 30);

        catch(&mut state, ItemKind::Potion);
        assert_eq!(state.combo, 4);
        assert_eq!(state.score, 130);
        assert_eq!(state.best_combo, 4);
    }

    #[test]
    fn test_caught_items_are_removed_and_reported() {
        let mut state = playing_state(3);
        catch(&mut state, ItemKind::Slime);
        assert!(state.items.iter().all(|i| i.kind != ItemKind::Slime));
        assert!(
            state
                .events
                .iter()
                .any(|e| *e == GameEvent::Caught(ItemKind::Slime))
        );
    }

    #[test]
    fn test_dash_sets_cooldown_and_uses_dash_speed() {
        let mut state = playing_state(4);
        state.cauldron.pos.x = 300.0;

        let input = TickInput {
            right: true,
            dash: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.cauldron.pos.x, 300.0 + DASH_SPEED);
        assert_eq!(state.dash_cooldown, DASH_COOLDOWN_TICKS);

        // Still holding dash: cooldown gates it, so base speed applies
        let x = state.cauldron.pos.x;
        tick(&mut state, &input);
        assert_eq!(state.cauldron.pos.x, x + BASE_MOVE_SPEED);
        assert_eq!(state.dash_cooldown, DASH_COOLDOWN_TICKS - 1);
    }

    #[test]
    fn test_dash_ready_again_after_cooldown() {
        let mut state = playing_state(5);
        let dash = TickInput {
            dash: true,
            ..Default::default()
        };
        tick(&mut state, &dash);
        assert_eq!(state.dash_cooldown, DASH_COOLDOWN_TICKS);

        for _ in 0..DASH_COOLDOWN_TICKS {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.dash_cooldown, 0);

        tick(&mut state, &dash);
        assert_eq!(state.dash_cooldown, DASH_COOLDOWN_TICKS);
        let dashes = state
            .events
            .iter()
            .filter(|e| **e == GameEvent::DashUsed)
            .count();
        assert_eq!(dashes, 2);
    }

    #[test]
    fn test_cauldron_clamped_at_both_edges() {
        let mut state = playing_state(6);
        // Stray catches from random spawns must not end the run mid-test
        state.vitality = u8::MAX;
        let left = TickInput {
            left: true,
            dash: true,
            ..Default::default()
        };
        for _ in 0..120 {
            tick(&mut state, &left);
        }
        assert_eq!(state.cauldron.pos.x, 0.0);

        let right = TickInput {
            right: true,
            dash: true,
            ..Default::default()
        };
        for _ in 0..240 {
            tick(&mut state, &right);
        }
        assert_eq!(state.cauldron.pos.x, PLAYFIELD_WIDTH - CAULDRON_WIDTH);
    }

    #[test]
    fn test_vitality_zero_ends_run_same_tick() {
        let mut state = playing_state(7);
        state.vitality = 1;
        catch(&mut state, ItemKind::Rock);
        assert_eq!(state.vitality, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_missed_good_item_breaks_combo() {
        let mut state = playing_state(8);
        state.combo = 3;
        let id = state.next_entity_id();
        state.items.push(Item {
            id,
            kind: ItemKind::Mushroom,
            pos: Vec2::new(0.0, PLAYFIELD_HEIGHT - 1.0),
            fall_speed: 5.0,
        });
        tick(&mut state, &TickInput::default());
        assert!(state.items.is_empty());
        assert_eq!(state.combo, 0);
        assert_eq!(state.vitality, STARTING_VITALITY);
    }

    #[test]
    fn test_missed_bad_item_is_harmless() {
        let mut state = playing_state(9);
        state.combo = 3;
        let id = state.next_entity_id();
        state.items.push(Item {
            id,
            kind: ItemKind::Rock,
            pos: Vec2::new(0.0, PLAYFIELD_HEIGHT - 1.0),
            fall_speed: 5.0,
        });
        tick(&mut state, &TickInput::default());
        assert!(state.items.is_empty());
        assert_eq!(state.combo, 3);
        assert_eq!(state.vitality, STARTING_VITALITY);
    }

    #[test]
    fn test_restart_carries_only_high_score() {
        let mut state = playing_state(10);
        catch(&mut state, ItemKind::FrogEye);
        catch(&mut state, ItemKind::Potion);
        let earned = state.score;
        assert!(earned > 0);

        state.vitality = 1;
        catch(&mut state, ItemKind::Slime);
        assert_eq!(state.phase, GamePhase::GameOver);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.combo, 0);
        assert_eq!(state.vitality, STARTING_VITALITY);
        assert!(state.items.is_empty());
        assert_eq!(state.high_score, earned);
        assert!(state.events.contains(&GameEvent::RunRestarted));
    }

    #[test]
    fn test_determinism() {
        // Two states with the same seed and inputs stay identical
        let mut a = GameState::new(99_999);
        let mut b = GameState::new(99_999);

        let inputs = [
            TickInput {
                start: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                dash: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..500 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.items.len(), b.items.len());
        assert_eq!(a.cauldron.pos, b.cauldron.pos);
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_for_any_inputs(
            seed: u64,
            moves in proptest::collection::vec(any::<(bool, bool, bool)>(), 0..300),
        ) {
            let mut state = playing_state(seed);
            let mut prev_high = state.high_score;
            for (left, right, dash) in moves {
                let input = TickInput { left, right, dash, ..Default::default() };
                tick(&mut state, &input);

                prop_assert!(state.cauldron.pos.x >= 0.0);
                prop_assert!(state.cauldron.pos.x <= PLAYFIELD_WIDTH - CAULDRON_WIDTH);
                prop_assert!(state.dash_cooldown <= DASH_COOLDOWN_TICKS);
                prop_assert!(state.vitality <= STARTING_VITALITY);
                prop_assert!(state.high_score >= prev_high);
                prop_assert!(state.best_combo >= state.combo);
                prev_high = state.high_score;
            }
        }
    }
}
