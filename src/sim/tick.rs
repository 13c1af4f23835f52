//! Fixed timestep simulation tick
//!
//! The single authoritative state transition. Hosts call `tick` once per
//! display frame (or per fixed substep) and render afterwards.

use super::autopilot;
use super::collision::{Contact, find_contact};
use super::spawner::spawn_row;
use super::state::{GameEvent, GameState, RunPhase};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal intent; only the sign matters (negative = left)
    pub axis: f32,
    /// Demo mode - the autopilot steers instead of `axis`
    pub autopilot: bool,
}

impl TickInput {
    pub fn with_axis(axis: f32) -> Self {
        Self {
            axis,
            ..Default::default()
        }
    }

    /// Resolved intent in {-1, 0, +1}
    pub fn intent(&self) -> f32 {
        if self.axis > 0.0 {
            1.0
        } else if self.axis < 0.0 {
            -1.0
        } else {
            0.0
        }
    }
}

/// Advance the game state by one tick. `dt` is normally `SIM_DT`; rates
/// scale linearly with `dt / SIM_DT`.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();
    let step = dt / SIM_DT;

    // Effects keep animating in every phase
    state.sparkles.update(step);
    state.explosion.update(step);

    if state.run.score_flash > 0 {
        state.run.score_flash -= 1;
    }

    match state.run.phase {
        RunPhase::Playing => {
            state.time_ticks += 1;

            let intent = if input.autopilot {
                autopilot::steer(state)
            } else {
                input.intent()
            };
            update_player(state, intent, step);

            for obj in state.objects.iter_mut() {
                obj.advance(step);
            }

            // Score objects that left the field
            let passed: Vec<u32> = state
                .objects
                .iter()
                .filter(|o| o.is_offscreen())
                .map(|o| o.id)
                .collect();
            if !passed.is_empty() {
                state.objects.retain(|o| !o.is_offscreen());
                for id in passed {
                    state.run.score += PASS_SCORE;
                    state.events.push(GameEvent::ObjectPassed { id });
                }
            }

            match find_contact(&state.player, &state.objects) {
                Some(Contact::Bonus(index)) => collect_bonus(state, index),
                Some(Contact::Fatal(index)) => crash(state, index),
                None => {}
            }

            if state.run.phase == RunPhase::Playing
                && state.time_ticks % SPAWN_INTERVAL_TICKS == 0
            {
                spawn_row(state);
            }
        }

        RunPhase::Exploding => {
            if state.explosion.is_empty() {
                state.run.phase = RunPhase::GameOverDisplayed;
                state.events.push(GameEvent::GameOverShown);
            }
        }

        RunPhase::GameOverDisplayed => {}
    }
}

fn update_player(state: &mut GameState, intent: f32, step: f32) {
    let player = &mut state.player;
    player.vel_x = intent * PLAYER_SPEED;
    player.pos.x = (player.pos.x + player.vel_x * step).clamp(0.0, player.max_x());
    if player.vel_x != 0.0 {
        player.anim_phase += PLAYER_ANIM_RATE * step;
    }
}

fn collect_bonus(state: &mut GameState, index: usize) {
    let obj = state.objects.remove(index);
    state.run.score += BONUS_SCORE;
    state.run.score_flash = SCORE_FLASH_TICKS;
    state.sparkles.spawn_sparkles(&mut state.rng, obj.center());
    state.events.push(GameEvent::BonusCollected { id: obj.id });
    log::debug!("Bonus #{} collected, score {}", obj.id, state.run.score);
}

fn crash(state: &mut GameState, index: usize) {
    let id = state.objects[index].id;
    let score = state.run.score;

    state.run.phase = RunPhase::Exploding;
    state.player.vel_x = 0.0;
    state
        .explosion
        .spawn_explosion(&mut state.rng, state.player.rect().center());
    state.events.push(GameEvent::Crashed { id, score });

    if score > state.run.high_score {
        state.run.high_score = score;
        state.run.new_best = true;
        state.events.push(GameEvent::NewHighScore { score });
        log::info!("New high score: {}", score);
    }
    log::info!("Crashed into object #{} with score {}", id, score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{FallingObject, ObjectKind};
    use glam::Vec2;
    use proptest::prelude::*;

    /// Put an object right on top of the player
    fn drop_on_player(state: &mut GameState, kind: ObjectKind, transformed: bool) -> u32 {
        let id = state.next_entity_id();
        let center = state.player.rect().center();
        let mut obj = FallingObject::new(id, 0.0, 30.0, 0.0, kind);
        obj.pos = center - Vec2::new(15.0, OBJECT_HEIGHT / 2.0);
        obj.transformed = transformed;
        state.objects.push(obj);
        id
    }

    fn run_until_game_over(state: &mut GameState) {
        for _ in 0..1000 {
            tick(state, &TickInput::default(), SIM_DT);
            if state.run.phase == RunPhase::GameOverDisplayed {
                return;
            }
        }
        panic!("explosion never finished");
    }

    #[test]
    fn test_player_moves_with_intent_and_animates() {
        let mut state = GameState::new(1, 0);
        let x0 = state.player.pos.x;
        tick(&mut state, &TickInput::with_axis(-0.3), SIM_DT);
        assert_eq!(state.player.pos.x, x0 - PLAYER_SPEED);
        assert_eq!(state.player.vel_x, -PLAYER_SPEED);
        let phase = state.player.anim_phase;
        assert!(phase > 0.0);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.vel_x, 0.0);
        assert_eq!(state.player.anim_phase, phase);
    }

    #[test]
    fn test_player_clamped_to_field() {
        let mut state = GameState::new(1, 0);
        for _ in 0..200 {
            tick(&mut state, &TickInput::with_axis(1.0), SIM_DT);
            state.objects.clear();
        }
        assert_eq!(state.player.pos.x, FIELD_WIDTH - PLAYER_WIDTH);
        for _ in 0..200 {
            tick(&mut state, &TickInput::with_axis(-1.0), SIM_DT);
            state.objects.clear();
        }
        assert_eq!(state.player.pos.x, 0.0);
    }

    #[test]
    fn test_object_leaves_field_and_scores() {
        let mut state = GameState::new(1, 0);
        let mut obj = FallingObject::new(99, 100.0, 30.0, 5.0, ObjectKind::Normal);
        obj.pos.y = 590.0;
        obj.height = 20.0;
        state.objects.push(obj);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.objects[0].pos.y, 595.0);
        assert_eq!(state.run.score, 0);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.objects.is_empty());
        assert_eq!(state.run.score, PASS_SCORE);
        assert_eq!(state.events, vec![GameEvent::ObjectPassed { id: 99 }]);
    }

    #[test]
    fn test_ripe_bonus_awards_points_and_continues() {
        let mut state = GameState::new(1, 0);
        state.run.score = 30;
        let id = drop_on_player(&mut state, ObjectKind::Bonus, true);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.run.score, 30 + BONUS_SCORE);
        assert_eq!(state.run.phase, RunPhase::Playing);
        assert!(state.objects.iter().all(|o| o.id != id));
        assert_eq!(state.run.score_flash, SCORE_FLASH_TICKS);
        assert_eq!(state.sparkles.len(), SPARKLE_COUNT);
        assert!(state.events.contains(&GameEvent::BonusCollected { id }));
    }

    #[test]
    fn test_growing_is_always_fatal() {
        for transformed in [false, true] {
            let mut state = GameState::new(1, 0);
            drop_on_player(&mut state, ObjectKind::Growing, transformed);
            tick(&mut state, &TickInput::default(), SIM_DT);
            assert_eq!(state.run.phase, RunPhase::Exploding);
        }
    }

    #[test]
    fn test_crash_freezes_world_and_records_high_score() {
        let mut state = GameState::new(1, 100);
        state.run.score = 250;
        let mut bystander = FallingObject::new(50, 50.0, 30.0, 4.0, ObjectKind::Normal);
        bystander.pos.y = 100.0;
        state.objects.push(bystander);
        let id = drop_on_player(&mut state, ObjectKind::Normal, false);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.run.phase, RunPhase::Exploding);
        assert_eq!(state.run.high_score, 250);
        assert!(!state.explosion.is_empty());
        assert!(state.events.contains(&GameEvent::Crashed { id, score: 250 }));
        assert!(state.events.contains(&GameEvent::NewHighScore { score: 250 }));
        assert!(state.run.new_best);

        let frozen_y = state.objects[0].pos.y;
        let frozen_x = state.player.pos.x;
        let count = state.objects.len();
        for _ in 0..10 {
            tick(&mut state, &TickInput::with_axis(1.0), SIM_DT);
        }
        assert_eq!(state.objects.len(), count);
        assert_eq!(state.objects[0].pos.y, frozen_y);
        assert_eq!(state.player.pos.x, frozen_x);
        assert_eq!(state.run.score, 250);
    }

    #[test]
    fn test_crash_below_high_score_keeps_it() {
        let mut state = GameState::new(1, 900);
        state.run.score = 40;
        drop_on_player(&mut state, ObjectKind::Normal, false);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.run.high_score, 900);
        assert!(!state.run.new_best);
        assert!(
            !state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::NewHighScore { .. }))
        );
    }

    #[test]
    fn test_crash_tying_high_score_is_not_a_new_best() {
        let mut state = GameState::new(1, 300);
        state.run.score = 300;
        drop_on_player(&mut state, ObjectKind::Normal, false);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.run.phase, RunPhase::Exploding);
        assert_eq!(state.run.high_score, 300);
        assert!(!state.run.new_best);
        assert!(
            !state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::NewHighScore { .. }))
        );
    }

    #[test]
    fn test_crash_happens_exactly_once() {
        let mut state = GameState::new(1, 0);
        drop_on_player(&mut state, ObjectKind::Normal, false);
        let mut crashes = 0;
        for _ in 0..300 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            crashes += state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::Crashed { .. }))
                .count();
        }
        assert_eq!(crashes, 1);
    }

    #[test]
    fn test_bonus_found_first_masks_fatal_overlap() {
        let mut state = GameState::new(1, 0);
        drop_on_player(&mut state, ObjectKind::Normal, false);
        drop_on_player(&mut state, ObjectKind::Bonus, true);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.run.phase, RunPhase::Playing);
        assert_eq!(state.run.score, BONUS_SCORE);

        // The remaining normal object ends the run next tick
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.run.phase, RunPhase::Exploding);
    }

    #[test]
    fn test_explosion_leads_to_game_over_display() {
        let mut state = GameState::new(1, 0);
        drop_on_player(&mut state, ObjectKind::Normal, false);
        tick(&mut state, &TickInput::default(), SIM_DT);
        run_until_game_over(&mut state);
        assert!(state.explosion.is_empty());
        assert!(state.events.contains(&GameEvent::GameOverShown));
    }

    #[test]
    fn test_reset_from_game_over() {
        let mut state = GameState::new(1, 300);
        state.run.score = 540;
        drop_on_player(&mut state, ObjectKind::Normal, false);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.run.high_score, 540);
        run_until_game_over(&mut state);

        state.player.pos.x = 0.0;
        assert!(state.reset());
        assert_eq!(state.run.score, 0);
        assert_eq!(state.run.high_score, 540);
        assert_eq!(state.run.phase, RunPhase::Playing);
        assert!(state.objects.is_empty());
        assert!(state.sparkles.is_empty());
        assert!(state.explosion.is_empty());
        assert!(!state.run.new_best);
        assert_eq!(state.player.pos.x, (FIELD_WIDTH - PLAYER_WIDTH) / 2.0);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_reset_accepted_while_exploding() {
        let mut state = GameState::new(1, 0);
        drop_on_player(&mut state, ObjectKind::Normal, false);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.run.phase, RunPhase::Exploding);
        assert!(state.reset());
        assert_eq!(state.run.phase, RunPhase::Playing);
    }

    #[test]
    fn test_spawns_on_cadence() {
        let mut state = GameState::new(77, 0);
        for _ in 0..SPAWN_INTERVAL_TICKS - 1 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.objects.is_empty());
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(!state.objects.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999, 0);
        let mut state2 = GameState::new(99999, 0);
        let inputs = [
            TickInput::with_axis(1.0),
            TickInput::with_axis(-1.0),
            TickInput::default(),
        ];

        for i in 0..600 {
            let input = &inputs[(i / 40) % inputs.len()];
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.run.score, state2.run.score);
        assert_eq!(state1.objects.len(), state2.objects.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            seed in any::<u64>(),
            axes in prop::collection::vec(-1000.0f32..1000.0, 1..400),
        ) {
            let mut state = GameState::new(seed, 0);
            for axis in axes {
                tick(&mut state, &TickInput::with_axis(axis), SIM_DT);
                prop_assert!(state.player.pos.x >= 0.0);
                prop_assert!(state.player.pos.x <= FIELD_WIDTH - PLAYER_WIDTH);
            }
        }

        #[test]
        fn prop_score_never_drops_while_playing(seed in any::<u64>(), axis in -1.0f32..1.0) {
            let mut state = GameState::new(seed, 0);
            let mut last = 0;
            for _ in 0..600 {
                tick(&mut state, &TickInput::with_axis(axis), SIM_DT);
                prop_assert!(state.run.score >= last);
                last = state.run.score;
            }
        }

        #[test]
        fn prop_bonus_ripeness_tracks_height(start in -40.0f32..600.0, speed in 0.5f32..6.0) {
            let mut obj = FallingObject::new(1, 100.0, 30.0, speed, ObjectKind::Bonus);
            obj.pos.y = start;
            let mut was_ripe = false;
            for _ in 0..200 {
                obj.advance(1.0);
                prop_assert_eq!(obj.transformed, obj.pos.y >= FIELD_HEIGHT / 2.0);
                prop_assert!(!was_ripe || obj.transformed);
                was_ripe = obj.transformed;
            }
        }

        #[test]
        fn prop_growing_scale_monotonic_and_capped(start in -40.0f32..600.0, speed in 0.5f32..6.0) {
            let mut obj = FallingObject::new(1, 100.0, 30.0, speed, ObjectKind::Growing);
            obj.pos.y = start;
            let mut last = obj.scale;
            for _ in 0..400 {
                obj.advance(1.0);
                prop_assert!(obj.scale >= last);
                prop_assert!(obj.scale <= OBJECT_MAX_SCALE);
                last = obj.scale;
            }
        }
    }
}
