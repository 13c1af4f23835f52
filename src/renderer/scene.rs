//! Scene assembly: a read-only snapshot of `GameState` into triangles
//!
//! Draw order (back to front): background, ground, objects, player,
//! particles, score flash, game-over panel.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors, fade, rgba};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{FallingObject, GameState, ObjectKind, ParticlePool, Rect, RunPhase};
use crate::ui::{GAME_OVER_PANEL, RESTART_BUTTON, score_flash_level};

/// Build the full frame for `state`
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(2048);

    vertices.extend(shapes::rect(
        &Rect::new(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT),
        colors::BACKGROUND,
    ));
    vertices.extend(shapes::rect(
        &Rect::new(
            0.0,
            FIELD_HEIGHT - PLAYER_FLOOR_MARGIN,
            FIELD_WIDTH,
            PLAYER_FLOOR_MARGIN,
        ),
        colors::GROUND,
    ));

    for obj in &state.objects {
        push_object(&mut vertices, obj);
    }

    // The player is gone once it has blown up
    if state.run.phase == RunPhase::Playing {
        push_player(&mut vertices, state, settings.reduced_motion);
    }

    let cap = settings.max_particles();
    let segments = settings.quality.circle_segments();
    push_particles(&mut vertices, &state.sparkles, cap, segments);
    push_particles(&mut vertices, &state.explosion, cap, segments);

    let flash = score_flash_level(state, settings.reduced_motion);
    if flash > 0.0 {
        vertices.extend(shapes::rect(
            &Rect::new(0.0, 0.0, FIELD_WIDTH, 8.0),
            fade(colors::SCORE_FLASH, flash * 2.0),
        ));
    }

    if state.run.phase == RunPhase::GameOverDisplayed {
        vertices.extend(shapes::rect(&GAME_OVER_PANEL, colors::PANEL));
        vertices.extend(shapes::rect(&RESTART_BUTTON, colors::BUTTON));
    }

    vertices
}

/// Fill color for an object in its current state
pub fn object_color(obj: &FallingObject) -> [f32; 4] {
    match obj.kind {
        ObjectKind::Normal => colors::OBJECT_NORMAL,
        ObjectKind::Bonus if obj.transformed => colors::OBJECT_BONUS_RIPE,
        ObjectKind::Bonus => colors::OBJECT_BONUS_UNRIPE,
        ObjectKind::Growing => colors::OBJECT_GROWING,
    }
}

fn push_object(vertices: &mut Vec<Vertex>, obj: &FallingObject) {
    let size = Vec2::new(obj.width, obj.height) * obj.scale;
    let center = obj.center();
    vertices.extend(shapes::rotated_rect(
        center,
        size,
        obj.rotation,
        object_color(obj),
    ));

    if obj.is_edible() {
        let r = size.max_element() * 0.6;
        vertices.extend(shapes::ring(
            center,
            r,
            r + 3.0,
            fade(colors::OBJECT_BONUS_RIPE, 0.5),
            16,
        ));
    }
}

fn push_player(vertices: &mut Vec<Vertex>, state: &GameState, reduced_motion: bool) {
    let p = &state.player;
    let bob = if reduced_motion {
        0.0
    } else {
        (p.anim_phase * std::f32::consts::TAU).sin().abs() * 3.0
    };

    let head_r = p.width * 0.22;
    let body = Rect::new(
        p.pos.x,
        p.pos.y + head_r * 1.5 - bob,
        p.width,
        p.height - head_r * 1.5,
    );
    vertices.extend(shapes::rect(&body, colors::PLAYER_BODY));
    vertices.extend(shapes::circle(
        Vec2::new(body.center().x, body.y - head_r * 0.5),
        head_r,
        colors::PLAYER_HEAD,
        12,
    ));
}

fn push_particles(vertices: &mut Vec<Vertex>, pool: &ParticlePool, cap: usize, segments: u32) {
    for particle in pool.iter().take(cap) {
        let color = fade(rgba(particle.color), particle.life);
        vertices.extend(shapes::circle(particle.pos, particle.size, color, segments));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::QualityPreset;

    fn count_color(vertices: &[Vertex], color: [f32; 4]) -> usize {
        vertices.iter().filter(|v| v.color == color).count()
    }

    #[test]
    fn test_empty_field_draws_background_and_player() {
        let state = GameState::new(1, 0);
        let v = build_scene(&state, &Settings::default());
        assert_eq!(count_color(&v, colors::BACKGROUND), 6);
        assert_eq!(count_color(&v, colors::PLAYER_BODY), 6);
        assert_eq!(count_color(&v, colors::BUTTON), 0);
    }

    #[test]
    fn test_objects_colored_by_ripeness() {
        let mut state = GameState::new(1, 0);
        let mut bonus = FallingObject::new(1, 100.0, 30.0, 3.0, ObjectKind::Bonus);
        state.objects.push(bonus.clone());
        let v = build_scene(&state, &Settings::default());
        assert_eq!(count_color(&v, colors::OBJECT_BONUS_UNRIPE), 6);

        bonus.transformed = true;
        state.objects = vec![bonus];
        let v = build_scene(&state, &Settings::default());
        assert_eq!(count_color(&v, colors::OBJECT_BONUS_RIPE), 6);
    }

    #[test]
    fn test_particle_cap_follows_settings() {
        let mut state = GameState::new(1, 0);
        state.run.phase = RunPhase::Exploding;
        let center = Vec2::new(400.0, 500.0);
        state.explosion.spawn_explosion(&mut state.rng, center);

        let low = Settings {
            quality: QualityPreset::Low,
            ..Settings::default()
        };
        let off = Settings {
            particles: false,
            ..Settings::default()
        };
        let with_low = build_scene(&state, &low).len();
        let with_off = build_scene(&state, &off).len();
        let expected = state.explosion.len().min(low.max_particles())
            * (low.quality.circle_segments() as usize * 3);
        assert_eq!(with_low - with_off, expected);
    }

    #[test]
    fn test_game_over_shows_button_and_hides_player() {
        let mut state = GameState::new(1, 0);
        state.run.phase = RunPhase::GameOverDisplayed;
        let v = build_scene(&state, &Settings::default());
        assert_eq!(count_color(&v, colors::BUTTON), 6);
        assert_eq!(count_color(&v, colors::PLAYER_BODY), 0);
    }
}
