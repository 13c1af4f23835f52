//! Falling object spawner
//!
//! Places 1-2 objects along the top edge every `SPAWN_INTERVAL_TICKS`, always
//! leaving a horizontal gap the player fits through.

use rand::Rng;

use super::rect::Rect;
use super::state::{FallingObject, GameState, ObjectKind};
use crate::consts::*;

/// Sample up to `requested` non-overlapping spans on one row.
///
/// A candidate is kept only if it overlaps nothing accepted so far and has at
/// least `MIN_GAP` free on one side (to the nearest accepted span or the field
/// edge). Candidates that find no slot within `PLACEMENT_ATTEMPTS` are skipped.
pub fn place_spans(rng: &mut impl Rng, requested: usize) -> Vec<Rect> {
    let mut accepted: Vec<Rect> = Vec::with_capacity(requested);

    for _ in 0..requested {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let width = rng.random_range(OBJECT_MIN_WIDTH..OBJECT_MAX_WIDTH);
            let x = rng.random_range(0.0..FIELD_WIDTH - width);
            let candidate = Rect::new(x, -OBJECT_HEIGHT, width, OBJECT_HEIGHT);

            if accepted.iter().any(|r| r.overlaps_x(&candidate)) {
                continue;
            }
            let (left, right) = side_gaps(&candidate, &accepted);
            if left >= MIN_GAP || right >= MIN_GAP {
                accepted.push(candidate);
                break;
            }
        }
    }

    ensure_passable(rng, &mut accepted);
    accepted
}

/// Never hand the player a wall: if a row of two or more spans leaves no
/// `MIN_GAP` run free, drop one span at random. A lone span is left alone.
pub fn ensure_passable(rng: &mut impl Rng, spans: &mut Vec<Rect>) {
    if spans.len() > 1 && !has_passable_gap(spans, MIN_GAP) {
        let victim = rng.random_range(0..spans.len());
        log::debug!("Spawn row sealed, dropping span {}", victim);
        spans.remove(victim);
    }
}

/// Free space between `candidate` and its nearest neighbours (or the edges)
fn side_gaps(candidate: &Rect, accepted: &[Rect]) -> (f32, f32) {
    let left_wall = accepted
        .iter()
        .filter(|r| r.right() <= candidate.x)
        .map(|r| r.right())
        .fold(0.0_f32, f32::max);
    let right_wall = accepted
        .iter()
        .filter(|r| r.x >= candidate.right())
        .map(|r| r.x)
        .fold(FIELD_WIDTH, f32::min);
    (candidate.x - left_wall, right_wall - candidate.right())
}

/// Whether some horizontal run of at least `min_gap` is free of every span
pub fn has_passable_gap(spans: &[Rect], min_gap: f32) -> bool {
    let mut sorted: Vec<&Rect> = spans.iter().collect();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));

    let mut cursor = 0.0_f32;
    for span in sorted {
        if span.x - cursor >= min_gap {
            return true;
        }
        cursor = cursor.max(span.right());
    }
    FIELD_WIDTH - cursor >= min_gap
}

/// Variant roll: Bonus first, then Growing out of what is left
pub fn roll_kind(rng: &mut impl Rng) -> ObjectKind {
    if rng.random_bool(BONUS_CHANCE) {
        ObjectKind::Bonus
    } else if rng.random_bool(GROWING_CHANCE) {
        ObjectKind::Growing
    } else {
        ObjectKind::Normal
    }
}

/// Spawn a row of objects into the state. Returns how many were added.
pub fn spawn_row(state: &mut GameState) -> usize {
    let requested = if state.rng.random_bool(0.5) { 2 } else { 1 };
    let spans = place_spans(&mut state.rng, requested);

    for span in &spans {
        let kind = roll_kind(&mut state.rng);
        let speed = state.rng.random_range(OBJECT_MIN_SPEED..OBJECT_MAX_SPEED);
        let id = state.next_entity_id();
        let mut obj = FallingObject::new(id, span.x, span.w, speed, kind);
        obj.rotation = state.rng.random_range(0.0..std::f32::consts::TAU);
        obj.spin = state.rng.random_range(-0.05..0.05);
        log::debug!(
            "Spawned {:?} #{} at x={:.0} w={:.0} speed={:.2}",
            kind,
            id,
            span.x,
            span.w,
            speed
        );
        state.objects.push(obj);
    }

    if spans.len() < requested {
        log::debug!("Placed {} of {} requested objects", spans.len(), requested);
    }

    spans.len()
}
