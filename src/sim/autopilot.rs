//! Demo-mode autopilot
//!
//! A greedy dodger: flee the nearest threat above the player, otherwise chase
//! the closest bonus that will be ripe by the time it arrives, otherwise drift
//! back to the middle. Good enough for attract mode and headless runs.

use super::collision::{object_hitbox, player_hitbox};
use super::state::{GameState, ObjectKind};
use crate::consts::*;

/// How far above the player a threat is considered (pixels)
const LOOKAHEAD: f32 = 220.0;
/// Extra horizontal clearance wanted around threats
const CLEARANCE: f32 = 12.0;
/// Dead zone when homing on a target x
const HOME_TOLERANCE: f32 = PLAYER_SPEED;

/// Pick an intent in {-1, 0, +1} for the current state
pub fn steer(state: &GameState) -> f32 {
    let me = player_hitbox(&state.player);
    let my_center = me.center().x;

    // Nearest (lowest) threat whose column we are in
    let threat = state
        .objects
        .iter()
        .filter(|o| !(o.kind == ObjectKind::Bonus && will_ripen(o.pos.y)))
        .map(object_hitbox)
        .filter(|hb| hb.bottom() > me.y - LOOKAHEAD && hb.y < me.bottom())
        .filter(|hb| hb.x - CLEARANCE < me.right() && hb.right() + CLEARANCE > me.x)
        .max_by(|a, b| a.bottom().total_cmp(&b.bottom()));

    if let Some(hb) = threat {
        let room_left = hb.x - CLEARANCE;
        let room_right = FIELD_WIDTH - (hb.right() + CLEARANCE);
        let go_left = if room_left < me.w {
            false
        } else if room_right < me.w {
            true
        } else {
            my_center < hb.center().x
        };
        return if go_left { -1.0 } else { 1.0 };
    }

    let target = state
        .objects
        .iter()
        .filter(|o| o.kind == ObjectKind::Bonus && will_ripen(o.pos.y))
        .min_by(|a, b| {
            let da = (a.center().x - my_center).abs();
            let db = (b.center().x - my_center).abs();
            da.total_cmp(&db)
        })
        .map(|o| o.center().x)
        .unwrap_or(FIELD_WIDTH / 2.0);

    let delta = target - my_center;
    if delta.abs() <= HOME_TOLERANCE {
        0.0
    } else {
        delta.signum()
    }
}

/// A bonus this high up ripens before it can reach the player
fn will_ripen(y: f32) -> bool {
    y >= FIELD_HEIGHT / 2.0 - LOOKAHEAD
}
