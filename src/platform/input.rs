//! Raw device input to per-tick intent
//!
//! Held arrow keys win over the pointer. Pointer and touch set a follow target
//! in field coordinates; the player walks toward it and stops once close.

use crate::consts::PLAYER_SPEED;
use crate::sim::{Player, TickInput};

/// Device-level input accumulated between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub left_held: bool,
    pub right_held: bool,
    /// Field x the pointer/touch wants the player centered on
    pub follow_x: Option<f32>,
    /// Demo mode toggle
    pub autopilot: bool,
}

impl InputState {
    /// Handle a key press/release. Returns true if the key was consumed.
    pub fn key(&mut self, key: &str, pressed: bool) -> bool {
        match key {
            "ArrowLeft" | "a" | "A" => {
                self.left_held = pressed;
                if pressed {
                    self.follow_x = None;
                }
                true
            }
            "ArrowRight" | "d" | "D" => {
                self.right_held = pressed;
                if pressed {
                    self.follow_x = None;
                }
                true
            }
            "i" | "I" => {
                if pressed {
                    self.autopilot = !self.autopilot;
                    log::info!("Autopilot: {}", self.autopilot);
                }
                true
            }
            _ => false,
        }
    }

    /// Pointer/touch moved to field x
    pub fn follow(&mut self, x: f32) {
        self.follow_x = Some(x);
    }

    /// Pointer/touch released
    pub fn release_pointer(&mut self) {
        self.follow_x = None;
    }

    /// Resolve to the input for the next tick
    pub fn resolve(&self, player: &Player) -> TickInput {
        let keys = (self.right_held as i8 - self.left_held as i8) as f32;
        let axis = if self.left_held || self.right_held {
            keys
        } else if let Some(target) = self.follow_x {
            let delta = target - (player.pos.x + player.width / 2.0);
            // Within one step: stay put instead of jittering around the target
            if delta.abs() < PLAYER_SPEED {
                0.0
            } else {
                delta.signum()
            }
        } else {
            0.0
        };

        TickInput {
            axis,
            autopilot: self.autopilot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_resolve_to_sign() {
        let player = Player::default();
        let mut input = InputState::default();
        assert_eq!(input.resolve(&player).axis, 0.0);

        input.key("ArrowLeft", true);
        assert_eq!(input.resolve(&player).axis, -1.0);

        input.key("ArrowRight", true);
        assert_eq!(input.resolve(&player).axis, 0.0);

        input.key("ArrowLeft", false);
        assert_eq!(input.resolve(&player).axis, 1.0);
    }

    #[test]
    fn test_pointer_follow_with_dead_zone() {
        let player = Player::default();
        let center = player.pos.x + player.width / 2.0;
        let mut input = InputState::default();

        input.follow(center + 100.0);
        assert_eq!(input.resolve(&player).axis, 1.0);
        input.follow(center - 100.0);
        assert_eq!(input.resolve(&player).axis, -1.0);
        input.follow(center + 2.0);
        assert_eq!(input.resolve(&player).axis, 0.0);

        input.release_pointer();
        assert_eq!(input.resolve(&player).axis, 0.0);
    }

    #[test]
    fn test_keys_override_pointer() {
        let player = Player::default();
        let mut input = InputState::default();
        input.follow(0.0);
        input.key("d", true);
        assert_eq!(input.resolve(&player).axis, 1.0);
        assert!(input.follow_x.is_none());
    }

    #[test]
    fn test_autopilot_toggle() {
        let player = Player::default();
        let mut input = InputState::default();
        assert!(input.key("i", true));
        // Release does not toggle back
        input.key("i", false);
        assert!(input.resolve(&player).autopilot);
        input.key("I", true);
        assert!(!input.resolve(&player).autopilot);
        assert!(!input.key("Escape", true));
    }
}
