//! HUD text and the restart control
//!
//! The canvas draws the restart button (see `renderer::scene`); the hit-test
//! lives here so it works in field coordinates regardless of canvas size.

use glam::Vec2;

use crate::consts::SCORE_FLASH_TICKS;
use crate::sim::{GameState, Rect, RunPhase};

/// Restart button, centered under the game-over panel
pub const RESTART_BUTTON: Rect = Rect::new(300.0, 360.0, 200.0, 50.0);

/// Game-over panel behind the final score and the button
pub const GAME_OVER_PANEL: Rect = Rect::new(220.0, 180.0, 360.0, 250.0);

/// Whether a press at `point` would restart right now
pub fn restart_hit(state: &GameState, point: Vec2) -> bool {
    state.run.phase == RunPhase::GameOverDisplayed && RESTART_BUTTON.contains(point)
}

/// Restart if `point` hits the button while the game-over panel is up.
/// Returns whether the run was reset.
pub fn try_restart(state: &mut GameState, point: Vec2) -> bool {
    restart_hit(state, point) && state.reset()
}

/// Score flash brightness in 0-1 (cosmetic)
pub fn score_flash_level(state: &GameState, reduced_motion: bool) -> f32 {
    if reduced_motion || state.run.score_flash == 0 {
        return 0.0;
    }
    state.run.score_flash as f32 / SCORE_FLASH_TICKS as f32
}

/// Strings the DOM HUD shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    pub score: String,
    pub high_score: String,
    /// Final score line, only while the game-over panel is up
    pub game_over: Option<String>,
}

impl HudText {
    pub fn from_state(state: &GameState) -> Self {
        let game_over = (state.run.phase == RunPhase::GameOverDisplayed).then(|| {
            if state.run.new_best {
                format!("New best: {}", state.run.score)
            } else {
                format!("Score: {}", state.run.score)
            }
        });
        Self {
            score: state.run.score.to_string(),
            high_score: state.run.high_score.to_string(),
            game_over,
        }
    }
}
