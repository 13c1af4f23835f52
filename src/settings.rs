//! Game settings and preferences
//!
//! Persisted separately from the high score, as a JSON blob.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_PARTICLES;
use crate::persistence::{KeyValueStore, PersistenceError};

/// Master volume change per hotkey press
const VOLUME_STEP: f32 = 0.1;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Next preset in the Low -> Medium -> High cycle
    pub fn next(&self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }

    /// Particles drawn per pool for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 48,
            QualityPreset::Medium => 128,
            QualityPreset::High => MAX_PARTICLES,
        }
    }

    /// Triangle count for particle circles
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 6,
            QualityPreset::Medium => 10,
            QualityPreset::High => 16,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Draw sparkles and explosions
    pub particles: bool,
    /// Show FPS counter
    pub show_fps: bool,
    /// Sound effects on/off
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Reduced motion (no score flash pulse, no player bob)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            show_fps: false,
            sound: true,
            master_volume: 0.8,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "drop_dodge_settings";

    /// Effective particle cap per pool
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Effective sound volume
    pub fn effective_volume(&self) -> f32 {
        if self.sound {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Apply a preference hotkey. Returns true if the key changed something.
    ///
    /// `m` sound, `f` FPS counter, `r` reduced motion, `q` quality cycle,
    /// `-` and `+` master volume.
    pub fn apply_key(&mut self, key: &str) -> bool {
        match key {
            "m" | "M" => self.sound = !self.sound,
            "f" | "F" => self.show_fps = !self.show_fps,
            "r" | "R" => self.reduced_motion = !self.reduced_motion,
            "q" | "Q" => {
                self.quality = self.quality.next();
                log::info!("Quality: {}", self.quality.as_str());
            }
            "-" | "_" => self.nudge_volume(-VOLUME_STEP),
            "+" | "=" => self.nudge_volume(VOLUME_STEP),
            _ => return false,
        }
        true
    }

    fn nudge_volume(&mut self, delta: f32) {
        // Round to the step so repeated presses land on exact tenths
        let steps = ((self.master_volume + delta) / VOLUME_STEP).round();
        self.master_volume = (steps * VOLUME_STEP).clamp(0.0, 1.0);
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load(store: &impl KeyValueStore) -> Self {
        match Self::try_load(store) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings ({} quality)", settings.quality.as_str());
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    fn try_load(store: &impl KeyValueStore) -> Result<Option<Self>, PersistenceError> {
        match store.get(Self::STORAGE_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Save settings
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
