//! High score persistence
//!
//! A single integer under `highScore`, read at startup and written whenever a
//! run beats it.

use crate::persistence::{KeyValueStore, PersistenceError};

/// The best score seen on this device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    pub value: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highScore";

    /// Parse a stored value. Accepts integers and integral floats
    /// (older builds wrote the score through a JS number).
    pub fn parse(raw: &str) -> Result<u64, PersistenceError> {
        let raw = raw.trim();
        if let Ok(v) = raw.parse::<u64>() {
            return Ok(v);
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 => Ok(v as u64),
            _ => Err(PersistenceError::Malformed {
                key: Self::STORAGE_KEY.to_string(),
                reason: format!("{:?} is not a non-negative integer", raw),
            }),
        }
    }

    /// Load from the store; missing or unreadable values count as 0
    pub fn load(store: &impl KeyValueStore) -> Self {
        let value = match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => Self::parse(&raw).unwrap_or_else(|e| {
                log::warn!("Ignoring stored high score: {}", e);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Could not read high score: {}", e);
                0
            }
        };
        log::info!("High score loaded: {}", value);
        Self { value }
    }

    /// Record a finished run's score. Writes only when it beats the best;
    /// returns whether it did.
    pub fn record(&mut self, store: &mut impl KeyValueStore, score: u64) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        if let Err(e) = store.set(Self::STORAGE_KEY, &score.to_string()) {
            log::warn!("Could not save high score: {}", e);
        } else {
            log::info!("High score saved: {}", score);
        }
        true
    }
}
