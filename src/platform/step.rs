//! Fixed-timestep accumulator
//!
//! Real frame time goes in, a whole number of `SIM_DT` ticks comes out.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame delta accepted (tab stalls, debugger pauses)
const MAX_FRAME_DT: f32 = 0.1;

/// Banked simulation time between frames
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bank `dt` seconds and return how many ticks to run now (at most
    /// `MAX_SUBSTEPS`). Time beyond the cap stays banked.
    pub fn ticks_for(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        ticks
    }

    /// Drop banked time, e.g. after a restart or when the tab comes back
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    pub fn banked(&self) -> f32 {
        self.accumulator
    }
}
