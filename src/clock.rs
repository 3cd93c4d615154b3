//! Fixed timestep accumulator
//!
//! Frames arrive at whatever rate the host manages; the simulation always
//! advances in whole `step`-sized ticks.

use crate::consts::MAX_SUBSTEPS;

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f64,
    accumulator: f64,
    max_substeps: u32,
}

impl FixedTimestep {
    pub fn new(step: f64) -> Self {
        Self {
            step: step.max(f64::EPSILON),
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Add frame time and return how many ticks to run now
    pub fn advance(&mut self, frame_dt: f64) -> u32 {
        // Clamp huge frames (debugger pauses, tab switches)
        self.accumulator += frame_dt.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        substeps
    }

    /// Fraction of a step left over, for render interpolation
    pub fn alpha(&self) -> f64 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }
}
