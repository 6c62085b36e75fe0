//! Fixed timestep accumulator
//!
//! Turns variable frame deltas into a whole number of fixed simulation steps.
//! Frame deltas are clamped so a stalled frame (tab resume, debugger) can't
//! queue up a burst of catch-up work.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedClock {
    /// Fixed delta per step
    dt: f32,
    /// Unsimulated time carried to the next frame
    accumulator: f32,
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedClock {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add a frame's elapsed time and return how many fixed steps to run
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut steps = 0;
        while self.accumulator >= self.dt && steps < MAX_SUBSTEPS {
            self.accumulator -= self.dt;
            steps += 1;
        }
        // Drop whatever a capped frame couldn't simulate
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.dt);
        }
        steps
    }

    /// Fraction of a step left over, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Forget carried time (after a pause or level load)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
