//! Frame timing
//!
//! Real frame times are uneven; the simulation only ever sees `SIM_DT`.

use crate::consts::{MAX_FRAME_TIME, MAX_SUBSTEPS, SIM_DT};

/// Accumulator that turns frame time into a whole number of fixed steps
#[derive(Debug, Clone, Default)]
pub struct FixedTimestep {
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame's elapsed time (seconds) and return how many steps to run.
    ///
    /// Frame time is clamped to `MAX_FRAME_TIME` and at most `MAX_SUBSTEPS`
    /// steps run per frame; any backlog beyond that is dropped.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_TIME);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::trace!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator %= SIM_DT;
        }
        steps
    }
}

/// FPS from a rolling window of frame timestamps
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Record a frame at `time_ms` (monotonic milliseconds)
    pub fn record(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Oldest entry is the one about to be overwritten, 59 frames back
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                let intervals = (self.frame_times.len() - 1) as f64;
                self.fps = (intervals * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
