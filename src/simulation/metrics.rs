//! Metrics collection for headless runs

use serde::{Deserialize, Serialize};

use crate::ball::{BallEngine, is_contained, max_overlap};

/// Result of a single seeded run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunMetrics {
    /// RNG seed used
    pub seed: u64,
    /// "desktop" or "mobile"
    pub viewport: String,
    pub bodies: usize,
    pub frames: u32,
    /// First frame after which the kinetic sum stayed below the threshold
    pub settle_frame: Option<u32>,
    pub final_kinetic_sum: f32,
    pub peak_kinetic_sum: f32,
    /// Deepest pair overlap seen after any step (pixels)
    pub max_overlap: f32,
    /// Body-frames found outside the container after a step
    pub containment_violations: u32,
    /// Any position or velocity went NaN/inf
    pub non_finite: bool,
    /// Colliding pairs summed over all frames
    pub total_contacts: u64,
    /// Body-wall hits summed over all frames
    pub total_wall_contacts: u64,
    /// A scripted throw happened during the run
    pub thrown: bool,
}

impl RunMetrics {
    pub fn new(seed: u64, engine: &BallEngine) -> Self {
        Self {
            seed,
            viewport: engine.viewport().name().to_string(),
            bodies: engine.bodies().len(),
            ..Default::default()
        }
    }

    /// Record the engine state right after a step
    pub fn record_frame(&mut self, frame: u32, engine: &BallEngine, settle_threshold: f32) {
        let container = engine.container();
        let kinetic = engine.kinetic_sum();

        self.frames = frame + 1;
        self.final_kinetic_sum = kinetic;
        self.peak_kinetic_sum = self.peak_kinetic_sum.max(kinetic);
        self.max_overlap = self.max_overlap.max(max_overlap(engine.bodies()));
        self.total_contacts += engine.last_contacts() as u64;
        self.total_wall_contacts += engine.last_wall_contacts() as u64;

        for body in engine.bodies() {
            if !body.position.is_finite() || !body.velocity.is_finite() {
                self.non_finite = true;
            }
            if !is_contained(body, container) {
                self.containment_violations += 1;
            }
        }

        // A dragged body counts as moving until it is released
        if kinetic >= settle_threshold || engine.dragged().is_some() {
            self.settle_frame = None;
        } else if self.settle_frame.is_none() {
            self.settle_frame = Some(frame);
        }
    }
}

/// Aggregate over all runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSummary {
    pub runs: usize,
    pub settled_runs: usize,
    pub mean_settle_frame: Option<f32>,
    pub worst_overlap: f32,
    pub total_containment_violations: u32,
    pub any_non_finite: bool,
    pub results: Vec<RunMetrics>,
}

impl SimSummary {
    pub fn from_runs(results: Vec<RunMetrics>) -> Self {
        let settle_frames: Vec<u32> = results.iter().filter_map(|r| r.settle_frame).collect();
        let mean_settle_frame = if settle_frames.is_empty() {
            None
        } else {
            let total: u64 = settle_frames.iter().map(|&f| u64::from(f)).sum();
            Some((total as f64 / settle_frames.len() as f64) as f32)
        };

        Self {
            runs: results.len(),
            settled_runs: settle_frames.len(),
            mean_settle_frame,
            worst_overlap: results.iter().map(|r| r.max_overlap).fold(0.0, f32::max),
            total_containment_violations: results.iter().map(|r| r.containment_violations).sum(),
            any_non_finite: results.iter().any(|r| r.non_finite),
            results,
        }
    }

    /// No escapes and no NaN anywhere
    pub fn is_healthy(&self) -> bool {
        self.total_containment_violations == 0 && !self.any_non_finite
    }
}
