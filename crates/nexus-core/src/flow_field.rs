use std::f32::consts::TAU;

use glam::Vec2;

use crate::constants::{FLOW_CELL_STEP, FLOW_TIME_SCALE, FLOW_WOBBLE};

/// Dense grid of direction vectors steering particle motion.
///
/// The grid covers the canvas at a fixed cell resolution and is fully derived:
/// `generate` seeds it from cell coordinates alone (used on resize) and
/// `update` recomputes every cell from cell coordinates plus elapsed time,
/// once per simulated tick.
pub struct FlowField {
    resolution: f32,
    cols: usize,
    rows: usize,
    vectors: Vec<Vec2>,
}

impl FlowField {
    pub fn new(resolution: f32) -> Self {
        Self {
            resolution,
            cols: 0,
            rows: 0,
            vectors: Vec::new(),
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Rebuild the grid for a new canvas size. Degenerate dimensions are
    /// skipped so a hidden or collapsing canvas never wipes the field.
    pub fn generate(&mut self, width: f32, height: f32) {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            log::warn!("[flow] skipping generate for degenerate canvas {width}x{height}");
            return;
        }
        self.cols = (width / self.resolution).floor() as usize;
        self.rows = (height / self.resolution).floor() as usize;
        self.vectors.clear();
        self.vectors.reserve(self.cols * self.rows);
        let mut yoff = 0.0f32;
        for _ in 0..self.rows {
            let mut xoff = 0.0f32;
            for _ in 0..self.cols {
                let angle = xoff.sin() * yoff.cos() * TAU;
                self.vectors.push(Vec2::new(angle.cos(), angle.sin()));
                xoff += FLOW_CELL_STEP;
            }
            yoff += FLOW_CELL_STEP;
        }
    }

    /// Recompute every cell for the current tick. Both axes carry a phase
    /// offset advanced by `time * 0.001`; the wobble term is added to the
    /// angle before the intensity scaling, which keeps the drift visible even
    /// at low intensity.
    pub fn update(&mut self, time: u64, flow_speed: f32, intensity: f32) {
        let t = time as f32 * FLOW_TIME_SCALE;
        let wobble = t.sin() * FLOW_WOBBLE;
        let mut yoff = t;
        for row in 0..self.rows {
            let mut xoff = t;
            for col in 0..self.cols {
                let angle = (xoff * flow_speed).sin() * (yoff * flow_speed).cos() * TAU + wobble;
                self.vectors[row * self.cols + col] =
                    Vec2::new(angle.cos() * intensity, angle.sin() * intensity);
                xoff += FLOW_CELL_STEP;
            }
            yoff += FLOW_CELL_STEP;
        }
    }

    /// Nearest-cell lookup for a world coordinate; zero for anything outside
    /// the grid, matching the discretization used at write time.
    pub fn sample(&self, x: f32, y: f32) -> Vec2 {
        if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
            return Vec2::ZERO;
        }
        let col = (x / self.resolution).floor() as usize;
        let row = (y / self.resolution).floor() as usize;
        if col >= self.cols || row >= self.rows {
            return Vec2::ZERO;
        }
        self.vectors[row * self.cols + col]
    }
}
