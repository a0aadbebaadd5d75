use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("particle floor {floor} exceeds adaptive ceiling {ceiling}")]
    ParticleBand { floor: usize, ceiling: usize },
    #[error("initial particle count {initial} outside [{floor}, {ceiling}]")]
    InitialCount {
        initial: usize,
        floor: usize,
        ceiling: usize,
    },
    #[error("hard particle limit {limit} below adaptive ceiling {ceiling}")]
    HardLimit { limit: usize, ceiling: usize },
    #[error("fps limit must be a positive finite number")]
    FpsLimit,
    #[error("flow resolution must be a positive finite number")]
    FlowResolution,
    #[error("attractor cap must be at least 1")]
    AttractorCap,
}

/// Structural knobs of the scene. `Default` matches the tuning the animation
/// ships with; `validate` runs once at scene construction.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    /// Flow-field cell size in canvas pixels.
    pub flow_resolution: f32,
    pub initial_particles: usize,
    /// Adaptive band: the frame-budget controller keeps the target count in
    /// `[particle_floor, particle_ceiling]`.
    pub particle_floor: usize,
    pub particle_ceiling: usize,
    /// Hard cap on live particles; bursts refuse to exceed it.
    pub particle_limit: usize,
    pub adapt_down_step: usize,
    pub adapt_up_step: usize,
    pub fps_low: u32,
    pub fps_high: u32,
    /// Frames arriving faster than this are skipped entirely (a cap, not a
    /// target).
    pub fps_limit: f32,
    /// Replenishment rate limit per frame.
    pub spawn_per_frame: usize,
    pub max_attractors: usize,
    pub star_count: usize,
    pub auto_interval_ms: f64,
    /// Minimum gap between unforced notes.
    pub note_gap_ms: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            flow_resolution: 20.0,
            initial_particles: 200,
            particle_floor: 100,
            particle_ceiling: 300,
            particle_limit: 500,
            adapt_down_step: 10,
            adapt_up_step: 5,
            fps_low: 30,
            fps_high: 55,
            fps_limit: 60.0,
            spawn_per_frame: 5,
            max_attractors: 3,
            star_count: 150,
            auto_interval_ms: 3000.0,
            note_gap_ms: 100.0,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_floor > self.particle_ceiling {
            return Err(ConfigError::ParticleBand {
                floor: self.particle_floor,
                ceiling: self.particle_ceiling,
            });
        }
        if self.initial_particles < self.particle_floor
            || self.initial_particles > self.particle_ceiling
        {
            return Err(ConfigError::InitialCount {
                initial: self.initial_particles,
                floor: self.particle_floor,
                ceiling: self.particle_ceiling,
            });
        }
        if self.particle_limit < self.particle_ceiling {
            return Err(ConfigError::HardLimit {
                limit: self.particle_limit,
                ceiling: self.particle_ceiling,
            });
        }
        if !self.fps_limit.is_finite() || self.fps_limit <= 0.0 {
            return Err(ConfigError::FpsLimit);
        }
        if !self.flow_resolution.is_finite() || self.flow_resolution <= 0.0 {
            return Err(ConfigError::FlowResolution);
        }
        if self.max_attractors == 0 {
            return Err(ConfigError::AttractorCap);
        }
        Ok(())
    }
}

/// User-tunable scalars bound to the three UI sliders.
#[derive(Clone, Copy, Debug)]
pub struct Settings {
    pub intensity: f32,
    pub complexity: f32,
    pub flow_speed: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            intensity: 0.5,
            complexity: 3.0,
            flow_speed: 0.7,
        }
    }
}

impl Settings {
    pub fn set_intensity(&mut self, value: f32) {
        self.intensity = value.clamp(0.0, 1.0);
    }

    /// Complexity is UI-limited rather than clamped here; only NaN is refused.
    pub fn set_complexity(&mut self, value: f32) {
        if value.is_finite() {
            self.complexity = value;
        }
    }

    pub fn set_flow_speed(&mut self, value: f32) {
        self.flow_speed = value.clamp(0.0, 1.0);
    }
}
