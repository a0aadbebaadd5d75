use std::f32::consts::TAU;

use glam::Vec2;
use rand::prelude::*;
use smallvec::SmallVec;

use crate::constants::{
    ALPHA_FADE_TICKS, BASE_HUE, DAMPING_AUDIO, DAMPING_BASE, FLOW_INFLUENCE_AUDIO,
    FLOW_INFLUENCE_BASE, HUE_BLEND, HUE_RANGE,
};

/// One recorded trail position, newest first in the trail buffer.
#[derive(Clone, Copy, Debug)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub alpha: f32,
}

/// A single simulated point with kinematic and visual state.
///
/// Alive while `life < max_life`; the scene drops it the tick that stops
/// holding. Alpha, size, and hue are recomputed every tick — external code
/// only writes them at spawn time (burst overrides).
#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub original_size: f32,
    pub life: f32,
    pub max_life: f32,
    pub hue: f32,
    pub target_hue: f32,
    pub brightness: f32,
    pub alpha: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub energy: f32,
    pub phase: f32,
    pub phase_speed: f32,
    pub glow_intensity: f32,
    pub trail: SmallVec<[TrailPoint; 14]>,
    pub max_trail_len: usize,
}

impl Particle {
    pub fn spawn(x: f32, y: f32, rng: &mut StdRng) -> Self {
        let size = rng.gen::<f32>() * 3.0 + 1.0;
        let hue = rng.gen::<f32>() * HUE_RANGE + BASE_HUE;
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::new(
                (rng.gen::<f32>() - 0.5) * 2.0,
                (rng.gen::<f32>() - 0.5) * 2.0,
            ),
            size,
            original_size: size,
            life: 0.0,
            max_life: rng.gen::<f32>() * 100.0 + 100.0,
            hue,
            target_hue: hue,
            brightness: rng.gen::<f32>() * 30.0 + 70.0,
            alpha: rng.gen::<f32>() * 0.5 + 0.5,
            rotation: rng.gen::<f32>() * TAU,
            rotation_speed: (rng.gen::<f32>() - 0.5) * 0.02,
            energy: rng.gen::<f32>(),
            phase: rng.gen::<f32>() * TAU,
            phase_speed: (rng.gen::<f32>() - 0.5) * 0.05,
            glow_intensity: rng.gen::<f32>(),
            trail: SmallVec::new(),
            max_trail_len: rng.gen_range(5..=14),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life < self.max_life
    }

    /// Advance one tick under the sampled flow vector and the current audio
    /// level. Returns whether the particle is still alive.
    pub fn update(
        &mut self,
        flow: Vec2,
        audio_level: f32,
        complexity: f32,
        width: f32,
        height: f32,
    ) -> bool {
        self.phase += self.phase_speed;

        self.vel += flow * (FLOW_INFLUENCE_BASE + audio_level * FLOW_INFLUENCE_AUDIO);

        // Nonlinear heading perturbation, preserving speed.
        let heading = self.vel.y.atan2(self.vel.x)
            + (self.life * 0.1).sin() * complexity * 0.1
            + self.phase.cos() * 0.2;
        let speed = self.vel.length();
        self.vel = Vec2::new(heading.cos(), heading.sin()) * speed;

        let damping = DAMPING_BASE - audio_level * DAMPING_AUDIO;
        self.vel *= damping;
        self.pos += self.vel;

        self.trail.insert(
            0,
            TrailPoint {
                pos: self.pos,
                alpha: self.alpha,
            },
        );
        self.trail.truncate(self.max_trail_len);

        // Hue inertia: drift toward the audio-driven target, never jump.
        let hue_shift = (self.life * 0.05).sin() * 20.0;
        self.target_hue = BASE_HUE + hue_shift + audio_level * 40.0;
        self.hue += (self.target_hue - self.hue) * HUE_BLEND;

        let size_pulse = self.phase.sin() * 0.3 + 1.0;
        self.size = self.original_size * (1.0 + audio_level * 2.0) * size_pulse;
        self.energy = (self.energy + audio_level * 0.1).min(1.0);

        self.glow_intensity = (self.life * 0.1).sin() * 0.5 + 0.5;

        self.life += 1.0;
        self.rotation += self.rotation_speed + audio_level * 0.1;
        self.alpha = ((self.max_life - self.life) / ALPHA_FADE_TICKS).clamp(0.0, 1.0);

        // Toroidal wrap; the trail would draw a line across the whole canvas
        // otherwise, so it resets with the position.
        let mut wrapped = false;
        if self.pos.x < 0.0 {
            self.pos.x = width;
            wrapped = true;
        } else if self.pos.x >= width {
            self.pos.x = 0.0;
            wrapped = true;
        }
        if self.pos.y < 0.0 {
            self.pos.y = height;
            wrapped = true;
        } else if self.pos.y >= height {
            self.pos.y = 0.0;
            wrapped = true;
        }
        if wrapped {
            self.trail.clear();
        }

        self.is_alive()
    }
}
