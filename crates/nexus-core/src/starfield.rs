use glam::Vec2;
use rand::prelude::*;

use crate::constants::STAR_CLEAR_RADIUS;

/// One background star, twinkling against the fade.
#[derive(Clone, Copy, Debug, Default)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub alpha: f32,
    pub twinkle_speed: f32,
}

impl Star {
    /// Re-roll position, size and twinkle. Returns `false` without touching
    /// the star when the canvas has no usable area, so NaN never leaks into
    /// star state.
    pub fn reset(&mut self, width: f32, height: f32, rng: &mut StdRng) -> bool {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return false;
        }
        self.pos = Vec2::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height);
        self.size = rng.gen::<f32>() * 1.5;
        self.alpha = rng.gen::<f32>();
        self.twinkle_speed = rng.gen::<f32>() * 0.05 + 0.02;
        true
    }

    pub fn update(&mut self, time: u64, width: f32, height: f32, rng: &mut StdRng) {
        self.alpha = (time as f32 * self.twinkle_speed).sin().abs();
        // Keep the centre clear for the ambient glow.
        let centre = Vec2::new(width * 0.5, height * 0.5);
        if self.pos.distance(centre) < STAR_CLEAR_RADIUS {
            self.reset(width, height, rng);
        }
    }
}

/// Fixed-size collection of background stars.
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new(count: usize, width: f32, height: f32, rng: &mut StdRng) -> Self {
        let mut stars = vec![Star::default(); count];
        for star in &mut stars {
            star.reset(width, height, rng);
        }
        Self { stars }
    }

    pub fn reset_all(&mut self, width: f32, height: f32, rng: &mut StdRng) {
        for star in &mut self.stars {
            star.reset(width, height, rng);
        }
    }

    pub fn update(&mut self, time: u64, width: f32, height: f32, rng: &mut StdRng) {
        for star in &mut self.stars {
            star.update(time, width, height, rng);
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }
}
