use std::f32::consts::TAU;

use glam::Vec2;

use crate::attractor::Attractor;
use crate::particle::Particle;
use crate::starfield::Starfield;

/// HSL color with alpha, matching the `hsla()` space the frontend paints in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

impl Hsla {
    pub const TRANSPARENT: Hsla = Hsla {
        h: 0.0,
        s: 0.0,
        l: 0.0,
        a: 0.0,
    };

    pub fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }

    pub fn black(a: f32) -> Self {
        Self::new(0.0, 0.0, 0.0, a)
    }

    pub fn white(a: f32) -> Self {
        Self::new(0.0, 0.0, 100.0, a)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Hsla,
}

/// The opaque 2D rasterizer the simulation draws through. The web frontend
/// implements this over a canvas context; tests use [`NullSurface`] or a
/// recording stand-in.
pub trait Surface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Hsla);
    fn fill_rect_radial(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        centre: Vec2,
        radius: f32,
        stops: &[GradientStop],
    );
    fn fill_circle(&mut self, centre: Vec2, radius: f32, color: Hsla);
    fn fill_circle_radial(&mut self, centre: Vec2, radius: f32, stops: &[GradientStop]);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Hsla);
}

/// Surface that ignores every call, for headless simulation.
pub struct NullSurface;

impl Surface for NullSurface {
    fn fill_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _color: Hsla) {}
    fn fill_rect_radial(
        &mut self,
        _x: f32,
        _y: f32,
        _w: f32,
        _h: f32,
        _centre: Vec2,
        _radius: f32,
        _stops: &[GradientStop],
    ) {
    }
    fn fill_circle(&mut self, _centre: Vec2, _radius: f32, _color: Hsla) {}
    fn fill_circle_radial(&mut self, _centre: Vec2, _radius: f32, _stops: &[GradientStop]) {}
    fn stroke_line(&mut self, _from: Vec2, _to: Vec2, _width: f32, _color: Hsla) {}
}

/// Trail, glow, core, and (for energetic particles) a six-spoke overlay.
/// Reads particle state, never writes it.
pub fn draw_particle<S: Surface>(surface: &mut S, p: &Particle) {
    if p.trail.len() > 1 {
        // Per-segment fading stroke through segment midpoints.
        for i in 1..p.trail.len() {
            let prev = p.trail[i - 1];
            let point = p.trail[i];
            let mid = (prev.pos + point.pos) * 0.5;
            surface.stroke_line(
                prev.pos,
                mid,
                p.size * 0.5,
                Hsla::new(p.hue, 100.0, p.brightness, point.alpha * 0.3),
            );
        }
    }

    surface.fill_circle_radial(
        p.pos,
        p.size * 3.0,
        &[
            GradientStop {
                offset: 0.0,
                color: Hsla::new(p.hue, 100.0, p.brightness, p.alpha * 0.5 * p.glow_intensity),
            },
            GradientStop {
                offset: 1.0,
                color: Hsla::new(p.hue, 100.0, p.brightness, 0.0),
            },
        ],
    );

    surface.fill_circle_radial(
        p.pos,
        p.size * 2.0,
        &[
            GradientStop {
                offset: 0.0,
                color: Hsla::new(p.hue, 100.0, p.brightness, p.alpha),
            },
            GradientStop {
                offset: 0.5,
                color: Hsla::new(p.hue + 30.0, 100.0, p.brightness - 10.0, p.alpha * 0.5),
            },
            GradientStop {
                offset: 1.0,
                color: Hsla::new(p.hue + 60.0, 100.0, p.brightness - 20.0, 0.0),
            },
        ],
    );

    if p.energy > 0.5 {
        let spokes = 6;
        let reach = p.size * 4.0 * p.energy;
        for i in 0..spokes {
            let angle = i as f32 * TAU / spokes as f32 + p.rotation;
            let len = reach * (0.8 + (p.phase + i as f32).sin() * 0.2);
            surface.stroke_line(
                p.pos,
                p.pos + Vec2::new(angle.cos(), angle.sin()) * len,
                p.size * 0.3,
                Hsla::new(p.hue, 100.0, p.brightness, p.alpha * 0.3),
            );
        }
    }
}

pub fn draw_attractor<S: Surface>(surface: &mut S, a: &Attractor, base_hue: f32) {
    let alpha = a.alpha();
    surface.fill_rect_radial(
        a.pos.x - a.radius,
        a.pos.y - a.radius,
        a.radius * 2.0,
        a.radius * 2.0,
        a.pos,
        a.radius,
        &[
            GradientStop {
                offset: 0.0,
                color: Hsla::new(base_hue, 100.0, 50.0, alpha * 0.2),
            },
            GradientStop {
                offset: 1.0,
                color: Hsla::TRANSPARENT,
            },
        ],
    );
}

/// Ambient centre glow plus rotating rays once the synth is audible.
pub fn draw_background<S: Surface>(
    surface: &mut S,
    width: f32,
    height: f32,
    base_hue: f32,
    audio_level: f32,
    time: u64,
) {
    let centre = Vec2::new(width * 0.5, height * 0.5);
    let glow_radius = width.min(height) * 0.4;
    let glow_alpha = 0.1 + audio_level * 0.15;
    surface.fill_rect_radial(
        0.0,
        0.0,
        width,
        height,
        centre,
        glow_radius,
        &[
            GradientStop {
                offset: 0.0,
                color: Hsla::new(base_hue, 100.0, 50.0, glow_alpha),
            },
            GradientStop {
                offset: 1.0,
                color: Hsla::TRANSPARENT,
            },
        ],
    );

    if audio_level > 0.01 {
        let rays = 8;
        let reach = width.min(height) * 0.6;
        let spin = time as f32 * 0.0001;
        let alpha = 0.03 + audio_level * 0.05;
        let line_width = 1.0 + audio_level * 3.0;
        for i in 0..rays {
            let angle = i as f32 / rays as f32 * TAU + spin;
            surface.stroke_line(
                centre,
                centre + Vec2::new(angle.cos(), angle.sin()) * reach,
                line_width,
                Hsla::new(base_hue, 100.0, 50.0, alpha),
            );
        }
    }
}

pub fn draw_starfield<S: Surface>(surface: &mut S, starfield: &Starfield) {
    for star in starfield.stars() {
        surface.fill_circle(star.pos, star.size, Hsla::white(star.alpha));
    }
}
