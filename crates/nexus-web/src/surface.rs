use std::f64::consts::TAU;

use glam::Vec2;
use nexus_core::{GradientStop, Hsla, Surface};
use web_sys as web;

/// Canvas 2D implementation of the simulation's rasterizer.
pub struct CanvasSurface<'a> {
    ctx: &'a web::CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(ctx: &'a web::CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn radial_gradient(&self, centre: Vec2, radius: f32, stops: &[GradientStop]) -> Option<web::CanvasGradient> {
        let gradient = self
            .ctx
            .create_radial_gradient(
                f64::from(centre.x),
                f64::from(centre.y),
                0.0,
                f64::from(centre.x),
                f64::from(centre.y),
                f64::from(radius),
            )
            .ok()?;
        for stop in stops {
            _ = gradient.add_color_stop(stop.offset, &css(stop.color));
        }
        Some(gradient)
    }
}

fn css(color: Hsla) -> String {
    format!(
        "hsla({}, {}%, {}%, {})",
        color.h, color.s, color.l, color.a
    )
}

impl Surface for CanvasSurface<'_> {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Hsla) {
        self.ctx.set_fill_style_str(&css(color));
        self.ctx
            .fill_rect(f64::from(x), f64::from(y), f64::from(w), f64::from(h));
    }

    fn fill_rect_radial(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        centre: Vec2,
        radius: f32,
        stops: &[GradientStop],
    ) {
        if let Some(gradient) = self.radial_gradient(centre, radius, stops) {
            self.ctx.set_fill_style_canvas_gradient(&gradient);
            self.ctx
                .fill_rect(f64::from(x), f64::from(y), f64::from(w), f64::from(h));
        }
    }

    fn fill_circle(&mut self, centre: Vec2, radius: f32, color: Hsla) {
        self.ctx.set_fill_style_str(&css(color));
        self.ctx.begin_path();
        _ = self
            .ctx
            .arc(f64::from(centre.x), f64::from(centre.y), f64::from(radius), 0.0, TAU);
        self.ctx.fill();
    }

    fn fill_circle_radial(&mut self, centre: Vec2, radius: f32, stops: &[GradientStop]) {
        if let Some(gradient) = self.radial_gradient(centre, radius, stops) {
            self.ctx.set_fill_style_canvas_gradient(&gradient);
            self.ctx.begin_path();
            _ = self
                .ctx
                .arc(f64::from(centre.x), f64::from(centre.y), f64::from(radius), 0.0, TAU);
            self.ctx.fill();
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Hsla) {
        self.ctx.set_stroke_style_str(&css(color));
        self.ctx.set_line_width(f64::from(width));
        self.ctx.begin_path();
        self.ctx.move_to(f64::from(from.x), f64::from(from.y));
        self.ctx.line_to(f64::from(to.x), f64::from(to.y));
        self.ctx.stroke();
    }
}
