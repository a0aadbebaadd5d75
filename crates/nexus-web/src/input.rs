use glam::Vec2;

/// Pointer state tracked by the host; `held` drag bursts read `down`.
#[derive(Default, Clone, Copy)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub down: bool,
}

/// Map a client-space pointer position to canvas backing pixels. The canvas
/// backing store is scaled by the device pixel ratio, so CSS-space
/// coordinates are rescaled through the bounding rect.
#[inline]
pub fn client_to_canvas_px(
    client_x: f32,
    client_y: f32,
    rect_left: f32,
    rect_top: f32,
    rect_width: f32,
    rect_height: f32,
    canvas_width: f32,
    canvas_height: f32,
) -> Vec2 {
    if rect_width <= 0.0 || rect_height <= 0.0 {
        return Vec2::new(canvas_width * 0.5, canvas_height * 0.5);
    }
    let x_css = client_x - rect_left;
    let y_css = client_y - rect_top;
    Vec2::new(
        (x_css / rect_width) * canvas_width,
        (y_css / rect_height) * canvas_height,
    )
}

/// Slider value ("0".."100") to a unit fraction.
#[inline]
pub fn slider_fraction(raw: &str) -> Option<f32> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .map(|v| (v / 100.0).clamp(0.0, 1.0))
}

/// The complexity slider carries its value directly.
#[inline]
pub fn parse_complexity(raw: &str) -> Option<f32> {
    raw.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}
