/// Keys the simulation recognises.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Triggers the centre space burst.
    Burst,
}

/// Discrete interaction events delivered by the host input layer.
///
/// Coordinates are canvas-space pixels. Button release never reaches the
/// scene: the host only clears its own held flag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMove { x: f32, y: f32, held: bool },
    PointerDown { x: f32, y: f32 },
    KeyDown(Key),
    TouchStart { x: f32, y: f32 },
    TouchMove { x: f32, y: f32 },
}
