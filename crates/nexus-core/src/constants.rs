// Shared simulation tuning constants. Structural knobs that a host may want
// to change live in `SceneConfig` instead.

// Flow field
pub const FLOW_TIME_SCALE: f32 = 0.001; // tick counter -> field phase
pub const FLOW_CELL_STEP: f32 = 0.1; // per-cell phase increment
pub const FLOW_WOBBLE: f32 = 0.5; // drift added to the angle before the intensity scaling

// Particle motion
pub const FLOW_INFLUENCE_BASE: f32 = 0.2;
pub const FLOW_INFLUENCE_AUDIO: f32 = 0.3;
pub const DAMPING_BASE: f32 = 0.99;
pub const DAMPING_AUDIO: f32 = 0.1;
pub const HUE_BLEND: f32 = 0.1; // hue inertia per tick
pub const ALPHA_FADE_TICKS: f32 = 100.0; // end-of-life fade window

// Palette
pub const BASE_HUE: f32 = 160.0;
pub const HUE_RANGE: f32 = 60.0;
pub const BASE_HUE_DRIFT: f32 = 0.1; // per executed frame, wraps at 360

// Frame fade (exponential trail effect instead of a hard clear)
pub const FADE_ALPHA: f32 = 0.15;

// Bursts
pub const BURST_CAP: usize = 30;
pub const SPACE_BURST_CAP: usize = 50;
pub const SPACE_BURST_RINGS: usize = 5;
pub const RING_DELAY_MS: f64 = 100.0;
pub const RING_BASE_RADIUS: f32 = 20.0;
pub const RING_RADIUS_STEP: f32 = 30.0;
pub const RING_BASE_SPEED: f32 = 2.0;
pub const RING_SPEED_STEP: f32 = 0.5;
pub const RING_LIFE_SCALE: f32 = 1.5;
pub const RING_SIZE_SCALE: f32 = 1.2;

// Attractors
pub const ATTRACTOR_MAX_AGE: f32 = 100.0;
pub const ATTRACTOR_FORCE_SCALE: f32 = 0.001;
pub const ATTRACTOR_MIN_RADIUS: f32 = 50.0;
pub const ATTRACTOR_RADIUS_SPAN: f32 = 100.0;

// Adaptive frame budgeting
pub const FPS_WINDOW_MS: f64 = 1000.0;

// Starfield
pub const STAR_CLEAR_RADIUS: f32 = 200.0; // stars re-roll inside this centre radius
