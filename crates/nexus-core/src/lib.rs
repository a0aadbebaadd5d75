pub mod attractor;
pub mod config;
pub mod constants;
pub mod flow_field;
pub mod input;
pub mod music;
pub mod particle;
pub mod render;
pub mod scene;
pub mod starfield;

pub use attractor::Attractor;
pub use config::{ConfigError, SceneConfig, Settings};
pub use flow_field::FlowField;
pub use input::{InputEvent, Key};
pub use music::{midi_to_hz, NoteEvent, NoteLength};
pub use particle::{Particle, TrailPoint};
pub use render::{GradientStop, Hsla, NullSurface, Surface};
pub use scene::{PendingRing, Scene};
pub use starfield::{Star, Starfield};
