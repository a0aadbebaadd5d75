use std::f32::consts::TAU;

use glam::Vec2;
use rand::prelude::*;

use crate::attractor::Attractor;
use crate::config::{ConfigError, SceneConfig, Settings};
use crate::constants::{
    ATTRACTOR_MIN_RADIUS, ATTRACTOR_RADIUS_SPAN, BASE_HUE, BASE_HUE_DRIFT, BURST_CAP, FADE_ALPHA,
    FPS_WINDOW_MS, HUE_RANGE, RING_BASE_RADIUS, RING_BASE_SPEED, RING_DELAY_MS, RING_LIFE_SCALE,
    RING_RADIUS_STEP, RING_SIZE_SCALE, RING_SPEED_STEP, SPACE_BURST_CAP, SPACE_BURST_RINGS,
};
use crate::flow_field::FlowField;
use crate::input::{InputEvent, Key};
use crate::music::{random_note, NoteEvent};
use crate::particle::Particle;
use crate::render::{self, Hsla, Surface};
use crate::starfield::Starfield;

/// One queued ring of a space burst, fired when its deadline passes.
#[derive(Clone, Copy, Debug)]
pub struct PendingRing {
    pub fire_at_ms: f64,
    pub centre: Vec2,
    pub index: usize,
    pub count: usize,
    pub radius: f32,
    pub speed: f32,
    pub hue: f32,
}

/// The scene aggregate: owns every simulated object and drives one tick per
/// animation frame. All wall-clock time enters as `now_ms` from the host and
/// all randomness flows through the seeded RNG, so runs are reproducible.
pub struct Scene {
    config: SceneConfig,
    pub settings: Settings,
    width: f32,
    height: f32,
    flow_field: FlowField,
    particles: Vec<Particle>,
    attractors: Vec<Attractor>,
    starfield: Starfield,
    pending_rings: Vec<PendingRing>,
    time: u64,
    base_hue: f32,
    target_count: usize,
    frame_count: u32,
    last_fps_sample_ms: Option<f64>,
    last_frame_ms: f64,
    last_note_ms: f64,
    pub auto_mode: bool,
    visible: bool,
    rng: StdRng,
}

impl Scene {
    pub fn new(config: SceneConfig, width: f32, height: f32, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);

        let degenerate =
            !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0;
        let (width, height) = if degenerate {
            log::warn!("[scene] created with degenerate canvas {width}x{height}");
            (0.0, 0.0)
        } else {
            (width, height)
        };

        let mut flow_field = FlowField::new(config.flow_resolution);
        flow_field.generate(width, height);
        let starfield = Starfield::new(config.star_count, width, height, &mut rng);

        let mut particles = Vec::with_capacity(config.initial_particles);
        if !degenerate {
            for _ in 0..config.initial_particles {
                let x = rng.gen::<f32>() * width;
                let y = rng.gen::<f32>() * height;
                particles.push(Particle::spawn(x, y, &mut rng));
            }
        }
        log::info!(
            "[scene] init {}x{} particles={} seed={seed}",
            width,
            height,
            particles.len()
        );

        let note_gap = config.note_gap_ms;
        let target = config.initial_particles;
        Ok(Self {
            config,
            settings: Settings::default(),
            width,
            height,
            flow_field,
            particles,
            attractors: Vec::new(),
            starfield,
            pending_rings: Vec::new(),
            time: 0,
            base_hue: BASE_HUE,
            target_count: target,
            frame_count: 0,
            last_fps_sample_ms: None,
            last_frame_ms: f64::NEG_INFINITY,
            last_note_ms: -note_gap,
            auto_mode: true,
            visible: true,
            rng,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn attractors(&self) -> &[Attractor] {
        &self.attractors
    }

    pub fn pending_rings(&self) -> &[PendingRing] {
        &self.pending_rings
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn flow_field(&self) -> &FlowField {
        &self.flow_field
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Adopt new canvas dimensions. Degenerate geometry is refused so a
    /// collapsing canvas cannot poison particle or star state with NaN.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            log::warn!("[scene] ignoring resize to degenerate {width}x{height}");
            return;
        }
        self.width = width;
        self.height = height;
        self.flow_field.generate(width, height);
        self.starfield.reset_all(width, height, &mut self.rng);
    }

    /// One simulation + draw pass. No-op while the tab is hidden or when
    /// invoked faster than the configured frame cap allows.
    pub fn frame<S: Surface>(
        &mut self,
        now_ms: f64,
        audio_level: f32,
        surface: &mut S,
        out_notes: &mut Vec<NoteEvent>,
    ) {
        if !self.visible {
            return;
        }
        if now_ms - self.last_frame_ms < 1000.0 / f64::from(self.config.fps_limit) {
            return;
        }
        self.last_frame_ms = now_ms;

        self.time += 1;
        self.flow_field
            .update(self.time, self.settings.flow_speed, self.settings.intensity);

        surface.fill_rect(0.0, 0.0, self.width, self.height, Hsla::black(FADE_ALPHA));

        self.sample_fps(now_ms);

        self.starfield
            .update(self.time, self.width, self.height, &mut self.rng);
        render::draw_starfield(surface, &self.starfield);
        render::draw_background(
            surface,
            self.width,
            self.height,
            self.base_hue,
            audio_level,
            self.time,
        );

        self.fire_due_rings(now_ms, out_notes);

        let base_hue = self.base_hue;
        self.attractors.retain_mut(|a| {
            let alive = a.tick();
            if a.alpha() > 0.05 {
                render::draw_attractor(surface, a, base_hue);
            }
            alive
        });

        self.base_hue = (self.base_hue + BASE_HUE_DRIFT) % 360.0;

        let width = self.width;
        let height = self.height;
        let complexity = self.settings.complexity;
        let flow = &self.flow_field;
        let attractors = &self.attractors;
        self.particles.retain_mut(|p| {
            let sample = flow.sample(p.pos.x, p.pos.y);
            let alive = p.update(sample, audio_level, complexity, width, height);
            if alive {
                for a in attractors {
                    a.apply(p);
                }
                render::draw_particle(surface, p);
            }
            alive
        });

        self.replenish();
    }

    fn sample_fps(&mut self, now_ms: f64) {
        self.frame_count += 1;
        let window_start = *self.last_fps_sample_ms.get_or_insert(now_ms);
        if now_ms - window_start < FPS_WINDOW_MS {
            return;
        }
        let fps = self.frame_count;
        self.frame_count = 0;
        self.last_fps_sample_ms = Some(now_ms);

        if fps < self.config.fps_low && self.target_count > self.config.particle_floor {
            self.target_count = self
                .target_count
                .saturating_sub(self.config.adapt_down_step)
                .max(self.config.particle_floor);
            log::debug!("[scene] fps {fps}, target down to {}", self.target_count);
        } else if fps > self.config.fps_high && self.target_count < self.config.particle_ceiling {
            self.target_count =
                (self.target_count + self.config.adapt_up_step).min(self.config.particle_ceiling);
            log::debug!("[scene] fps {fps}, target up to {}", self.target_count);
        }
    }

    fn replenish(&mut self) {
        let want = self
            .target_count
            .saturating_sub(self.particles.len())
            .min(self.config.spawn_per_frame);
        for _ in 0..want {
            let x = self.rng.gen::<f32>() * self.width;
            let y = self.rng.gen::<f32>() * self.height;
            let mut p = Particle::spawn(x, y, &mut self.rng);
            p.hue = self.base_hue + (self.rng.gen::<f32>() - 0.5) * 30.0;
            self.particles.push(p);
        }
    }

    /// Immediate batch spawn at a location. Regular bursts are a uniform
    /// random cloud; space bursts stagger five expanding rings over time.
    /// Either way the live-particle ceiling holds.
    pub fn create_burst(
        &mut self,
        x: f32,
        y: f32,
        count: usize,
        space_burst: bool,
        now_ms: f64,
        out_notes: &mut Vec<NoteEvent>,
    ) {
        let cap = if space_burst { SPACE_BURST_CAP } else { BURST_CAP };
        let actual = count.min(cap);
        let hue = self.base_hue + (self.time as f32 * 0.01).sin() * HUE_RANGE;

        if space_burst {
            let per_ring = actual / SPACE_BURST_RINGS;
            for ring in 0..SPACE_BURST_RINGS {
                self.pending_rings.push(PendingRing {
                    fire_at_ms: now_ms + ring as f64 * RING_DELAY_MS,
                    centre: Vec2::new(x, y),
                    index: ring,
                    count: per_ring,
                    radius: RING_BASE_RADIUS + ring as f32 * RING_RADIUS_STEP,
                    speed: RING_BASE_SPEED + ring as f32 * RING_SPEED_STEP,
                    hue,
                });
            }
            // Ring zero is already due.
            self.fire_due_rings(now_ms, out_notes);
        } else {
            for _ in 0..actual {
                if self.particles.len() >= self.config.particle_limit {
                    break;
                }
                let mut p = Particle::spawn(x, y, &mut self.rng);
                p.vel = Vec2::new(
                    (self.rng.gen::<f32>() - 0.5) * 8.0,
                    (self.rng.gen::<f32>() - 0.5) * 8.0,
                );
                p.energy = 1.0;
                p.hue = hue + self.rng.gen::<f32>() * 20.0 - 10.0;
                self.particles.push(p);
            }
        }
    }

    fn fire_due_rings(&mut self, now_ms: f64, out_notes: &mut Vec<NoteEvent>) {
        let mut due = Vec::new();
        self.pending_rings.retain(|ring| {
            if ring.fire_at_ms <= now_ms {
                due.push(*ring);
                false
            } else {
                true
            }
        });

        for ring in due {
            for i in 0..ring.count {
                if self.particles.len() >= self.config.particle_limit {
                    break;
                }
                let angle = i as f32 / ring.count as f32 * TAU;
                let dir = Vec2::new(angle.cos(), angle.sin());
                let mut p = Particle::spawn(
                    ring.centre.x + dir.x * ring.radius,
                    ring.centre.y + dir.y * ring.radius,
                    &mut self.rng,
                );
                p.vel = dir * ring.speed;
                p.energy = 1.0;
                p.hue = ring.hue + (self.rng.gen::<f32>() - 0.5) * 20.0;
                p.max_life *= RING_LIFE_SCALE;
                p.original_size *= RING_SIZE_SCALE;
                p.size = p.original_size;
                // Angular and speed jitter keeps the rings organic.
                let jitter_angle = angle + (self.rng.gen::<f32>() - 0.5) * 0.2;
                let jitter_speed = ring.speed * (0.8 + self.rng.gen::<f32>() * 0.4);
                p.vel += Vec2::new(jitter_angle.cos(), jitter_angle.sin()) * jitter_speed * 0.3;
                self.particles.push(p);
            }
            if ring.index % 2 == 0 {
                self.try_play_note(true, now_ms, out_notes);
            }
        }
    }

    /// FIFO set of at most `max_attractors`; the oldest is evicted first.
    pub fn create_attractor(&mut self, x: f32, y: f32, strength: f32) {
        let radius = self.rng.gen::<f32>() * ATTRACTOR_RADIUS_SPAN + ATTRACTOR_MIN_RADIUS;
        self.attractors
            .push(Attractor::new(Vec2::new(x, y), strength, radius));
        while self.attractors.len() > self.config.max_attractors {
            self.attractors.remove(0);
        }
    }

    /// Emit a note unless one played within the configured gap. Forced notes
    /// always play; either way the gap window restarts.
    pub fn try_play_note(&mut self, forced: bool, now_ms: f64, out_notes: &mut Vec<NoteEvent>) {
        if !forced && now_ms - self.last_note_ms < self.config.note_gap_ms {
            return;
        }
        self.last_note_ms = now_ms;
        out_notes.push(random_note(&mut self.rng));
    }

    /// Periodic ambient stimulus, invoked by the host's interval task.
    pub fn auto_pulse(&mut self, now_ms: f64, out_notes: &mut Vec<NoteEvent>) {
        if !self.auto_mode || !self.visible {
            return;
        }
        let x = self.rng.gen::<f32>() * self.width;
        let y = self.rng.gen::<f32>() * self.height;
        self.create_attractor(x, y, 1.0);
        if self.rng.gen::<f32>() < 0.3 {
            self.try_play_note(true, now_ms, out_notes);
        }
    }

    /// Translate one host input event into scene mutations.
    pub fn handle_event(&mut self, event: InputEvent, now_ms: f64, out_notes: &mut Vec<NoteEvent>) {
        match event {
            InputEvent::PointerMove { x, y, held } => {
                if held {
                    self.create_burst(x, y, 5, false, now_ms, out_notes);
                    if self.rng.gen::<f32>() < 0.3 {
                        self.try_play_note(false, now_ms, out_notes);
                    }
                }
            }
            InputEvent::PointerDown { x, y } => {
                self.create_burst(x, y, 20, false, now_ms, out_notes);
                self.create_attractor(x, y, 2.0);
                self.try_play_note(false, now_ms, out_notes);
            }
            InputEvent::KeyDown(Key::Burst) => {
                let cx = self.width * 0.5;
                let cy = self.height * 0.5;
                self.create_burst(cx, cy, 50, true, now_ms, out_notes);
                self.create_attractor(cx, cy, 3.0);
            }
            InputEvent::TouchStart { x, y } => {
                self.create_burst(x, y, 20, false, now_ms, out_notes);
                self.create_attractor(x, y, 2.0);
                self.try_play_note(false, now_ms, out_notes);
            }
            InputEvent::TouchMove { x, y } => {
                if self.rng.gen::<f32>() < 0.3 {
                    self.create_burst(x, y, 5, false, now_ms, out_notes);
                    self.try_play_note(false, now_ms, out_notes);
                }
            }
        }
    }
}
