use std::cell::RefCell;

use anyhow::{anyhow, Result};
use nexus_core::NoteEvent;
use web_sys as web;

// Envelope shape for one-shot notes (seconds).
const ATTACK: f64 = 0.02;
const DECAY: f64 = 0.3;
const SUSTAIN: f32 = 0.2;
const RELEASE: f64 = 1.0;

/// WebAudio collaborator: a sine one-shot synth with reverb and delay sends,
/// plus an analyser the simulation reads its audio level from.
///
/// Construction can fail (autoplay policies, missing AudioContext); callers
/// run without audio in that case.
pub struct AudioEngine {
    ctx: web::AudioContext,
    master_gain: web::GainNode,
    reverb_in: web::GainNode,
    delay_in: web::GainNode,
    analyser: web::AnalyserNode,
    analyser_buf: RefCell<Vec<f32>>,
}

fn create_gain(ctx: &web::AudioContext, value: f32, label: &str) -> Result<web::GainNode> {
    match web::GainNode::new(ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => Err(anyhow!("{label} GainNode error: {e:?}")),
    }
}

/// Deterministic noise tail for the procedural reverb impulse response.
fn noise_tail(mut seed: u32, len: usize, sample_rate: f32, seconds: f32) -> Vec<f32> {
    let mut tail = vec![0.0f32; len];
    let dt = 1.0 / sample_rate;
    let mut t = 0.0f32;
    for sample in tail.iter_mut() {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        let n = (seed as f32 / u32::MAX as f32) * 2.0 - 1.0;
        let decay = (-t / 2.0).exp();
        let dark = (1.0 - t / seconds).max(0.0);
        *sample = n * decay * (0.6 + 0.4 * dark);
        t += dt;
    }
    tail
}

impl AudioEngine {
    pub fn new() -> Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| anyhow!("AudioContext: {e:?}"))?;

        // Master bus, kept quiet; notes stack.
        let master_gain = create_gain(&ctx, 0.1, "master")?;
        _ = master_gain.connect_with_audio_node(&ctx.destination());

        let analyser = web::AnalyserNode::new(&ctx).map_err(|e| anyhow!("AnalyserNode: {e:?}"))?;
        analyser.set_fft_size(256);
        _ = master_gain.connect_with_audio_node(&analyser);
        let analyser_buf = RefCell::new(vec![0.0f32; analyser.fft_size() as usize]);

        // Reverb bus with a procedurally generated stereo impulse response.
        let reverb_in = create_gain(&ctx, 1.0, "reverb in")?;
        let reverb = web::ConvolverNode::new(&ctx).map_err(|e| anyhow!("ConvolverNode: {e:?}"))?;
        reverb.set_normalize(true);
        {
            let sr = ctx.sample_rate();
            let seconds = 4.0f32;
            let len = (sr * seconds) as u32;
            if let Ok(ir) = ctx.create_buffer(2, len, sr) {
                for (channel, seed) in [(0, 0x1234_ABCDu32), (1, 0x7890_FEDCu32)] {
                    let mut tail = noise_tail(seed, len as usize, sr, seconds);
                    _ = ir.copy_to_channel(&mut tail, channel);
                }
                reverb.set_buffer(Some(&ir));
            }
        }
        let reverb_wet = create_gain(&ctx, 0.5, "reverb wet")?;
        _ = reverb_in.connect_with_audio_node(&reverb);
        _ = reverb.connect_with_audio_node(&reverb_wet);
        _ = reverb_wet.connect_with_audio_node(&master_gain);

        // Feedback delay, darkened by a lowpass in the loop.
        let delay_in = create_gain(&ctx, 1.0, "delay in")?;
        let delay = ctx
            .create_delay_with_max_delay_time(2.0)
            .map_err(|e| anyhow!("DelayNode: {e:?}"))?;
        delay.delay_time().set_value(0.25);
        let delay_tone =
            web::BiquadFilterNode::new(&ctx).map_err(|e| anyhow!("BiquadFilterNode: {e:?}"))?;
        delay_tone.set_type(web::BiquadFilterType::Lowpass);
        delay_tone.frequency().set_value(1400.0);
        let delay_feedback = create_gain(&ctx, 0.6, "delay feedback")?;
        let delay_wet = create_gain(&ctx, 0.3, "delay wet")?;
        _ = delay_in.connect_with_audio_node(&delay);
        _ = delay.connect_with_audio_node(&delay_tone);
        _ = delay_tone.connect_with_audio_node(&delay_feedback);
        _ = delay_feedback.connect_with_audio_node(&delay);
        _ = delay_tone.connect_with_audio_node(&delay_wet);
        _ = delay_wet.connect_with_audio_node(&master_gain);

        log::info!("[audio] engine ready, sample rate {}", ctx.sample_rate());
        Ok(Self {
            ctx,
            master_gain,
            reverb_in,
            delay_in,
            analyser,
            analyser_buf,
        })
    }

    /// Resume the context after a user gesture (autoplay policy).
    pub fn resume(&self) {
        _ = self.ctx.resume();
    }

    /// Fire a sine one-shot with an attack/decay/release envelope, routed to
    /// the master bus and both effect sends.
    pub fn trigger(&self, note: &NoteEvent) {
        let Ok(osc) = web::OscillatorNode::new(&self.ctx) else {
            return;
        };
        osc.set_type(web::OscillatorType::Sine);
        osc.frequency().set_value(note.frequency_hz);

        let Ok(env) = web::GainNode::new(&self.ctx) else {
            return;
        };
        env.gain().set_value(0.0);
        let t0 = self.ctx.current_time() + 0.005;
        let hold = f64::from(note.duration_sec);
        _ = env
            .gain()
            .linear_ramp_to_value_at_time(note.velocity, t0 + ATTACK);
        _ = env
            .gain()
            .linear_ramp_to_value_at_time(note.velocity * SUSTAIN, t0 + ATTACK + DECAY);
        _ = env
            .gain()
            .linear_ramp_to_value_at_time(0.0, t0 + hold + RELEASE);

        _ = osc.connect_with_audio_node(&env);
        _ = env.connect_with_audio_node(&self.master_gain);
        _ = env.connect_with_audio_node(&self.reverb_in);
        _ = env.connect_with_audio_node(&self.delay_in);
        _ = osc.start_with_when(t0);
        _ = osc.stop_with_when(t0 + hold + RELEASE + 0.05);
    }

    /// Mean |sample| of the current output waveform, in [0, 1].
    pub fn level(&self) -> f32 {
        let mut buf = self.analyser_buf.borrow_mut();
        let len = self.analyser.fft_size() as usize;
        if buf.len() != len {
            buf.resize(len, 0.0);
        }
        self.analyser.get_float_time_domain_data(&mut buf);
        if buf.is_empty() {
            return 0.0;
        }
        let sum: f32 = buf.iter().map(|v| v.abs()).sum();
        (sum / buf.len() as f32).clamp(0.0, 1.0)
    }
}
