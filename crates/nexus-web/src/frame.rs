use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use nexus_core::{NoteEvent, Scene};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::audio::AudioEngine;
use crate::dom;
use crate::surface::CanvasSurface;
use crate::tasks::IntervalTask;

/// Owns everything the animation loop touches each frame. The auto-mode
/// interval handle lives here so it survives for the lifetime of the loop.
pub struct FrameContext {
    pub ctx: web::CanvasRenderingContext2d,
    pub scene: Rc<RefCell<Scene>>,
    pub audio: Option<Rc<AudioEngine>>,
    pub epoch: Instant,
    pub auto_task: Rc<RefCell<Option<IntervalTask>>>,
    note_buf: Vec<NoteEvent>,
}

impl FrameContext {
    pub fn new(
        ctx: web::CanvasRenderingContext2d,
        scene: Rc<RefCell<Scene>>,
        audio: Option<Rc<AudioEngine>>,
        epoch: Instant,
        auto_task: Rc<RefCell<Option<IntervalTask>>>,
    ) -> Self {
        Self {
            ctx,
            scene,
            audio,
            epoch,
            auto_task,
            note_buf: Vec::new(),
        }
    }

    pub fn frame(&mut self) {
        let hidden = dom::window_document()
            .map(|d| d.hidden())
            .unwrap_or(false);
        let now_ms = self.epoch.elapsed().as_secs_f64() * 1000.0;
        let audio_level = self.audio.as_ref().map(|a| a.level()).unwrap_or(0.0);

        self.note_buf.clear();
        {
            let mut scene = self.scene.borrow_mut();
            scene.set_visible(!hidden);
            let mut surface = CanvasSurface::new(&self.ctx);
            scene.frame(now_ms, audio_level, &mut surface, &mut self.note_buf);
        }
        if let Some(audio) = &self.audio {
            for note in &self.note_buf {
                audio.trigger(note);
            }
        }
    }
}

/// Drive the frame loop from requestAnimationFrame.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
