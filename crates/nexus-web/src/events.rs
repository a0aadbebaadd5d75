use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use nexus_core::{InputEvent, Key, NoteEvent, Scene};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::audio::AudioEngine;
use crate::dom;
use crate::input;

/// Everything a listener closure needs, cloned per handler.
#[derive(Clone)]
pub struct Wiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<Scene>>,
    pub mouse: Rc<RefCell<input::MouseState>>,
    pub audio: Option<Rc<AudioEngine>>,
    pub epoch: Instant,
}

impl Wiring {
    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    fn dispatch(&self, event: InputEvent) {
        let mut notes: Vec<NoteEvent> = Vec::new();
        self.scene
            .borrow_mut()
            .handle_event(event, self.now_ms(), &mut notes);
        if let Some(audio) = &self.audio {
            for note in &notes {
                audio.trigger(note);
            }
        }
    }

    fn canvas_pos(&self, client_x: i32, client_y: i32) -> glam::Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        input::client_to_canvas_px(
            client_x as f32,
            client_y as f32,
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
            self.canvas.width() as f32,
            self.canvas.height() as f32,
        )
    }
}

pub fn wire_input_handlers(wiring: &Wiring) {
    wire_pointer_move(wiring);
    wire_pointer_down(wiring);
    wire_pointer_up(wiring);
    wire_touch_start(wiring);
    wire_touch_move(wiring);
}

fn wire_pointer_move(wiring: &Wiring) {
    let w = wiring.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = w.canvas_pos(ev.client_x(), ev.client_y());
        let held = {
            let mut ms = w.mouse.borrow_mut();
            ms.x = pos.x;
            ms.y = pos.y;
            ms.down
        };
        w.dispatch(InputEvent::PointerMove {
            x: pos.x,
            y: pos.y,
            held,
        });
    }) as Box<dyn FnMut(_)>);
    _ = wiring
        .canvas
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointer_down(wiring: &Wiring) {
    let w = wiring.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        w.mouse.borrow_mut().down = true;
        // First gesture unlocks the audio context.
        if let Some(audio) = &w.audio {
            audio.resume();
        }
        let pos = w.canvas_pos(ev.client_x(), ev.client_y());
        w.dispatch(InputEvent::PointerDown { x: pos.x, y: pos.y });
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = wiring
        .canvas
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointer_up(wiring: &Wiring) {
    let w = wiring.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        // Release only clears the held flag; the scene is not involved.
        w.mouse.borrow_mut().down = false;
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_touch_start(wiring: &Wiring) {
    let w = wiring.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        ev.prevent_default();
        if let Some(audio) = &w.audio {
            audio.resume();
        }
        if let Some(touch) = ev.touches().get(0) {
            let pos = w.canvas_pos(touch.client_x(), touch.client_y());
            w.dispatch(InputEvent::TouchStart { x: pos.x, y: pos.y });
        }
    }) as Box<dyn FnMut(_)>);
    _ = wiring
        .canvas
        .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_touch_move(wiring: &Wiring) {
    let w = wiring.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        ev.prevent_default();
        if let Some(touch) = ev.touches().get(0) {
            let pos = w.canvas_pos(touch.client_x(), touch.client_y());
            w.dispatch(InputEvent::TouchMove { x: pos.x, y: pos.y });
        }
    }) as Box<dyn FnMut(_)>);
    _ = wiring
        .canvas
        .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Space triggers the centre space burst.
pub fn wire_burst_key(wiring: &Wiring) {
    let w = wiring.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.code() == "Space" {
            ev.prevent_default();
            w.dispatch(InputEvent::KeyDown(Key::Burst));
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

pub fn wire_canvas_resize(wiring: &Wiring) {
    let w = wiring.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&w.canvas);
        w.scene
            .borrow_mut()
            .resize(w.canvas.width() as f32, w.canvas.height() as f32);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Bind the three tuning sliders to the scene settings.
pub fn wire_sliders(document: &web::Document, scene: Rc<RefCell<Scene>>) {
    let s = scene.clone();
    dom::add_input_listener(document, "intensity", move |raw| {
        if let Some(v) = input::slider_fraction(&raw) {
            s.borrow_mut().settings.set_intensity(v);
        }
    });
    let s = scene.clone();
    dom::add_input_listener(document, "complexity", move |raw| {
        if let Some(v) = input::parse_complexity(&raw) {
            s.borrow_mut().settings.set_complexity(v);
        }
    });
    let s = scene;
    dom::add_input_listener(document, "flow", move |raw| {
        if let Some(v) = input::slider_fraction(&raw) {
            s.borrow_mut().settings.set_flow_speed(v);
        }
    });
}
