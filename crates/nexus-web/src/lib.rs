#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use nexus_core::{Scene, SceneConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod dom;
mod events;
mod frame;
mod input;
mod surface;
mod tasks;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("nexus-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {e:?}");
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #canvas"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    dom::sync_canvas_backing_size(&canvas);

    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{e:?}"))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;

    // Audio is optional: on failure the scene runs silent with a zero level.
    let audio = match audio::AudioEngine::new() {
        Ok(engine) => Some(Rc::new(engine)),
        Err(e) => {
            log::error!("audio initialization failed: {e:?}");
            None
        }
    };

    let seed = js_sys::Date::now() as u64;
    let scene = Scene::new(
        SceneConfig::default(),
        canvas.width() as f32,
        canvas.height() as f32,
        seed,
    )
    .map_err(|e| anyhow::anyhow!("scene config: {e}"))?;
    let scene = Rc::new(RefCell::new(scene));

    let epoch = Instant::now();
    let wiring = events::Wiring {
        canvas: canvas.clone(),
        scene: scene.clone(),
        mouse: Rc::new(RefCell::new(input::MouseState::default())),
        audio: audio.clone(),
        epoch,
    };
    events::wire_canvas_resize(&wiring);
    events::wire_input_handlers(&wiring);
    events::wire_burst_key(&wiring);
    events::wire_sliders(&document, scene.clone());

    let auto_task: Rc<RefCell<Option<tasks::IntervalTask>>> = Rc::new(RefCell::new(None));
    start_auto_mode(&auto_task, scene.clone(), audio.clone(), epoch)?;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        ctx, scene, audio, epoch, auto_task,
    )));
    frame::start_loop(frame_ctx);
    Ok(())
}

/// (Re)install the auto-mode interval. The previous task is cancelled first
/// so restarts can never stack duplicate timers.
fn start_auto_mode(
    slot: &Rc<RefCell<Option<tasks::IntervalTask>>>,
    scene: Rc<RefCell<Scene>>,
    audio: Option<Rc<audio::AudioEngine>>,
    epoch: Instant,
) -> anyhow::Result<()> {
    if let Some(previous) = slot.borrow_mut().take() {
        previous.cancel();
    }
    let interval_ms = scene.borrow().config().auto_interval_ms as i32;
    let task = tasks::IntervalTask::new(interval_ms, move || {
        let now_ms = epoch.elapsed().as_secs_f64() * 1000.0;
        let mut notes = Vec::new();
        scene.borrow_mut().auto_pulse(now_ms, &mut notes);
        if let Some(audio) = &audio {
            for note in &notes {
                audio.trigger(note);
            }
        }
    })?;
    *slot.borrow_mut() = Some(task);
    Ok(())
}
