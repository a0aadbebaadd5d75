use anyhow::{anyhow, Result};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Cancellable handle around a window interval. The callback stays alive as
/// long as the handle does; dropping (or `cancel`ing) clears the timer, so a
/// restart can never stack duplicate intervals.
pub struct IntervalTask {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl IntervalTask {
    pub fn new(interval_ms: i32, callback: impl FnMut() + 'static) -> Result<Self> {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        let id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                interval_ms,
            )
            .map_err(|e| anyhow!("setInterval: {e:?}"))?;
        Ok(Self {
            id,
            _closure: closure,
        })
    }

    pub fn cancel(self) {
        // Drop clears the interval.
    }
}

impl Drop for IntervalTask {
    fn drop(&mut self) {
        if let Some(window) = web::window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}
