//! Platform plumbing
//!
//! Handles browser/native differences for:
//! - Wall-clock time in milliseconds
//! - The periodic countdown callback (setInterval on the web)

/// Current wall-clock time in milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// RAII handle for a `setInterval` driver.
///
/// The interval is cleared when the handle drops, so disposing the handle is
/// how a driver gets stopped on a terminal round.
#[cfg(target_arch = "wasm32")]
pub struct Interval {
    id: i32,
    _closure: wasm_bindgen::closure::Closure<dyn FnMut()>,
}

#[cfg(target_arch = "wasm32")]
impl Interval {
    pub fn new<F: FnMut() + 'static>(period_ms: i32, f: F) -> Option<Self> {
        use wasm_bindgen::JsCast;

        let closure = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(f);
        let id = web_sys::window()?
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms,
            )
            .ok()?;
        Some(Self {
            id,
            _closure: closure,
        })
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}
