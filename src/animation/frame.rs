use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::window;

struct LoopState {
    handle: Option<i32>,
    callback: Option<Closure<dyn FnMut(f64)>>,
}

/// Drives a per-frame callback through `requestAnimationFrame`.
///
/// The callback gets the frame timestamp and returns whether it still has
/// work; the loop parks itself once it returns `false` until the next
/// [`FrameLoop::wake`]. Dropping the loop cancels the pending frame.
pub struct FrameLoop {
    state: Rc<RefCell<LoopState>>,
}

impl FrameLoop {
    pub fn new<F>(mut tick: F) -> Self
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let state = Rc::new(RefCell::new(LoopState {
            handle: None,
            callback: None,
        }));

        let weak = Rc::downgrade(&state);
        let callback = Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.borrow_mut().handle = None;
            if tick(timestamp) {
                schedule(&state);
            }
        });
        state.borrow_mut().callback = Some(callback);

        Self { state }
    }

    /// Schedules a frame unless one is already pending.
    pub fn wake(&self) {
        if self.state.borrow().handle.is_none() {
            schedule(&self.state);
        }
    }
}

fn schedule(state: &Rc<RefCell<LoopState>>) {
    let Some(win) = window() else {
        return;
    };
    let mut state = state.borrow_mut();
    let Some(callback) = state.callback.as_ref() else {
        return;
    };
    if let Ok(handle) = win.request_animation_frame(callback.as_ref().unchecked_ref()) {
        state.handle = Some(handle);
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        if let (Some(win), Some(handle)) = (window(), state.handle.take()) {
            let _ = win.cancel_animation_frame(handle);
        }
        state.callback = None;
    }
}

/// Milliseconds since page load, on the same clock as frame timestamps.
pub fn now_ms() -> f64 {
    window()
        .and_then(|win| win.performance())
        .map(|performance| performance.now())
        .unwrap_or(0.0)
}
