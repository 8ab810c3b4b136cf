//! Animation-frame scheduling.
//!
//! The host re-invokes a single callback once per frame until the tick
//! reports completion, at which point the closure frees itself.

use std::cell::RefCell;
use std::rc::Rc;

use ripple_core::{Error, window};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// High-resolution timestamp in milliseconds.
pub(crate) fn now() -> Result<f64, Error> {
    Ok(window()?
        .performance()
        .ok_or(Error::DomUnavailable)?
        .now())
}

fn request_frame(closure: &Closure<dyn FnMut(f64)>) -> Result<i32, Error> {
    Ok(window()?.request_animation_frame(closure.as_ref().unchecked_ref())?)
}

/// Invokes `tick` with the frame timestamp once per animation frame,
/// re-arming until it returns `false`.
pub(crate) fn run_frames(mut tick: impl FnMut(f64) -> bool + 'static) -> Result<(), Error> {
    let slot: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let armed = Rc::clone(&slot);
    let closure = Closure::wrap(Box::new(move |timestamp: f64| {
        if tick(timestamp) {
            if let Some(callback) = armed.borrow().as_ref() {
                if let Err(err) = request_frame(callback) {
                    tracing::warn!(%err, "failed to re-arm animation frame");
                }
                return;
            }
        }
        // Completed: release the closure once this call returns.
        armed.borrow_mut().take();
    }) as Box<dyn FnMut(f64)>);
    request_frame(&closure)?;
    *slot.borrow_mut() = Some(closure);
    Ok(())
}

/// Runs a callback on the next animation frame.
pub(crate) fn next_frame(callback: impl FnOnce(f64) + 'static) -> Result<(), Error> {
    let mut callback = Some(callback);
    run_frames(move |timestamp| {
        if let Some(callback) = callback.take() {
            callback(timestamp);
        }
        false
    })
}
