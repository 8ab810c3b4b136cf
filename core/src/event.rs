//! Event binding with scoped detachment.
//!
//! A listener attached through this module lives exactly as long as its
//! handle: dropping an [`EventBinding`] detaches it, and [`listen_once`]
//! subscriptions are released by the host after their single delivery.
//! Call [`EventBinding::forget`] for a listener that should outlive its
//! handle.

use core::fmt;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, DocumentReadyState, Event, EventTarget};

use crate::Error;

/// A detachable event subscription.
///
/// The subscription is released when the binding is dropped or
/// [`detach`](Self::detach)ed.
pub struct EventBinding {
    target: EventTarget,
    event: String,
    closure: Option<Closure<dyn FnMut(Event)>>,
}

impl EventBinding {
    pub(crate) fn attach(
        target: &EventTarget,
        event: &str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, Error> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event: event.to_owned(),
            closure: Some(closure),
        })
    }

    /// Removes the listener from its target.
    pub fn detach(mut self) {
        self.release();
    }

    /// Leaves the listener attached for the lifetime of the page, giving up
    /// the ability to detach it.
    pub fn forget(mut self) {
        if let Some(closure) = self.closure.take() {
            closure.forget();
        }
    }

    fn release(&mut self) {
        if let Some(closure) = self.closure.take() {
            let _ = self
                .target
                .remove_event_listener_with_callback(&self.event, closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for EventBinding {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for EventBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBinding")
            .field("event", &self.event)
            .field("attached", &self.closure.is_some())
            .finish_non_exhaustive()
    }
}

/// A one-shot event subscription.
///
/// The host removes the listener after its first delivery and the backing
/// closure is reclaimed on that call. [`cancel`](OnceListener::cancel)
/// detaches a subscription that has not fired yet.
pub struct OnceListener {
    target: EventTarget,
    event: String,
    callback: JsValue,
}

impl OnceListener {
    /// Detaches the listener without waiting for the event.
    pub fn cancel(self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(&self.event, self.callback.unchecked_ref());
    }
}

impl fmt::Debug for OnceListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnceListener")
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}

/// Attaches a handler that the host invokes at most once.
///
/// # Errors
///
/// Returns an error if the listener cannot be registered.
pub fn listen_once(
    target: &EventTarget,
    event: &str,
    handler: impl FnOnce(Event) + 'static,
) -> Result<OnceListener, Error> {
    let callback = Closure::once_into_js(handler);
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        callback.unchecked_ref(),
        &options,
    )?;
    Ok(OnceListener {
        target: target.clone(),
        event: event.to_owned(),
        callback,
    })
}

/// Runs a callback once the DOM is fully loaded, or immediately when the
/// document has already left the loading state.
///
/// # Errors
///
/// Returns an error if the DOM is unavailable or the listener cannot be
/// registered.
pub fn ready(callback: impl FnOnce() + 'static) -> Result<(), Error> {
    let document = crate::document()?;
    if document.ready_state() == DocumentReadyState::Loading {
        let hook = Closure::once_into_js(move |_: Event| callback());
        document.add_event_listener_with_callback("DOMContentLoaded", hook.unchecked_ref())?;
    } else {
        callback();
    }
    Ok(())
}
