//! # Ripple Core
//!
//! Element selection and the shared DOM plumbing for the Ripple library:
//! the [`Selection`] element-set wrapper with its content, style, class,
//! attribute, geometry, and traversal helpers; scoped event bindings with
//! one-shot (`once`) subscriptions; the [`StylePatch`] value object that
//! animations apply atomically per frame; and the common error type.
//!
//! Everything that touches the live DOM is compiled only for the
//! `wasm32` target. [`StylePatch`] and [`Error`] are target-independent
//! so the logic built on top of them can be exercised natively.

mod error;
pub use error::Error;

mod style;
pub use style::StylePatch;

#[cfg(target_arch = "wasm32")]
mod event;
#[cfg(target_arch = "wasm32")]
pub use event::{EventBinding, OnceListener, listen_once, ready};

#[cfg(target_arch = "wasm32")]
mod selection;
#[cfg(target_arch = "wasm32")]
pub use selection::{Point, Selection, computed_style, document, select, window};
