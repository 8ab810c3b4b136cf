//! # Ripple Net
//!
//! The fetch-based request helper: a declarative [`Settings`] object is
//! normalized once (data→body translation, content-type inference,
//! query-string construction), dispatched through the host's fetch
//! primitive, optionally raced against a timeout, and decoded into a
//! tagged response body chosen by the content-type header.
//!
//! Every call settles exactly once — one resolution or one typed error,
//! never both, with no retries. Failures pass through the caller's
//! `on_error` hook before being returned.
//!
//! Settings normalization, encoding, and response classification are
//! target-independent and tested natively; only the dispatcher itself
//! requires the `wasm32` target.

mod error;
pub use error::Error;

mod encode;

mod settings;
pub use settings::{Data, Method, Settings};

mod response;
pub use response::Kind;
#[cfg(target_arch = "wasm32")]
pub use response::{Body, Response};

#[cfg(target_arch = "wasm32")]
mod client;
#[cfg(target_arch = "wasm32")]
pub use client::{ajax, delete, get, post, put};
