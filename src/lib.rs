#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

pub use ripple_color as color;
pub use ripple_motion as motion;
pub use ripple_net as net;

pub use color::Rgba;
pub use ripple_core::{Error, StylePatch};

#[cfg(target_arch = "wasm32")]
pub use ripple_core::{
    EventBinding, OnceListener, Point, Selection, computed_style, document, listen_once, ready,
    select, window,
};

pub mod prelude {
    //! A collection of commonly used types and operations for easy
    //! importing.
    //!
    //! # Example
    //!
    //! ```rust,ignore
    //! use ripple::prelude::*;
    //!
    //! let boxes = ripple::select(".box")?;
    //! animate(&boxes, &[("width", 400.0.into())], 250.0)?;
    //! ```
    pub use crate::color::Rgba;
    pub use crate::motion::{TargetValue, Timeline};
    pub use crate::net::{Data, Method, Settings};
    pub use crate::{Error, StylePatch};

    #[cfg(target_arch = "wasm32")]
    pub use crate::motion::{
        animate, animate_with, color_animate, color_animate_with, fade_in, fade_in_with, fade_out,
        fade_out_with, slide_down, slide_toggle, slide_up,
    };

    #[cfg(target_arch = "wasm32")]
    pub use crate::net::ajax;

    #[cfg(target_arch = "wasm32")]
    pub use crate::{Selection, ready, select};
}

/// Installs the browser panic hook so panics surface in the console with
/// a readable backtrace. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init() {
    console_error_panic_hook::set_once();
    tracing::debug!("ripple initialised");
}
