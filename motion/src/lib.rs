//! # Ripple Motion
//!
//! The animation engine: frame-driven numeric tweening (`animate`),
//! fades (`fade_in`, `fade_out`), color interpolation (`color_animate`),
//! and slide transitions (`slide_up`, `slide_down`, `slide_toggle`) that
//! lean on the host's native CSS-transition engine instead of per-frame
//! math.
//!
//! Tweens are owned by the call that created them; nothing is shared
//! between concurrent animations, and two tasks driving the same property
//! on the same element race last-write-wins on the inline style. Each
//! frame's writes go through a single [`ripple_core::StylePatch`], so the
//! racing values are at least observable.
//!
//! The interpolation math ([`Timeline`], [`PropertyTween`], [`TweenSet`],
//! [`ColorTween`]) carries no DOM dependency and is exercised natively;
//! the drivers compile for the `wasm32` target only.

mod timeline;
pub use timeline::Timeline;

mod tween;
pub use tween::{ColorTween, ColorTweenSet, PropertyTween, TargetValue, TweenSet};

mod slide;
#[cfg(target_arch = "wasm32")]
pub use slide::{slide_down, slide_toggle, slide_up};

#[cfg(target_arch = "wasm32")]
mod frame;

#[cfg(target_arch = "wasm32")]
mod animate;
#[cfg(target_arch = "wasm32")]
pub use animate::{
    animate, animate_with, color_animate, color_animate_with, fade_in, fade_in_with, fade_out,
    fade_out_with,
};
