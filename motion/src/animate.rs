//! Frame-driven property and color animation.

use ripple_core::{Error, Selection, StylePatch, computed_style};
use ripple_color::Rgba;
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, HtmlElement};

use crate::frame;
use crate::timeline::Timeline;
use crate::tween::{ColorTween, ColorTweenSet, PropertyTween, TargetValue, TweenSet};

type OnComplete = Box<dyn FnOnce()>;

/// Animates numeric CSS properties toward target values.
///
/// Initial values are read from the computed style; unparsable values are
/// treated as 0. Concurrent animations touching the same property race
/// last-write-wins.
///
/// # Errors
///
/// Returns an error when the DOM is unavailable.
pub fn animate(
    selection: &Selection,
    targets: &[(&str, TargetValue)],
    duration_ms: f64,
) -> Result<(), Error> {
    animate_with(selection, targets, duration_ms, || {})
}

/// [`animate`] with a completion callback, invoked exactly once inside the
/// final frame.
///
/// # Errors
///
/// Returns an error when the DOM is unavailable.
pub fn animate_with(
    selection: &Selection,
    targets: &[(&str, TargetValue)],
    duration_ms: f64,
    on_complete: impl FnOnce() + 'static,
) -> Result<(), Error> {
    let tasks = capture_tweens(selection, targets)?;
    run(tasks, duration_ms, Box::new(on_complete))
}

/// Fades every matched element out, then hides it.
///
/// # Errors
///
/// Returns an error when the DOM is unavailable.
pub fn fade_out(selection: &Selection, duration_ms: f64) -> Result<(), Error> {
    fade_out_with(selection, duration_ms, || {})
}

/// [`fade_out`] with a completion callback, invoked after the element is
/// hidden.
///
/// # Errors
///
/// Returns an error when the DOM is unavailable.
pub fn fade_out_with(
    selection: &Selection,
    duration_ms: f64,
    on_complete: impl FnOnce() + 'static,
) -> Result<(), Error> {
    let hidden = selection.clone();
    animate_with(selection, &[("opacity", 0.0.into())], duration_ms, move || {
        if let Err(err) = hidden.hide() {
            tracing::warn!(%err, "failed to hide faded-out element");
        }
        on_complete();
    })
}

/// Reveals every matched element and fades it in from transparent.
///
/// # Errors
///
/// Returns an error when the DOM is unavailable.
pub fn fade_in(selection: &Selection, duration_ms: f64) -> Result<(), Error> {
    fade_in_with(selection, duration_ms, || {})
}

/// [`fade_in`] with a completion callback.
///
/// # Errors
///
/// Returns an error when the DOM is unavailable.
pub fn fade_in_with(
    selection: &Selection,
    duration_ms: f64,
    on_complete: impl FnOnce() + 'static,
) -> Result<(), Error> {
    selection.show()?.set_css("opacity", "0")?;
    animate_with(selection, &[("opacity", 1.0.into())], duration_ms, on_complete)
}

/// Animates color-valued CSS properties toward target colors.
///
/// Both sides are parsed as CSS colors; unsupported formats resolve to
/// opaque black. The interpolated value is written back in
/// `rgba(r, g, b, a)` notation each frame.
///
/// # Errors
///
/// Returns an error when the DOM is unavailable.
pub fn color_animate(
    selection: &Selection,
    targets: &[(&str, &str)],
    duration_ms: f64,
) -> Result<(), Error> {
    color_animate_with(selection, targets, duration_ms, || {})
}

/// [`color_animate`] with a completion callback, invoked exactly once
/// inside the final frame.
///
/// # Errors
///
/// Returns an error when the DOM is unavailable.
pub fn color_animate_with(
    selection: &Selection,
    targets: &[(&str, &str)],
    duration_ms: f64,
    on_complete: impl FnOnce() + 'static,
) -> Result<(), Error> {
    let tasks = capture_color_tweens(selection, targets)?;
    run(tasks, duration_ms, Box::new(on_complete))
}

/// One element's inline style paired with the interpolation that drives it.
struct Task<S> {
    style: CssStyleDeclaration,
    set: S,
}

trait Interpolate {
    fn patch_at(&self, percent: f64) -> StylePatch;
}

impl Interpolate for TweenSet {
    fn patch_at(&self, percent: f64) -> StylePatch {
        Self::patch_at(self, percent)
    }
}

impl Interpolate for ColorTweenSet {
    fn patch_at(&self, percent: f64) -> StylePatch {
        Self::patch_at(self, percent)
    }
}

fn capture_tweens(
    selection: &Selection,
    targets: &[(&str, TargetValue)],
) -> Result<Vec<Task<TweenSet>>, Error> {
    let mut tasks = Vec::new();
    for element in selection.elements() {
        let Some(style) = element.dyn_ref::<HtmlElement>().map(HtmlElement::style) else {
            continue;
        };
        let computed = computed_style(element)?;
        let tweens = targets
            .iter()
            .map(|(property, target)| {
                let current = computed.get_property_value(property).unwrap_or_default();
                PropertyTween::resolve(property, &current, target)
            })
            .collect();
        tasks.push(Task {
            style,
            set: TweenSet::new(tweens),
        });
    }
    Ok(tasks)
}

fn capture_color_tweens(
    selection: &Selection,
    targets: &[(&str, &str)],
) -> Result<Vec<Task<ColorTweenSet>>, Error> {
    let mut tasks = Vec::new();
    for element in selection.elements() {
        let Some(style) = element.dyn_ref::<HtmlElement>().map(HtmlElement::style) else {
            continue;
        };
        let computed = computed_style(element)?;
        let tweens = targets
            .iter()
            .map(|(property, target)| {
                let current = computed.get_property_value(property).unwrap_or_default();
                ColorTween::new(
                    property,
                    Rgba::parse_or_black(&current),
                    Rgba::parse_or_black(target),
                )
            })
            .collect();
        tasks.push(Task {
            style,
            set: ColorTweenSet::new(tweens),
        });
    }
    Ok(tasks)
}

fn run<S: Interpolate + 'static>(
    tasks: Vec<Task<S>>,
    duration_ms: f64,
    on_complete: OnComplete,
) -> Result<(), Error> {
    let timeline = Timeline::new(frame::now()?, duration_ms);
    let mut on_complete = Some(on_complete);
    frame::run_frames(move |timestamp| {
        let percent = timeline.percent_at(timestamp);
        for task in &tasks {
            if let Err(err) = task.set.patch_at(percent).apply_to(&task.style) {
                tracing::warn!(%err, "failed to apply animation frame");
            }
        }
        if percent < 1.0 {
            return true;
        }
        if let Some(callback) = on_complete.take() {
            callback();
        }
        false
    })
}
