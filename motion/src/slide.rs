//! Slide transitions.
//!
//! Unlike the frame-driven tweens, slides hand interpolation to the host's
//! native CSS-transition engine: pin the current geometry, flip the target
//! values under a `transition` directive on the next frame, and finalize
//! when the host reports the transition has ended. The completion handler
//! is a one-shot subscription and is guarded by a per-element generation
//! token, so interleaved slide calls never finalize each other's styles.

use ripple_core::StylePatch;

/// Inline properties a slide overrides and must put back afterwards.
const MANAGED: [&str; 7] = [
    "height",
    "overflow",
    "transition",
    "padding-top",
    "padding-bottom",
    "margin-top",
    "margin-bottom",
];

fn transition_directive(duration_ms: f64) -> String {
    MANAGED[..1]
        .iter()
        .chain(&MANAGED[3..])
        .map(|property| format!("{property} {duration_ms}ms ease"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Pins the current rendered height so the collapse has a fixed start.
fn collapse_pin_patch(height_px: f64) -> StylePatch {
    StylePatch::new()
        .with("height", format!("{height_px}px"))
        .with("overflow", "hidden")
}

/// Drives height, padding, and margin to zero under a transition.
fn collapse_zero_patch(duration_ms: f64) -> StylePatch {
    StylePatch::new()
        .with("transition", transition_directive(duration_ms))
        .with("height", "0px")
        .with("padding-top", "0px")
        .with("padding-bottom", "0px")
        .with("margin-top", "0px")
        .with("margin-bottom", "0px")
}

/// Forces a zero-height visible starting state for the expansion.
fn expand_prime_patch() -> StylePatch {
    let mut patch = StylePatch::new();
    patch.clear("display");
    patch
        .with("height", "0px")
        .with("overflow", "hidden")
        .with("padding-top", "0px")
        .with("padding-bottom", "0px")
        .with("margin-top", "0px")
        .with("margin-bottom", "0px")
}

/// Grows to the measured natural geometry under a transition.
fn expand_grow_patch(natural: &NaturalGeometry, duration_ms: f64) -> StylePatch {
    StylePatch::new()
        .with("transition", transition_directive(duration_ms))
        .with("height", format!("{}px", natural.height))
        .with("padding-top", natural.padding_top.clone())
        .with("padding-bottom", natural.padding_bottom.clone())
        .with("margin-top", natural.margin_top.clone())
        .with("margin-bottom", natural.margin_bottom.clone())
}

/// Removes every slide-managed inline property, reverting the element to
/// natural flow layout.
fn settle_patch() -> StylePatch {
    let mut patch = StylePatch::new();
    for property in MANAGED {
        patch.clear(property);
    }
    patch
}

/// The geometry an expansion animates toward, measured before priming.
#[derive(Debug, Clone)]
struct NaturalGeometry {
    height: f64,
    padding_top: String,
    padding_bottom: String,
    margin_top: String,
    margin_bottom: String,
}

#[cfg(target_arch = "wasm32")]
pub use runner::{slide_down, slide_toggle, slide_up};

#[cfg(target_arch = "wasm32")]
mod runner {
    use std::cell::Cell;

    use ripple_core::{Error, Selection, StylePatch, computed_style, listen_once};
    use wasm_bindgen::JsCast;
    use web_sys::{CssStyleDeclaration, Element, HtmlElement};

    use super::{
        NaturalGeometry, collapse_pin_patch, collapse_zero_patch, expand_grow_patch,
        expand_prime_patch, settle_patch,
    };
    use crate::frame;

    const TOKEN_ATTR: &str = "data-ripple-slide";

    thread_local! {
        static SLIDE_SEQ: Cell<u32> = const { Cell::new(0) };
    }

    fn first_html_element(selection: &Selection) -> Option<HtmlElement> {
        selection
            .first()
            .and_then(|element| element.dyn_ref::<HtmlElement>().cloned())
    }

    fn snapshot(style: &CssStyleDeclaration) -> Vec<(String, String)> {
        super::MANAGED
            .iter()
            .map(|property| {
                (
                    (*property).to_owned(),
                    style.get_property_value(property).unwrap_or_default(),
                )
            })
            .collect()
    }

    fn arm_token(element: &Element) -> Result<u32, Error> {
        let token = SLIDE_SEQ.with(|seq| {
            let next = seq.get().wrapping_add(1);
            seq.set(next);
            next
        });
        element.set_attribute(TOKEN_ATTR, &token.to_string())?;
        Ok(token)
    }

    fn holds_token(element: &Element, token: u32) -> bool {
        element
            .get_attribute(TOKEN_ATTR)
            .is_some_and(|value| value == token.to_string())
    }

    fn is_hidden(element: &Element) -> bool {
        computed_style(element)
            .and_then(|style| Ok(style.get_property_value("display")?))
            .is_ok_and(|display| display == "none")
    }

    fn force_layout(element: &HtmlElement) {
        let _ = element.offset_height();
    }

    /// Collapses the first matched element to zero height, then hides it.
    ///
    /// The element's overridden inline properties are restored once the
    /// transition ends. Already-hidden elements are left alone.
    ///
    /// # Errors
    ///
    /// Returns an error when the DOM is unavailable or a style write fails.
    pub fn slide_up(selection: &Selection, duration_ms: f64) -> Result<(), Error> {
        let Some(html) = first_html_element(selection) else {
            return Ok(());
        };
        let element: Element = html.clone().into();
        if is_hidden(&element) {
            return Ok(());
        }

        let style = html.style();
        let saved = snapshot(&style);
        collapse_pin_patch(f64::from(html.offset_height())).apply_to(&style)?;
        force_layout(&html);
        let token = arm_token(&element)?;

        let finalize = {
            let element = element.clone();
            let style = style.clone();
            move || finalize_up(&element, &style, &saved, token)
        };

        if duration_ms <= 0.0 {
            collapse_zero_patch(duration_ms).apply_to(&style)?;
            finalize();
            return Ok(());
        }

        frame::next_frame(move |_| {
            if let Err(err) = collapse_zero_patch(duration_ms).apply_to(&style) {
                tracing::warn!(%err, "failed to start collapse transition");
                return;
            }
            if let Err(err) = listen_once(element.as_ref(), "transitionend", move |_| finalize()) {
                tracing::warn!(%err, "failed to observe collapse transition");
            }
        })
    }

    fn finalize_up(
        element: &Element,
        style: &CssStyleDeclaration,
        saved: &[(String, String)],
        token: u32,
    ) {
        if !holds_token(element, token) {
            return;
        }
        let mut patch: StylePatch = saved.iter().cloned().collect();
        patch.set("display", "none");
        if let Err(err) = patch.apply_to(style) {
            tracing::warn!(%err, "failed to finalize collapse");
        }
        let _ = element.remove_attribute(TOKEN_ATTR);
    }

    /// Expands the first matched element from zero height to its natural
    /// geometry, then reverts it to natural flow layout.
    ///
    /// # Errors
    ///
    /// Returns an error when the DOM is unavailable or a style write fails.
    pub fn slide_down(selection: &Selection, duration_ms: f64) -> Result<(), Error> {
        let Some(html) = first_html_element(selection) else {
            return Ok(());
        };
        let element: Element = html.clone().into();

        let computed = computed_style(&element)?;
        let sides = NaturalGeometry {
            height: 0.0,
            padding_top: computed
                .get_property_value("padding-top")
                .unwrap_or_default(),
            padding_bottom: computed
                .get_property_value("padding-bottom")
                .unwrap_or_default(),
            margin_top: computed.get_property_value("margin-top").unwrap_or_default(),
            margin_bottom: computed
                .get_property_value("margin-bottom")
                .unwrap_or_default(),
        };

        let style = html.style();
        expand_prime_patch().apply_to(&style)?;
        force_layout(&html);
        let natural = NaturalGeometry {
            height: f64::from(element.scroll_height()),
            ..sides
        };
        let token = arm_token(&element)?;

        let finalize = {
            let element = element.clone();
            let style = style.clone();
            move || finalize_down(&element, &style, token)
        };

        if duration_ms <= 0.0 {
            expand_grow_patch(&natural, duration_ms).apply_to(&style)?;
            finalize();
            return Ok(());
        }

        frame::next_frame(move |_| {
            if let Err(err) = expand_grow_patch(&natural, duration_ms).apply_to(&style) {
                tracing::warn!(%err, "failed to start expand transition");
                return;
            }
            if let Err(err) = listen_once(element.as_ref(), "transitionend", move |_| finalize()) {
                tracing::warn!(%err, "failed to observe expand transition");
            }
        })
    }

    fn finalize_down(element: &Element, style: &CssStyleDeclaration, token: u32) {
        if !holds_token(element, token) {
            return;
        }
        if let Err(err) = settle_patch().apply_to(style) {
            tracing::warn!(%err, "failed to finalize expand");
        }
        let _ = element.remove_attribute(TOKEN_ATTR);
    }

    /// Slides the first matched element down when hidden, up otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error when the DOM is unavailable or a style write fails.
    pub fn slide_toggle(selection: &Selection, duration_ms: f64) -> Result<(), Error> {
        let Some(html) = first_html_element(selection) else {
            return Ok(());
        };
        if is_hidden(&html.into()) {
            slide_down(selection, duration_ms)
        } else {
            slide_up(selection, duration_ms)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_patch_fixes_height_and_clips() {
        let patch = collapse_pin_patch(120.0);
        assert_eq!(patch.get("height"), Some("120px"));
        assert_eq!(patch.get("overflow"), Some("hidden"));
    }

    #[test]
    fn zero_patch_collapses_every_vertical_property() {
        let patch = collapse_zero_patch(250.0);
        for property in [
            "height",
            "padding-top",
            "padding-bottom",
            "margin-top",
            "margin-bottom",
        ] {
            assert_eq!(patch.get(property), Some("0px"), "{property}");
        }
        let directive = patch.get("transition").unwrap();
        assert!(directive.contains("height 250ms ease"));
        assert!(directive.contains("margin-bottom 250ms ease"));
    }

    #[test]
    fn prime_patch_clears_display_and_zeroes_geometry() {
        let patch = expand_prime_patch();
        assert_eq!(patch.get("display"), Some(""));
        assert_eq!(patch.get("height"), Some("0px"));
        assert_eq!(patch.get("overflow"), Some("hidden"));
    }

    #[test]
    fn grow_patch_targets_the_measured_geometry() {
        let natural = NaturalGeometry {
            height: 84.0,
            padding_top: "8px".into(),
            padding_bottom: "8px".into(),
            margin_top: "0px".into(),
            margin_bottom: "12px".into(),
        };
        let patch = expand_grow_patch(&natural, 150.0);
        assert_eq!(patch.get("height"), Some("84px"));
        assert_eq!(patch.get("padding-top"), Some("8px"));
        assert_eq!(patch.get("margin-bottom"), Some("12px"));
        assert!(patch.get("transition").unwrap().contains("150ms"));
    }

    #[test]
    fn settle_patch_removes_every_managed_property() {
        let patch = settle_patch();
        assert_eq!(patch.len(), MANAGED.len());
        for property in MANAGED {
            assert_eq!(patch.get(property), Some(""), "{property}");
        }
    }

    #[test]
    fn transition_directive_covers_only_animated_properties() {
        let directive = transition_directive(100.0);
        assert!(!directive.contains("overflow"));
        assert!(directive.starts_with("height 100ms ease"));
        assert_eq!(directive.matches("ease").count(), 5);
    }

    #[test]
    fn up_then_down_end_states_do_not_conflict() {
        // A finalized collapse restores inline styles before hiding; a
        // finalized expansion clears everything it pinned. Whichever order
        // the transition-end notifications land in, no end state combines
        // `display: none` with a pinned non-zero height.
        let mut collapsed: StylePatch = [("height", ""), ("overflow", ""), ("transition", "")]
            .into_iter()
            .collect();
        collapsed.set("display", "none");
        assert_eq!(collapsed.get("height"), Some(""));

        let expanded = settle_patch();
        assert_eq!(expanded.get("height"), Some(""));
        assert_ne!(expanded.get("display"), Some("none"));
    }
}
