//! Per-property interpolation.
//!
//! A [`PropertyTween`] carries the initial and target numeric values for
//! one CSS property; a [`TweenSet`] turns a percent-elapsed figure into a
//! [`StylePatch`] covering every property of one element. Unparsable
//! numeric values degrade to 0 rather than erroring, mirroring how the
//! browser quietly ignores invalid style input.

use ripple_color::Rgba;
use ripple_core::StylePatch;

/// CSS properties whose numeric values carry no length unit.
const UNITLESS: [&str; 8] = [
    "opacity",
    "z-index",
    "flex-grow",
    "flex-shrink",
    "font-weight",
    "line-height",
    "order",
    "zoom",
];

fn default_unit(property: &str) -> &'static str {
    if UNITLESS.contains(&property) { "" } else { "px" }
}

/// Splits a CSS value into its leading number and trailing unit.
///
/// Returns `None` when the value has no parsable numeric prefix.
pub(crate) fn split_number_unit(value: &str) -> Option<(f64, &str)> {
    let trimmed = value.trim();
    for end in (1..=trimmed.len()).rev() {
        if let Some(prefix) = trimmed.get(..end) {
            if let Ok(number) = prefix.parse::<f64>() {
                return Some((number, trimmed[end..].trim()));
            }
        }
    }
    None
}

/// A target value for one animated property.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetValue {
    /// A bare number; the property's default unit is appended.
    Number(f64),
    /// A CSS value string such as `"400px"`; the numeric prefix is
    /// interpolated and the remainder kept as the unit.
    Text(String),
}

impl From<f64> for TargetValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for TargetValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for TargetValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for TargetValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Interpolation state for a single CSS property on a single element.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyTween {
    property: String,
    initial: f64,
    target: f64,
    unit: String,
}

impl PropertyTween {
    /// Builds a tween from the property's current CSS value and the
    /// caller-supplied target.
    ///
    /// Either side failing to parse degrades to 0.
    #[must_use]
    pub fn resolve(property: &str, current: &str, target: &TargetValue) -> Self {
        let initial = split_number_unit(current).map_or_else(
            || {
                tracing::debug!(property, current, "unparsable initial value, treating as 0");
                0.0
            },
            |(number, _)| number,
        );
        let (target, unit) = match target {
            TargetValue::Number(number) => (*number, default_unit(property).to_owned()),
            TargetValue::Text(text) => match split_number_unit(text) {
                Some((number, unit)) if !unit.is_empty() => (number, unit.to_owned()),
                Some((number, _)) => (number, default_unit(property).to_owned()),
                None => {
                    tracing::debug!(property, text, "unparsable target value, treating as 0");
                    (0.0, default_unit(property).to_owned())
                }
            },
        };
        Self {
            property: property.to_owned(),
            initial,
            target,
            unit,
        }
    }

    /// The interpolated numeric value at a percent in `[0, 1]`.
    #[must_use]
    pub fn value_at(&self, percent: f64) -> f64 {
        (self.target - self.initial).mul_add(percent, self.initial)
    }

    /// The interpolated CSS value, unit included.
    #[must_use]
    pub fn css_value_at(&self, percent: f64) -> String {
        format!("{}{}", self.value_at(percent), self.unit)
    }

    /// The property this tween drives.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }
}

/// Every property tween for one element, applied as a single patch per
/// frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TweenSet {
    tweens: Vec<PropertyTween>,
}

impl TweenSet {
    /// Wraps a list of property tweens.
    #[must_use]
    pub fn new(tweens: Vec<PropertyTween>) -> Self {
        Self { tweens }
    }

    /// The style patch for a percent-elapsed figure.
    #[must_use]
    pub fn patch_at(&self, percent: f64) -> StylePatch {
        self.tweens
            .iter()
            .map(|tween| (tween.property.clone(), tween.css_value_at(percent)))
            .collect()
    }

    /// Whether the set drives any properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

/// Interpolation state for one color-valued CSS property.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTween {
    property: String,
    from: Rgba,
    to: Rgba,
}

impl ColorTween {
    /// Builds a color tween between two parsed samples.
    #[must_use]
    pub fn new(property: &str, from: Rgba, to: Rgba) -> Self {
        Self {
            property: property.to_owned(),
            from,
            to,
        }
    }

    /// The interpolated color at a percent in `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn color_at(&self, percent: f64) -> Rgba {
        self.from.lerp(self.to, percent as f32)
    }
}

/// Every color tween for one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorTweenSet {
    tweens: Vec<ColorTween>,
}

impl ColorTweenSet {
    /// Wraps a list of color tweens.
    #[must_use]
    pub fn new(tweens: Vec<ColorTween>) -> Self {
        Self { tweens }
    }

    /// The style patch for a percent-elapsed figure, written back in
    /// `rgba(r, g, b, a)` notation.
    #[must_use]
    pub fn patch_at(&self, percent: f64) -> StylePatch {
        self.tweens
            .iter()
            .map(|tween| (tween.property.clone(), tween.color_at(percent).to_string()))
            .collect()
    }

    /// Whether the set drives any properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_value_and_unit() {
        assert_eq!(split_number_unit("400px"), Some((400.0, "px")));
        assert_eq!(split_number_unit("  1.5em "), Some((1.5, "em")));
        assert_eq!(split_number_unit("42"), Some((42.0, "")));
        assert_eq!(split_number_unit("-8.25px"), Some((-8.25, "px")));
        assert_eq!(split_number_unit("auto"), None);
        assert_eq!(split_number_unit(""), None);
    }

    #[test]
    fn numeric_target_gets_a_length_unit() {
        let tween = PropertyTween::resolve("width", "100px", &TargetValue::from(400.0));
        assert_eq!(tween.css_value_at(0.0), "100px");
        assert_eq!(tween.css_value_at(1.0), "400px");
    }

    #[test]
    fn unitless_properties_stay_bare() {
        let tween = PropertyTween::resolve("opacity", "1", &TargetValue::from(0.0));
        assert_eq!(tween.css_value_at(1.0), "0");
        assert_eq!(tween.css_value_at(0.5), "0.5");
    }

    #[test]
    fn text_target_keeps_its_own_unit() {
        let tween = PropertyTween::resolve("width", "0px", &TargetValue::from("50%"));
        assert_eq!(tween.css_value_at(1.0), "50%");
    }

    #[test]
    fn unparsable_initial_degrades_to_zero() {
        let tween = PropertyTween::resolve("width", "auto", &TargetValue::from(200.0));
        assert_eq!(tween.css_value_at(0.0), "0px");
        assert!((tween.value_at(0.5) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn unparsable_target_degrades_to_zero() {
        let tween = PropertyTween::resolve("width", "120px", &TargetValue::from("thin"));
        assert!((tween.value_at(1.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn final_value_matches_target_exactly() {
        let tween = PropertyTween::resolve("height", "13.5px", &TargetValue::from(20.0));
        assert!((tween.value_at(1.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn tween_set_builds_a_patch_per_frame() {
        let set = TweenSet::new(vec![
            PropertyTween::resolve("width", "0px", &TargetValue::from(100.0)),
            PropertyTween::resolve("opacity", "0", &TargetValue::from(1.0)),
        ]);
        let halfway = set.patch_at(0.5);
        assert_eq!(halfway.get("width"), Some("50px"));
        assert_eq!(halfway.get("opacity"), Some("0.5"));
    }

    #[test]
    fn color_tween_hits_the_endpoints() {
        let tween = ColorTween::new("color", Rgba::BLACK, Rgba::WHITE);
        assert_eq!(tween.color_at(0.0), Rgba::BLACK);
        assert_eq!(tween.color_at(1.0), Rgba::WHITE);
    }

    #[test]
    fn color_tween_set_writes_rgba_notation() {
        let set = ColorTweenSet::new(vec![ColorTween::new(
            "background-color",
            Rgba::BLACK,
            Rgba::WHITE,
        )]);
        let done = set.patch_at(1.0);
        assert_eq!(done.get("background-color"), Some("rgba(255, 255, 255, 1)"));
    }
}
