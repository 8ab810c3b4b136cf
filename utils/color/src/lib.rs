//! # Color Module
//!
//! Parsing and interpolation of CSS color values.
//!
//! The primary type is [`Rgba`], an immutable sample of the four color
//! channels as the browser reports them: red, green, and blue as 8-bit
//! integers and alpha as a fraction in `[0, 1]`. Samples are produced by
//! parsing CSS color strings (`rgb()`/`rgba()` functional notation and
//! `#RGB`/`#RRGGBB`/`#RRGGBBAA` hex notation) and consumed by the
//! animation engine, which interpolates between two samples channel by
//! channel and writes the result back as `rgba(r, g, b, a)`.
//!
//! Color strings in any other format resolve to opaque black. This is a
//! defined fallback rather than an error: computed styles only ever hand
//! back the supported syntaxes, so the fallback exists for caller-supplied
//! targets and keeps animation code free of failure paths.

use core::fmt::{self, Display};

mod parse;

/// Errors that can occur when parsing a CSS color string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorParseError {
    /// The string is not one of the supported color syntaxes.
    UnsupportedFormat,
    /// A hex color did not contain 3, 6, or 8 hexadecimal digits.
    InvalidLength,
    /// A non-hexadecimal character was encountered at the provided index.
    InvalidDigit(usize),
    /// A channel inside `rgb()`/`rgba()` notation failed to parse.
    InvalidChannel,
}

impl Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat => f.write_str("unsupported color format"),
            Self::InvalidLength => f.write_str("expected 3, 6, or 8 hexadecimal digits"),
            Self::InvalidDigit(index) => {
                write!(f, "invalid hexadecimal digit at byte index {index}")
            }
            Self::InvalidChannel => f.write_str("invalid channel value in rgb()/rgba() notation"),
        }
    }
}

impl std::error::Error for ColorParseError {}

/// An immutable color sample: 8-bit red, green, and blue channels plus a
/// fractional alpha channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red channel (0-255).
    pub red: u8,
    /// Green channel (0-255).
    pub green: u8,
    /// Blue channel (0-255).
    pub blue: u8,
    /// Alpha channel (0.0 = transparent, 1.0 = opaque).
    pub alpha: f32,
}

impl Rgba {
    /// Opaque black, the fallback for unsupported color formats.
    pub const BLACK: Self = Self::new(0, 0, 0, 1.0);

    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 1.0);

    /// Creates a color sample from explicit channel values.
    ///
    /// # Arguments
    /// * `red` - Red channel (0-255)
    /// * `green` - Green channel (0-255)
    /// * `blue` - Blue channel (0-255)
    /// * `alpha` - Alpha channel (0.0 to 1.0)
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates a fully opaque color sample.
    #[must_use]
    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 1.0)
    }

    /// Tries to parse a CSS color string.
    ///
    /// Supported syntaxes are `rgb(r, g, b)`, `rgba(r, g, b, a)`, `#RGB`,
    /// `#RRGGBB`, and `#RRGGBBAA`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError`] if the string is not one of the
    /// supported syntaxes or a channel value is malformed.
    pub fn try_parse(css: &str) -> Result<Self, ColorParseError> {
        parse::try_parse_css(css)
    }

    /// Parses a CSS color string, resolving anything unsupported to opaque
    /// black.
    #[must_use]
    pub fn parse_or_black(css: &str) -> Self {
        Self::try_parse(css).unwrap_or_else(|err| {
            tracing::debug!(color = css, %err, "unparsable color, falling back to black");
            Self::BLACK
        })
    }

    /// Linearly interpolates between this color and another.
    ///
    /// Red, green, and blue are rounded to the nearest integer; alpha stays
    /// fractional. The factor is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, factor: f32) -> Self {
        let t = factor.clamp(0.0, 1.0);
        Self {
            red: lerp_channel(self.red, other.red, t),
            green: lerp_channel(self.green, other.green, t),
            blue: lerp_channel(self.blue, other.blue, t),
            alpha: lerp(self.alpha, other.alpha, t),
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (b - a).mul_add(t, a)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    lerp(f32::from(a), f32::from(b), t).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32, tol: f32) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn parses_six_digit_hex() {
        let color = Rgba::try_parse("#4CAF50").unwrap();
        assert_eq!(color, Rgba::opaque(0x4C, 0xAF, 0x50));
    }

    #[test]
    fn parses_three_digit_hex() {
        let color = Rgba::try_parse("#f0a").unwrap();
        assert_eq!(color, Rgba::opaque(0xFF, 0x00, 0xAA));
    }

    #[test]
    fn parses_eight_digit_hex_with_alpha() {
        let color = Rgba::try_parse("#11223380").unwrap();
        assert_eq!((color.red, color.green, color.blue), (0x11, 0x22, 0x33));
        assert!(approx_eq(color.alpha, 128.0 / 255.0, EPSILON));
    }

    #[test]
    fn parses_rgb_notation() {
        let color = Rgba::try_parse("rgb(12, 34, 56)").unwrap();
        assert_eq!(color, Rgba::opaque(12, 34, 56));
    }

    #[test]
    fn parses_rgba_notation() {
        let color = Rgba::try_parse("rgba(255, 0, 0, 0.5)").unwrap();
        assert_eq!((color.red, color.green, color.blue), (255, 0, 0));
        assert!(approx_eq(color.alpha, 0.5, EPSILON));
    }

    #[test]
    fn tolerates_whitespace_and_case() {
        let color = Rgba::try_parse("  RGB( 1 , 2 , 3 )  ").unwrap();
        assert_eq!(color, Rgba::opaque(1, 2, 3));
    }

    #[test]
    fn clamps_out_of_range_channels() {
        let color = Rgba::try_parse("rgba(300, -5, 128, 2.0)").unwrap();
        assert_eq!((color.red, color.green, color.blue), (255, 0, 128));
        assert!(approx_eq(color.alpha, 1.0, EPSILON));
    }

    #[test]
    fn rejects_unsupported_formats() {
        assert_eq!(
            Rgba::try_parse("hsl(120, 50%, 50%)"),
            Err(ColorParseError::UnsupportedFormat)
        );
        assert_eq!(
            Rgba::try_parse("cornflowerblue"),
            Err(ColorParseError::UnsupportedFormat)
        );
        assert_eq!(Rgba::try_parse(""), Err(ColorParseError::UnsupportedFormat));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Rgba::try_parse("#12345"), Err(ColorParseError::InvalidLength));
        assert!(matches!(
            Rgba::try_parse("#GGGGGG"),
            Err(ColorParseError::InvalidDigit(_))
        ));
    }

    #[test]
    fn unsupported_falls_back_to_black() {
        assert_eq!(Rgba::parse_or_black("currentcolor"), Rgba::BLACK);
        assert_eq!(Rgba::parse_or_black("hsl(1, 2%, 3%)"), Rgba::BLACK);
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let start = Rgba::BLACK;
        let end = Rgba::WHITE;
        assert_eq!(start.lerp(end, 0.0), start);
        assert_eq!(start.lerp(end, 1.0), end);
    }

    #[test]
    fn lerp_midpoint_rounds_channels() {
        let mid = Rgba::BLACK.lerp(Rgba::WHITE, 0.5);
        assert_eq!((mid.red, mid.green, mid.blue), (128, 128, 128));
        assert!(approx_eq(mid.alpha, 1.0, EPSILON));
    }

    #[test]
    fn lerp_keeps_alpha_fractional() {
        let from = Rgba::new(0, 0, 0, 0.0);
        let to = Rgba::new(0, 0, 0, 1.0);
        let mid = from.lerp(to, 0.25);
        assert!(approx_eq(mid.alpha, 0.25, EPSILON));
    }

    #[test]
    fn lerp_clamps_factor() {
        let start = Rgba::opaque(10, 20, 30);
        let end = Rgba::opaque(110, 120, 130);
        assert_eq!(start.lerp(end, -1.0), start);
        assert_eq!(start.lerp(end, 2.0), end);
    }

    #[test]
    fn display_writes_functional_notation() {
        assert_eq!(Rgba::opaque(255, 0, 0).to_string(), "rgba(255, 0, 0, 1)");
        assert_eq!(
            Rgba::new(1, 2, 3, 0.5).to_string(),
            "rgba(1, 2, 3, 0.5)"
        );
    }
}
