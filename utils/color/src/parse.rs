use super::{ColorParseError, Rgba};

const fn hex_digit(b: u8, index: usize) -> Result<u8, ColorParseError> {
    match b {
        b'0'..=b'9' => Ok(b - b'0'),
        b'a'..=b'f' => Ok(b - b'a' + 10),
        b'A'..=b'F' => Ok(b - b'A' + 10),
        _ => Err(ColorParseError::InvalidDigit(index)),
    }
}

fn hex_byte(bytes: &[u8], index: usize) -> Result<u8, ColorParseError> {
    let hi = hex_digit(bytes[index], index)?;
    let lo = hex_digit(bytes[index + 1], index + 1)?;
    Ok((hi << 4) | lo)
}

fn parse_hex(digits: &[u8]) -> Result<Rgba, ColorParseError> {
    match digits.len() {
        3 => {
            let r = hex_digit(digits[0], 0)?;
            let g = hex_digit(digits[1], 1)?;
            let b = hex_digit(digits[2], 2)?;
            Ok(Rgba::opaque((r << 4) | r, (g << 4) | g, (b << 4) | b))
        }
        6 => Ok(Rgba::opaque(
            hex_byte(digits, 0)?,
            hex_byte(digits, 2)?,
            hex_byte(digits, 4)?,
        )),
        8 => Ok(Rgba::new(
            hex_byte(digits, 0)?,
            hex_byte(digits, 2)?,
            hex_byte(digits, 4)?,
            f32::from(hex_byte(digits, 6)?) / 255.0,
        )),
        _ => Err(ColorParseError::InvalidLength),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_channel(raw: &str) -> Result<u8, ColorParseError> {
    let value: f32 = raw
        .trim()
        .parse()
        .map_err(|_| ColorParseError::InvalidChannel)?;
    Ok(value.round().clamp(0.0, 255.0) as u8)
}

fn parse_alpha(raw: &str) -> Result<f32, ColorParseError> {
    let value: f32 = raw
        .trim()
        .parse()
        .map_err(|_| ColorParseError::InvalidChannel)?;
    Ok(value.clamp(0.0, 1.0))
}

fn parse_functional(inner: &str) -> Result<Rgba, ColorParseError> {
    let mut channels = inner.split(',');
    let red = parse_channel(channels.next().ok_or(ColorParseError::InvalidChannel)?)?;
    let green = parse_channel(channels.next().ok_or(ColorParseError::InvalidChannel)?)?;
    let blue = parse_channel(channels.next().ok_or(ColorParseError::InvalidChannel)?)?;
    let alpha = match channels.next() {
        Some(raw) => parse_alpha(raw)?,
        None => 1.0,
    };
    if channels.next().is_some() {
        return Err(ColorParseError::InvalidChannel);
    }
    Ok(Rgba::new(red, green, blue, alpha))
}

/// Strips a case-insensitive `rgb(`/`rgba(` prefix and the trailing `)`,
/// returning the comma-separated channel list inside.
fn functional_body(trimmed: &str) -> Option<&str> {
    let body = trimmed.strip_suffix(')')?;
    for prefix in ["rgba(", "rgb("] {
        if let Some(head) = body.get(..prefix.len()) {
            if head.eq_ignore_ascii_case(prefix) {
                return Some(&body[prefix.len()..]);
            }
        }
    }
    None
}

pub fn try_parse_css(css: &str) -> Result<Rgba, ColorParseError> {
    let trimmed = css.trim();
    if let Some(digits) = trimmed.strip_prefix('#') {
        return parse_hex(digits.as_bytes());
    }
    if let Some(body) = functional_body(trimmed) {
        return parse_functional(body);
    }
    Err(ColorParseError::UnsupportedFormat)
}
