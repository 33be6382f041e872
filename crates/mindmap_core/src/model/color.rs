//! Hex color parsing and depth tinting.
//!
//! # Responsibility
//! - Parse and format `#rrggbb` color strings.
//! - Lighten a color toward white for branch depth tinting.
//!
//! # Invariants
//! - Output is always lowercase `#rrggbb`.
//! - The `#00000000` sentinel means "no highlight" and is never tinted.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fully-transparent sentinel meaning "no highlight".
pub const NO_HIGHLIGHT: &str = "#00000000";

/// Error for malformed color strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Input is not a `#rrggbb` string.
    InvalidHex(String),
}

impl Display for ColorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHex(value) => write!(f, "invalid hex color: `{value}`"),
        }
    }
}

impl Error for ColorError {}

/// Parses a `#rrggbb` string into channel bytes.
///
/// # Errors
/// - Returns `ColorError::InvalidHex` for any other shape, including the
///   8-digit no-highlight sentinel.
pub fn parse_hex(value: &str) -> Result<(u8, u8, u8), ColorError> {
    let digits = value
        .strip_prefix('#')
        .ok_or_else(|| ColorError::InvalidHex(value.to_string()))?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(value.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| ColorError::InvalidHex(value.to_string()))
    };
    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Formats channel bytes as lowercase `#rrggbb`.
pub fn format_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// True for the transparent no-highlight sentinel.
pub fn is_no_highlight(value: &str) -> bool {
    value.eq_ignore_ascii_case(NO_HIGHLIGHT)
}

/// Lightens a color toward white by `amount` in `[0, 1]`.
///
/// `amount` is clamped; 0 returns the input color normalized to lowercase,
/// 1 returns white.
///
/// # Errors
/// - Returns `ColorError::InvalidHex` when `value` is not `#rrggbb`.
pub fn lighten(value: &str, amount: f64) -> Result<String, ColorError> {
    let (r, g, b) = parse_hex(value)?;
    let amount = amount.clamp(0.0, 1.0);
    let blend = |channel: u8| -> u8 {
        let channel = f64::from(channel);
        (channel + (255.0 - channel) * amount).round() as u8
    };
    Ok(format_hex(blend(r), blend(g), blend(b)))
}
