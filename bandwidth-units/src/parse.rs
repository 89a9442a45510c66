//! Input parsing - turn user text into a validated quantity

use bandwidth_core::{InputError, INTEGRAL_TOLERANCE};
use tracing::trace;
use crate::{SpeedUnit, UnknownUnit};
use crate::units::UNITS;

/// Backspace control character, always admissible while typing
pub const BACKSPACE: char = '\u{8}';

/// Parse a user-entered value for `source`.
///
/// Accepts `.` or `,` as decimal separator. Integer-only units get the
/// value rounded to the nearest integer on success.
pub fn parse(raw: &str, source: SpeedUnit) -> Result<f64, InputError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(InputError::empty());
    }

    let normalized = trimmed.replace(',', ".");

    if !is_decimal_numeral(&normalized) {
        return Err(InputError::format(trimmed));
    }

    let value: f64 = normalized
        .parse()
        .map_err(|_| InputError::format(trimmed))?;

    if value < 0.0 {
        return Err(InputError::negative(value));
    }

    // -0 is admitted; keep the sign out of the result
    let value = if value == 0.0 { 0.0 } else { value };

    if !source.allows_fractional() {
        // NaN from an infinite input passes, matching the overflow policy
        if (value - value.round()).abs() > INTEGRAL_TOLERANCE {
            return Err(InputError::fractional_not_allowed(source.display()));
        }
        trace!(unit = %source, value, "rounding integer-only input");
        return Ok(value.round());
    }

    Ok(value)
}

/// Invariant-culture numeral: `[+-]digits[.digits][e[+-]digits]`.
///
/// Either side of the decimal point may be empty but not both.
fn is_decimal_numeral(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        mantissa_digits += i - frac_start;
    }

    if mantissa_digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

/// Resolve a unit by identifier (`MegabitPerSecond`), label (`Mbit/s`) or alias (`Mbps`)
pub fn parse_unit(s: &str) -> Result<SpeedUnit, UnknownUnit> {
    let s = s.trim();
    UNITS.get(s).ok_or_else(|| UnknownUnit(s.to_string()))
}

/// Whether a typed character may enter a field for `source`.
///
/// Advisory only; [`parse`] does not depend on it.
pub fn is_valid_char(c: char, source: SpeedUnit) -> bool {
    match c {
        '0'..='9' | BACKSPACE => true,
        '.' | ',' => source.allows_fractional(),
        _ => false,
    }
}

/// Whether `inserted` may be typed into a field currently holding `current`.
///
/// Every character must be admissible, and a decimal separator is refused
/// once the field already holds one. A multi-character paste is only
/// checked against the existing text; [`parse`] rejects anything malformed.
pub fn accepts_insertion(current: &str, inserted: &str, source: SpeedUnit) -> bool {
    if !inserted.chars().all(|c| is_valid_char(c, source)) {
        return false;
    }

    let has_separator = |s: &str| s.contains(['.', ',']);
    !(has_separator(current) && has_separator(inserted))
}
