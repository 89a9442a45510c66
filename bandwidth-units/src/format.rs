//! Display formatting for converted values

use bandwidth_core::Precision;

/// Token rendered for values beyond f64 range
const INFINITY_TOKEN: &str = "inf";

/// Format `value` with `precision` fractional digits.
///
/// Rounds half away from zero. At precision 1 an integral result drops
/// the decimal point entirely (`1000` instead of `1000.0`). The separator
/// is always `.` and there are no thousands separators.
pub fn format(value: f64, precision: Precision) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }

    if value.is_infinite() {
        return if value > 0.0 {
            INFINITY_TOKEN.to_string()
        } else {
            format!("-{}", INFINITY_TOKEN)
        };
    }

    let digits = precision.digits();
    let (whole, fraction) = round_half_away_from_zero(value.abs(), digits);

    // Zero never carries a sign
    let sign = if value < 0.0 && (whole != 0.0 || fraction != 0) { "-" } else { "" };

    if precision == Precision::MIN && fraction == 0 {
        return format!("{}{:.0}", sign, whole);
    }

    format!("{}{:.0}.{:0>width$}", sign, whole, fraction, width = digits)
}

/// Split a non-negative `value` into its integer part and its fraction
/// scaled to `digits` places, rounded with ties away from zero.
///
/// The fraction is rounded on its own so a tie stays exact even when
/// `value * 10^digits` would exceed f64's integer precision.
fn round_half_away_from_zero(value: f64, digits: usize) -> (f64, u64) {
    let factor = 10u64.pow(digits as u32);
    let mut whole = value.trunc();

    // value - trunc(value) is exact; times 10^digits stays below 2^53
    let fraction = ((value - whole) * factor as f64).round() as u64;

    if fraction >= factor {
        whole += 1.0;
        return (whole, 0);
    }

    (whole, fraction)
}
