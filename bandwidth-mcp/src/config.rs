//! Startup configuration read from the environment

use bandwidth_core::Precision;
use tracing::warn;

/// Initial session precision
pub const PRECISION_ENV: &str = "BANDWIDTH_PRECISION";
/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub precision: Precision,
}

impl Config {
    pub fn from_env() -> Self {
        let raw = std::env::var(PRECISION_ENV).ok();
        Config {
            precision: parse_precision(raw.as_deref()),
        }
    }
}

/// Out-of-range numbers are clamped; anything unparseable falls back to the default.
fn parse_precision(raw: Option<&str>) -> Precision {
    let Some(raw) = raw else {
        return Precision::default();
    };

    match raw.trim().parse::<i64>() {
        Ok(digits) => Precision::clamped(digits),
        Err(_) => {
            warn!("ignoring {}={:?}: not an integer", PRECISION_ENV, raw);
            Precision::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_uses_default() {
        assert_eq!(parse_precision(None), Precision::default());
    }

    #[test]
    fn test_valid_value() {
        assert_eq!(parse_precision(Some(" 4 ")).digits(), 4);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(parse_precision(Some("25")), Precision::MAX);
        assert_eq!(parse_precision(Some("-3")), Precision::MIN);
    }

    #[test]
    fn test_garbage_falls_back() {
        assert_eq!(parse_precision(Some("three")), Precision::default());
    }
}
