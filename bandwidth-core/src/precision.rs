//! Decimal precision for formatted output

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of fractional digits used when formatting, always within 1..=10
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Precision(u8);

impl Precision {
    pub const MIN: Precision = Precision(1);
    pub const MAX: Precision = Precision(10);

    /// Create a precision, rejecting values outside 1..=10
    pub fn new(digits: u8) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&digits)
            .then_some(Precision(digits))
    }

    /// Create a precision, saturating into 1..=10
    pub fn clamped(digits: i64) -> Self {
        Precision(digits.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as u8)
    }

    /// Number of fractional digits
    pub fn digits(self) -> usize {
        self.0 as usize
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Precision> for u8 {
    fn from(p: Precision) -> u8 {
        p.0
    }
}

impl TryFrom<u8> for Precision {
    type Error = String;

    fn try_from(digits: u8) -> Result<Self, Self::Error> {
        Precision::new(digits)
            .ok_or_else(|| format!("precision must be between 1 and 10, got {}", digits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_one() {
        assert_eq!(Precision::default().digits(), 1);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(Precision::new(0).is_none());
        assert!(Precision::new(11).is_none());
        assert_eq!(Precision::new(10).map(Precision::digits), Some(10));
    }

    #[test]
    fn test_clamped() {
        assert_eq!(Precision::clamped(-5), Precision::MIN);
        assert_eq!(Precision::clamped(0), Precision::MIN);
        assert_eq!(Precision::clamped(4).digits(), 4);
        assert_eq!(Precision::clamped(99), Precision::MAX);
    }

    #[test]
    fn test_serde() {
        let p: Precision = serde_json::from_str("3").unwrap();
        assert_eq!(p.digits(), 3);
        assert_eq!(serde_json::to_string(&p).unwrap(), "3");
        assert!(serde_json::from_str::<Precision>("0").is_err());
    }
}
