//! Speed unit representation with scale factors

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::units::UNITS;

/// Bits in one byte
pub const BITS_PER_BYTE: f64 = 8.0;

/// Which base quantity a unit counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Bit,
    Byte,
}

/// One of the twelve bandwidth denominations.
///
/// Variant order is bit family base→peta, then byte family base→peta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpeedUnit {
    BitPerSecond,
    KilobitPerSecond,
    MegabitPerSecond,
    GigabitPerSecond,
    TerabitPerSecond,
    PetabitPerSecond,
    BytePerSecond,
    KilobytePerSecond,
    MegabytePerSecond,
    GigabytePerSecond,
    TerabytePerSecond,
    PetabytePerSecond,
}

impl SpeedUnit {
    /// Number of units
    pub const COUNT: usize = 12;

    /// Every unit in declaration order
    pub const ALL: [SpeedUnit; Self::COUNT] = [
        SpeedUnit::BitPerSecond,
        SpeedUnit::KilobitPerSecond,
        SpeedUnit::MegabitPerSecond,
        SpeedUnit::GigabitPerSecond,
        SpeedUnit::TerabitPerSecond,
        SpeedUnit::PetabitPerSecond,
        SpeedUnit::BytePerSecond,
        SpeedUnit::KilobytePerSecond,
        SpeedUnit::MegabytePerSecond,
        SpeedUnit::GigabytePerSecond,
        SpeedUnit::TerabytePerSecond,
        SpeedUnit::PetabytePerSecond,
    ];

    /// Fixed display label (e.g. "Mbit/s", "KB/s")
    pub const fn display(self) -> &'static str {
        match self {
            SpeedUnit::BitPerSecond => "bit/s",
            SpeedUnit::KilobitPerSecond => "Kbit/s",
            SpeedUnit::MegabitPerSecond => "Mbit/s",
            SpeedUnit::GigabitPerSecond => "Gbit/s",
            SpeedUnit::TerabitPerSecond => "Tbit/s",
            SpeedUnit::PetabitPerSecond => "Pbit/s",
            SpeedUnit::BytePerSecond => "B/s",
            SpeedUnit::KilobytePerSecond => "KB/s",
            SpeedUnit::MegabytePerSecond => "MB/s",
            SpeedUnit::GigabytePerSecond => "GB/s",
            SpeedUnit::TerabytePerSecond => "TB/s",
            SpeedUnit::PetabytePerSecond => "PB/s",
        }
    }

    /// Stable identifier, identical to the variant name
    pub const fn identifier(self) -> &'static str {
        match self {
            SpeedUnit::BitPerSecond => "BitPerSecond",
            SpeedUnit::KilobitPerSecond => "KilobitPerSecond",
            SpeedUnit::MegabitPerSecond => "MegabitPerSecond",
            SpeedUnit::GigabitPerSecond => "GigabitPerSecond",
            SpeedUnit::TerabitPerSecond => "TerabitPerSecond",
            SpeedUnit::PetabitPerSecond => "PetabitPerSecond",
            SpeedUnit::BytePerSecond => "BytePerSecond",
            SpeedUnit::KilobytePerSecond => "KilobytePerSecond",
            SpeedUnit::MegabytePerSecond => "MegabytePerSecond",
            SpeedUnit::GigabytePerSecond => "GigabytePerSecond",
            SpeedUnit::TerabytePerSecond => "TerabytePerSecond",
            SpeedUnit::PetabytePerSecond => "PetabytePerSecond",
        }
    }

    /// Whether the unit may hold a non-integer quantity.
    /// Only bit/s is integer-only.
    pub const fn allows_fractional(self) -> bool {
        !matches!(self, SpeedUnit::BitPerSecond)
    }

    pub const fn family(self) -> Family {
        match self {
            SpeedUnit::BitPerSecond
            | SpeedUnit::KilobitPerSecond
            | SpeedUnit::MegabitPerSecond
            | SpeedUnit::GigabitPerSecond
            | SpeedUnit::TerabitPerSecond
            | SpeedUnit::PetabitPerSecond => Family::Bit,
            _ => Family::Byte,
        }
    }

    /// Decimal prefix multiplier: 1, 10^3, ..., 10^15
    pub const fn prefix(self) -> f64 {
        match self {
            SpeedUnit::BitPerSecond | SpeedUnit::BytePerSecond => 1.0,
            SpeedUnit::KilobitPerSecond | SpeedUnit::KilobytePerSecond => 1e3,
            SpeedUnit::MegabitPerSecond | SpeedUnit::MegabytePerSecond => 1e6,
            SpeedUnit::GigabitPerSecond | SpeedUnit::GigabytePerSecond => 1e9,
            SpeedUnit::TerabitPerSecond | SpeedUnit::TerabytePerSecond => 1e12,
            SpeedUnit::PetabitPerSecond | SpeedUnit::PetabytePerSecond => 1e15,
        }
    }

    /// Factor converting one of this unit into bits per second.
    ///
    /// Every factor is an integer below 2^53, so it is exact in f64.
    pub fn scale_to_bits_per_second(self) -> f64 {
        match self.family() {
            Family::Bit => self.prefix(),
            Family::Byte => self.prefix() * BITS_PER_BYTE,
        }
    }

    /// Position of the unit in [`SpeedUnit::ALL`]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

impl FromStr for SpeedUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UNITS.get(s.trim()).ok_or_else(|| UnknownUnit(s.to_string()))
    }
}

/// A unit name that matches no identifier, label or alias
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown unit: {0}")]
pub struct UnknownUnit(pub String);
