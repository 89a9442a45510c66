//! Conversion between all speed units through bits per second

use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};
use serde::ser::{Serialize, SerializeMap, Serializer};
use bandwidth_core::Precision;
use tracing::debug;
use crate::SpeedUnit;
use crate::format::format;

/// A value for every one of the twelve units.
///
/// Backed by a fixed array indexed by unit, so no unit can be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversions<T> {
    values: [T; SpeedUnit::COUNT],
}

impl<T> Conversions<T> {
    /// Build a table by evaluating `f` once per unit
    pub fn from_fn(mut f: impl FnMut(SpeedUnit) -> T) -> Self {
        Conversions {
            values: std::array::from_fn(|i| f(SpeedUnit::ALL[i])),
        }
    }

    pub fn get(&self, unit: SpeedUnit) -> &T {
        &self.values[unit.index()]
    }

    pub fn get_mut(&mut self, unit: SpeedUnit) -> &mut T {
        &mut self.values[unit.index()]
    }

    /// Entries in unit order: bit family base→peta, then byte family
    pub fn iter(&self) -> impl Iterator<Item = (SpeedUnit, &T)> + '_ {
        SpeedUnit::ALL.into_iter().zip(self.values.iter())
    }

    /// Apply `f` to every entry
    pub fn map<U>(&self, mut f: impl FnMut(SpeedUnit, &T) -> U) -> Conversions<U> {
        Conversions::from_fn(|unit| f(unit, self.get(unit)))
    }

    pub fn into_map(self) -> BTreeMap<SpeedUnit, T> {
        SpeedUnit::ALL.into_iter().zip(self.values).collect()
    }
}

impl<T: Default> Default for Conversions<T> {
    fn default() -> Self {
        Conversions::from_fn(|_| T::default())
    }
}

impl<T> Index<SpeedUnit> for Conversions<T> {
    type Output = T;

    fn index(&self, unit: SpeedUnit) -> &T {
        self.get(unit)
    }
}

impl<T> IndexMut<SpeedUnit> for Conversions<T> {
    fn index_mut(&mut self, unit: SpeedUnit) -> &mut T {
        self.get_mut(unit)
    }
}

/// Serialized as an object keyed by unit identifier
impl<T: Serialize> Serialize for Conversions<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SpeedUnit::COUNT))?;
        for (unit, value) in self.iter() {
            map.serialize_entry(unit.identifier(), value)?;
        }
        map.end()
    }
}

/// Convert a value in `unit` to bits per second
pub fn to_bits_per_second(value: f64, unit: SpeedUnit) -> f64 {
    value * unit.scale_to_bits_per_second()
}

/// Convert a value in bits per second to `unit`
pub fn from_bits_per_second(bits_per_second: f64, unit: SpeedUnit) -> f64 {
    bits_per_second / unit.scale_to_bits_per_second()
}

/// Convert `value` from `source` directly into `target`.
///
/// Equivalent to going through bits per second, but divides or multiplies
/// by the ratio of the two scales instead. Every such ratio (10^n, 8·10^n,
/// 125, 12.5, 1.25) is exact in f64, so there is a single rounding step.
pub fn convert_between(value: f64, source: SpeedUnit, target: SpeedUnit) -> f64 {
    if source == target {
        return value;
    }

    let from = source.scale_to_bits_per_second();
    let to = target.scale_to_bits_per_second();

    if from >= to {
        value * (from / to)
    } else {
        value / (to / from)
    }
}

/// Convert `value` in `source` into every unit.
///
/// The source entry is `value` itself. Values past f64 range come out
/// as infinity.
pub fn convert(value: f64, source: SpeedUnit) -> Conversions<f64> {
    debug!(%source, value, bits_per_second = to_bits_per_second(value, source), "converting");
    Conversions::from_fn(|target| convert_between(value, source, target))
}

/// [`convert`] followed by [`format`] on every entry
pub fn convert_formatted(value: f64, source: SpeedUnit, precision: Precision) -> Conversions<String> {
    convert(value, source).map(|_, v| format(*v, precision))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bit_units, byte_units};

    #[test]
    fn test_identity_on_source() {
        for unit in SpeedUnit::ALL {
            for value in [0.0, 1.0, 0.1, 3.3, 12345.678, 1e-7, 9.99e20] {
                assert_eq!(convert(value, unit)[unit], value, "{:?} {}", unit, value);
            }
        }
    }

    #[test]
    fn test_scale_law() {
        let expected = [1.0, 1e3, 1e6, 1e9, 1e12, 1e15];
        for (unit, scale) in bit_units().into_iter().zip(expected) {
            assert_eq!(convert(1.0, unit)[SpeedUnit::BitPerSecond], scale);
        }
    }

    #[test]
    fn test_byte_law() {
        assert_eq!(convert(1.0, SpeedUnit::BytePerSecond)[SpeedUnit::BitPerSecond], 8.0);
        for unit in byte_units() {
            assert_eq!(
                convert(1.0, unit)[SpeedUnit::BitPerSecond],
                unit.prefix() * 8.0
            );
        }
    }

    #[test]
    fn test_bits_to_bytes() {
        let result = convert(100.0, SpeedUnit::MegabitPerSecond);
        assert_eq!(result[SpeedUnit::MegabytePerSecond], 12.5);
        assert_eq!(result[SpeedUnit::KilobytePerSecond], 12500.0);
        assert_eq!(result[SpeedUnit::BitPerSecond], 1e8);
    }

    /// Distance between two positive doubles in units in the last place
    fn ulps(a: f64, b: f64) -> u64 {
        a.to_bits().abs_diff(b.to_bits())
    }

    /// Deterministic spread of values over many magnitudes
    fn sample_values() -> Vec<f64> {
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        let mut values = vec![1.0, 0.5, 100.0, 1234.5, 507919.209];
        for _ in 0..500 {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let mantissa = (state >> 11) as f64 / (1u64 << 53) as f64;
            let exponent = ((state >> 3) % 25) as i32 - 12;
            values.push((1.0 + mantissa) * 10f64.powi(exponent));
        }
        values
    }

    #[test]
    fn test_round_trip_within_one_ulp() {
        for value in sample_values() {
            for from in SpeedUnit::ALL {
                for to in SpeedUnit::ALL {
                    let there = convert(value, from)[to];
                    let back = convert(there, to)[from];
                    assert!(
                        ulps(back, value) <= 1,
                        "{:?}->{:?}: {} came back as {}",
                        from, to, value, back
                    );
                }
            }
        }
    }

    #[test]
    fn test_megabit_petabit_round_trip() {
        let value = 507919.209;
        let there = convert(value, SpeedUnit::MegabitPerSecond)[SpeedUnit::PetabitPerSecond];
        let back = convert(there, SpeedUnit::PetabitPerSecond)[SpeedUnit::MegabitPerSecond];
        assert!(ulps(back, value) <= 1);
    }

    #[test]
    fn test_matches_pivot_for_exact_values() {
        for from in SpeedUnit::ALL {
            for to in SpeedUnit::ALL {
                let pivot = from_bits_per_second(to_bits_per_second(4.0, from), to);
                assert_eq!(convert_between(4.0, from, to), pivot, "{:?}->{:?}", from, to);
            }
        }
    }

    #[test]
    fn test_overflow_is_infinite() {
        let result = convert(1e300, SpeedUnit::PetabytePerSecond);
        assert_eq!(result[SpeedUnit::PetabytePerSecond], 1e300);
        assert_eq!(result[SpeedUnit::BitPerSecond], f64::INFINITY);
        assert_eq!(result[SpeedUnit::KilobytePerSecond], f64::INFINITY);
        assert_eq!(result[SpeedUnit::PetabitPerSecond], 8e300);
    }

    #[test]
    fn test_convert_formatted() {
        let result = convert_formatted(1.0, SpeedUnit::GigabitPerSecond, Precision::new(3).unwrap());
        assert_eq!(result[SpeedUnit::MegabitPerSecond], "1000.000");
        assert_eq!(result[SpeedUnit::MegabytePerSecond], "125.000");
        assert_eq!(result[SpeedUnit::BitPerSecond], "1000000000.000");
    }

    #[test]
    fn test_iter_order_and_totality() {
        let result = convert(5.0, SpeedUnit::TerabitPerSecond);
        let units: Vec<SpeedUnit> = result.iter().map(|(u, _)| u).collect();
        assert_eq!(units, SpeedUnit::ALL.to_vec());
        assert_eq!(result.into_map().len(), SpeedUnit::COUNT);
    }

    #[test]
    fn test_serialize_keys() {
        let result = convert_formatted(100.0, SpeedUnit::MegabitPerSecond, Precision::default());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["MegabitPerSecond"], "100");
        assert_eq!(json["GigabitPerSecond"], "0.1");
        assert_eq!(json.as_object().unwrap().len(), SpeedUnit::COUNT);
    }
}
