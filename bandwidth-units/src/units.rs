//! Unit registry - lookup by identifier, label or alias

use std::collections::HashMap;
use std::sync::LazyLock;
use crate::SpeedUnit;

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Bit family, base to peta
pub fn bit_units() -> [SpeedUnit; 6] {
    [
        SpeedUnit::BitPerSecond,
        SpeedUnit::KilobitPerSecond,
        SpeedUnit::MegabitPerSecond,
        SpeedUnit::GigabitPerSecond,
        SpeedUnit::TerabitPerSecond,
        SpeedUnit::PetabitPerSecond,
    ]
}

/// Byte family, base to peta
pub fn byte_units() -> [SpeedUnit; 6] {
    [
        SpeedUnit::BytePerSecond,
        SpeedUnit::KilobytePerSecond,
        SpeedUnit::MegabytePerSecond,
        SpeedUnit::GigabytePerSecond,
        SpeedUnit::TerabytePerSecond,
        SpeedUnit::PetabytePerSecond,
    ]
}

/// Registry of all known unit names. Lookups are case-sensitive.
pub struct UnitRegistry {
    units: HashMap<&'static str, SpeedUnit>,
    aliases: HashMap<&'static str, SpeedUnit>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry {
            units: HashMap::new(),
            aliases: HashMap::new(),
        };
        registry.register_all_units();
        registry
    }

    /// Get a unit by identifier, label or alias
    pub fn get(&self, name: &str) -> Option<SpeedUnit> {
        self.units
            .get(name)
            .or_else(|| self.aliases.get(name))
            .copied()
    }

    /// All registered names, aliases included
    pub fn names(&self) -> Vec<&'static str> {
        self.units.keys().chain(self.aliases.keys()).copied().collect()
    }

    fn register(&mut self, unit: SpeedUnit) {
        self.units.insert(unit.identifier(), unit);
        self.units.insert(unit.display(), unit);
    }

    fn alias(&mut self, alias: &'static str, unit: SpeedUnit) {
        self.aliases.insert(alias, unit);
    }

    fn register_all_units(&mut self) {
        for unit in SpeedUnit::ALL {
            self.register(unit);
        }

        // Conventional "per second" shorthands
        self.alias("bps", SpeedUnit::BitPerSecond);
        self.alias("Kbps", SpeedUnit::KilobitPerSecond);
        self.alias("Mbps", SpeedUnit::MegabitPerSecond);
        self.alias("Gbps", SpeedUnit::GigabitPerSecond);
        self.alias("Tbps", SpeedUnit::TerabitPerSecond);
        self.alias("Pbps", SpeedUnit::PetabitPerSecond);

        self.alias("Bps", SpeedUnit::BytePerSecond);
        self.alias("KBps", SpeedUnit::KilobytePerSecond);
        self.alias("MBps", SpeedUnit::MegabytePerSecond);
        self.alias("GBps", SpeedUnit::GigabytePerSecond);
        self.alias("TBps", SpeedUnit::TerabytePerSecond);
        self.alias("PBps", SpeedUnit::PetabytePerSecond);
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Family;

    #[test]
    fn test_families_are_ordered() {
        let bits = bit_units();
        let bytes = byte_units();

        assert!(bits.iter().all(|u| u.family() == Family::Bit));
        assert!(bytes.iter().all(|u| u.family() == Family::Byte));
        assert!(bits.windows(2).all(|w| w[0].prefix() < w[1].prefix()));
        assert!(bytes.windows(2).all(|w| w[0].prefix() < w[1].prefix()));
    }

    #[test]
    fn test_lookup_label_and_identifier() {
        for unit in SpeedUnit::ALL {
            assert_eq!(UNITS.get(unit.display()), Some(unit));
            assert_eq!(UNITS.get(unit.identifier()), Some(unit));
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(UNITS.get("Mbps"), Some(SpeedUnit::MegabitPerSecond));
        assert_eq!(UNITS.get("MBps"), Some(SpeedUnit::MegabytePerSecond));
        assert_eq!(UNITS.get("bps"), Some(SpeedUnit::BitPerSecond));
        assert_eq!(UNITS.get("Bps"), Some(SpeedUnit::BytePerSecond));
    }

    #[test]
    fn test_unknown() {
        assert_eq!(UNITS.get("KiB/s"), None);
        assert_eq!(UNITS.get(""), None);
    }

    #[test]
    fn test_names_cover_all_units() {
        // identifier + label per unit, plus 12 aliases
        assert_eq!(UNITS.names().len(), SpeedUnit::COUNT * 3);
    }
}
