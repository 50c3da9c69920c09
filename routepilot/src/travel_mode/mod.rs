//! Travel mode registry.
//!
//! A fixed, ordered table of named speed presets the user can pick from.
//! Each mode carries a nominal speed in km/h (or the unbounded "teleport"
//! sentinel) and a display glyph. Table order is significant: map shortcut
//! clicks select by position, not by the currently selected mode.

use thiserror::Error;

/// A nominal travel speed as presented to the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Speed {
    /// Concrete speed in kilometers per hour.
    Kmh(f64),
    /// No speed limit (teleport). Never converted to a per-second value.
    Unbounded,
}

/// A travel speed in the engine's internal per-second unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TripSpeed {
    /// Kilometers per second.
    KmPerSec(f64),
    /// Unbounded sentinel, preserved as-is from [`Speed::Unbounded`].
    Unbounded,
}

impl Speed {
    /// Convert to the engine's per-second unit.
    ///
    /// Concrete speeds divide by 3600; the unbounded sentinel passes
    /// through untouched and never goes through the division.
    pub fn to_trip_speed(self) -> TripSpeed {
        match self {
            Speed::Kmh(kmh) => TripSpeed::KmPerSec(kmh / 3600.0),
            Speed::Unbounded => TripSpeed::Unbounded,
        }
    }
}

impl std::fmt::Display for Speed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Speed::Kmh(kmh) => write!(f, "{} km/h", kmh),
            Speed::Unbounded => write!(f, "~"),
        }
    }
}

/// A named travel preset: nominal speed plus display glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelMode {
    /// Unique mode name ("walk", "cycling", ...).
    pub name: &'static str,
    /// Nominal speed for this mode.
    pub speed: Speed,
    /// Display glyph identifier for the UI layer.
    pub icon: &'static str,
}

/// Error from travel mode lookup.
#[derive(Debug, Error, PartialEq)]
pub enum TravelModeError {
    /// The name is not in the fixed table. This indicates a programming
    /// error in the caller; UI-sourced names always come from the table.
    #[error("unknown travel mode: {0}")]
    NotFound(String),
}

/// The fixed, ordered travel mode table.
///
/// Order matters: [`TravelModeTable::shortcut_mode`] selects by position.
/// Names are unique across the set.
pub const TRAVEL_MODES: &[TravelMode] = &[
    TravelMode {
        name: "walk",
        speed: Speed::Kmh(9.0),
        icon: "blind",
    },
    TravelMode {
        name: "cycling",
        speed: Speed::Kmh(13.0),
        icon: "bicycle",
    },
    TravelMode {
        name: "subway",
        speed: Speed::Kmh(50.0),
        icon: "subway",
    },
    TravelMode {
        name: "truck",
        speed: Speed::Kmh(80.0),
        icon: "truck",
    },
    TravelMode {
        name: "car",
        speed: Speed::Kmh(120.0),
        icon: "car",
    },
    TravelMode {
        name: "teleport",
        speed: Speed::Unbounded,
        icon: "star",
    },
];

/// Table index used by shortcut clicks without the secondary modifier.
const SHORTCUT_DEFAULT_INDEX: usize = 1;

/// Read-only accessor over the fixed travel mode table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TravelModeTable;

impl TravelModeTable {
    /// All modes in display order.
    pub fn modes(&self) -> &'static [TravelMode] {
        TRAVEL_MODES
    }

    /// Look up a mode by name.
    ///
    /// Fails with [`TravelModeError::NotFound`] for names outside the
    /// fixed set; callers must propagate rather than fall back to a
    /// different mode.
    pub fn lookup(&self, name: &str) -> Result<&'static TravelMode, TravelModeError> {
        TRAVEL_MODES
            .iter()
            .find(|mode| mode.name == name)
            .ok_or_else(|| TravelModeError::NotFound(name.to_string()))
    }

    /// Mode selected by a map shortcut click.
    ///
    /// With the secondary modifier held this is the last table entry
    /// (fastest); otherwise the fixed default entry. The current UI
    /// selection never influences this choice.
    pub fn shortcut_mode(&self, secondary_modifier: bool) -> &'static TravelMode {
        if secondary_modifier {
            TRAVEL_MODES
                .last()
                .unwrap_or(&TRAVEL_MODES[SHORTCUT_DEFAULT_INDEX])
        } else {
            &TRAVEL_MODES[SHORTCUT_DEFAULT_INDEX]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lookup_returns_matching_mode() {
        let table = TravelModeTable;
        for expected in TRAVEL_MODES {
            let found = table.lookup(expected.name).unwrap();
            assert_eq!(found.name, expected.name);
            assert_eq!(found.speed, expected.speed);
        }
    }

    #[test]
    fn test_lookup_unknown_name_fails() {
        let table = TravelModeTable;
        let err = table.lookup("rocket").unwrap_err();
        assert_eq!(err, TravelModeError::NotFound("rocket".to_string()));
    }

    #[test]
    fn test_names_are_unique() {
        for (i, a) in TRAVEL_MODES.iter().enumerate() {
            for b in &TRAVEL_MODES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_concrete_speed_converts_by_3600() {
        let cycling = TravelModeTable.lookup("cycling").unwrap();
        match cycling.speed.to_trip_speed() {
            TripSpeed::KmPerSec(v) => assert!((v - 13.0 / 3600.0).abs() < 1e-12),
            TripSpeed::Unbounded => panic!("cycling must have a concrete speed"),
        }
    }

    #[test]
    fn test_unbounded_speed_is_never_converted() {
        let teleport = TravelModeTable.lookup("teleport").unwrap();
        assert_eq!(teleport.speed.to_trip_speed(), TripSpeed::Unbounded);
    }

    #[test]
    fn test_shortcut_without_modifier_selects_fixed_index() {
        let mode = TravelModeTable.shortcut_mode(false);
        assert_eq!(mode.name, TRAVEL_MODES[1].name);
    }

    #[test]
    fn test_shortcut_with_modifier_selects_last_entry() {
        let mode = TravelModeTable.shortcut_mode(true);
        assert_eq!(mode.name, "teleport");
        assert_eq!(mode.speed, Speed::Unbounded);
    }

    proptest! {
        #[test]
        fn prop_kmh_conversion_is_exact_division(kmh in 0.1f64..1000.0) {
            match Speed::Kmh(kmh).to_trip_speed() {
                TripSpeed::KmPerSec(v) => prop_assert!((v * 3600.0 - kmh).abs() < 1e-9),
                TripSpeed::Unbounded => prop_assert!(false, "concrete speed became unbounded"),
            }
        }
    }
}
