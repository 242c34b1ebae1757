//! Discretized Current-Limit Selection
//!
//! ## Overview
//!
//! The motor driver's output current limit is not continuously adjustable.
//! Two vref lines feed a resistor network, and each line can be forced low,
//! forced high, or released to high-impedance - nine combinations, each of
//! which produces one fixed, hardware-achievable limit.
//!
//! [`CURRENT_LIMITS`] records those nine combinations in ascending order of
//! limit value, and [`select`] maps a requested amperage onto the table:
//! the highest entry that does not exceed the request wins, clamped to the
//! table's minimum and maximum entries at the extremes. Selection is a pure
//! table search; applying the chosen pin states to hardware is the owning
//! module's job, and is only legal while the module's output stage is
//! disabled.
//!
//! ## Table Provenance
//!
//! The limit values come from the driver's datasheet current-sense equations
//! evaluated for the carrier board's resistor network. They are properties
//! of the circuit: do not edit them without a board revision.

use crate::io::PinState;

/// One row of the current-limit table: a hardware-achievable limit and the
/// vref drive states that produce it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurrentLimitEntry {
    /// Limit value, in amperes.
    pub amps: f32,
    /// Drive states applied to (vref1, vref2) to achieve the limit.
    pub vref: (PinState, PinState),
}

/// The nine hardware-achievable current limits, strictly ascending by
/// amperage. Never mutated at runtime.
pub const CURRENT_LIMITS: [CurrentLimitEntry; 9] = [
    CurrentLimitEntry { amps: 0.161, vref: (PinState::Low, PinState::Low) },
    CurrentLimitEntry { amps: 0.251, vref: (PinState::Sense, PinState::Low) },
    CurrentLimitEntry { amps: 0.444, vref: (PinState::Low, PinState::Sense) },
    CurrentLimitEntry { amps: 0.786, vref: (PinState::High, PinState::Low) },
    CurrentLimitEntry { amps: 1.143, vref: (PinState::Sense, PinState::Sense) },
    CurrentLimitEntry { amps: 1.611, vref: (PinState::Low, PinState::High) },
    CurrentLimitEntry { amps: 1.890, vref: (PinState::High, PinState::Sense) },
    CurrentLimitEntry { amps: 2.153, vref: (PinState::Sense, PinState::High) },
    CurrentLimitEntry { amps: 2.236, vref: (PinState::High, PinState::High) },
];

/// Lowest selectable limit, in amperes.
pub const MIN_CURRENT_LIMIT: f32 = CURRENT_LIMITS[0].amps;
/// Limit applied by a dual-motor module at reset unless configured otherwise.
pub const DEFAULT_CURRENT_LIMIT: f32 = CURRENT_LIMITS[2].amps;
/// Highest selectable limit, in amperes.
pub const MAX_CURRENT_LIMIT: f32 = CURRENT_LIMITS[8].amps;

/// Select the highest table entry whose limit does not exceed `desired_amps`.
///
/// Total function: requests below the minimum clamp to the first entry,
/// requests at or above the maximum clamp to the last. A request exactly
/// equal to a table value selects that value.
pub fn select(desired_amps: f32) -> CurrentLimitEntry {
    // Start from the lowest limit so sub-minimum requests clamp low
    let mut chosen = CURRENT_LIMITS[0];

    for entry in CURRENT_LIMITS.iter() {
        if entry.amps > desired_amps {
            break;
        }
        chosen = *entry;
    }

    chosen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_strictly_ascending() {
        for pair in CURRENT_LIMITS.windows(2) {
            assert!(pair[0].amps < pair[1].amps);
        }
    }

    #[test]
    fn below_minimum_clamps_low() {
        assert_eq!(select(0.0).amps, MIN_CURRENT_LIMIT);
        assert_eq!(select(-5.0).amps, MIN_CURRENT_LIMIT);
        assert_eq!(select(0.16).amps, MIN_CURRENT_LIMIT);
    }

    #[test]
    fn above_maximum_clamps_high() {
        assert_eq!(select(MAX_CURRENT_LIMIT).amps, MAX_CURRENT_LIMIT);
        assert_eq!(select(10.0).amps, MAX_CURRENT_LIMIT);
    }

    #[test]
    fn exact_table_value_selects_itself() {
        for entry in CURRENT_LIMITS.iter() {
            let chosen = select(entry.amps);
            assert_eq!(chosen.amps, entry.amps);
            assert_eq!(chosen.vref, entry.vref);
        }
    }

    #[test]
    fn between_entries_selects_lower_neighbour() {
        assert_eq!(select(1.0).amps, 0.786);
        assert_eq!(select(0.3).amps, 0.251);
        assert_eq!(select(2.2).amps, 2.153);
    }

    #[test]
    fn chosen_pin_states_match_table() {
        assert_eq!(select(0.444).vref, (PinState::Low, PinState::Sense));
        assert_eq!(select(2.236).vref, (PinState::High, PinState::High));
    }
}
