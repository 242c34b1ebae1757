//! Hardware Seams: Digital Pins, Analog Senses, and the Vref Drive States
//!
//! ## Overview
//!
//! The core never touches peripheral registers. Each module owns its slot's
//! lines through two small traits, implemented by the board support layer:
//!
//! - [`DigitalPin`]: a slot line that can be driven high/low, or released to
//!   a high-impedance input and read back.
//! - [`AnalogInput`]: a slot sense line returning a normalized reading in
//!   `[0.0, 1.0]`.
//!
//! Both traits take `&mut self`: every line is exclusively owned by exactly
//! one module instance, so no sharing or locking is modeled.
//!
//! ## Temperature conversion
//!
//! Modules convert the raw analog sense value into degrees Celsius through
//! an injected function (see [`TempConversion`]), because the sense circuit
//! is a board property, not a module property. The stock carrier board wires
//! an NTC thermistor into a resistor divider; [`thermistor_celsius`] is the
//! matching conversion and is the usual argument.

/// Drive state applied to a current-limit vref line.
///
/// The motor driver's current limit is set by a resistor network on two vref
/// lines. Each line is either forced low, forced high, or released to
/// high-impedance so the driver's internal reference passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinState {
    /// Forced low (output, driven to ground).
    Low,
    /// Forced high (output, driven to the logic rail).
    High,
    /// High-impedance input; the line floats for current-sense pass-through.
    Sense,
}

/// Digital slot line.
pub trait DigitalPin {
    /// Configure the line as an output driven to the given level.
    fn set_output(&mut self, high: bool);

    /// Configure the line as a high-impedance input.
    fn set_input(&mut self);

    /// Read the line's current level.
    fn read(&mut self) -> bool;
}

/// Analog slot sense line.
pub trait AnalogInput {
    /// Read the line, normalized to `[0.0, 1.0]` of the ADC reference.
    fn read_raw(&mut self) -> f32;
}

/// Conversion from a normalized analog reading to degrees Celsius.
pub type TempConversion = fn(f32) -> f32;

/// Thermistor beta coefficient for the stock carrier board sense circuit.
const THERMISTOR_BETA: f32 = 3435.0;
/// Thermistor reference resistance at 25°C, in ohms.
const THERMISTOR_R0_OHMS: f32 = 10_000.0;
/// Reference temperature of `THERMISTOR_R0_OHMS`, in kelvin (25°C).
const THERMISTOR_T0_KELVIN: f32 = 298.15;
/// Fixed divider resistor between the rail and the thermistor, in ohms.
const DIVIDER_PULLUP_OHMS: f32 = 5_100.0;
/// Offset between kelvin and Celsius scales.
const ZERO_CELSIUS_KELVIN: f32 = 273.15;

/// Convert a normalized reading from the stock on-board thermistor divider
/// into degrees Celsius.
///
/// Uses the NTC beta model. The input is clamped just inside `(0, 1)` so the
/// divider math stays finite when the sense line is railed; a railed line
/// reads as an extreme (but finite) temperature rather than NaN.
pub fn thermistor_celsius(raw: f32) -> f32 {
    let raw = raw.clamp(1e-4, 1.0 - 1e-4);

    // Thermistor sits on the low side of the divider
    let resistance = (raw * DIVIDER_PULLUP_OHMS) / (1.0 - raw);

    let kelvin = (THERMISTOR_BETA * THERMISTOR_T0_KELVIN)
        / (THERMISTOR_BETA + THERMISTOR_T0_KELVIN * libm::logf(resistance / THERMISTOR_R0_OHMS));
    kelvin - ZERO_CELSIUS_KELVIN
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Normalized reading at which the thermistor equals its 25°C reference
    /// resistance: 10k / (10k + 5.1k).
    const RAW_AT_25C: f32 = 10_000.0 / 15_100.0;

    #[test]
    fn reference_point_reads_room_temperature() {
        let t = thermistor_celsius(RAW_AT_25C);
        assert!((t - 25.0).abs() < 0.1, "expected ~25°C, got {t}");
    }

    #[test]
    fn conversion_is_monotonic_decreasing() {
        // NTC: higher resistance (higher raw reading) means colder
        let mut previous = thermistor_celsius(0.05);
        for step in 1..19 {
            let raw = 0.05 + step as f32 * 0.05;
            let t = thermistor_celsius(raw);
            assert!(t < previous, "not decreasing at raw={raw}");
            previous = t;
        }
    }

    #[test]
    fn railed_inputs_stay_finite() {
        assert!(thermistor_celsius(0.0).is_finite());
        assert!(thermistor_celsius(1.0).is_finite());
        // Out-of-range inputs clamp rather than blow up
        assert!(thermistor_celsius(-0.5).is_finite());
        assert!(thermistor_celsius(1.5).is_finite());
    }
}
