//! Monitoring core for slot-mounted power modules
//!
//! Firmware logic for pluggable power/actuator modules (dual-motor driver,
//! quad-servo regulator) on a multi-slot carrier board. Two pieces make up
//! the core: a discretized current-limit selector that maps a requested
//! amperage onto a fixed table of pin-state combinations, and a per-module
//! monitor/aggregator that turns raw fault/temperature samples into fault
//! signals and running interval statistics.
//!
//! Key constraints:
//! - No heap allocation; all state is fixed-size and exclusively owned
//! - Single-threaded polling model, one `monitor()` call per control tick
//! - Fatal conditions propagate as errors; the caller owns disable policy
//!
//! ```
//! use slotguard::{ConditionMode, MonitorState};
//!
//! let mut state = MonitorState::new(ConditionMode::AnyTriggered);
//!
//! // One record per control cycle
//! state.record(false, 24.5);
//! state.record(false, 25.5);
//!
//! // Finalize the interval average
//! state.process_readings();
//! assert_eq!(state.average_temperature(), 25.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod current_limit;
pub mod errors;
pub mod io;
pub mod modules;
pub mod monitor;

// Public API
pub use errors::{ModuleError, ModuleResult};
pub use io::{thermistor_celsius, AnalogInput, DigitalPin, PinState, TempConversion};
pub use modules::{
    Actuator, DualMotorIo, DualMotorModule, MonitorAction, QuadServoRegIo, QuadServoRegModule,
    SlotModule,
};
pub use monitor::{ConditionMode, Edge, MonitorState, Reading, Readings};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
