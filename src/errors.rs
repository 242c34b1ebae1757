//! Error Types for Module Monitoring and Configuration
//!
//! ## Design Philosophy
//!
//! The error system follows the same rules as the rest of the crate:
//!
//! 1. **Small Size**: each variant carries at most two scalars or a static
//!    string, since errors are returned from the per-tick hot path.
//!
//! 2. **No Heap Allocation**: all payloads are inline - no `String`, only
//!    `&'static str` for reasons. Memory usage stays deterministic.
//!
//! 3. **Copy Semantics**: errors implement `Copy` so they can be returned,
//!    stored, or re-raised without move complications.
//!
//! ## Error Categories
//!
//! Two kinds are fatal and mean "stop driving this module's output now":
//!
//! - [`ModuleError::Fault`]: electrical fault detected on the output stage
//!   (current-sense at or below threshold), or sustained power-not-good on a
//!   regulated module configured to treat that as fatal.
//! - [`ModuleError::OverTemperature`]: the measured temperature exceeded the
//!   module's fixed safety threshold.
//!
//! Neither is retried by the core. Recovery policy (disable, cool down,
//! re-enable) belongs to the caller, which also performs the actual hardware
//! disable - the core never touches the enable line on a fault.
//!
//! The third kind, [`ModuleError::InvalidState`], signals a programming
//! error: changing the current limit while the output stage is enabled, or
//! accessing an actuator handle that was never constructed. It is raised
//! immediately and is never recoverable automatically.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use slotguard::{ModuleError, SlotModule};
//!
//! fn control_tick(module: &mut dyn SlotModule) {
//!     match module.monitor() {
//!         Ok(()) => {
//!             // Healthy cycle - aggregates were updated
//!         }
//!         Err(ModuleError::Fault { .. }) | Err(ModuleError::OverTemperature { .. }) => {
//!             // Stop driving the output, then decide on retry policy
//!             module.disable();
//!         }
//!         Err(ModuleError::InvalidState { .. }) => {
//!             // Bug in the calling code - fix the call site
//!         }
//!     }
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for module operations.
pub type ModuleResult<T> = Result<T, ModuleError>;

/// Errors raised by module monitoring and configuration - kept small for
/// embedded use.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ModuleError {
    /// Electrical fault on the module's output stage.
    #[error("Fault: {reason}")]
    Fault {
        /// What the fault line reported
        reason: &'static str,
    },

    /// Measured temperature exceeded the module's safety threshold.
    #[error("Temperature of {temperature}°C exceeded the limit of {limit}°C")]
    OverTemperature {
        /// The temperature that was measured, in degrees Celsius
        temperature: f32,
        /// The module's fixed safety threshold, in degrees Celsius
        limit: f32,
    },

    /// Programming-error class: the operation is not valid in the module's
    /// current state.
    #[error("Invalid state: {reason}")]
    InvalidState {
        /// Which precondition the caller violated
        reason: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ModuleError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Fault { reason } => defmt::write!(fmt, "Fault: {}", reason),
            Self::OverTemperature { temperature, limit } => {
                defmt::write!(fmt, "Temperature {}°C exceeded limit {}°C", temperature, limit)
            }
            Self::InvalidState { reason } => defmt::write!(fmt, "Invalid state: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_copy_and_comparable() {
        let e = ModuleError::Fault {
            reason: "fault detected on motor driver",
        };
        let copy = e;
        assert_eq!(e, copy);
    }

    #[cfg(feature = "std")]
    #[test]
    fn over_temperature_display() {
        let e = ModuleError::OverTemperature {
            temperature: 85.0,
            limit: 80.0,
        };
        let text = format!("{}", e);
        assert!(text.contains("85"));
        assert!(text.contains("80"));
    }
}
