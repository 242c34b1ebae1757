//! Slot-Mounted Module Implementations
//!
//! ## Overview
//!
//! One file per module type, sharing two seams:
//!
//! - [`SlotModule`]: the per-cycle surface the carrier's control loop
//!   drives. Object-safe, so a heterogeneous set of modules can be polled
//!   from one loop: call `monitor()` on every module each tick, then at
//!   reporting time `process_readings()`, `get_readings()` and
//!   `clear_readings()`.
//! - [`Actuator`]: the only thing the core needs from a motor or servo
//!   driver object - the ability to stop driving its output during a module
//!   reset. Actuator control itself lives outside this crate.
//!
//! A module owns its slot lines exclusively. Nothing here blocks, suspends,
//! or retries: a fatal observation propagates out of `monitor()` as a
//! [`ModuleError`](crate::errors::ModuleError) and the caller decides what
//! to disable.

pub mod dual_motor;
pub mod quad_servo;

pub use dual_motor::{DualMotorIo, DualMotorModule};
pub use quad_servo::{QuadServoRegIo, QuadServoRegModule};

use crate::errors::ModuleResult;
use crate::monitor::Readings;

// Optional logging shims; compile to nothing without the `log` feature
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

pub(crate) use log_info;
pub(crate) use log_warn;

/// User-supplied monitor action, invoked once per non-fatal cycle with the
/// raw `(condition, temperature °C)` observation.
///
/// A plain function pointer by design: the action is a pure policy hook
/// (external logging, derating) and must not capture shared mutable state.
/// Panics inside the action are not suppressed.
pub type MonitorAction = fn(bool, f32);

/// Handle to an actuator driver owned by a module.
pub trait Actuator {
    /// Stop driving the actuator's output.
    fn disable(&mut self);
}

/// Placeholder actuator for modules initialised without actuator handles
/// (pin-only use, where something else owns the drivers).
impl Actuator for () {
    fn disable(&mut self) {}
}

/// Per-cycle surface of a slot-mounted module.
pub trait SlotModule {
    /// Enable the module's output stage.
    fn enable(&mut self);

    /// Disable the module's output stage.
    fn disable(&mut self);

    /// Whether the output stage is currently enabled.
    fn is_enabled(&self) -> bool;

    /// Sample the module's health lines once and fold the observation into
    /// the interval aggregates.
    ///
    /// Returns an error on a fatal observation (fault or over-temperature);
    /// the aggregates are not updated on the fatal path, and the caller is
    /// expected to disable the output.
    fn monitor(&mut self) -> ModuleResult<()>;

    /// Ordered snapshot of the interval readings (condition flag first, then
    /// `T_max`, `T_min`, `T_avg`).
    fn get_readings(&self) -> Readings;

    /// Finalize the interval average. Acts once per interval; repeat calls
    /// without an intervening [`monitor`](Self::monitor) are no-ops.
    fn process_readings(&mut self);

    /// Start a new reporting interval.
    fn clear_readings(&mut self);
}
