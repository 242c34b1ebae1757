//! Running-Aggregate State Machine for Per-Module Monitoring
//!
//! ## Overview
//!
//! Every module runs the same statistics state machine once per control
//! cycle: fold a boolean health condition into a per-interval flag, extend
//! temperature extrema, and accumulate a sum/count pair for averaging. The
//! machine is parameterized by [`ConditionMode`] instead of being duplicated
//! per module style:
//!
//! - Fault-style modules (dual-motor driver) use
//!   [`ConditionMode::AnyTriggered`]: one fault observation latches the flag
//!   true for the rest of the interval.
//! - Status-style modules (quad-servo regulator) use
//!   [`ConditionMode::HeldThroughout`]: the flag stays true only while
//!   power-good holds on every cycle.
//!
//! ## Interval Lifecycle
//!
//! An interval spans two [`MonitorState::clear_readings`] calls:
//!
//! ```text
//! clear_readings()        interval start, aggregates at neutral
//!   record() x N          one fold per healthy monitor cycle
//!   process_readings()    sum/count -> average, count -> 0
//!   readings()            ordered snapshot for the consumer
//! clear_readings()        next interval
//! ```
//!
//! `process_readings` uses the sample count as a sentinel: finalizing zeroes
//! it, so a second call without an intervening `record` is a no-op and the
//! average cannot be divided twice.
//!
//! Edge detection ([`MonitorState::transition`]) is separate from the
//! interval aggregates: it compares against the previous cycle only, and is
//! deliberately *not* reset by `clear_readings`, so a reporting boundary
//! cannot manufacture a spurious transition.

use heapless::Vec;

/// How the per-cycle boolean condition folds into the interval flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConditionMode {
    /// Flag becomes true if the condition was ever observed true
    /// (fault-style: OR accumulation).
    AnyTriggered,
    /// Flag stays true only if the condition held on every cycle
    /// (status-style: AND accumulation).
    HeldThroughout,
}

impl ConditionMode {
    /// Interval-start value of the condition flag.
    pub const fn neutral(self) -> bool {
        match self {
            Self::AnyTriggered => false,
            Self::HeldThroughout => true,
        }
    }

    fn fold(self, accumulated: bool, sample: bool) -> bool {
        match self {
            Self::AnyTriggered => accumulated || sample,
            Self::HeldThroughout => accumulated && sample,
        }
    }
}

/// Direction of a condition change between consecutive cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Condition went false -> true.
    Rose,
    /// Condition went true -> false.
    Fell,
}

/// A single named value in a readings snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading {
    /// Boolean health flag (`Fault` / `PGood`).
    Flag(bool),
    /// Temperature statistic, in degrees Celsius.
    Celsius(f32),
}

impl core::fmt::Display for Reading {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            // Flags print as 0/1 so they can share a plotter axis with
            // temperature traces
            Self::Flag(value) => write!(f, "{}", *value as u8),
            Self::Celsius(value) => write!(f, "{}", value),
        }
    }
}

/// Ordered snapshot of one interval's readings.
///
/// Field order is part of the contract: the condition flag first, then
/// `T_max`, `T_min`, `T_avg`.
pub type Readings = Vec<(&'static str, Reading), 4>;

/// Per-module running aggregates for one reporting interval.
///
/// Exclusively owned by its module and touched only from the module's own
/// `monitor`/`process_readings`/`clear_readings` calls, all invoked from a
/// single logical thread of control. No locking.
#[derive(Debug, Clone)]
pub struct MonitorState {
    mode: ConditionMode,
    /// Previous cycle's condition, for edge detection only. Not part of the
    /// interval aggregates and not reset by `clear_readings`.
    last_condition: bool,
    condition: bool,
    max_temperature: f32,
    min_temperature: f32,
    /// Running sum until finalized, then the finalized average.
    avg_temperature: f32,
    samples: u32,
}

impl MonitorState {
    /// Create a cleared state for the given aggregation mode.
    pub fn new(mode: ConditionMode) -> Self {
        Self {
            mode,
            last_condition: false,
            condition: mode.neutral(),
            max_temperature: f32::NEG_INFINITY,
            min_temperature: f32::INFINITY,
            avg_temperature: 0.0,
            samples: 0,
        }
    }

    /// Fold one non-fatal observation into the interval aggregates.
    pub fn record(&mut self, condition: bool, temperature: f32) {
        self.condition = self.mode.fold(self.condition, condition);
        self.max_temperature = self.max_temperature.max(temperature);
        self.min_temperature = self.min_temperature.min(temperature);
        self.avg_temperature += temperature;
        self.samples += 1;
    }

    /// Compare the condition against the previous cycle and report a
    /// transition, if any. Fires exactly once per change, not once per cycle
    /// while the condition persists.
    pub fn transition(&mut self, condition: bool) -> Option<Edge> {
        let edge = match (self.last_condition, condition) {
            (false, true) => Some(Edge::Rose),
            (true, false) => Some(Edge::Fell),
            _ => None,
        };
        self.last_condition = condition;
        edge
    }

    /// Finalize the interval average in place.
    ///
    /// Zeroing the sample count makes finalization act once: a repeat call
    /// without an intervening [`record`](Self::record) is a no-op.
    pub fn process_readings(&mut self) {
        if self.samples > 0 {
            self.avg_temperature /= self.samples as f32;
            self.samples = 0;
        }
    }

    /// Ordered snapshot of the interval so far. `condition_label` names the
    /// leading flag (`"Fault"` or `"PGood"`).
    ///
    /// `T_avg` holds the running sum until
    /// [`process_readings`](Self::process_readings) finalizes it.
    pub fn readings(&self, condition_label: &'static str) -> Readings {
        let mut out = Readings::new();
        // Capacity is exactly four entries; these pushes cannot fail
        let _ = out.push((condition_label, Reading::Flag(self.condition)));
        let _ = out.push(("T_max", Reading::Celsius(self.max_temperature)));
        let _ = out.push(("T_min", Reading::Celsius(self.min_temperature)));
        let _ = out.push(("T_avg", Reading::Celsius(self.avg_temperature)));
        out
    }

    /// Reset the interval aggregates to their interval-start defaults.
    pub fn clear_readings(&mut self) {
        self.condition = self.mode.neutral();
        self.max_temperature = f32::NEG_INFINITY;
        self.min_temperature = f32::INFINITY;
        self.avg_temperature = 0.0;
        self.samples = 0;
    }

    /// Aggregation mode this state was created with.
    pub fn mode(&self) -> ConditionMode {
        self.mode
    }

    /// Current value of the interval condition flag.
    pub fn condition(&self) -> bool {
        self.condition
    }

    /// Samples recorded since the last finalize or clear.
    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Highest temperature seen this interval (−∞ if no samples).
    pub fn max_temperature(&self) -> f32 {
        self.max_temperature
    }

    /// Lowest temperature seen this interval (+∞ if no samples).
    pub fn min_temperature(&self) -> f32 {
        self.min_temperature
    }

    /// Running sum before finalization, the interval average after.
    pub fn average_temperature(&self) -> f32 {
        self.avg_temperature
    }
}
