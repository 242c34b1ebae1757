//! Dual-Motor Driver Module (Fault-Style Monitoring)
//!
//! Drives two DC motors through a shared enable line and a discretized
//! current-limit circuit. The driver exposes a current-sense fault line on
//! the first analog sense input and an on-board thermistor on the second.
//!
//! Monitoring is fault-style: the fault line asserting on any cycle is fatal
//! for that cycle, and a non-fatal fault observation latches the interval's
//! `Fault` flag true ([`ConditionMode::AnyTriggered`]).

use super::{log_info, Actuator, MonitorAction, SlotModule};
use crate::current_limit::{self, DEFAULT_CURRENT_LIMIT};
use crate::errors::{ModuleError, ModuleResult};
use crate::io::{AnalogInput, DigitalPin, PinState, TempConversion};
use crate::monitor::{ConditionMode, MonitorState, Readings};

/// Number of motor outputs on the module.
pub const NUM_MOTORS: usize = 2;

/// Normalized current-sense reading at or below which the driver reports a
/// fault.
pub const FAULT_THRESHOLD: f32 = 0.1;

/// Temperature above which `monitor` raises
/// [`ModuleError::OverTemperature`], in degrees Celsius.
pub const TEMPERATURE_LIMIT: f32 = 70.0;

#[cfg_attr(not(feature = "log"), allow(dead_code))]
const NAME: &str = "Dual Motor";

/// Slot lines owned by a dual-motor module.
pub struct DualMotorIo<P, A> {
    /// Motor driver enable line.
    pub motors_en: P,
    /// First current-limit vref line.
    pub vref1: P,
    /// Second current-limit vref line.
    pub vref2: P,
    /// Current-sense fault line (analog sense 1).
    pub fault_sense: A,
    /// Thermistor line (analog sense 2).
    pub temp_sense: A,
}

/// Dual-motor driver module.
///
/// `M` is the actuator handle type; modules used pin-only are constructed
/// with `None::<[(); NUM_MOTORS]>` and the motor accessors return
/// [`ModuleError::InvalidState`].
pub struct DualMotorModule<P, A, M = ()> {
    io: DualMotorIo<P, A>,
    motors: Option<[M; NUM_MOTORS]>,
    temp_from_raw: TempConversion,
    current_limit: f32,
    monitor_action: Option<MonitorAction>,
    state: MonitorState,
    enabled: bool,
}

impl<P, A, M> DualMotorModule<P, A, M>
where
    P: DigitalPin,
    A: AnalogInput,
    M: Actuator,
{
    /// Create a module from its slot lines, optional motor handles, and the
    /// board's raw-to-Celsius conversion.
    ///
    /// The current limit defaults to
    /// [`DEFAULT_CURRENT_LIMIT`](crate::current_limit::DEFAULT_CURRENT_LIMIT)
    /// and is applied to hardware by [`reset`](Self::reset).
    pub fn new(
        io: DualMotorIo<P, A>,
        motors: Option<[M; NUM_MOTORS]>,
        temp_from_raw: TempConversion,
    ) -> Self {
        Self {
            io,
            motors,
            temp_from_raw,
            current_limit: DEFAULT_CURRENT_LIMIT,
            monitor_action: None,
            state: MonitorState::new(ConditionMode::AnyTriggered),
            enabled: false,
        }
    }

    /// Set the current limit to apply at the next [`reset`](Self::reset).
    pub fn with_current_limit(mut self, amps: f32) -> Self {
        self.current_limit = amps;
        self
    }

    /// Install the per-cycle monitor action.
    pub fn set_monitor_action(&mut self, action: MonitorAction) {
        self.monitor_action = Some(action);
    }

    /// Remove the per-cycle monitor action.
    pub fn clear_monitor_action(&mut self) {
        self.monitor_action = None;
    }

    /// Return the module to its power-on state: motors off, output stage
    /// disabled, configured current limit applied to the vref lines.
    pub fn reset(&mut self) {
        if let Some(motors) = self.motors.as_mut() {
            for motor in motors {
                motor.disable();
            }
        }
        self.io.motors_en.set_output(false);
        self.enabled = false;
        self.apply_current_limit(self.current_limit);
    }

    /// Currently configured limit, in amperes. One of the table values once
    /// a selection has been applied.
    pub fn current_limit(&self) -> f32 {
        self.current_limit
    }

    /// Select and apply the highest hardware-achievable limit not exceeding
    /// `amps` (clamped to the table ends), returning the chosen limit.
    ///
    /// The limit circuit may only be reconfigured while the output stage is
    /// disabled; calling this while enabled is a programming error.
    pub fn set_current_limit(&mut self, amps: f32) -> ModuleResult<f32> {
        if self.enabled {
            return Err(ModuleError::InvalidState {
                reason: "cannot change current limit while the motor driver is enabled",
            });
        }
        Ok(self.apply_current_limit(amps))
    }

    fn apply_current_limit(&mut self, amps: f32) -> f32 {
        let chosen = current_limit::select(amps);
        Self::drive_vref(&mut self.io.vref1, chosen.vref.0);
        Self::drive_vref(&mut self.io.vref2, chosen.vref.1);
        self.current_limit = chosen.amps;
        log_info!("[{}] current limit set to {}A", NAME, chosen.amps);
        chosen.amps
    }

    fn drive_vref(pin: &mut P, state: PinState) {
        match state {
            PinState::Sense => pin.set_input(),
            PinState::Low => pin.set_output(false),
            PinState::High => pin.set_output(true),
        }
    }

    /// Whether the driver's current-sense fault line is asserted.
    pub fn read_fault(&mut self) -> bool {
        self.io.fault_sense.read_raw() <= FAULT_THRESHOLD
    }

    /// Driver temperature in degrees Celsius.
    pub fn read_temperature(&mut self) -> f32 {
        (self.temp_from_raw)(self.io.temp_sense.read_raw())
    }

    /// Mutable handle to motor `index`.
    ///
    /// Errors if the module was constructed without motor handles or the
    /// index is out of range.
    pub fn motor_mut(&mut self, index: usize) -> ModuleResult<&mut M> {
        let motors = self.motors.as_mut().ok_or(ModuleError::InvalidState {
            reason: "module was initialised without motor handles",
        })?;
        motors.get_mut(index).ok_or(ModuleError::InvalidState {
            reason: "motor index out of range",
        })
    }
}

impl<P, A, M> SlotModule for DualMotorModule<P, A, M>
where
    P: DigitalPin,
    A: AnalogInput,
    M: Actuator,
{
    fn enable(&mut self) {
        self.io.motors_en.set_output(true);
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.io.motors_en.set_output(false);
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn monitor(&mut self) -> ModuleResult<()> {
        let fault = self.read_fault();
        if fault {
            return Err(ModuleError::Fault {
                reason: "fault detected on motor driver",
            });
        }

        let temperature = self.read_temperature();
        if temperature > TEMPERATURE_LIMIT {
            return Err(ModuleError::OverTemperature {
                temperature,
                limit: TEMPERATURE_LIMIT,
            });
        }

        if let Some(action) = self.monitor_action {
            action(fault, temperature);
        }

        self.state.record(fault, temperature);
        Ok(())
    }

    fn get_readings(&self) -> Readings {
        self.state.readings("Fault")
    }

    fn process_readings(&mut self) {
        self.state.process_readings();
    }

    fn clear_readings(&mut self) {
        self.state.clear_readings();
    }
}
