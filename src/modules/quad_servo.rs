//! Quad-Servo Regulator Module (Status-Style Monitoring)
//!
//! Powers four servos from an on-board regulator with an enable line and a
//! power-good status line. The second analog sense input carries the
//! regulator thermistor.
//!
//! Monitoring is status-style: the interval's `PGood` flag stays true only
//! if power-good held on every cycle ([`ConditionMode::HeldThroughout`]).
//! Losing power-good is fatal only when the module is configured with
//! [`with_halt_on_not_pgood`](QuadServoRegModule::with_halt_on_not_pgood);
//! otherwise the loss is tolerated and each transition of the line is logged
//! as a one-time warning.

use super::{log_warn, Actuator, MonitorAction, SlotModule};
use crate::errors::{ModuleError, ModuleResult};
use crate::io::{AnalogInput, DigitalPin, TempConversion};
use crate::monitor::{ConditionMode, Edge, MonitorState, Readings};

/// Number of servo outputs on the module.
pub const NUM_SERVOS: usize = 4;

/// Temperature above which `monitor` raises
/// [`ModuleError::OverTemperature`], in degrees Celsius.
pub const TEMPERATURE_LIMIT: f32 = 80.0;

#[cfg_attr(not(feature = "log"), allow(dead_code))]
const NAME: &str = "Quad Servo Regulated";

/// Slot lines owned by a quad-servo regulator module.
pub struct QuadServoRegIo<P, A> {
    /// Regulator enable line.
    pub power_en: P,
    /// Regulator power-good status line (input).
    pub power_good: P,
    /// Thermistor line (analog sense 2).
    pub temp_sense: A,
}

/// Quad-servo regulated module.
///
/// `S` is the servo handle type; modules used pin-only are constructed with
/// `None::<[(); NUM_SERVOS]>` and the servo accessors return
/// [`ModuleError::InvalidState`].
pub struct QuadServoRegModule<P, A, S = ()> {
    io: QuadServoRegIo<P, A>,
    servos: Option<[S; NUM_SERVOS]>,
    temp_from_raw: TempConversion,
    halt_on_not_pgood: bool,
    monitor_action: Option<MonitorAction>,
    state: MonitorState,
    enabled: bool,
}

impl<P, A, S> QuadServoRegModule<P, A, S>
where
    P: DigitalPin,
    A: AnalogInput,
    S: Actuator,
{
    /// Create a module from its slot lines, optional servo handles, and the
    /// board's raw-to-Celsius conversion.
    ///
    /// Power-not-good is tolerated by default; see
    /// [`with_halt_on_not_pgood`](Self::with_halt_on_not_pgood).
    pub fn new(
        io: QuadServoRegIo<P, A>,
        servos: Option<[S; NUM_SERVOS]>,
        temp_from_raw: TempConversion,
    ) -> Self {
        Self {
            io,
            servos,
            temp_from_raw,
            halt_on_not_pgood: false,
            monitor_action: None,
            state: MonitorState::new(ConditionMode::HeldThroughout),
            enabled: false,
        }
    }

    /// Configure whether losing power-good is fatal for the monitor cycle.
    pub fn with_halt_on_not_pgood(mut self, halt: bool) -> Self {
        self.halt_on_not_pgood = halt;
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

    /// Return the module to its power-on state: servos off, regulator
    /// disabled, power-good line released to an input.
    pub fn reset(&mut self) {
        if let Some(servos) = self.servos.as_mut() {
            for servo in servos {
                servo.disable();
            }
        }
        self.io.power_en.set_output(false);
        self.io.power_good.set_input();
        self.enabled = false;
    }

    /// Whether the regulator reports its output within spec.
    pub fn read_power_good(&mut self) -> bool {
        self.io.power_good.read()
    }

    /// Regulator temperature in degrees Celsius.
    pub fn read_temperature(&mut self) -> f32 {
        (self.temp_from_raw)(self.io.temp_sense.read_raw())
    }

    /// Mutable handle to servo `index`.
    ///
    /// Errors if the module was constructed without servo handles or the
    /// index is out of range.
    pub fn servo_mut(&mut self, index: usize) -> ModuleResult<&mut S> {
        let servos = self.servos.as_mut().ok_or(ModuleError::InvalidState {
            reason: "module was initialised without servo handles",
        })?;
        servos.get_mut(index).ok_or(ModuleError::InvalidState {
            reason: "servo index out of range",
        })
    }
}

impl<P, A, S> SlotModule for QuadServoRegModule<P, A, S>
where
    P: DigitalPin,
    A: AnalogInput,
    S: Actuator,
{
    fn enable(&mut self) {
        self.io.power_en.set_output(true);
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.io.power_en.set_output(false);
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn monitor(&mut self) -> ModuleResult<()> {
        let pgood = self.read_power_good();
        if !pgood && self.halt_on_not_pgood {
            return Err(ModuleError::Fault {
                reason: "power is not good",
            });
        }

        let temperature = self.read_temperature();
        if temperature > TEMPERATURE_LIMIT {
            return Err(ModuleError::OverTemperature {
                temperature,
                limit: TEMPERATURE_LIMIT,
            });
        }

        // One-time warning per transition, independent of the aggregate
        match self.state.transition(pgood) {
            Some(Edge::Fell) => {
                log_warn!("[{}] power is not good", NAME);
            }
            Some(Edge::Rose) => {
                log_warn!("[{}] power is good", NAME);
            }
            None => {}
        }

        if let Some(action) = self.monitor_action {
            action(pgood, temperature);
        }

        self.state.record(pgood, temperature);
        Ok(())
    }

    fn get_readings(&self) -> Readings {
        self.state.readings("PGood")
    }

    fn process_readings(&mut self) {
        self.state.process_readings();
    }

    fn clear_readings(&mut self) {
        self.state.clear_readings();
    }
}
