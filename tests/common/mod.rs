//! Shared hardware doubles for integration tests
//!
//! Pins and analog inputs are moved into the module under test, so the
//! doubles share their state through `Rc<Cell<_>>` handles the test body
//! keeps a clone of.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use slotguard::{Actuator, AnalogInput, DigitalPin};

/// How a pin double is currently driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinDrive {
    Input,
    Low,
    High,
}

/// Digital pin double whose state is visible to the test body.
#[derive(Clone)]
pub struct SharedPin {
    drive: Rc<Cell<PinDrive>>,
    /// Level applied externally, seen while the pin is an input.
    level: Rc<Cell<bool>>,
}

impl SharedPin {
    pub fn new() -> Self {
        Self {
            drive: Rc::new(Cell::new(PinDrive::Input)),
            level: Rc::new(Cell::new(false)),
        }
    }

    pub fn drive(&self) -> PinDrive {
        self.drive.get()
    }

    pub fn set_level(&self, high: bool) {
        self.level.set(high);
    }
}

impl DigitalPin for SharedPin {
    fn set_output(&mut self, high: bool) {
        self.drive.set(if high { PinDrive::High } else { PinDrive::Low });
    }

    fn set_input(&mut self) {
        self.drive.set(PinDrive::Input);
    }

    fn read(&mut self) -> bool {
        match self.drive.get() {
            PinDrive::Input => self.level.get(),
            PinDrive::High => true,
            PinDrive::Low => false,
        }
    }
}

/// Analog input double with an externally settable value.
#[derive(Clone)]
pub struct SharedAdc(Rc<Cell<f32>>);

impl SharedAdc {
    pub fn new(value: f32) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    pub fn set(&self, value: f32) {
        self.0.set(value);
    }
}

impl AnalogInput for SharedAdc {
    fn read_raw(&mut self) -> f32 {
        self.0.get()
    }
}

/// Actuator double counting disable calls.
#[derive(Clone)]
pub struct SharedActuator {
    disables: Rc<Cell<u32>>,
}

impl SharedActuator {
    pub fn new() -> Self {
        Self {
            disables: Rc::new(Cell::new(0)),
        }
    }

    pub fn disables(&self) -> u32 {
        self.disables.get()
    }
}

impl Actuator for SharedActuator {
    fn disable(&mut self) {
        self.disables.set(self.disables.get() + 1);
    }
}

/// Conversion double: the test feeds degrees Celsius straight through the
/// analog double.
pub fn identity_celsius(raw: f32) -> f32 {
    raw
}
