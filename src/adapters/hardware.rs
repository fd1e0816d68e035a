//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the motor, servo and lamp drivers and exposes them through
//! [`ActuatorPort`]; the ambient sensor implements [`LightSensorPort`]
//! directly.  This is the only module in the system that touches actual
//! hardware.  On non-espidf targets, the underlying drivers use cfg-gated
//! simulation stubs.
//!
//! Ports are infallible.  A failed register write is logged, counted and
//! otherwise ignored; the domain state stays authoritative and the next
//! command re-asserts the output.

use log::warn;

use crate::app::ports::{ActuatorPort, LightSensorPort};
use crate::app::state::DriveDirection;
use crate::drivers::lamps::Lamp;
use crate::drivers::motor::{Direction, MotorDriver};
use crate::drivers::steering::SteeringServo;
use crate::error::ActuatorError;
use crate::pins;
use crate::sensors::ambient::AmbientLightSensor;

/// Concrete adapter that combines all actuators behind [`ActuatorPort`].
pub struct HardwareAdapter {
    motor: MotorDriver,
    servo: SteeringServo,
    headlights: Lamp,
    reverse_light: Lamp,
    write_faults: u32,
}

impl Default for HardwareAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl HardwareAdapter {
    pub fn new() -> Self {
        Self {
            motor: MotorDriver::new(),
            servo: SteeringServo::new(),
            headlights: Lamp::new(pins::HEADLIGHTS_GPIO),
            reverse_light: Lamp::new(pins::REVERSE_LIGHTS_GPIO),
            write_faults: 0,
        }
    }

    /// Output writes that failed since boot.
    pub fn write_faults(&self) -> u32 {
        self.write_faults
    }

    pub fn motor(&self) -> &MotorDriver {
        &self.motor
    }

    pub fn servo(&self) -> &SteeringServo {
        &self.servo
    }

    fn record(&mut self, what: &str, result: Result<(), ActuatorError>) {
        if let Err(e) = result {
            self.write_faults = self.write_faults.saturating_add(1);
            warn!("hw: {} write failed: {}", what, e);
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_drive_lines(&mut self, direction: DriveDirection) {
        let dir = match direction {
            DriveDirection::Forward => Direction::Forward,
            DriveDirection::Reverse => Direction::Reverse,
            DriveDirection::Stopped => Direction::Coast,
        };
        let r = self.motor.set_direction(dir);
        self.record("motor lines", r);
    }

    fn set_motor_duty(&mut self, duty: u8) {
        let r = self.motor.set_duty(duty);
        self.record("motor duty", r);
    }

    fn set_steering_pulse(&mut self, pulse_us: u16) {
        let r = self.servo.set_pulse(pulse_us);
        self.record("servo", r);
    }

    fn set_headlights(&mut self, on: bool) {
        let r = self.headlights.set(on);
        self.record("headlights", r);
    }

    fn set_reverse_light(&mut self, on: bool) {
        let r = self.reverse_light.set(on);
        self.record("reverse light", r);
    }
}

// ── LightSensorPort implementation ────────────────────────────

impl LightSensorPort for AmbientLightSensor {
    fn read_ambient(&mut self) -> u16 {
        self.read()
    }
}
