//! Mock hardware adapters for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO/PWM registers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU16, Ordering};

use wificar::app::events::VehicleEvent;
use wificar::app::ports::{ActuatorPort, EventSink, LightSensorPort, TickerPort};
use wificar::app::service::VehicleService;
use wificar::app::state::DriveDirection;
use wificar::config::VehicleConfig;
use wificar::error::{Result, TimerError};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    DriveLines(DriveDirection),
    MotorDuty(u8),
    SteeringPulse(u16),
    Headlights(bool),
    ReverseLight(bool),
}

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    fn last<T>(&self, pick: impl Fn(&ActuatorCall) -> Option<T>) -> Option<T> {
        self.calls.iter().rev().find_map(pick)
    }

    pub fn motor_duty(&self) -> Option<u8> {
        self.last(|c| match c {
            ActuatorCall::MotorDuty(d) => Some(*d),
            _ => None,
        })
    }

    pub fn drive_lines(&self) -> Option<DriveDirection> {
        self.last(|c| match c {
            ActuatorCall::DriveLines(d) => Some(*d),
            _ => None,
        })
    }

    pub fn steering_pulse(&self) -> Option<u16> {
        self.last(|c| match c {
            ActuatorCall::SteeringPulse(p) => Some(*p),
            _ => None,
        })
    }

    pub fn headlights(&self) -> bool {
        self.last(|c| match c {
            ActuatorCall::Headlights(on) => Some(*on),
            _ => None,
        })
        .unwrap_or(false)
    }

    pub fn reverse_light(&self) -> bool {
        self.last(|c| match c {
            ActuatorCall::ReverseLight(on) => Some(*on),
            _ => None,
        })
        .unwrap_or(false)
    }

    pub fn headlight_writes(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ActuatorCall::Headlights(_)))
            .count()
    }
}

impl ActuatorPort for MockHardware {
    fn set_drive_lines(&mut self, direction: DriveDirection) {
        self.calls.push(ActuatorCall::DriveLines(direction));
    }
    fn set_motor_duty(&mut self, duty: u8) {
        self.calls.push(ActuatorCall::MotorDuty(duty));
    }
    fn set_steering_pulse(&mut self, pulse_us: u16) {
        self.calls.push(ActuatorCall::SteeringPulse(pulse_us));
    }
    fn set_headlights(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Headlights(on));
    }
    fn set_reverse_light(&mut self, on: bool) {
        self.calls.push(ActuatorCall::ReverseLight(on));
    }
}

// ── MockSensor ────────────────────────────────────────────────

/// Ambient sensor whose reading is set through a shared handle.
#[derive(Clone, Default)]
pub struct MockSensor(pub Arc<AtomicU16>);

#[allow(dead_code)]
impl MockSensor {
    pub fn set(&self, raw: u16) {
        self.0.store(raw, Ordering::Relaxed);
    }
}

impl LightSensorPort for MockSensor {
    fn read_ambient(&mut self) -> u16 {
        self.0.load(Ordering::Relaxed)
    }
}

// ── MockTicker ────────────────────────────────────────────────

#[derive(Default)]
pub struct MockTicker {
    pub attaches: u32,
    pub detaches: u32,
    pub interval_ms: Option<u32>,
    /// Simulate an esp_timer that refuses to start.
    pub fail_attach: bool,
}

impl TickerPort for MockTicker {
    fn attach(&mut self, interval_ms: u32) -> Result<()> {
        if self.fail_attach {
            return Err(TimerError::StartFailed(-1).into());
        }
        self.attaches += 1;
        self.interval_ms = Some(interval_ms);
        Ok(())
    }
    fn detach(&mut self) {
        self.detaches += 1;
        self.interval_ms = None;
    }
}

// ── LogSink ───────────────────────────────────────────────────

#[derive(Default)]
pub struct LogSink {
    pub events: Vec<VehicleEvent>,
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &VehicleEvent) {
        self.events.push(*event);
    }
}

// ── Fixture ───────────────────────────────────────────────────

pub type MockService = VehicleService<MockHardware, MockSensor, MockTicker>;

/// Started service plus a handle for injecting ambient readings.
pub fn make_vehicle() -> (MockService, MockSensor, LogSink) {
    make_vehicle_with(MockTicker::default())
}

pub fn make_vehicle_with(ticker: MockTicker) -> (MockService, MockSensor, LogSink) {
    let sensor = MockSensor::default();
    let mut svc = VehicleService::new(
        &VehicleConfig::default(),
        MockHardware::new(),
        sensor.clone(),
        ticker,
    );
    let mut sink = LogSink::default();
    svc.start(&mut sink);
    (svc, sensor, sink)
}
