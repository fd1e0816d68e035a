//! Vehicle service: the hexagonal core.
//!
//! [`VehicleService`] owns the actuator controller, the automatic
//! headlight scheduler and the ambient light sensor.  It is the unit of
//! mutual exclusion: the binary wraps one instance in a mutex shared by the
//! HTTP handler task and the main loop, so command handling and light
//! sampling never interleave inside a state transition.
//!
//! ```text
//!  HTTP router ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                  │        VehicleService         │
//!   light tick ──▶ │ Controller · LightScheduler   │ ──▶ ActuatorPort
//!                  └──────────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::VehicleConfig;

use super::commands::VehicleCommand;
use super::controller::ActuatorController;
use super::events::VehicleEvent;
use super::lights::LightAutomationScheduler;
use super::ports::{ActuatorPort, EventSink, LightSensorPort, TickerPort};
use super::state::{ActuatorState, DriveDirection, HeadlightMode};

// ───────────────────────────────────────────────────────────────
// VehicleService
// ───────────────────────────────────────────────────────────────

pub struct VehicleService<A, S, T>
where
    A: ActuatorPort,
    S: LightSensorPort,
    T: TickerPort,
{
    controller: ActuatorController<A>,
    lights: LightAutomationScheduler<T>,
    sensor: S,
    commands_handled: u64,
}

impl<A, S, T> VehicleService<A, S, T>
where
    A: ActuatorPort,
    S: LightSensorPort,
    T: TickerPort,
{
    /// Construct the service.  Does **not** touch the hardware; call
    /// [`start`](Self::start) next.
    pub fn new(config: &VehicleConfig, actuators: A, sensor: S, ticker: T) -> Self {
        Self {
            controller: ActuatorController::new(actuators, config),
            lights: LightAutomationScheduler::new(ticker, config.light_sample_interval_ms),
            sensor,
            commands_handled: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Assert the boot state on every output.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.controller.assert_initial_outputs();
        let state = self.controller.state();
        sink.emit(&VehicleEvent::Started(state));
        info!("VehicleService started: {:?}", state);
    }

    // ── Command handling ──────────────────────────────────────

    /// Execute one external command and return its acknowledgment text.
    pub fn handle_command(&mut self, cmd: VehicleCommand, sink: &mut impl EventSink) -> String {
        self.commands_handled += 1;

        match cmd {
            VehicleCommand::DriveForward => {
                self.controller.drive_forward();
                self.emit_drive(sink);
                "forward".into()
            }
            VehicleCommand::DriveReverse => {
                self.controller.drive_reverse();
                self.emit_drive(sink);
                "back".into()
            }
            VehicleCommand::DriveStop => {
                self.controller.drive_stop();
                self.emit_drive(sink);
                "driveStop".into()
            }
            VehicleCommand::SteerLeft => {
                let pulse_us = self.controller.steer_left();
                self.emit_steer(pulse_us, sink);
                "left".into()
            }
            VehicleCommand::SteerRight => {
                let pulse_us = self.controller.steer_right();
                self.emit_steer(pulse_us, sink);
                "right".into()
            }
            VehicleCommand::SteerCenter => {
                let pulse_us = self.controller.steer_center();
                self.emit_steer(pulse_us, sink);
                "steerStop".into()
            }
            VehicleCommand::Headlights(mode) => {
                if let Err(e) = self.controller.set_headlights(mode, &mut self.lights) {
                    warn!("headlights: {:?} refused: {}", mode, e);
                    return format!("headlights unchanged ({})", e);
                }
                sink.emit(&VehicleEvent::HeadlightModeChanged(mode));
                match mode {
                    HeadlightMode::On => "headlights on".into(),
                    HeadlightMode::Off => "headlights off".into(),
                    HeadlightMode::Auto => "headlights automatic".into(),
                }
            }
            VehicleCommand::SetSpeed(requested) => {
                let applied = self.controller.set_speed(requested);
                let speed = self.controller.state().speed;
                sink.emit(&VehicleEvent::SpeedChanged { speed, applied });
                format!("speed limited to {}", speed)
            }
        }
    }

    /// Handle one firing of the ambient light ticker.
    ///
    /// Returns the headlight output written, or `None` if automatic mode was
    /// switched off before this tick was processed.
    pub fn on_light_tick(&mut self, sink: &mut impl EventSink) -> Option<bool> {
        let (sample, on) = self.lights.fire(&mut self.sensor, &mut self.controller)?;
        sink.emit(&VehicleEvent::HeadlightDecision { sample, on });
        Some(on)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> ActuatorState {
        self.controller.state()
    }

    /// Physical headlight output level.
    pub fn headlights_lit(&self) -> bool {
        self.controller.headlight_output()
    }

    pub fn light_automation_enabled(&self) -> bool {
        self.lights.is_enabled()
    }

    /// Ticks that produced a headlight decision since boot.
    pub fn light_ticks(&self) -> u64 {
        self.lights.fired_count()
    }

    pub fn commands_handled(&self) -> u64 {
        self.commands_handled
    }

    pub fn actuators(&self) -> &A {
        self.controller.hardware()
    }

    pub fn ticker(&self) -> &T {
        self.lights.ticker()
    }

    // ── Internal ──────────────────────────────────────────────

    fn emit_drive(&self, sink: &mut impl EventSink) {
        let state = self.controller.state();
        let duty = match state.drive_direction {
            DriveDirection::Stopped => 0,
            _ => state.speed,
        };
        sink.emit(&VehicleEvent::DriveChanged {
            direction: state.drive_direction,
            duty,
        });
    }

    fn emit_steer(&self, pulse_us: u16, sink: &mut impl EventSink) {
        sink.emit(&VehicleEvent::SteeringChanged {
            position: self.controller.state().steering,
            pulse_us,
        });
    }
}
