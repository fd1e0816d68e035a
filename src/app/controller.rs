//! Actuator controller: the only writer of [`ActuatorState`].
//!
//! Translates intent-level operations (drive, steer, speed, headlights)
//! into [`ActuatorPort`] calls and keeps the state invariants:
//!
//! - the reverse light is on exactly while driving in reverse;
//! - the stored speed is always the governed value;
//! - steering only ever takes one of the three calibrated pulse widths;
//! - `HeadlightMode::Auto` exactly while the light scheduler is enabled.

use log::{debug, info};

use crate::config::{SteeringCalibration, VehicleConfig};
use crate::error::Result;

use super::governor::SpeedGovernor;
use super::lights::LightAutomationScheduler;
use super::ports::{ActuatorPort, TickerPort};
use super::state::{ActuatorState, DriveDirection, HeadlightMode, SteeringPosition};

pub struct ActuatorController<A: ActuatorPort> {
    hw: A,
    state: ActuatorState,
    steering: SteeringCalibration,
    light_threshold: u16,
    /// Physical headlight output level (may differ from mode while in Auto).
    headlight_output: bool,
}

impl<A: ActuatorPort> ActuatorController<A> {
    pub fn new(hw: A, config: &VehicleConfig) -> Self {
        Self {
            hw,
            state: ActuatorState::initial(SpeedGovernor::clamp(config.initial_speed as i64)),
            steering: config.steering,
            light_threshold: config.light_threshold,
            headlight_output: false,
        }
    }

    /// Drive every output to match the boot state.
    pub fn assert_initial_outputs(&mut self) {
        self.hw.set_drive_lines(DriveDirection::Stopped);
        self.hw.set_motor_duty(0);
        self.hw.set_reverse_light(false);
        self.hw.set_headlights(false);
        self.headlight_output = false;
        self.hw.set_steering_pulse(self.pulse_for(self.state.steering));
    }

    // ── Drive ─────────────────────────────────────────────────

    pub fn drive_forward(&mut self) {
        self.engage(DriveDirection::Forward);
    }

    pub fn drive_reverse(&mut self) {
        self.engage(DriveDirection::Reverse);
    }

    /// Stop the motor.  The stored speed is kept for the next drive command.
    pub fn drive_stop(&mut self) {
        self.state.drive_direction = DriveDirection::Stopped;
        self.hw.set_drive_lines(DriveDirection::Stopped);
        self.hw.set_motor_duty(0);
        self.set_reverse_light(false);
        info!("drive: stop");
    }

    fn engage(&mut self, direction: DriveDirection) {
        self.state.drive_direction = direction;
        self.hw.set_drive_lines(direction);
        self.hw.set_motor_duty(self.state.speed);
        self.set_reverse_light(direction == DriveDirection::Reverse);
        info!("drive: {:?} @ {}", direction, self.state.speed);
    }

    fn set_reverse_light(&mut self, on: bool) {
        self.state.reverse_light_on = on;
        self.hw.set_reverse_light(on);
    }

    // ── Speed ─────────────────────────────────────────────────

    /// Govern and store a new speed.  Returns `true` if the motor output was
    /// updated immediately (vehicle already moving).
    pub fn set_speed(&mut self, requested: i64) -> bool {
        self.state.speed = SpeedGovernor::clamp(requested);
        let moving = self.state.is_moving();
        if moving {
            self.hw.set_motor_duty(self.state.speed);
        }
        info!("speed: requested {} -> {} (applied={})", requested, self.state.speed, moving);
        moving
    }

    // ── Steering ──────────────────────────────────────────────

    pub fn steer_left(&mut self) -> u16 {
        self.steer(SteeringPosition::Left)
    }

    pub fn steer_right(&mut self) -> u16 {
        self.steer(SteeringPosition::Right)
    }

    pub fn steer_center(&mut self) -> u16 {
        self.steer(SteeringPosition::Center)
    }

    fn steer(&mut self, position: SteeringPosition) -> u16 {
        let pulse_us = self.pulse_for(position);
        self.state.steering = position;
        self.hw.set_steering_pulse(pulse_us);
        info!("steer: {:?} ({}us)", position, pulse_us);
        pulse_us
    }

    fn pulse_for(&self, position: SteeringPosition) -> u16 {
        match position {
            SteeringPosition::Left => self.steering.left_pulse_us(),
            SteeringPosition::Center => self.steering.center_pulse_us(),
            SteeringPosition::Right => self.steering.right_pulse_us(),
        }
    }

    // ── Headlights ────────────────────────────────────────────

    /// Select a headlight mode, starting or stopping the ambient light task.
    ///
    /// If the light task cannot be started the previous mode and outputs
    /// are kept.
    pub fn set_headlights<T: TickerPort>(
        &mut self,
        mode: HeadlightMode,
        lights: &mut LightAutomationScheduler<T>,
    ) -> Result<()> {
        match mode {
            HeadlightMode::Auto => {
                lights.enable()?;
            }
            HeadlightMode::On | HeadlightMode::Off => {
                lights.disable();
                let on = mode == HeadlightMode::On;
                self.hw.set_headlights(on);
                self.headlight_output = on;
            }
        }
        self.state.headlight_mode = mode;
        info!("headlights: {:?}", mode);
        Ok(())
    }

    /// Drive the headlight output from an ambient sample.
    ///
    /// Below the threshold the environment is bright and the lamps go off;
    /// at or above it they come on.  The mode is never changed.  Returns the
    /// output level written, or `None` when not in `Auto`.
    pub fn apply_headlight_decision(&mut self, sample: u16) -> Option<bool> {
        if self.state.headlight_mode != HeadlightMode::Auto {
            return None;
        }
        let dark = sample >= self.light_threshold;
        self.hw.set_headlights(dark);
        self.headlight_output = dark;
        debug!(
            "headlights(auto): sample={} -> {}",
            sample,
            if dark { "dark, on" } else { "bright, off" }
        );
        Some(dark)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> ActuatorState {
        self.state
    }

    /// Physical headlight output level.
    pub fn headlight_output(&self) -> bool {
        self.headlight_output
    }

    pub fn hardware(&self) -> &A {
        &self.hw
    }
}
