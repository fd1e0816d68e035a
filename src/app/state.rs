//! Actuator state: the authoritative record of what the vehicle is doing.
//!
//! Only [`ActuatorController`](super::controller::ActuatorController) holds
//! a mutable [`ActuatorState`]; everything else sees copies.

use serde::Serialize;

/// Drive motor direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DriveDirection {
    Forward,
    Reverse,
    Stopped,
}

/// Discrete steering positions.  There is no continuous steering angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SteeringPosition {
    Left,
    Center,
    Right,
}

/// Headlight operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeadlightMode {
    On,
    Off,
    /// Driven by the ambient light sampling task.
    Auto,
}

/// Point-in-time actuator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActuatorState {
    pub drive_direction: DriveDirection,
    /// Governed speed, always within `0..=SPEED_MAX`.
    pub speed: u8,
    pub steering: SteeringPosition,
    pub headlight_mode: HeadlightMode,
    /// Mirrors `drive_direction == Reverse`.
    pub reverse_light_on: bool,
}

impl ActuatorState {
    /// Boot state: stopped, centred, all lights off.
    pub const fn initial(speed: u8) -> Self {
        Self {
            drive_direction: DriveDirection::Stopped,
            speed,
            steering: SteeringPosition::Center,
            headlight_mode: HeadlightMode::Off,
            reverse_light_on: false,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.drive_direction != DriveDirection::Stopped
    }
}

impl Default for ActuatorState {
    fn default() -> Self {
        Self::initial(0)
    }
}
