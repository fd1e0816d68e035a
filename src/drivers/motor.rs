//! Drive motor driver (L298N H-bridge, channel B).
//!
//! Two digital direction lines (IN3/IN4) select forward, reverse or coast;
//! the enable line (ENB) carries an 8-bit LEDC PWM whose duty is the speed.
//!
//! | IN3 | IN4 | motor   |
//! |-----|-----|---------|
//! |  H  |  L  | forward |
//! |  L  |  H  | reverse |
//! |  L  |  L  | coast   |
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real GPIO and LEDC via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::error::ActuatorError;
use crate::pins;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
    /// Both lines low: no drive torque.
    Coast,
}

impl Direction {
    /// `(IN3, IN4)` levels.
    pub const fn lines(self) -> (bool, bool) {
        match self {
            Self::Forward => (true, false),
            Self::Reverse => (false, true),
            Self::Coast => (false, false),
        }
    }
}

pub struct MotorDriver {
    direction: Direction,
    duty: u8,
}

impl Default for MotorDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MotorDriver {
    pub fn new() -> Self {
        Self {
            direction: Direction::Coast,
            duty: 0,
        }
    }

    /// Set the direction lines.  Never both high.
    pub fn set_direction(&mut self, direction: Direction) -> Result<(), ActuatorError> {
        let (in3, in4) = direction.lines();
        // Drop the active line first so IN3/IN4 never overlap.
        if in3 {
            hw_init::gpio_write(pins::MOTOR_IN4_GPIO, in4)?;
            hw_init::gpio_write(pins::MOTOR_IN3_GPIO, in3)?;
        } else {
            hw_init::gpio_write(pins::MOTOR_IN3_GPIO, in3)?;
            hw_init::gpio_write(pins::MOTOR_IN4_GPIO, in4)?;
        }
        self.direction = direction;
        Ok(())
    }

    /// Write the enable-line duty (0-255).
    pub fn set_duty(&mut self, duty: u8) -> Result<(), ActuatorError> {
        hw_init::ledc_set(hw_init::LEDC_CH_MOTOR, u32::from(duty))?;
        self.duty = duty;
        Ok(())
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn duty(&self) -> u8 {
        self.duty
    }

    pub fn is_driving(&self) -> bool {
        self.direction != Direction::Coast && self.duty > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_never_both_high() {
        for d in [Direction::Forward, Direction::Reverse, Direction::Coast] {
            assert_ne!(d.lines(), (true, true));
        }
    }

    #[test]
    fn tracks_state() {
        let mut m = MotorDriver::new();
        assert!(!m.is_driving());
        m.set_direction(Direction::Reverse).unwrap();
        m.set_duty(180).unwrap();
        assert_eq!(m.direction(), Direction::Reverse);
        assert_eq!(m.duty(), 180);
        assert!(m.is_driving());
        m.set_direction(Direction::Coast).unwrap();
        assert!(!m.is_driving());
    }
}
