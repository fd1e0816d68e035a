//! Steering servo on LEDC channel 1 (50 Hz, 14-bit).
//!
//! The controller hands over a pulse width in microseconds; this driver
//! converts it to a duty count for the 20 ms servo frame.

use crate::drivers::hw_init;
use crate::error::ActuatorError;
use crate::pins;

/// One servo frame at 50 Hz.
pub const PERIOD_US: u32 = 1_000_000 / pins::SERVO_PWM_FREQ_HZ;
const MAX_DUTY: u32 = (1 << pins::SERVO_PWM_RESOLUTION_BITS) - 1;

/// Duty count that produces `pulse_us` high time per frame.
pub const fn pulse_to_duty(pulse_us: u16) -> u32 {
    let pulse = if (pulse_us as u32) > PERIOD_US { PERIOD_US } else { pulse_us as u32 };
    pulse * MAX_DUTY / PERIOD_US
}

pub struct SteeringServo {
    pulse_us: Option<u16>,
}

impl Default for SteeringServo {
    fn default() -> Self {
        Self::new()
    }
}

impl SteeringServo {
    pub fn new() -> Self {
        Self { pulse_us: None }
    }

    pub fn set_pulse(&mut self, pulse_us: u16) -> Result<(), ActuatorError> {
        hw_init::ledc_set(hw_init::LEDC_CH_SERVO, pulse_to_duty(pulse_us))?;
        self.pulse_us = Some(pulse_us);
        Ok(())
    }

    /// Last pulse written, `None` before the first write.
    pub fn pulse_us(&self) -> Option<u16> {
        self.pulse_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_is_20ms() {
        assert_eq!(PERIOD_US, 20_000);
    }

    #[test]
    fn steering_pulses_to_duty() {
        // 16383 * p / 20000
        assert_eq!(pulse_to_duty(1000), 819);
        assert_eq!(pulse_to_duty(1500), 1228);
        assert_eq!(pulse_to_duty(2000), 1638);
    }

    #[test]
    fn pulse_longer_than_frame_saturates() {
        assert_eq!(pulse_to_duty(u16::MAX), MAX_DUTY);
    }

    #[test]
    fn remembers_last_pulse() {
        let mut s = SteeringServo::new();
        assert_eq!(s.pulse_us(), None);
        s.set_pulse(1500).unwrap();
        assert_eq!(s.pulse_us(), Some(1500));
    }
}
