//! Headlight and reverse-light outputs.
//!
//! Both lamp circuits are plain active-HIGH GPIOs.  The driver mirrors the
//! last level written so the adapter can report it without a register read.

use crate::drivers::hw_init;
use crate::error::ActuatorError;

pub struct Lamp {
    gpio: i32,
    on: bool,
}

impl Lamp {
    pub const fn new(gpio: i32) -> Self {
        Self { gpio, on: false }
    }

    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        hw_init::gpio_write(self.gpio, on)?;
        self.on = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}
