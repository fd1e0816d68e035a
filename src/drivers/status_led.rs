//! Built-in link indicator LED.
//!
//! Off while the station is associating, on once Wi-Fi is up.

use log::warn;

use crate::drivers::lamps::Lamp;
use crate::pins;

pub struct StatusLed {
    led: Lamp,
}

impl Default for StatusLed {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusLed {
    pub const fn new() -> Self {
        Self {
            led: Lamp::new(pins::LED_BUILTIN_GPIO),
        }
    }

    /// Reflect link state.  A failed write only loses the indication.
    pub fn set_linked(&mut self, linked: bool) {
        if let Err(e) = self.led.set(linked) {
            warn!("status LED: {}", e);
        }
    }

    pub fn is_lit(&self) -> bool {
        self.led.is_on()
    }
}
