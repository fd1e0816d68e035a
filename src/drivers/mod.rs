//! Actuator drivers, hardware initialisation, and peripheral helpers.

pub mod hw_init;
pub mod hw_timer;
pub mod lamps;
pub mod motor;
pub mod status_led;
pub mod steering;
pub mod watchdog;
