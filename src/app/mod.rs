//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the rules for driving the vehicle: speed
//! governance, the actuator state machine, and automatic headlights.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod controller;
pub mod events;
pub mod governor;
pub mod lights;
pub mod ports;
pub mod service;
pub mod state;
