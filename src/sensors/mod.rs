//! Sensor drivers.

pub mod ambient;
