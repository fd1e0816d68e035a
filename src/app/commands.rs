//! Inbound commands to the vehicle service.
//!
//! These represent actions requested by the outside world (the HTTP command
//! surface, today) that the [`VehicleService`](super::service::VehicleService)
//! interprets and acts upon.

use super::state::HeadlightMode;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleCommand {
    DriveForward,
    DriveReverse,
    DriveStop,

    SteerLeft,
    SteerRight,
    SteerCenter,

    /// Select a headlight mode (`Auto` starts the ambient light task).
    Headlights(HeadlightMode),

    /// Requested speed before governing.
    SetSpeed(i64),
}
