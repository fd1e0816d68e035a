//! Outbound vehicle events.
//!
//! The [`VehicleService`](super::service::VehicleService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use super::state::{ActuatorState, DriveDirection, HeadlightMode, SteeringPosition};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleEvent {
    /// The service has asserted its boot state on the hardware.
    Started(ActuatorState),

    /// Drive direction changed or was re-applied.
    DriveChanged { direction: DriveDirection, duty: u8 },

    /// A new governed speed was stored.
    SpeedChanged { speed: u8, applied: bool },

    /// Steering moved to a discrete position.
    SteeringChanged { position: SteeringPosition, pulse_us: u16 },

    /// Headlight mode changed (or was re-selected).
    HeadlightModeChanged(HeadlightMode),

    /// The ambient light task drove the headlight output.
    HeadlightDecision { sample: u16, on: bool },
}
