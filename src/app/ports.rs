//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ VehicleService (domain)
//! ```
//!
//! Driven adapters (actuators, the light sensor, the periodic ticker, event
//! sinks) implement these traits.  The [`VehicleService`](super::service::VehicleService)
//! consumes them via generics, so the domain core never touches hardware
//! directly and every operation can be exercised against mocks.

use crate::error::Result;

use super::events::VehicleEvent;
use super::state::DriveDirection;

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
///
/// Every call is fire-and-forget; hardware writes cannot be refused.
pub trait ActuatorPort {
    /// Set the H-bridge direction lines.  `Stopped` deasserts both.
    fn set_drive_lines(&mut self, direction: DriveDirection);

    /// Set the motor enable PWM duty (0 – 255).
    fn set_motor_duty(&mut self, duty: u8);

    /// Command the steering servo to a pulse width in microseconds.
    fn set_steering_pulse(&mut self, pulse_us: u16);

    /// Assert or deassert the headlight output.
    fn set_headlights(&mut self, on: bool);

    /// Assert or deassert the reverse-light output.
    fn set_reverse_light(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the ambient light sensor.
pub trait LightSensorPort {
    /// Raw ambient intensity sample (12-bit ADC counts on the ESP32).
    fn read_ambient(&mut self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Ticker port (driven adapter: domain → periodic timer)
// ───────────────────────────────────────────────────────────────

/// Periodic-callback scheduling primitive.
///
/// The callback itself is wired by the adapter; the domain only decides
/// when it is attached.  A firing that was already queued when `detach()`
/// returns may still arrive; the light scheduler drops it.
pub trait TickerPort {
    /// Start firing every `interval_ms`.  On error nothing is scheduled.
    fn attach(&mut self, interval_ms: u32) -> Result<()>;

    /// Stop firing.
    fn detach(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`VehicleEvent`]s through this port.
/// Adapters decide where they go (serial log, test recorder, …).
pub trait EventSink {
    fn emit(&mut self, event: &VehicleEvent);
}
