//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing one structured line per
//! [`VehicleEvent`] to the ESP-IDF logger (UART in production).

use log::{debug, info};

use crate::app::events::VehicleEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`VehicleEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &VehicleEvent) {
        match event {
            VehicleEvent::Started(s) => {
                info!(
                    "START | drive={:?} speed={} steer={:?} lights={:?}",
                    s.drive_direction, s.speed, s.steering, s.headlight_mode
                );
            }
            VehicleEvent::DriveChanged { direction, duty } => {
                info!("DRIVE | {:?} duty={}", direction, duty);
            }
            VehicleEvent::SpeedChanged { speed, applied } => {
                info!(
                    "DRIVE | speed={} {}",
                    speed,
                    if *applied { "(applied)" } else { "(stored)" }
                );
            }
            VehicleEvent::SteeringChanged { position, pulse_us } => {
                info!("STEER | {:?} {}us", position, pulse_us);
            }
            VehicleEvent::HeadlightModeChanged(mode) => {
                info!("LIGHT | mode={:?}", mode);
            }
            VehicleEvent::HeadlightDecision { sample, on } => {
                debug!("LIGHT | ldr={} -> {}", sample, if *on { "on" } else { "off" });
            }
        }
    }
}
