//! Vehicle configuration parameters
//!
//! All tunable constants for the WifiCar firmware in one place.  There is
//! no persisted config: values are fixed at build time and handed to the
//! app core at startup.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Ambient reading at or above which the environment counts as dark.
pub const LIGHT_THRESHOLD: u16 = 3500;

/// Hostname the firmware answers to on the local network.
pub const DEFAULT_HOSTNAME: &str = "WifiCar";

/// Servo calibration: three fixed steering positions inside a pulse range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteeringCalibration {
    /// Servo angle (degrees) for full left lock.
    pub left_deg: u8,
    /// Servo angle (degrees) for straight ahead.
    pub center_deg: u8,
    /// Servo angle (degrees) for full right lock.
    pub right_deg: u8,
    /// Pulse width at 0°.
    pub min_pulse_us: u16,
    /// Pulse width at 180°.
    pub max_pulse_us: u16,
}

impl SteeringCalibration {
    /// Map a servo angle onto the calibrated pulse range.  An empty or
    /// inverted range collapses to `min_pulse_us`.
    pub const fn pulse_width_us(&self, degrees: u8) -> u16 {
        let deg = (if degrees > 180 { 180 } else { degrees }) as u32;
        let span = self.max_pulse_us.saturating_sub(self.min_pulse_us) as u32;
        self.min_pulse_us + (deg * span / 180) as u16
    }

    pub const fn left_pulse_us(&self) -> u16 {
        self.pulse_width_us(self.left_deg)
    }

    pub const fn center_pulse_us(&self) -> u16 {
        self.pulse_width_us(self.center_deg)
    }

    pub const fn right_pulse_us(&self) -> u16 {
        self.pulse_width_us(self.right_deg)
    }
}

impl Default for SteeringCalibration {
    fn default() -> Self {
        Self {
            left_deg: 45,
            center_deg: 90,
            right_deg: 135,
            min_pulse_us: 500,
            max_pulse_us: 2500,
        }
    }
}

/// Core vehicle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleConfig {
    // --- Drive ---
    /// Governed speed held at boot (applied on the first drive command)
    pub initial_speed: u8,

    // --- Steering ---
    pub steering: SteeringCalibration,

    // --- Automatic lighting ---
    /// Ambient sample separating bright (below) from dark (at or above)
    pub light_threshold: u16,
    /// Period of the ambient light sampling task (milliseconds)
    pub light_sample_interval_ms: u32,

    // --- Network ---
    /// mDNS / DHCP hostname
    pub hostname: heapless::String<24>,
    /// HTTP command server port
    pub http_port: u16,
    /// Delay between station connect attempts (milliseconds)
    pub wifi_retry_delay_ms: u32,
    /// Give up after this many attempts (`None` = keep trying forever)
    pub wifi_max_attempts: Option<u32>,

    // --- Timing ---
    /// Main loop sleep between event drains (milliseconds)
    pub main_loop_interval_ms: u32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            // Drive
            initial_speed: 0,

            // Steering
            steering: SteeringCalibration::default(),

            // Lighting
            light_threshold: LIGHT_THRESHOLD,
            light_sample_interval_ms: 1000, // 1 Hz

            // Network
            hostname: heapless::String::try_from(DEFAULT_HOSTNAME).unwrap_or_default(),
            http_port: 80,
            wifi_retry_delay_ms: 400,
            wifi_max_attempts: None,

            // Timing
            main_loop_interval_ms: 100, // 10 Hz
        }
    }
}

impl VehicleConfig {
    /// Reject settings the firmware cannot run with.
    pub fn validate(&self) -> Result<(), Error> {
        let s = &self.steering;
        if s.min_pulse_us >= s.max_pulse_us {
            return Err(Error::Config("servo pulse range is empty"));
        }
        if !(s.left_pulse_us() < s.center_pulse_us() && s.center_pulse_us() < s.right_pulse_us()) {
            return Err(Error::Config("steering calibration must be left < center < right"));
        }
        if self.light_sample_interval_ms == 0 {
            return Err(Error::Config("light sample interval must be non-zero"));
        }
        if self.main_loop_interval_ms == 0
            || self.main_loop_interval_ms >= crate::drivers::watchdog::DEFAULT_TIMEOUT_MS
        {
            return Err(Error::Config("main loop interval must be within the watchdog budget"));
        }
        if self.wifi_max_attempts == Some(0) {
            return Err(Error::Config("wifi_max_attempts must be at least 1"));
        }
        Ok(())
    }
}
