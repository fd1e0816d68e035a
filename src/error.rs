//! Unified error types for the WifiCar firmware.
//!
//! Commands and light ticks never fail, with one exception: automatic
//! headlights need the sampling timer, and arming it can be refused.
//! Otherwise errors only arise at the hardware edge (peripheral bring-up,
//! LEDC/GPIO writes, ADC reads) and in connectivity.  Bring-up failures
//! convert into [`Error`]; the binary turns it into `anyhow::Error` with `?`.
//! Actuator and sensor faults are absorbed by the adapters, so they have
//! their own types and no top-level variant.

use core::fmt;

pub use crate::drivers::hw_init::HwInitError;
pub use crate::drivers::hw_timer::TimerError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// The light-sampling timer could not be created or armed.
    Timer(TimerError),
    /// Wi-Fi or HTTP bring-up failed.
    Comms(ConnectivityError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Timer(e) => write!(f, "timer: {e}"),
            Self::Comms(e) => write!(f, "comms: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

impl From<TimerError> for Error {
    fn from(e: TimerError) -> Self {
        Self::Timer(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// LEDC duty write failed (rc from ESP-IDF).
    PwmWriteFailed(i32),
    /// GPIO level write failed (rc from ESP-IDF).
    GpioWriteFailed(i32),
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed(rc) => write!(f, "PWM write failed (rc={rc})"),
            Self::GpioWriteFailed(rc) => write!(f, "GPIO write failed (rc={rc})"),
        }
    }
}

impl std::error::Error for ActuatorError {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// ADC oneshot read returned an error.
    AdcReadFailed(i32),
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcReadFailed(rc) => write!(f, "ADC read failed (rc={rc})"),
        }
    }
}

impl std::error::Error for SensorError {}

// ---------------------------------------------------------------------------
// Connectivity errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityError {
    /// No SSID was baked in at build time.
    MissingCredentials,
    /// Driver-level Wi-Fi setup failed.
    WifiSetupFailed,
    /// A single association attempt failed.
    WifiConnectFailed,
    /// A bounded retry policy ran out of attempts.
    RetriesExhausted { attempts: u32 },
    /// The HTTP server could not be started or a handler not registered.
    HttpServerFailed,
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredentials => write!(f, "WIFI_SSID not set at build time"),
            Self::WifiSetupFailed => write!(f, "WiFi setup failed"),
            Self::WifiConnectFailed => write!(f, "WiFi connect failed"),
            Self::RetriesExhausted { attempts } => {
                write!(f, "WiFi not connected after {attempts} attempts")
            }
            Self::HttpServerFailed => write!(f, "HTTP server start failed"),
        }
    }
}

impl std::error::Error for ConnectivityError {}

impl From<ConnectivityError> for Error {
    fn from(e: ConnectivityError) -> Self {
        Self::Comms(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
