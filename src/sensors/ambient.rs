//! Photoresistor (LDR) ambient light sensor.
//!
//! The LDR sits in a divider on GPIO 35 (ADC1 channel 7).  Counts are
//! 12-bit (0-4095) and rise as the scene gets darker.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

use log::warn;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::error::SensorError;

/// Full-scale 12-bit reading.
pub const ADC_MAX: u16 = 4095;

#[cfg(not(target_os = "espidf"))]
static SIM_LDR_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_ambient_adc(raw: u16) {
    SIM_LDR_ADC.store(raw.min(ADC_MAX), Ordering::Relaxed);
}

pub struct AmbientLightSensor {
    last_good: u16,
    reads: u64,
    failures: u32,
}

impl Default for AmbientLightSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl AmbientLightSensor {
    pub fn new() -> Self {
        Self {
            last_good: 0,
            reads: 0,
            failures: 0,
        }
    }

    /// Take one sample.  A failed conversion is logged and the previous good
    /// value returned so one glitch cannot flip the headlights.
    pub fn read(&mut self) -> u16 {
        self.reads = self.reads.saturating_add(1);
        match self.read_adc() {
            Ok(raw) => {
                self.last_good = raw;
                raw
            }
            Err(e) => {
                self.failures = self.failures.saturating_add(1);
                warn!("ambient: {} (using last good {})", e, self.last_good);
                self.last_good
            }
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<u16, SensorError> {
        hw_init::adc1_read(hw_init::ADC1_CH_LDR)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<u16, SensorError> {
        Ok(SIM_LDR_ADC.load(Ordering::Relaxed))
    }

    pub fn last_sample(&self) -> u16 {
        self.last_good
    }

    pub fn reads(&self) -> u64 {
        self.reads
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_injected_value() {
        sim_set_ambient_adc(3700);
        let mut s = AmbientLightSensor::new();
        assert_eq!(s.read(), 3700);
        assert_eq!(s.last_sample(), 3700);
        assert_eq!(s.reads(), 1);
        assert_eq!(s.failures(), 0);
        sim_set_ambient_adc(9999);
        assert_eq!(s.read(), ADC_MAX);
    }
}
