//! Task watchdog for the main loop.
//!
//! The main loop drains timer events and then sleeps; if it ever stalls
//! (e.g. the service lock is never released) the TWDT resets the board,
//! which brings the vehicle back up stopped with the motor off.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::{info, warn};

/// Default stall budget for the main loop.
pub const DEFAULT_TIMEOUT_MS: u32 = 5_000;

pub struct Watchdog {
    timeout_ms: u32,
    subscribed: bool,
    feeds: u64,
}

impl Default for Watchdog {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_MS)
    }
}

impl Watchdog {
    /// Subscribe the calling task to the TWDT.
    pub fn new(timeout_ms: u32) -> Self {
        #[cfg(target_os = "espidf")]
        let subscribed = {
            // SAFETY: TWDT API calls from the task that will feed it.
            unsafe {
                let cfg = esp_task_wdt_config_t {
                    timeout_ms,
                    idle_core_mask: 0,
                    trigger_panic: true,
                };
                let ret = esp_task_wdt_reconfigure(&cfg);
                if ret != ESP_OK as esp_err_t {
                    warn!("watchdog: reconfigure returned {} (may already be configured)", ret);
                }
                let ret = esp_task_wdt_add(core::ptr::null_mut());
                if ret != ESP_OK as esp_err_t {
                    warn!("watchdog: subscribe failed ({})", ret);
                }
                ret == ESP_OK as esp_err_t
            }
        };

        #[cfg(not(target_os = "espidf"))]
        let subscribed = {
            warn!("watchdog(sim): not armed");
            false
        };

        if subscribed {
            info!("watchdog: main loop subscribed ({}ms)", timeout_ms);
        }

        Self {
            timeout_ms,
            subscribed,
            feeds: 0,
        }
    }

    pub fn feed(&mut self) {
        #[cfg(target_os = "espidf")]
        {
            if self.subscribed {
                // SAFETY: resets the TWDT entry of the calling (subscribed) task.
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }
        self.feeds += 1;
    }

    pub fn is_armed(&self) -> bool {
        self.subscribed
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    pub fn feeds(&self) -> u64 {
        self.feeds
    }
}
