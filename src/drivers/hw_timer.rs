//! Light-sampling timer on ESP-IDF's esp_timer API.
//!
//! The callback runs in the esp_timer task, not in an ISR, and only pushes
//! [`Event::LightSampleTick`] into the lock-free queue.  It never touches
//! the vehicle state; the main loop handles the event under the service
//! lock.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use crate::events::{Event, EVENTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    CreateFailed(i32),
    StartFailed(i32),
    StopFailed(i32),
}

impl core::fmt::Display for TimerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::CreateFailed(rc) => write!(f, "esp_timer create failed (rc={})", rc),
            Self::StartFailed(rc) => write!(f, "esp_timer start failed (rc={})", rc),
            Self::StopFailed(rc) => write!(f, "esp_timer stop failed (rc={})", rc),
        }
    }
}

impl std::error::Error for TimerError {}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn light_tick_cb(_arg: *mut core::ffi::c_void) {
    if !EVENTS.push(Event::LightSampleTick) {
        log::warn!("hw_timer: event queue full, light tick dropped");
    }
}

/// Owned periodic timer handle.  Created stopped.
pub struct LightTimer {
    #[cfg(target_os = "espidf")]
    handle: esp_timer_handle_t,
    running: bool,
}

// SAFETY: the handle is only used by whoever owns the LightTimer, which is
// always behind the service lock.
#[cfg(target_os = "espidf")]
unsafe impl Send for LightTimer {}

impl LightTimer {
    #[cfg(target_os = "espidf")]
    pub fn new() -> Result<Self, TimerError> {
        let mut handle: esp_timer_handle_t = core::ptr::null_mut();
        let args = esp_timer_create_args_t {
            callback: Some(light_tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: c"light".as_ptr(),
            // Collapse missed periods into one tick.
            skip_unhandled_events: true,
        };
        // SAFETY: args outlives the call; handle is written on success only.
        let ret = unsafe { esp_timer_create(&args, &mut handle) };
        if ret != ESP_OK as esp_err_t {
            return Err(TimerError::CreateFailed(ret));
        }
        Ok(Self { handle, running: false })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Result<Self, TimerError> {
        Ok(Self { running: false })
    }

    /// Start firing every `period_ms`.  Restarts if already running.
    pub fn start_periodic(&mut self, period_ms: u32) -> Result<(), TimerError> {
        if self.running {
            self.stop()?;
        }
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: handle was created in new() and is not yet deleted.
            let ret = unsafe { esp_timer_start_periodic(self.handle, u64::from(period_ms) * 1_000) };
            if ret != ESP_OK as esp_err_t {
                return Err(TimerError::StartFailed(ret));
            }
        }
        #[cfg(not(target_os = "espidf"))]
        log::debug!("hw_timer(sim): light timer armed ({}ms)", period_ms);

        self.running = true;
        Ok(())
    }

    /// Stop firing.  A callback already dispatched may still push one tick.
    pub fn stop(&mut self) -> Result<(), TimerError> {
        if !self.running {
            return Ok(());
        }
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: handle is valid; stopping a running timer.
            let ret = unsafe { esp_timer_stop(self.handle) };
            if ret != ESP_OK as esp_err_t {
                return Err(TimerError::StopFailed(ret));
            }
        }
        self.running = false;
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Drop for LightTimer {
    fn drop(&mut self) {
        let _ = self.stop();
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: timer is stopped; handle is not used after this.
            unsafe {
                esp_timer_delete(self.handle);
            }
        }
    }
}
