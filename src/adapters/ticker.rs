//! [`TickerPort`] over the esp_timer light-sampling timer.

use log::error;

use crate::app::ports::TickerPort;
use crate::drivers::hw_timer::{LightTimer, TimerError};
use crate::error::Result;

pub struct TimerTicker {
    timer: LightTimer,
}

impl TimerTicker {
    pub fn new() -> core::result::Result<Self, TimerError> {
        Ok(Self {
            timer: LightTimer::new()?,
        })
    }

    pub fn is_attached(&self) -> bool {
        self.timer.is_running()
    }
}

impl TickerPort for TimerTicker {
    fn attach(&mut self, interval_ms: u32) -> Result<()> {
        self.timer.start_periodic(interval_ms).map_err(|e| {
            error!("ticker: {}", e);
            e.into()
        })
    }

    fn detach(&mut self) {
        if let Err(e) = self.timer.stop() {
            error!("ticker: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_detach() {
        let mut t = TimerTicker::new().unwrap();
        t.attach(1000).unwrap();
        assert!(t.is_attached());
        t.detach();
        assert!(!t.is_attached());
    }
}
