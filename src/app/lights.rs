//! Automatic headlight scheduler.
//!
//! Two-state machine (`Disabled` → `Enabled`) owning the periodic ticker
//! that samples the ambient light sensor.  Each firing reads one sample and
//! hands it to [`ActuatorController::apply_headlight_decision`].
//!
//! ```text
//!   enable()  ──▶ Enabled ──(tick)──▶ read sensor ──▶ controller decision
//!   disable() ──▶ Disabled   (ticks that arrive late are dropped)
//! ```
//!
//! Both transitions are idempotent: enabling twice attaches the ticker once,
//! disabling while disabled is a no-op.  If the ticker refuses to attach the
//! scheduler stays `Disabled`.

use log::info;

use crate::error::Result;

use super::controller::ActuatorController;
use super::ports::{ActuatorPort, LightSensorPort, TickerPort};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Disabled,
    Enabled,
}

pub struct LightAutomationScheduler<T: TickerPort> {
    ticker: T,
    state: SchedulerState,
    interval_ms: u32,
    /// Ticks that produced a headlight decision since boot.
    fired: u64,
}

impl<T: TickerPort> LightAutomationScheduler<T> {
    pub fn new(ticker: T, interval_ms: u32) -> Self {
        Self {
            ticker,
            state: SchedulerState::Disabled,
            interval_ms,
            fired: 0,
        }
    }

    /// Start periodic sampling.  Returns `true` if this call attached the ticker.
    pub fn enable(&mut self) -> Result<bool> {
        if self.state == SchedulerState::Enabled {
            return Ok(false);
        }
        self.ticker.attach(self.interval_ms)?;
        self.state = SchedulerState::Enabled;
        info!("lights: automatic sampling every {}ms", self.interval_ms);
        Ok(true)
    }

    /// Stop periodic sampling.  Returns `true` if this call detached the ticker.
    pub fn disable(&mut self) -> bool {
        if self.state == SchedulerState::Disabled {
            return false;
        }
        self.ticker.detach();
        self.state = SchedulerState::Disabled;
        info!("lights: automatic sampling stopped");
        true
    }

    /// Handle one ticker firing.
    ///
    /// Must be called with the same exclusive access that guards
    /// `enable`/`disable`, so a tick delivered after `disable()` returned
    /// sees `Disabled` and does nothing.  Returns `(sample, headlights_on)`.
    pub fn fire<A: ActuatorPort>(
        &mut self,
        sensor: &mut impl LightSensorPort,
        controller: &mut ActuatorController<A>,
    ) -> Option<(u16, bool)> {
        if self.state != SchedulerState::Enabled {
            return None;
        }
        let sample = sensor.read_ambient();
        let on = controller.apply_headlight_decision(sample)?;
        self.fired += 1;
        Some((sample, on))
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state == SchedulerState::Enabled
    }

    pub fn fired_count(&self) -> u64 {
        self.fired
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }
}
