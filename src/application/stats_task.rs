//! Statistics update and activity blink
//!
//! Consumes the pending press, if any, into the window counters and starts
//! a blink on the activity LED: `BLINK_STEPS_SHORT` half-cycles for a short
//! press, `BLINK_STEPS_LONG` for a long one. The blink advances on every run
//! whether or not a press arrived.

use embedded_hal::digital::v2::OutputPin;

use crate::application::shared::Shared;
use crate::config::BLINK_HALF_PERIOD_MS;
use crate::diagnostics::Diagnostics;
use crate::drivers::{BlinkSequencer, Led};
use crate::os::Millis;

pub struct StatsTask<Y> {
    activity_led: Led<Y>,
    blink: BlinkSequencer,
}

impl<Y: OutputPin> StatsTask<Y> {
    pub fn new(activity_led: Led<Y>) -> Self {
        Self {
            activity_led,
            blink: BlinkSequencer::new(BLINK_HALF_PERIOD_MS),
        }
    }

    pub fn reset_outputs(&mut self, diagnostics: &mut Diagnostics) {
        diagnostics.absorb(self.activity_led.off());
    }

    pub fn run(&mut self, now: Millis, shared: &mut Shared) {
        if let Some(press) = shared.event.take() {
            shared.stats.record(&press);
            let level = self.blink.start(press.kind.blink_steps(), now);
            shared.diagnostics.absorb(self.activity_led.set(level));
        }

        if let Some(level) = self.blink.advance(now) {
            shared.diagnostics.absorb(self.activity_led.set(level));
        }
    }

    pub fn blink(&self) -> &BlinkSequencer {
        &self.blink
    }

    pub fn activity_led(&self) -> &Led<Y> {
        &self.activity_led
    }
}
