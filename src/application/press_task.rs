//! Button debounce, press measurement and short/long indicators
//!
//! Runs every `PRESS_TASK_PERIOD_MS`. A confirmed release publishes the
//! classified press and lights the matching indicator for
//! `INDICATOR_HOLD_MS`. Both indicators turn themselves off on their own
//! one-shot timers, checked on every run.

use embedded_hal::digital::v2::{InputPin, OutputPin};
use ufmt::uWrite;

use crate::application::shared::{Press, PressKind, Shared};
use crate::config::{BUTTON_DEBOUNCE_MS, INDICATOR_HOLD_MS, SHORT_PRESS_THRESHOLD_MS};
use crate::diagnostics::Diagnostics;
use crate::drivers::{Button, Led, PressDetector};
use crate::logger::Logger;
use crate::os::Millis;
use crate::rtos::OneShotTimer;
use crate::{log_debug, log_error};

pub struct PressTask<B, G, R> {
    button: Button<B>,
    detector: PressDetector,
    short_led: Led<G>,
    long_led: Led<R>,
    short_timer: OneShotTimer,
    long_timer: OneShotTimer,
}

impl<B, G, R> PressTask<B, G, R>
where
    B: InputPin,
    G: OutputPin,
    R: OutputPin,
{
    pub fn new(button: Button<B>, short_led: Led<G>, long_led: Led<R>) -> Self {
        Self {
            button,
            detector: PressDetector::new(BUTTON_DEBOUNCE_MS),
            short_led,
            long_led,
            short_timer: OneShotTimer::new(),
            long_timer: OneShotTimer::new(),
        }
    }

    /// Drive both indicators off
    pub fn reset_outputs(&mut self, diagnostics: &mut Diagnostics) {
        diagnostics.absorb(self.short_led.off());
        diagnostics.absorb(self.long_led.off());
    }

    pub fn run<W: uWrite>(&mut self, now: Millis, shared: &mut Shared, log: &mut Logger<W>) {
        // A failed read skips this sample; the timers still run.
        match self.button.is_pressed() {
            Ok(pressed) => {
                if let Some(duration_ms) = self.detector.update(pressed, now) {
                    self.complete(duration_ms, now, shared, log);
                }
            }
            Err(code) => shared.diagnostics.report_error(code),
        }

        if self.short_timer.expire(now) {
            shared.diagnostics.absorb(self.short_led.off());
        }
        if self.long_timer.expire(now) {
            shared.diagnostics.absorb(self.long_led.off());
        }
    }

    fn complete<W: uWrite>(
        &mut self,
        duration_ms: u32,
        now: Millis,
        shared: &mut Shared,
        log: &mut Logger<W>,
    ) {
        let kind = PressKind::classify(duration_ms, SHORT_PRESS_THRESHOLD_MS);

        if shared.event.publish(Press { duration_ms, kind }) {
            log_debug!(log, now, "press {} ms ({})", duration_ms, kind);
        } else {
            shared.diagnostics.report_dropped_event();
            log_error!(log, now, "press {} ms dropped, previous unconsumed", duration_ms);
        }

        let lit = match kind {
            PressKind::Short => {
                self.short_timer.start(now, INDICATOR_HOLD_MS);
                self.short_led.on()
            }
            PressKind::Long => {
                self.long_timer.start(now, INDICATOR_HOLD_MS);
                self.long_led.on()
            }
        };
        shared.diagnostics.absorb(lit);
    }

    pub fn detector(&self) -> &PressDetector {
        &self.detector
    }

    pub fn short_led(&self) -> &Led<G> {
        &self.short_led
    }

    pub fn long_led(&self) -> &Led<R> {
        &self.long_led
    }

    pub fn short_timer(&self) -> &OneShotTimer {
        &self.short_timer
    }

    pub fn long_timer(&self) -> &OneShotTimer {
        &self.long_timer
    }
}
