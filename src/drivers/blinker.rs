use crate::os::Millis;

/// Self-terminating on/off sequence for the activity LED
///
/// Pure state: callers drive the LED with the levels it returns. A sequence
/// of `n` steps toggles `n` times and always finishes off.
#[derive(Debug)]
pub struct BlinkSequencer {
    half_period_ms: u32,
    remaining: u8,
    last_toggle: Millis,
    level: bool,
}

impl BlinkSequencer {
    pub const fn new(half_period_ms: u32) -> Self {
        Self {
            half_period_ms,
            remaining: 0,
            last_toggle: Millis(0),
            level: false,
        }
    }

    /// (Re)start with `steps` half-cycles. Returns the level to drive now.
    pub fn start(&mut self, steps: u8, now: Millis) -> bool {
        self.remaining = steps;
        self.level = steps > 0;
        self.last_toggle = now;
        self.level
    }

    /// Returns the new level when a half-cycle has elapsed.
    pub fn advance(&mut self, now: Millis) -> Option<bool> {
        if self.remaining == 0 || now.since(self.last_toggle) < self.half_period_ms {
            return None;
        }

        self.last_toggle = now;
        self.remaining -= 1;
        self.level = if self.remaining == 0 { false } else { !self.level };
        Some(self.level)
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    pub fn level(&self) -> bool {
        self.level
    }
}
