//! Debounced press-duration measurement
//!
//! A level change only counts once it has held for the whole debounce
//! window. Duration runs from the confirmed press edge to the first
//! released sample of the release that is later confirmed.

use crate::os::Millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    ConfirmingPress,
    Pressed,
    ConfirmingRelease,
}

pub struct PressDetector {
    state: DebounceState,
    debounce_ms: u32,
    window_start: Millis,
    press_start: Millis,
    press_end: Millis,
}

impl PressDetector {
    pub const fn new(debounce_ms: u32) -> Self {
        Self {
            state: DebounceState::Idle,
            debounce_ms,
            window_start: Millis(0),
            press_start: Millis(0),
            press_end: Millis(0),
        }
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    pub fn press_start(&self) -> Millis {
        self.press_start
    }

    pub fn press_end(&self) -> Millis {
        self.press_end
    }

    /// Feed one raw sample. Returns the press duration when a release is
    /// confirmed.
    pub fn update(&mut self, pressed: bool, now: Millis) -> Option<u32> {
        match self.state {
            DebounceState::Idle => {
                if pressed {
                    self.window_start = now;
                    self.state = DebounceState::ConfirmingPress;
                }
            }
            DebounceState::ConfirmingPress => {
                if !pressed {
                    // Glitch, released before the window closed.
                    self.state = DebounceState::Idle;
                } else if self.window_elapsed(now) {
                    self.press_start = now;
                    self.state = DebounceState::Pressed;
                }
            }
            DebounceState::Pressed => {
                if !pressed {
                    self.press_end = now;
                    self.window_start = now;
                    self.state = DebounceState::ConfirmingRelease;
                }
            }
            DebounceState::ConfirmingRelease => {
                if pressed {
                    // Bounce on release; press_start stays put.
                    self.state = DebounceState::Pressed;
                } else if self.window_elapsed(now) {
                    self.state = DebounceState::Idle;
                    return Some(self.press_end.since(self.press_start));
                }
            }
        }
        None
    }

    #[inline]
    fn window_elapsed(&self, now: Millis) -> bool {
        now.since(self.window_start) >= self.debounce_ms
    }
}
