//! Records shared between tasks
//!
//! Ownership is by convention, made safe by run-to-completion scheduling:
//!
//! - `PressEvent`: the press task publishes, the stats task takes.
//! - `WindowStats`: the stats task records, the report task resets.
//! - `Diagnostics`: any task may count a fault.

use crate::config::{BLINK_STEPS_LONG, BLINK_STEPS_SHORT};
use crate::diagnostics::Diagnostics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressKind {
    Short,
    Long,
}

impl PressKind {
    /// Exactly `threshold_ms` counts as long.
    pub const fn classify(duration_ms: u32, threshold_ms: u32) -> Self {
        if duration_ms < threshold_ms {
            PressKind::Short
        } else {
            PressKind::Long
        }
    }

    pub const fn blink_steps(self) -> u8 {
        match self {
            PressKind::Short => BLINK_STEPS_SHORT,
            PressKind::Long => BLINK_STEPS_LONG,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PressKind::Short => "short",
            PressKind::Long => "long",
        }
    }
}

impl ufmt::uDisplay for PressKind {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        f.write_str(self.as_str())
    }
}

/// One completed, classified press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Press {
    pub duration_ms: u32,
    pub kind: PressKind,
}

/// Single-slot handoff from the press task to the stats task
#[derive(Debug)]
pub struct PressEvent {
    ready: bool,
    press: Press,
}

impl PressEvent {
    pub const fn new() -> Self {
        Self {
            ready: false,
            press: Press {
                duration_ms: 0,
                kind: PressKind::Short,
            },
        }
    }

    /// Store `press` and raise the ready flag. A pending press is never
    /// overwritten; returns false if `press` was refused.
    pub fn publish(&mut self, press: Press) -> bool {
        if self.ready {
            return false;
        }
        self.press = press;
        self.ready = true;
        true
    }

    /// Clear the ready flag and hand out the pending press.
    pub fn take(&mut self) -> Option<Press> {
        if !self.ready {
            return None;
        }
        self.ready = false;
        Some(self.press)
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }
}

impl Default for PressEvent {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters for the current reporting window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowStats {
    pub total_presses: u32,
    pub short_presses: u32,
    pub long_presses: u32,
    pub total_duration_ms: u32,
}

impl WindowStats {
    pub const fn new() -> Self {
        Self {
            total_presses: 0,
            short_presses: 0,
            long_presses: 0,
            total_duration_ms: 0,
        }
    }

    pub fn record(&mut self, press: &Press) {
        self.total_presses = self.total_presses.saturating_add(1);
        self.total_duration_ms = self.total_duration_ms.saturating_add(press.duration_ms);
        match press.kind {
            PressKind::Short => self.short_presses = self.short_presses.saturating_add(1),
            PressKind::Long => self.long_presses = self.long_presses.saturating_add(1),
        }
    }

    /// Integer mean, zero for an empty window
    pub fn average_ms(&self) -> u32 {
        self.total_duration_ms
            .checked_div(self.total_presses)
            .unwrap_or(0)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::new()
    }
}

pub struct Shared {
    pub event: PressEvent,
    pub stats: WindowStats,
    pub diagnostics: Diagnostics,
}

impl Shared {
    pub const fn new() -> Self {
        Self {
            event: PressEvent::new(),
            stats: WindowStats::new(),
            diagnostics: Diagnostics::new(),
        }
    }
}

impl Default for Shared {
    fn default() -> Self {
        Self::new()
    }
}
