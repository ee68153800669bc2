//! Configuration constants for the press monitor firmware

use crate::logger::LogType;

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 16_000_000;

/// UART baud rate
pub const UART_BAUD: u32 = 9600;

/// Button debounce time in milliseconds
pub const BUTTON_DEBOUNCE_MS: u32 = 50;

/// A press shorter than this is short; equal or longer is long
pub const SHORT_PRESS_THRESHOLD_MS: u32 = 500;

/// How long the green/red indicator stays lit after a completed press
pub const INDICATOR_HOLD_MS: u32 = 1500;

/// One on-or-off phase of the activity blink
pub const BLINK_HALF_PERIOD_MS: u32 = 100;

/// Activity blink half-cycles for a short press (5 blinks)
pub const BLINK_STEPS_SHORT: u8 = 10;

/// Activity blink half-cycles for a long press (10 blinks)
pub const BLINK_STEPS_LONG: u8 = 20;

/// Statistics window length
pub const REPORT_INTERVAL_MS: u32 = 10_000;

// Task table: (period, startup offset). The offsets stagger the first runs.
pub const PRESS_TASK_PERIOD_MS: u32 = 10;
pub const PRESS_TASK_OFFSET_MS: u32 = 0;
pub const STATS_TASK_PERIOD_MS: u32 = 50;
pub const STATS_TASK_OFFSET_MS: u32 = 5;
pub const REPORT_TASK_PERIOD_MS: u32 = REPORT_INTERVAL_MS;
pub const REPORT_TASK_OFFSET_MS: u32 = 2000;

/// Most verbose log entry written to the console
pub const LOG_LEVEL: LogType = if cfg!(feature = "debug") {
    LogType::Debug
} else {
    LogType::System
};
