//! Periodic statistics report
//!
//! Prints the window counters and starts a fresh window:
//!
//! ```text
//!
//! ===== [10s Report] =====
//! Total presses    : 2
//! Short presses    : 0  (< 500 ms)
//! Long presses     : 2  (>= 500 ms)
//! Average duration : 700 ms
//! ========================
//! ```

use ufmt::uWrite;

use crate::application::shared::{Shared, WindowStats};
use crate::config::{REPORT_INTERVAL_MS, SHORT_PRESS_THRESHOLD_MS};
use crate::diagnostics::ErrorCode;
use crate::logger::Logger;
use crate::os::Millis;
use crate::{log_debug, log_error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub total_presses: u32,
    pub short_presses: u32,
    pub long_presses: u32,
    pub average_ms: u32,
}

impl Report {
    pub fn from_stats(stats: &WindowStats) -> Self {
        Self {
            total_presses: stats.total_presses,
            short_presses: stats.short_presses,
            long_presses: stats.long_presses,
            average_ms: stats.average_ms(),
        }
    }

    pub fn write_to<W: uWrite + ?Sized>(&self, w: &mut W) -> Result<(), W::Error> {
        ufmt::uwrite!(w, "\r\n===== [{}s Report] =====\r\n", REPORT_INTERVAL_MS / 1000)?;
        ufmt::uwrite!(w, "Total presses    : {}\r\n", self.total_presses)?;
        ufmt::uwrite!(
            w,
            "Short presses    : {}  (< {} ms)\r\n",
            self.short_presses,
            SHORT_PRESS_THRESHOLD_MS
        )?;
        ufmt::uwrite!(
            w,
            "Long presses     : {}  (>= {} ms)\r\n",
            self.long_presses,
            SHORT_PRESS_THRESHOLD_MS
        )?;
        ufmt::uwrite!(w, "Average duration : {} ms\r\n", self.average_ms)?;
        w.write_str("========================\r\n")
    }
}

#[derive(Debug, Default)]
pub struct ReportTask {
    windows: u32,
    reported_errors: u32,
    reported_drops: u32,
}

impl ReportTask {
    pub const fn new() -> Self {
        Self {
            windows: 0,
            reported_errors: 0,
            reported_drops: 0,
        }
    }

    /// Completed windows
    pub fn windows(&self) -> u32 {
        self.windows
    }

    pub fn run<W: uWrite>(&mut self, now: Millis, shared: &mut Shared, log: &mut Logger<W>) {
        let report = Report::from_stats(&shared.stats);
        if report.write_to(log.sink()).is_err() {
            shared.diagnostics.report_error(ErrorCode::Console);
        }
        shared.stats.reset();

        self.windows = self.windows.wrapping_add(1);
        log_debug!(log, now, "window {} closed", self.windows);

        let diagnostics = &shared.diagnostics;
        if diagnostics.get_error_count() != self.reported_errors {
            self.reported_errors = diagnostics.get_error_count();
            if let Some(code) = diagnostics.get_last_error() {
                log_error!(log, now, "{} faults, last: {}", self.reported_errors, code);
            }
        }
        if diagnostics.get_dropped_events() != self.reported_drops {
            self.reported_drops = diagnostics.get_dropped_events();
            log_error!(log, now, "{} presses dropped", self.reported_drops);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::shared::{Press, PressKind};
    use crate::drivers::SerialConsole;
    use crate::logger::LogType;
    use crate::sim::SimTerminal;

    fn record(shared: &mut Shared, duration_ms: u32) {
        shared.stats.record(&Press {
            duration_ms,
            kind: PressKind::classify(duration_ms, SHORT_PRESS_THRESHOLD_MS),
        });
    }

    #[test]
    fn report_layout() {
        let terminal = SimTerminal::new();
        let mut log = Logger::new(SerialConsole::new(&terminal), LogType::System);
        let mut shared = Shared::new();
        record(&mut shared, 600);
        record(&mut shared, 800);

        ReportTask::new().run(Millis(12_000), &mut shared, &mut log);

        assert_eq!(
            &*terminal.text(),
            "\r\n===== [10s Report] =====\r\n\
             Total presses    : 2\r\n\
             Short presses    : 0  (< 500 ms)\r\n\
             Long presses     : 2  (>= 500 ms)\r\n\
             Average duration : 700 ms\r\n\
             ========================\r\n"
        );
    }

    #[test]
    fn counters_are_zero_after_report() {
        let terminal = SimTerminal::new();
        let mut log = Logger::new(SerialConsole::new(&terminal), LogType::System);
        let mut shared = Shared::new();
        record(&mut shared, 120);
        record(&mut shared, 900);

        let mut task = ReportTask::new();
        task.run(Millis(2000), &mut shared, &mut log);

        assert_eq!(shared.stats, WindowStats::default());
        assert_eq!(task.windows(), 1);
        assert!(terminal.contains("Short presses    : 1  (< 500 ms)"));
        assert!(terminal.contains("Average duration : 510 ms"));
    }

    #[test]
    fn empty_window_averages_to_zero() {
        let terminal = SimTerminal::new();
        let mut log = Logger::new(SerialConsole::new(&terminal), LogType::System);
        let mut shared = Shared::new();

        ReportTask::new().run(Millis(2000), &mut shared, &mut log);

        assert!(terminal.contains("Total presses    : 0\r\n"));
        assert!(terminal.contains("Average duration : 0 ms\r\n"));
    }

    #[test]
    fn faults_are_logged_once_per_change() {
        let terminal = SimTerminal::new();
        let mut log = Logger::new(SerialConsole::new(&terminal), LogType::Debug);
        let mut shared = Shared::new();
        let mut task = ReportTask::new();

        shared.diagnostics.report_error(ErrorCode::OutputPin);
        task.run(Millis(2000), &mut shared, &mut log);
        task.run(Millis(12_000), &mut shared, &mut log);

        assert_eq!(terminal.count("faults, last: output pin"), 1);
        assert!(terminal.contains("[12000] DBG window 2 closed\r\n"));
    }
}
