//! Leveled console logging
//!
//! Entries are single lines: `[<ms>] <TAG> <message>\r\n`, formatted with
//! `ufmt` so no `core::fmt` machinery ends up in flash.

use crate::os::Millis;
use ufmt::uWrite;

/// Entry severity. Lower values are more important.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogType {
    Error = 0,
    System = 1,
    Debug = 2,
}

impl LogType {
    pub const fn tag(self) -> &'static str {
        match self {
            LogType::Error => "ERR",
            LogType::System => "SYS",
            LogType::Debug => "DBG",
        }
    }
}

pub struct Logger<W> {
    sink: W,
    level: LogType,
}

impl<W: uWrite> Logger<W> {
    pub fn new(sink: W, level: LogType) -> Self {
        Self { sink, level }
    }

    #[inline]
    pub fn enabled(&self, log_type: LogType) -> bool {
        log_type <= self.level
    }

    pub fn level(&self) -> LogType {
        self.level
    }

    pub fn set_level(&mut self, level: LogType) {
        self.level = level;
    }

    /// Write one entry. `body` formats the message after the prefix.
    pub fn entry<F>(&mut self, log_type: LogType, now: Millis, body: F) -> Result<(), W::Error>
    where
        F: FnOnce(&mut W) -> Result<(), W::Error>,
    {
        if !self.enabled(log_type) {
            return Ok(());
        }
        ufmt::uwrite!(&mut self.sink, "[{}] {} ", now, log_type.tag())?;
        body(&mut self.sink)?;
        self.sink.write_str("\r\n")
    }

    /// Raw access for output that is not a log entry (banner, reports)
    pub fn sink(&mut self) -> &mut W {
        &mut self.sink
    }

    pub fn release(self) -> W {
        self.sink
    }
}

#[macro_export]
macro_rules! log_entry {
    ($logger:expr, $log_type:expr, $now:expr, $($arg:tt)*) => {{
        let _ = $logger.entry($log_type, $now, |w| ufmt::uwrite!(w, $($arg)*));
    }};
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $now:expr, $($arg:tt)*) => {
        $crate::log_entry!($logger, $crate::logger::LogType::Error, $now, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_system {
    ($logger:expr, $now:expr, $($arg:tt)*) => {
        $crate::log_entry!($logger, $crate::logger::LogType::System, $now, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $now:expr, $($arg:tt)*) => {
        $crate::log_entry!($logger, $crate::logger::LogType::Debug, $now, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Capture(String);

    impl uWrite for Capture {
        type Error = core::convert::Infallible;

        fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
            self.0.push_str(s);
            Ok(())
        }
    }

    #[test]
    fn entries_carry_timestamp_and_tag() {
        let mut log = Logger::new(Capture(String::new()), LogType::Debug);
        log_system!(log, Millis(1234), "boot {}", 7u8);
        log_error!(log, Millis(1240), "fault: {}", "input pin");

        assert_eq!(
            log.release().0,
            "[1234] SYS boot 7\r\n[1240] ERR fault: input pin\r\n"
        );
    }

    #[test]
    fn entries_above_level_are_filtered() {
        let mut log = Logger::new(Capture(String::new()), LogType::System);
        log_debug!(log, Millis(1), "noise");
        assert!(log.enabled(LogType::Error));
        assert!(!log.enabled(LogType::Debug));
        assert!(log.release().0.is_empty());
    }
}
