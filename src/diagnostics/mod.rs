//! Error handling and diagnostics
//!
//! Task bodies never fail. Driver errors are absorbed here and the system
//! keeps running on its deterministic fallbacks.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    OutputPin = 0x1000,
    InputPin = 0x2000,
    Console = 0x3000,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::OutputPin => "output pin",
            ErrorCode::InputPin => "input pin",
            ErrorCode::Console => "console",
        }
    }
}

impl ufmt::uDisplay for ErrorCode {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    error_count: u32,
    last_error: Option<ErrorCode>,
    dropped_events: u32,
}

impl Diagnostics {
    pub const fn new() -> Self {
        Self {
            error_count: 0,
            last_error: None,
            dropped_events: 0,
        }
    }

    pub fn report_error(&mut self, code: ErrorCode) {
        self.error_count = self.error_count.saturating_add(1);
        self.last_error = Some(code);
    }

    /// Count a failed driver call and carry on
    pub fn absorb(&mut self, result: Result<(), ErrorCode>) {
        if let Err(code) = result {
            self.report_error(code);
        }
    }

    /// A completed press found the previous one still unconsumed
    pub fn report_dropped_event(&mut self) {
        self.dropped_events = self.dropped_events.saturating_add(1);
    }

    pub fn get_last_error(&self) -> Option<ErrorCode> {
        self.last_error
    }

    pub fn get_error_count(&self) -> u32 {
        self.error_count
    }

    pub fn get_dropped_events(&self) -> u32 {
        self.dropped_events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_remembers_last_error() {
        let mut diag = Diagnostics::new();
        assert_eq!(diag.get_last_error(), None);

        diag.report_error(ErrorCode::InputPin);
        diag.report_error(ErrorCode::Console);

        assert_eq!(diag.get_error_count(), 2);
        assert_eq!(diag.get_last_error(), Some(ErrorCode::Console));
        assert_eq!(diag.get_dropped_events(), 0);
    }
}
