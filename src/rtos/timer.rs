//! Single-shot software timer

use crate::os::Millis;

/// Holds one future deadline, or nothing when idle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OneShotTimer {
    deadline: Option<Millis>,
}

impl OneShotTimer {
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm (or re-arm) to fire `duration_ms` after `now`.
    pub fn start(&mut self, now: Millis, duration_ms: u32) {
        self.deadline = Some(now.offset(duration_ms));
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Millis> {
        self.deadline
    }

    /// Returns true exactly once, on the first poll at or after the deadline.
    pub fn expire(&mut self, now: Millis) -> bool {
        match self.deadline {
            Some(deadline) if now.has_reached(deadline) => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_at_deadline() {
        let mut timer = OneShotTimer::new();
        assert!(!timer.expire(Millis(0)));

        timer.start(Millis(100), 1500);
        assert!(timer.is_armed());
        assert!(!timer.expire(Millis(1599)));
        assert!(timer.expire(Millis(1600)));
        assert!(!timer.is_armed());
        assert!(!timer.expire(Millis(1700)));
    }

    #[test]
    fn deadline_at_zero_is_not_confused_with_idle() {
        let mut timer = OneShotTimer::new();
        timer.start(Millis(u32::MAX - 499), 500);
        assert_eq!(timer.deadline(), Some(Millis(0)));
        assert!(!timer.expire(Millis(u32::MAX)));
        assert!(timer.expire(Millis(0)));
    }

    #[test]
    fn rearm_pushes_deadline_out() {
        let mut timer = OneShotTimer::new();
        timer.start(Millis(0), 1500);
        timer.start(Millis(1000), 1500);
        assert!(!timer.expire(Millis(1500)));
        assert!(timer.expire(Millis(2500)));
    }
}
