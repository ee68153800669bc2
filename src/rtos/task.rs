//! Periodic task descriptor

use crate::os::Millis;

/// Task body. Runs to completion and must never wait.
pub type TaskFunction<C> = fn(&mut C);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStatistics {
    /// Completed executions
    pub total_runs: u32,
    /// Executions dropped because the task fell a whole period behind
    pub missed_deadlines: u32,
}

pub struct Task<C> {
    function: TaskFunction<C>,
    period_ms: u32,
    offset_ms: u32,
    next_run: Millis,
    stats: TaskStatistics,
}

impl<C> Task<C> {
    /// A zero period is clamped to 1 ms.
    pub const fn new(function: TaskFunction<C>, period_ms: u32, offset_ms: u32) -> Self {
        Self {
            function,
            period_ms: if period_ms == 0 { 1 } else { period_ms },
            offset_ms,
            next_run: Millis(0),
            stats: TaskStatistics {
                total_runs: 0,
                missed_deadlines: 0,
            },
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub fn offset_ms(&self) -> u32 {
        self.offset_ms
    }

    pub fn next_run(&self) -> Millis {
        self.next_run
    }

    pub fn stats(&self) -> TaskStatistics {
        self.stats
    }

    pub(crate) fn schedule_from(&mut self, now: Millis) {
        self.next_run = now.offset(self.offset_ms);
    }

    /// How far past its deadline the task is, if it is due at all
    #[inline]
    pub(crate) fn lateness(&self, now: Millis) -> Option<u32> {
        if now.has_reached(self.next_run) {
            Some(now.since(self.next_run))
        } else {
            None
        }
    }

    pub(crate) fn execute(&mut self, ctx: &mut C) {
        (self.function)(ctx);
        self.stats.total_runs = self.stats.total_runs.wrapping_add(1);
    }

    /// Move the deadline one period on. If that is still not in the future
    /// the missed runs are dropped and the deadline restarts from `now`.
    pub(crate) fn advance(&mut self, now: Millis) {
        let next_run = self.next_run.offset(self.period_ms);
        if now.has_reached(next_run) {
            self.next_run = now.offset(self.period_ms);
            self.stats.missed_deadlines = self.stats.missed_deadlines.wrapping_add(1);
        } else {
            self.next_run = next_run;
        }
    }
}
