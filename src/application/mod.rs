//! Application layer: three cooperative tasks over one shared context
//!
//! | Task   | Period  | Responsibility                              |
//! |--------|---------|---------------------------------------------|
//! | press  | 10 ms   | debounce, duration, short/long indicators   |
//! | stats  | 50 ms   | window counters, activity blink             |
//! | report | 10 s    | console report, counter reset               |
//!
//! Data flows one way: press task -> `PressEvent` -> stats task ->
//! `WindowStats` -> report task. No task calls another.

pub mod press_task;
pub mod report_task;
pub mod shared;
pub mod stats_task;

use embedded_hal::digital::v2::{InputPin, OutputPin};
use embedded_hal::serial;
use ufmt::uWrite;

pub use press_task::PressTask;
pub use report_task::{Report, ReportTask};
pub use shared::{Press, PressEvent, PressKind, Shared, WindowStats};
pub use stats_task::StatsTask;

use crate::config::{
    BLINK_HALF_PERIOD_MS, LOG_LEVEL, PRESS_TASK_OFFSET_MS, PRESS_TASK_PERIOD_MS,
    REPORT_INTERVAL_MS, REPORT_TASK_OFFSET_MS, REPORT_TASK_PERIOD_MS, SHORT_PRESS_THRESHOLD_MS,
    STATS_TASK_OFFSET_MS, STATS_TASK_PERIOD_MS,
};
use crate::drivers::{Button, Led, SerialConsole};
use crate::log_system;
use crate::logger::Logger;
use crate::os::{Clock, Millis};
use crate::rtos::{Scheduler, Task};

pub const TASK_COUNT: usize = 3;
pub const PRESS_TASK: usize = 0;
pub const STATS_TASK: usize = 1;
pub const REPORT_TASK: usize = 2;

/// Concrete hardware types the monitor runs on
pub trait Board {
    type Clock: Clock;
    type Button: InputPin;
    type ShortLed: OutputPin;
    type LongLed: OutputPin;
    type ActivityLed: OutputPin;
    type Serial: serial::Write<u8>;
}

pub struct Peripherals<H: Board> {
    pub clock: H::Clock,
    pub button: Button<H::Button>,
    pub short_led: Led<H::ShortLed>,
    pub long_led: Led<H::LongLed>,
    pub activity_led: Led<H::ActivityLed>,
    pub console: SerialConsole<H::Serial>,
}

/// Context handed to every task body. Each task owns its outputs; the
/// cross-task records live in `shared`.
pub struct System<H: Board> {
    pub clock: H::Clock,
    pub press: PressTask<H::Button, H::ShortLed, H::LongLed>,
    pub stats: StatsTask<H::ActivityLed>,
    pub report: ReportTask,
    pub shared: Shared,
    pub log: Logger<SerialConsole<H::Serial>>,
}

impl<H: Board> Clock for System<H> {
    #[inline]
    fn now(&self) -> Millis {
        self.clock.now()
    }
}

fn run_press<H: Board>(sys: &mut System<H>) {
    let now = sys.clock.now();
    sys.press.run(now, &mut sys.shared, &mut sys.log);
}

fn run_stats<H: Board>(sys: &mut System<H>) {
    let now = sys.clock.now();
    sys.stats.run(now, &mut sys.shared);
}

fn run_report<H: Board>(sys: &mut System<H>) {
    let now = sys.clock.now();
    sys.report.run(now, &mut sys.shared, &mut sys.log);
}

pub fn task_table<H: Board>() -> [Task<System<H>>; TASK_COUNT] {
    [
        Task::new(run_press::<H>, PRESS_TASK_PERIOD_MS, PRESS_TASK_OFFSET_MS),
        Task::new(run_stats::<H>, STATS_TASK_PERIOD_MS, STATS_TASK_OFFSET_MS),
        Task::new(run_report::<H>, REPORT_TASK_PERIOD_MS, REPORT_TASK_OFFSET_MS),
    ]
}

pub fn write_banner<W: uWrite + ?Sized>(w: &mut W) -> Result<(), W::Error> {
    const RULE: &str = "========================================\r\n";

    w.write_str("\r\n")?;
    w.write_str(RULE)?;
    w.write_str("  Button Press Monitor\r\n")?;
    w.write_str("  Non-Preemptive Task Scheduler\r\n")?;
    ufmt::uwrite!(
        w,
        "  Tasks: {} | Tick base: {} ms\r\n",
        TASK_COUNT as u8,
        PRESS_TASK_PERIOD_MS
    )?;
    w.write_str(RULE)?;
    ufmt::uwrite!(w, "GREEN  LED  = short press (< {} ms)\r\n", SHORT_PRESS_THRESHOLD_MS)?;
    ufmt::uwrite!(w, "RED    LED  = long press  (>= {} ms)\r\n", SHORT_PRESS_THRESHOLD_MS)?;
    w.write_str("YELLOW LED  = activity blink\r\n")?;
    ufmt::uwrite!(w, "Report interval: {} seconds\r\n", REPORT_INTERVAL_MS / 1000)?;
    w.write_str(RULE)?;
    w.write_str("\r\n")
}

/// Scheduler plus the context it drives
pub struct Monitor<H: Board> {
    scheduler: Scheduler<System<H>, TASK_COUNT>,
    system: System<H>,
}

impl<H: Board> Monitor<H> {
    pub fn new(p: Peripherals<H>) -> Self {
        Self {
            scheduler: Scheduler::new(task_table::<H>()),
            system: System {
                clock: p.clock,
                press: PressTask::new(p.button, p.short_led, p.long_led),
                stats: StatsTask::new(p.activity_led),
                report: ReportTask::new(),
                shared: Shared::new(),
                log: Logger::new(p.console, LOG_LEVEL),
            },
        }
    }

    /// Turn every LED off, print the banner and anchor the task deadlines.
    pub fn start(&mut self) {
        let sys = &mut self.system;
        sys.press.reset_outputs(&mut sys.shared.diagnostics);
        sys.stats.reset_outputs(&mut sys.shared.diagnostics);

        if write_banner(sys.log.sink()).is_err() {
            sys.shared
                .diagnostics
                .report_error(crate::diagnostics::ErrorCode::Console);
        }
        let now = sys.clock.now();
        log_system!(
            sys.log,
            now,
            "scheduler started, blink half-cycle {} ms",
            BLINK_HALF_PERIOD_MS
        );

        self.scheduler.init(&self.system);
    }

    /// One scheduler tick. Returns the index of the task that ran.
    #[inline]
    pub fn poll(&mut self) -> Option<usize> {
        self.scheduler.tick(&mut self.system)
    }

    pub fn run(&mut self) -> ! {
        self.scheduler.run(&mut self.system)
    }

    pub fn system(&self) -> &System<H> {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut System<H> {
        &mut self.system
    }

    pub fn scheduler(&self) -> &Scheduler<System<H>, TASK_COUNT> {
        &self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimRig;

    #[test]
    fn start_prints_banner_and_clears_leds() {
        let rig = SimRig::new();
        rig.green.set_level(true);
        let mut monitor = rig.monitor();
        monitor.start();

        assert!(!rig.green.is_set());
        assert!(!rig.red.is_set());
        assert!(!rig.yellow.is_set());
        assert!(rig.terminal.contains("  Tasks: 3 | Tick base: 10 ms\r\n"));
        assert!(rig.terminal.contains("GREEN  LED  = short press (< 500 ms)\r\n"));
        assert!(rig.terminal.contains("Report interval: 10 seconds\r\n"));
        assert!(rig.terminal.contains("SYS scheduler started"));
        assert!(monitor.scheduler().is_started());
    }

    #[test]
    fn task_table_follows_config() {
        let rig = SimRig::starting_at(1000);
        let mut monitor = rig.monitor();
        monitor.start();

        let tasks = monitor.scheduler().tasks();
        assert_eq!(tasks[PRESS_TASK].next_run(), Millis(1000));
        assert_eq!(tasks[STATS_TASK].next_run(), Millis(1005));
        assert_eq!(tasks[REPORT_TASK].next_run(), Millis(3000));
        assert_eq!(tasks[REPORT_TASK].period_ms(), REPORT_INTERVAL_MS);
    }

    #[test]
    fn first_ticks_follow_offsets() {
        let rig = SimRig::new();
        let mut monitor = rig.monitor();
        monitor.start();

        assert_eq!(monitor.poll(), Some(PRESS_TASK));
        assert_eq!(monitor.poll(), None);
        rig.clock.advance(5);
        assert_eq!(monitor.poll(), Some(STATS_TASK));
        assert_eq!(monitor.poll(), None);
    }
}
