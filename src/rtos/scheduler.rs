//! Non-preemptive earliest-deadline-first scheduler
//!
//! Each tick runs at most one due task: the one furthest past its deadline,
//! with ties going to the lowest table index. Tasks share state only through
//! the context `C`, which is safe without locks because a task body always
//! runs to completion before the next one starts.

use crate::os::Clock;
use crate::rtos::task::Task;

pub struct Scheduler<C, const N: usize> {
    tasks: [Task<C>; N],
    started: bool,
}

impl<C: Clock, const N: usize> Scheduler<C, N> {
    pub fn new(tasks: [Task<C>; N]) -> Self {
        Self {
            tasks,
            started: false,
        }
    }

    /// Anchor every deadline at `now + offset`. Ticks are ignored until this
    /// has run; calling it again restarts all deadlines from the current time.
    pub fn init(&mut self, ctx: &C) {
        let now = ctx.now();
        for task in self.tasks.iter_mut() {
            task.schedule_from(now);
        }
        self.started = true;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Run at most one due task and return its index.
    pub fn tick(&mut self, ctx: &mut C) -> Option<usize> {
        if !self.started {
            return None;
        }

        let current_time = ctx.now();
        let mut chosen: Option<(usize, u32)> = None;

        for (idx, task) in self.tasks.iter().enumerate() {
            if let Some(lateness) = task.lateness(current_time) {
                match chosen {
                    Some((_, most_late)) if lateness <= most_late => {}
                    _ => chosen = Some((idx, lateness)),
                }
            }
        }

        let (idx, _) = chosen?;
        let task = &mut self.tasks[idx];
        task.execute(ctx);
        task.advance(ctx.now());
        Some(idx)
    }

    pub fn run(&mut self, ctx: &mut C) -> ! {
        loop {
            self.tick(ctx);
        }
    }

    pub fn tasks(&self) -> &[Task<C>] {
        &self.tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::os::{Millis, TickClock};

    struct Harness<'a> {
        clock: &'a TickClock,
        log: Vec<(usize, u32)>,
        /// Simulated execution time of task 0
        busy_ms: u32,
    }

    impl Clock for Harness<'_> {
        fn now(&self) -> Millis {
            self.clock.now()
        }
    }

    fn task_a(h: &mut Harness<'_>) {
        h.log.push((0, h.clock.get_ticks()));
        h.clock.advance(h.busy_ms);
    }

    fn task_b(h: &mut Harness<'_>) {
        h.log.push((1, h.clock.get_ticks()));
    }

    fn task_c(h: &mut Harness<'_>) {
        h.log.push((2, h.clock.get_ticks()));
    }

    fn harness(clock: &TickClock) -> Harness<'_> {
        Harness {
            clock,
            log: Vec::new(),
            busy_ms: 0,
        }
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let clock = TickClock::new();
        let mut h = harness(&clock);
        let mut sched = Scheduler::new([Task::new(task_a, 10, 0)]);

        assert_eq!(sched.tick(&mut h), None);
        assert!(h.log.is_empty());
    }

    #[test]
    fn init_applies_offsets() {
        let clock = TickClock::starting_at(100);
        let h = harness(&clock);
        let mut sched = Scheduler::new([
            Task::new(task_a, 10, 0),
            Task::new(task_b, 50, 5),
            Task::new(task_c, 10_000, 2000),
        ]);
        sched.init(&h);

        let deadlines: Vec<u32> = sched.tasks().iter().map(|t| t.next_run().as_u32()).collect();
        assert_eq!(deadlines, [100, 105, 2100]);
    }

    #[test]
    fn at_most_one_task_per_tick() {
        let clock = TickClock::new();
        let mut h = harness(&clock);
        let mut sched = Scheduler::new([
            Task::new(task_a, 10, 0),
            Task::new(task_b, 10, 0),
            Task::new(task_c, 10, 0),
        ]);
        sched.init(&h);

        for _ in 0..500 {
            let before = h.log.len();
            sched.tick(&mut h);
            assert!(h.log.len() - before <= 1);
            clock.tick();
        }
    }

    #[test]
    fn most_overdue_task_runs_first() {
        let clock = TickClock::new();
        let mut h = harness(&clock);
        let mut sched = Scheduler::new([
            Task::new(task_a, 10, 30),
            Task::new(task_b, 10, 10),
            Task::new(task_c, 10, 20),
        ]);
        sched.init(&h);

        clock.set(40);
        assert_eq!(sched.tick(&mut h), Some(1));
        assert_eq!(sched.tick(&mut h), Some(2));
        assert_eq!(sched.tick(&mut h), Some(0));
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let clock = TickClock::new();
        let mut h = harness(&clock);
        let mut sched = Scheduler::new([
            Task::new(task_a, 100, 5),
            Task::new(task_b, 100, 5),
        ]);
        sched.init(&h);

        clock.set(5);
        assert_eq!(sched.tick(&mut h), Some(0));
        assert_eq!(sched.tick(&mut h), Some(1));
        assert_eq!(sched.tick(&mut h), None);
    }

    #[test]
    fn nothing_due_means_no_side_effects() {
        let clock = TickClock::new();
        let mut h = harness(&clock);
        let mut sched = Scheduler::new([Task::new(task_a, 10, 5)]);
        sched.init(&h);

        clock.set(4);
        assert_eq!(sched.tick(&mut h), None);
        assert_eq!(sched.tasks()[0].next_run(), Millis(5));
        assert_eq!(sched.tasks()[0].stats().total_runs, 0);
    }

    #[test]
    fn on_time_runs_keep_phase() {
        let clock = TickClock::new();
        let mut h = harness(&clock);
        let mut sched = Scheduler::new([Task::new(task_b, 10, 0)]);
        sched.init(&h);

        for _ in 0..35 {
            sched.tick(&mut h);
            clock.tick();
        }
        let times: Vec<u32> = h.log.iter().map(|&(_, t)| t).collect();
        assert_eq!(times, [0, 10, 20, 30]);
    }

    #[test]
    fn late_start_within_a_period_keeps_phase() {
        let clock = TickClock::new();
        let mut h = harness(&clock);
        let mut sched = Scheduler::new([Task::new(task_b, 10, 0)]);
        sched.init(&h);

        clock.set(7);
        sched.tick(&mut h);
        assert_eq!(sched.tasks()[0].next_run(), Millis(10));
        assert_eq!(sched.tasks()[0].stats().missed_deadlines, 0);
    }

    #[test]
    fn long_stall_reanchors_instead_of_bursting() {
        let clock = TickClock::new();
        let mut h = harness(&clock);
        let mut sched = Scheduler::new([Task::new(task_b, 10, 0)]);
        sched.init(&h);

        clock.set(55);
        sched.tick(&mut h);
        assert_eq!(sched.tasks()[0].next_run(), Millis(65));
        assert_eq!(sched.tasks()[0].stats().missed_deadlines, 1);

        // No catch-up runs before the new deadline.
        for _ in 0..9 {
            clock.tick();
            assert_eq!(sched.tick(&mut h), None);
        }
    }

    #[test]
    fn overrunning_task_reanchors_after_it_finishes() {
        let clock = TickClock::new();
        let mut h = harness(&clock);
        h.busy_ms = 25;
        let mut sched = Scheduler::new([Task::new(task_a, 10, 0)]);
        sched.init(&h);

        sched.tick(&mut h);
        assert_eq!(clock.get_ticks(), 25);
        assert_eq!(sched.tasks()[0].next_run(), Millis(35));
    }

    #[test]
    fn next_deadline_is_after_last_run() {
        let clock = TickClock::new();
        let mut h = harness(&clock);
        let mut sched = Scheduler::new([
            Task::new(task_a, 3, 0),
            Task::new(task_b, 7, 1),
            Task::new(task_c, 1, 2),
        ]);
        sched.init(&h);

        for step in 0..300u32 {
            if let Some(idx) = sched.tick(&mut h) {
                let ran_at = clock.now();
                let next = sched.tasks()[idx].next_run();
                assert!(next.since(ran_at) > 0 && !ran_at.has_reached(next));
            }
            clock.advance(step % 4);
        }
    }

    #[test]
    fn selection_is_correct_across_the_wrap() {
        let clock = TickClock::starting_at(u32::MAX - 4);
        let mut h = harness(&clock);
        let mut sched = Scheduler::new([
            Task::new(task_a, 10, 8),
            Task::new(task_b, 10, 2),
        ]);
        sched.init(&h);

        // task_b is due at MAX-2, task_a at 3 (after the wrap).
        clock.set(1);
        assert_eq!(sched.tick(&mut h), Some(1));
        assert_eq!(sched.tick(&mut h), None);

        clock.set(3);
        assert_eq!(sched.tick(&mut h), Some(0));
        assert_eq!(sched.tasks()[0].next_run(), Millis(13));
    }

    #[test]
    fn zero_period_is_clamped() {
        let task: Task<Harness<'_>> = Task::new(task_b, 0, 0);
        assert_eq!(task.period_ms(), 1);
    }
}
