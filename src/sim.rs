//! Host-side board simulation
//!
//! Digital lines, a capture terminal and a software clock that plug into the
//! `Board` trait, so the whole monitor runs deterministically off-target.

use core::cell::{Cell, Ref, RefCell};
use core::marker::PhantomData;

use embedded_hal::digital::v2::{InputPin, OutputPin};
use embedded_hal::serial;

use crate::application::{Board, Monitor, Peripherals};
use crate::drivers::{Button, Led, SerialConsole};
use crate::os::TickClock;

/// Error returned by a line or terminal switched into fault mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimFault;

/// One digital line, readable as an input and drivable as an output
pub struct SimLine {
    level: Cell<bool>,
    writes: Cell<u32>,
    transitions: Cell<u32>,
    faulty: Cell<bool>,
}

impl SimLine {
    pub const fn new(level: bool) -> Self {
        Self {
            level: Cell::new(level),
            writes: Cell::new(0),
            transitions: Cell::new(0),
            faulty: Cell::new(false),
        }
    }

    pub fn set_level(&self, level: bool) {
        self.level.set(level);
    }

    pub fn is_set(&self) -> bool {
        self.level.get()
    }

    /// Number of times the line was driven
    pub fn writes(&self) -> u32 {
        self.writes.get()
    }

    /// Number of driven level changes
    pub fn transitions(&self) -> u32 {
        self.transitions.get()
    }

    pub fn set_faulty(&self, faulty: bool) {
        self.faulty.set(faulty);
    }

    fn drive(&self, level: bool) -> Result<(), SimFault> {
        if self.faulty.get() {
            return Err(SimFault);
        }
        self.writes.set(self.writes.get() + 1);
        if self.level.get() != level {
            self.transitions.set(self.transitions.get() + 1);
        }
        self.level.set(level);
        Ok(())
    }
}

impl OutputPin for &SimLine {
    type Error = SimFault;

    fn set_low(&mut self) -> Result<(), SimFault> {
        self.drive(false)
    }

    fn set_high(&mut self) -> Result<(), SimFault> {
        self.drive(true)
    }
}

impl InputPin for &SimLine {
    type Error = SimFault;

    fn is_high(&self) -> Result<bool, SimFault> {
        if self.faulty.get() {
            return Err(SimFault);
        }
        Ok(self.level.get())
    }

    fn is_low(&self) -> Result<bool, SimFault> {
        self.is_high().map(|high| !high)
    }
}

pub const TERMINAL_CAPACITY: usize = 16 * 1024;

/// Serial sink that keeps everything written to it
pub struct SimTerminal {
    buffer: RefCell<[u8; TERMINAL_CAPACITY]>,
    len: Cell<usize>,
}

impl SimTerminal {
    pub const fn new() -> Self {
        Self {
            buffer: RefCell::new([0; TERMINAL_CAPACITY]),
            len: Cell::new(0),
        }
    }

    /// Everything written so far. Invalid UTF-8 reads as empty.
    pub fn text(&self) -> Ref<'_, str> {
        let len = self.len.get();
        Ref::map(self.buffer.borrow(), |buffer| {
            core::str::from_utf8(&buffer[..len]).unwrap_or("")
        })
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.text().contains(needle)
    }

    pub fn count(&self, needle: &str) -> usize {
        self.text().matches(needle).count()
    }

    pub fn clear(&self) {
        self.len.set(0);
    }
}

impl Default for SimTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl serial::Write<u8> for &SimTerminal {
    type Error = SimFault;

    fn write(&mut self, word: u8) -> nb::Result<(), SimFault> {
        let len = self.len.get();
        if len >= TERMINAL_CAPACITY {
            return Err(nb::Error::Other(SimFault));
        }
        self.buffer.borrow_mut()[len] = word;
        self.len.set(len + 1);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), SimFault> {
        Ok(())
    }
}

/// Type bundle binding the monitor to borrowed simulation parts
pub struct SimBoard<'a>(PhantomData<&'a ()>);

impl<'a> Board for SimBoard<'a> {
    type Clock = &'a TickClock;
    type Button = &'a SimLine;
    type ShortLed = &'a SimLine;
    type LongLed = &'a SimLine;
    type ActivityLed = &'a SimLine;
    type Serial = &'a SimTerminal;
}

/// Simulated wiring: active-low button, three LEDs and a terminal
pub struct SimRig {
    pub clock: TickClock,
    pub button: SimLine,
    pub green: SimLine,
    pub red: SimLine,
    pub yellow: SimLine,
    pub terminal: SimTerminal,
}

impl SimRig {
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    pub const fn starting_at(ms: u32) -> Self {
        Self {
            clock: TickClock::starting_at(ms),
            // Pulled up: released
            button: SimLine::new(true),
            green: SimLine::new(false),
            red: SimLine::new(false),
            yellow: SimLine::new(false),
            terminal: SimTerminal::new(),
        }
    }

    pub fn monitor(&self) -> Monitor<SimBoard<'_>> {
        Monitor::new(Peripherals {
            clock: &self.clock,
            button: Button::active_low(&self.button),
            short_led: Led::new(&self.green),
            long_led: Led::new(&self.red),
            activity_led: Led::new(&self.yellow),
            console: SerialConsole::new(&self.terminal),
        })
    }

    pub fn press(&self) {
        self.button.set_level(false);
    }

    pub fn release(&self) {
        self.button.set_level(true);
    }

    /// Advance `ms` milliseconds. Each millisecond the host loop spins until
    /// no task is due, like the real loop does between timer interrupts.
    pub fn run_for(&self, monitor: &mut Monitor<SimBoard<'_>>, ms: u32) {
        for _ in 0..ms {
            while monitor.poll().is_some() {}
            self.clock.tick();
        }
    }
}

impl Default for SimRig {
    fn default() -> Self {
        Self::new()
    }
}
