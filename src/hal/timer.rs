//! Timer0 millisecond time base
//!
//! CTC mode at 16 MHz / 64 / 250 gives one compare-match interrupt per
//! millisecond. The ISR is the only writer of the counter.

use avr_device::atmega2560::TC0;
use avr_device::interrupt::{self, Mutex};
use core::cell::Cell;

use crate::config::CPU_FREQ_HZ;
use crate::os::{Clock, Millis};

#[derive(Clone, Copy)]
pub enum Prescaler {
    Stop = 0,
    Direct = 1,
    Div8 = 2,
    Div64 = 3,
    Div256 = 4,
    Div1024 = 5,
}

impl Prescaler {
    const fn divisor(self) -> u32 {
        match self {
            Prescaler::Stop => 0,
            Prescaler::Direct => 1,
            Prescaler::Div8 => 8,
            Prescaler::Div64 => 64,
            Prescaler::Div256 => 256,
            Prescaler::Div1024 => 1024,
        }
    }
}

const PRESCALER: Prescaler = Prescaler::Div64;
const TIMER_COUNTS: u32 = CPU_FREQ_HZ / PRESCALER.divisor() / 1000;

// TCCR0A WGM01: clear timer on compare match
const TCCR0A_CTC: u8 = 1 << 1;
// TIMSK0 OCIE0A
const TIMSK0_OCIE0A: u8 = 1 << 1;

static MILLIS_COUNTER: Mutex<Cell<u32>> = Mutex::new(Cell::new(0));

/// Reads the interrupt-driven millisecond counter
#[derive(Debug, Clone, Copy)]
pub struct MillisClock {
    _private: (),
}

impl MillisClock {
    /// Start Timer0. Interrupts must be enabled globally for time to move.
    pub fn start(tc0: TC0) -> Self {
        unsafe {
            tc0.tccr0a.write(|w| w.bits(TCCR0A_CTC));
            tc0.tcnt0.write(|w| w.bits(0));
            tc0.ocr0a.write(|w| w.bits((TIMER_COUNTS - 1) as u8));
            tc0.tccr0b.write(|w| w.bits(PRESCALER as u8));
            tc0.timsk0.write(|w| w.bits(TIMSK0_OCIE0A));
        }
        interrupt::free(|cs| MILLIS_COUNTER.borrow(cs).set(0));
        Self { _private: () }
    }
}

impl Clock for MillisClock {
    fn now(&self) -> Millis {
        // 32-bit read is not atomic on AVR
        Millis(interrupt::free(|cs| MILLIS_COUNTER.borrow(cs).get()))
    }
}

#[avr_device::interrupt(atmega2560)]
fn TIMER0_COMPA() {
    interrupt::free(|cs| {
        let counter = MILLIS_COUNTER.borrow(cs);
        counter.set(counter.get().wrapping_add(1));
    })
}
