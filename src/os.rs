//! System time tracking
//!
//! Time is a free-running `u32` millisecond counter that wraps after about
//! 49.7 days. Every comparison goes through modular subtraction so deadlines
//! keep working across the wrap.

use core::cell::Cell;

/// Half the counter range. A deadline further away than this counts as past.
const HALF_RANGE: u32 = 1 << 31;

/// Wrapping millisecond timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Millis(pub u32);

impl Millis {
    #[inline]
    pub const fn from_ms(ms: u32) -> Self {
        Self(ms)
    }

    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Timestamp `ms` milliseconds after this one
    #[inline]
    pub const fn offset(self, ms: u32) -> Self {
        Self(self.0.wrapping_add(ms))
    }

    /// Milliseconds elapsed from `earlier` to `self`
    #[inline]
    pub const fn since(self, earlier: Millis) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// True once `self` is at or after `deadline`
    #[inline]
    pub const fn has_reached(self, deadline: Millis) -> bool {
        self.since(deadline) < HALF_RANGE
    }
}

impl ufmt::uDisplay for Millis {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        ufmt::uDisplay::fmt(&self.0, f)
    }
}

/// Monotonic wrapping millisecond source
pub trait Clock {
    fn now(&self) -> Millis;
}

impl<K: Clock + ?Sized> Clock for &K {
    #[inline]
    fn now(&self) -> Millis {
        (**self).now()
    }
}

/// Software tick counter
///
/// Stands in for the hardware millisecond interrupt when the firmware runs
/// on the host.
pub struct TickClock {
    tick_count: Cell<u32>,
}

impl TickClock {
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    pub const fn starting_at(ms: u32) -> Self {
        Self {
            tick_count: Cell::new(ms),
        }
    }

    /// Increment system tick counter
    #[inline]
    pub fn tick(&self) {
        self.advance(1);
    }

    #[inline]
    pub fn advance(&self, ms: u32) {
        let count = self.tick_count.get();
        self.tick_count.set(count.wrapping_add(ms));
    }

    #[inline]
    pub fn set(&self, ms: u32) {
        self.tick_count.set(ms);
    }

    #[inline]
    pub fn get_ticks(&self) -> u32 {
        self.tick_count.get()
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TickClock {
    #[inline]
    fn now(&self) -> Millis {
        Millis(self.tick_count.get())
    }
}
