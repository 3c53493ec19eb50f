//! Millisecond countdown timers shared between the tick interrupt and the drivers.
//!
//! The tick source only ever calls [`Timers::tick`]; driver logic only arms and
//! reads. The interrupt cannot be preempted by the cooperative context, so the
//! load/store pair in [`CountdownTimer::tick`] is never observed half-done.

use core::sync::atomic::{AtomicU16, Ordering};

/// Counter decremented once per millisecond, clamped at zero.
#[derive(Debug, Default)]
pub struct CountdownTimer {
    remaining: AtomicU16,
}

impl CountdownTimer {
    /// Creates an already expired timer.
    pub const fn new() -> Self {
        Self {
            remaining: AtomicU16::new(0),
        }
    }

    /// Decrements the counter by one millisecond, never below zero.
    pub fn tick(&self) {
        let remaining = self.remaining.load(Ordering::Relaxed);
        if remaining != 0 {
            self.remaining.store(remaining - 1, Ordering::Relaxed);
        }
    }

    /// Milliseconds left before expiry.
    pub fn remaining(&self) -> u16 {
        self.remaining.load(Ordering::Relaxed)
    }

    /// Returns `true` once the countdown reached zero.
    pub fn is_expired(&self) -> bool {
        self.remaining() == 0
    }

    pub(crate) fn arm(&self, millis: u16) {
        self.remaining.store(millis, Ordering::Relaxed);
    }
}

/// The two countdowns owned by one driver.
///
/// Meant to live in a `static` so the tick interrupt can reach it without
/// access to the driver itself.
///
/// ```
/// use inclinometer::Timers;
///
/// static ADXL_TIMERS: Timers = Timers::new();
///
/// // SysTick handler
/// ADXL_TIMERS.tick();
/// ```
#[derive(Debug, Default)]
pub struct Timers {
    /// Guards a single bus transaction.
    pub(crate) bus: CountdownTimer,
    /// Protocol-level timeout whose meaning depends on the current state.
    pub(crate) state: CountdownTimer,
}

impl Timers {
    /// Creates a pair of expired timers.
    pub const fn new() -> Self {
        Self {
            bus: CountdownTimer::new(),
            state: CountdownTimer::new(),
        }
    }

    /// Advances both countdowns by one millisecond.
    pub fn tick(&self) {
        self.bus.tick();
        self.state.tick();
    }

    /// Read-only view of the bus transaction countdown.
    pub fn bus(&self) -> &CountdownTimer {
        &self.bus
    }

    /// Read-only view of the state countdown.
    pub fn state(&self) -> &CountdownTimer {
        &self.state
    }
}
