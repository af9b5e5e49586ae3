// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Monotonic tick arithmetic.
//!
//! The board exposes a free-running 64-bit counter (see `hw::timer`). Everything that measures an
//! interval samples it twice and hands both samples to [`elapsed_ticks`], which is the only place
//! that subtracts tick values.

/// Free-running monotonic counter.
pub trait TickCounter {
    /// Current counter value.
    fn ticks(&mut self) -> u64;

    /// Counter rate in ticks per second.
    fn frequency_hz(&self) -> u32;
}

/// Ticks elapsed from `start` to `end`, allowing for one wrap of the 64-bit counter.
#[inline]
pub const fn elapsed_ticks(start: u64, end: u64) -> u64 {
    if end >= start {
        end - start
    } else {
        (u64::MAX - start) + end + 1
    }
}

/// Convert a tick count at `frequency_hz` into microseconds, truncating and saturating at
/// `u64::MAX`.
#[inline]
pub const fn ticks_to_micros(ticks: u64, frequency_hz: u32) -> u64 {
    if frequency_hz == 0 {
        return 0;
    }
    let us = (ticks as u128 * 1_000_000) / frequency_hz as u128;
    if us > u64::MAX as u128 {
        u64::MAX
    } else {
        us as u64
    }
}

/// Convert microseconds into ticks at `frequency_hz`, saturating at `u64::MAX`.
#[inline]
pub const fn micros_to_ticks(us: u64, frequency_hz: u32) -> u64 {
    let ticks = (us as u128 * frequency_hz as u128) / 1_000_000;
    if ticks > u64::MAX as u128 {
        u64::MAX
    } else {
        ticks as u64
    }
}

/// Point in the future measured against a [`TickCounter`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Deadline {
    start: u64,
    budget: u64,
}

impl Deadline {
    /// Start a deadline `timeout_us` microseconds from now.
    pub fn after_micros<C: TickCounter>(clock: &mut C, timeout_us: u32) -> Self {
        let budget = micros_to_ticks(timeout_us as u64, clock.frequency_hz());
        Self {
            start: clock.ticks(),
            budget,
        }
    }

    /// Build a deadline from a raw start sample and a budget in ticks.
    #[inline]
    pub const fn from_ticks(start: u64, budget: u64) -> Self {
        Self { start, budget }
    }

    #[inline]
    pub const fn start(&self) -> u64 {
        self.start
    }

    /// True once more than the budget has elapsed at sample `now`.
    #[inline]
    pub const fn expired_at(&self, now: u64) -> bool {
        elapsed_ticks(self.start, now) > self.budget
    }

    pub fn expired<C: TickCounter>(&self, clock: &mut C) -> bool {
        self.expired_at(clock.ticks())
    }
}
