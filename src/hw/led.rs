// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Status LED bank.
//!
//! The firmware keeps the desired level of every output line in a single 32-bit mask and writes
//! the whole mask out on each change. [`OutputBank`] is the hardware side of that write;
//! [`PinBank`] implements it for a fixed array of GPIO pins.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Whether the LED is driven active-high or active-low on the board wiring.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ActiveLevel {
    High,
    Low,
}

/// A bank of discrete outputs driven from a bit mask.
pub trait OutputBank {
    type Error;

    /// Drive every line from `mask`; bit `i` is line `i + 1`.
    fn write_mask(&mut self, mask: u32) -> Result<(), Self::Error>;
}

/// `N` GPIO pins forming one output bank. Bits at or above `N` are ignored.
pub struct PinBank<P: OutputPin, const N: usize> {
    pins: [P; N],
    active: ActiveLevel,
}

impl<P: OutputPin, const N: usize> PinBank<P, N> {
    pub fn new(pins: [P; N], active: ActiveLevel) -> Self {
        Self { pins, active }
    }

    pub fn active_high(pins: [P; N]) -> Self {
        Self::new(pins, ActiveLevel::High)
    }

    pub fn active_low(pins: [P; N]) -> Self {
        Self::new(pins, ActiveLevel::Low)
    }

    pub fn free(self) -> [P; N] {
        self.pins
    }
}

impl<P: OutputPin, const N: usize> OutputBank for PinBank<P, N> {
    type Error = P::Error;

    fn write_mask(&mut self, mask: u32) -> Result<(), Self::Error> {
        for (i, pin) in self.pins.iter_mut().enumerate().take(32) {
            let on = mask & (1 << i) != 0;
            match (self.active, on) {
                (ActiveLevel::High, true) | (ActiveLevel::Low, false) => pin.set_high()?,
                (ActiveLevel::High, false) | (ActiveLevel::Low, true) => pin.set_low()?,
            }
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LedError<E> {
    /// Line index outside `1..=32`.
    LineOutOfRange(u8),
    /// The bank rejected the write.
    Output(E),
}

impl<E> From<E> for LedError<E> {
    fn from(e: E) -> Self {
        LedError::Output(e)
    }
}

/// Output mask plus the bank it drives.
pub struct LedBank<B: OutputBank> {
    bank: B,
    state: u32,
}

impl<B: OutputBank> LedBank<B> {
    /// Wrap a bank, starting with every line off. Nothing is written until the first change.
    pub fn new(bank: B) -> Self {
        Self { bank, state: 0 }
    }

    #[inline]
    pub fn mask(&self) -> u32 {
        self.state
    }

    /// Flip 1-based line `line` and write the updated mask.
    pub fn toggle(&mut self, line: u8) -> Result<(), LedError<B::Error>> {
        if line == 0 || line > 32 {
            return Err(LedError::LineOutOfRange(line));
        }
        self.set_mask(self.state ^ (1u32 << (line - 1)))?;
        Ok(())
    }

    /// Replace the whole mask and write it. The stored mask only changes once the write lands.
    pub fn set_mask(&mut self, mask: u32) -> Result<(), B::Error> {
        self.bank.write_mask(mask)?;
        self.state = mask;
        Ok(())
    }

    /// Alternate `on_mask` and its complement `times` times, holding each for `half_period_us`.
    ///
    /// Leaves the bank on the complement, as the last half-cycle wrote it.
    pub fn blink<D: DelayNs>(
        &mut self,
        delay: &mut D,
        on_mask: u32,
        times: u32,
        half_period_us: u32,
    ) -> Result<(), B::Error> {
        for _ in 0..times {
            self.set_mask(on_mask)?;
            delay.delay_us(half_period_us);
            self.set_mask(!on_mask)?;
            delay.delay_us(half_period_us);
        }
        Ok(())
    }

    pub fn free(self) -> B {
        self.bank
    }
}
