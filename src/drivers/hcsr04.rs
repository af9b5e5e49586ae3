// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! HC-SR04 ultrasonic ranger on two GPIO lines.
//!
//! A measurement is a 10 µs pulse on TRIG followed by a busy-wait on ECHO: first for the rising
//! edge, then for the falling edge. Both waits are bounded by a deadline against the board's
//! monotonic tick counter; every interval is computed with [`elapsed_ticks`] so a counter wrap
//! mid-measurement still yields the right duration.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};

use crate::time::{elapsed_ticks, micros_to_ticks, ticks_to_micros, Deadline, TickCounter};

/// Which edge the sequencer was waiting for.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EchoPhase {
    Rise,
    Fall,
}

/// Error type for `Hcsr04` operations.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RangeError {
    /// ECHO did not reach the expected edge before the deadline.
    Timeout(EchoPhase),
    /// TRIG or ECHO pin access failed.
    Pin(digital::ErrorKind),
}

impl<E: digital::Error> From<E> for RangeError {
    fn from(e: E) -> Self {
        RangeError::Pin(e.kind())
    }
}

/// One completed echo measurement.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct EchoPulse {
    /// Microseconds from the start of the wait to the falling edge.
    pub duration_us: u32,
    /// Microseconds ECHO stayed high.
    pub width_us: u32,
}

impl EchoPulse {
    /// Round-trip echo width converted to one-way distance (343 m/s at 20 °C).
    #[inline]
    pub fn distance_mm(&self) -> u32 {
        ((self.width_us as u64 * 343) / 2_000) as u32
    }
}

#[inline]
fn saturate_u32(v: u64) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}

pub struct Hcsr04<TRIG, ECHO> {
    trig: TRIG,
    echo: ECHO,
}

impl<TRIG: OutputPin, ECHO: InputPin> Hcsr04<TRIG, ECHO> {
    pub fn new(trig: TRIG, echo: ECHO) -> Self {
        Self { trig, echo }
    }

    pub fn free(self) -> (TRIG, ECHO) {
        (self.trig, self.echo)
    }

    /// Drive TRIG high for `pulse_us`, then low.
    pub fn trigger<D: DelayNs>(&mut self, delay: &mut D, pulse_us: u32) -> Result<(), RangeError> {
        self.trig.set_high()?;
        delay.delay_us(pulse_us);
        self.trig.set_low()?;
        Ok(())
    }

    /// Wait for ECHO to rise and fall, giving each edge at most `timeout_us`.
    pub fn measure<C: TickCounter>(
        &mut self,
        clock: &mut C,
        timeout_us: u32,
    ) -> Result<EchoPulse, RangeError> {
        let hz = clock.frequency_hz();
        let budget = micros_to_ticks(timeout_us as u64, hz);

        let start = clock.ticks();
        let rise = Deadline::from_ticks(start, budget);
        while self.echo.is_low()? {
            if rise.expired(clock) {
                return Err(RangeError::Timeout(EchoPhase::Rise));
            }
        }

        let high_at = clock.ticks();
        let fall = Deadline::from_ticks(high_at, budget);
        while self.echo.is_high()? {
            if fall.expired(clock) {
                return Err(RangeError::Timeout(EchoPhase::Fall));
            }
        }
        let end = clock.ticks();

        Ok(EchoPulse {
            duration_us: saturate_u32(ticks_to_micros(elapsed_ticks(start, end), hz)),
            width_us: saturate_u32(ticks_to_micros(elapsed_ticks(high_at, end), hz)),
        })
    }
}
