// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! SysTick busy-wait delay behind `embedded_hal::delay::DelayNs`.

use cortex_m::delay::Delay;
use embedded_hal::delay::DelayNs;

pub struct SysTickDelay {
    delay: Delay,
}

impl SysTickDelay {
    pub fn new(delay: Delay) -> Self {
        Self { delay }
    }

    pub fn free(self) -> Delay {
        self.delay
    }
}

impl DelayNs for SysTickDelay {
    /// SysTick resolution is one microsecond; round up.
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
