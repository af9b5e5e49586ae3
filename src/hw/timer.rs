// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Free-running 64-bit tick counter built from two cascaded 32-bit timers.
//!
//! TIM2 counts timer-clock ticks through its prescaler and emits TRGO on every overflow. TIM5 is
//! slaved to TIM2 (ITR0) in external clock mode 1, so it counts TIM2 overflows and holds the upper
//! 32 bits. Neither timer raises interrupts; software only resets, starts, and reads them.

use stm32f7xx_hal::pac;

use crate::time::TickCounter;

pub struct CascadedTimer {
    lo: pac::TIM2,
    hi: pac::TIM5,
    hz: u32,
}

impl CascadedTimer {
    /// Configure TIM2/TIM5 to tick at `tick_hz` from a `timer_clk_hz` kernel clock and start them
    /// from zero.
    pub fn new(lo: pac::TIM2, hi: pac::TIM5, timer_clk_hz: u32, tick_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr
            .modify(|_, w| w.tim2en().set_bit().tim5en().set_bit());

        // Disable counters while configuring
        lo.cr1.modify(|_, w| w.cen().clear_bit());
        hi.cr1.modify(|_, w| w.cen().clear_bit());

        let psc = (timer_clk_hz / tick_hz.max(1)).saturating_sub(1).min(0xFFFF);
        lo.psc.write(|w| unsafe { w.psc().bits(psc as u16) });
        lo.arr.write(|w| w.bits(0xFFFF_FFFF));
        // Master mode: TRGO on update (overflow)
        lo.cr2.modify(|_, w| unsafe { w.mms().bits(0b010) });

        hi.psc.write(|w| unsafe { w.psc().bits(0) });
        hi.arr.write(|w| w.bits(0xFFFF_FFFF));
        // Slave mode: external clock mode 1, trigger ITR0 (TIM2 TRGO)
        hi.smcr
            .modify(|_, w| unsafe { w.ts().bits(0b000).sms().bits(0b111) });

        // Latch prescalers, then reset both halves
        lo.egr.write(|w| w.ug().set_bit());
        hi.egr.write(|w| w.ug().set_bit());
        lo.cnt.write(|w| w.bits(0));
        hi.cnt.write(|w| w.bits(0));

        // Start the upper half first so no overflow is missed
        hi.cr1.modify(|_, w| w.cen().set_bit());
        lo.cr1.modify(|_, w| w.cen().set_bit());

        Self {
            lo,
            hi,
            hz: tick_hz,
        }
    }

    /// Stop both timers and zero them.
    pub fn reset(&mut self) {
        self.lo.cr1.modify(|_, w| w.cen().clear_bit());
        self.lo.cnt.write(|w| w.bits(0));
        self.hi.cnt.write(|w| w.bits(0));
        self.lo.cr1.modify(|_, w| w.cen().set_bit());
    }

    /// Consume the wrapper and return the underlying timer peripherals.
    pub fn free(self) -> (pac::TIM2, pac::TIM5) {
        (self.lo, self.hi)
    }
}

impl TickCounter for CascadedTimer {
    /// Read high, low, high again; retry if the low half overflowed in between.
    fn ticks(&mut self) -> u64 {
        loop {
            let hi = self.hi.cnt.read().bits();
            let lo = self.lo.cnt.read().bits();
            if self.hi.cnt.read().bits() == hi {
                return ((hi as u64) << 32) | lo as u64;
            }
        }
    }

    fn frequency_hz(&self) -> u32 {
        self.hz
    }
}
