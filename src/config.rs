// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Compile-time configuration.
//!
//! There is no runtime configuration surface: the board topology is fixed, so every tunable lives
//! here as a constant and is gathered into [`PollConfig`] for the poll loop.

/// Rate of the cascaded TIM2/TIM5 tick counter.
pub const TIMER_FREQUENCY_HZ: u32 = 1_000_000;

/// Console baud rate (USART3 through the ST-LINK VCP).
pub const CONSOLE_BAUD: u32 = 115_200;

/// SPI clock for both sensor buses.
pub const SPI_CLOCK_HZ: u32 = 1_000_000;

/// Mask written to the LED bank for the "all on" half of the startup blink.
pub const LED_ALL_ON: u32 = 0xFFFF;

/// Number of on/off cycles of the startup blink.
pub const LED_BLINK_COUNT: u32 = 10;

/// Half-period of the startup blink.
pub const LED_BLINK_HALF_PERIOD_US: u32 = 10_000;

/// Width of the ultrasonic trigger pulse.
pub const TRIGGER_PULSE_US: u32 = 10;

/// Settle time after triggering and after measuring the echo.
pub const ECHO_SETTLE_US: u32 = 100;

/// Upper bound on each echo wait. The HC-SR04 holds echo high for ~38 ms when nothing is in range.
pub const ECHO_TIMEOUT_US: u32 = 38_000;

/// Pause at the end of each poll cycle.
pub const CYCLE_DELAY_US: u32 = 10_000;

/// Timing parameters for one poll cycle.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PollConfig {
    pub trigger_pulse_us: u32,
    pub echo_settle_us: u32,
    pub echo_timeout_us: u32,
    pub cycle_delay_us: u32,
    /// Print a `GYRO:` line each cycle.
    pub report_gyro: bool,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            trigger_pulse_us: TRIGGER_PULSE_US,
            echo_settle_us: ECHO_SETTLE_US,
            echo_timeout_us: ECHO_TIMEOUT_US,
            cycle_delay_us: CYCLE_DELAY_US,
            report_gyro: false,
        }
    }
}

impl PollConfig {
    pub fn with_echo_timeout(mut self, timeout_us: u32) -> Self {
        self.echo_timeout_us = timeout_us;
        self
    }

    pub fn with_cycle_delay(mut self, delay_us: u32) -> Self {
        self.cycle_delay_us = delay_us;
        self
    }

    pub fn with_gyro_report(mut self, enabled: bool) -> Self {
        self.report_gyro = enabled;
        self
    }
}
