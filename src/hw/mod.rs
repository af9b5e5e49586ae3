// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Board support.
//!
//! `led` is portable and builds everywhere. The remaining modules wrap STM32F7 peripherals and only
//! build for the bare-metal target.

pub mod led;

#[cfg(target_os = "none")]
pub mod delay;
#[cfg(target_os = "none")]
pub mod gpio;
#[cfg(target_os = "none")]
pub mod pins;
#[cfg(target_os = "none")]
pub mod spi;
#[cfg(target_os = "none")]
pub mod timer;
#[cfg(target_os = "none")]
pub mod usart;

pub use led::{LedBank, PinBank};

#[cfg(target_os = "none")]
pub use delay::SysTickDelay;
#[cfg(target_os = "none")]
pub use gpio::{ErasedOutput, InputLine, OutputLine};
#[cfg(target_os = "none")]
pub use pins::BoardPins;
#[cfg(target_os = "none")]
pub use spi::{ChipSelect, ExclusiveDevice, SpiBus};
#[cfg(target_os = "none")]
pub use timer::CascadedTimer;
#[cfg(target_os = "none")]
pub use usart::Usart;
