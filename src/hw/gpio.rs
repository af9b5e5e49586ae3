// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! GPIO lines exposed through the `embedded-hal` 1.0 digital traits.
//!
//! The HAL pins drive and sample infallibly through inherent methods; these wrappers forward to
//! them so the ranger and the LED bank can stay generic.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use stm32f7xx_hal::gpio::{self, ErasedPin, Input, Output, PushPull};

/// Push-pull output on a fixed pin.
pub struct OutputLine<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Output<PushPull>>,
}

impl<const P: char, const N: u8> OutputLine<P, N> {
    /// Configure as push-pull output, driven low.
    pub fn new<MODE>(pin: gpio::Pin<P, N, MODE>) -> Self {
        let mut pin = pin.into_push_pull_output();
        pin.set_low();
        Self { pin }
    }

    pub fn free(self) -> gpio::Pin<P, N, Output<PushPull>> {
        self.pin
    }
}

impl<const P: char, const N: u8> ErrorType for OutputLine<P, N> {
    type Error = Infallible;
}

impl<const P: char, const N: u8> OutputPin for OutputLine<P, N> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.pin.set_low();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.pin.set_high();
        Ok(())
    }
}

/// Push-pull output with the port and pin number erased, so LEDs on different pins can share an
/// array.
pub struct ErasedOutput {
    pin: ErasedPin<Output<PushPull>>,
}

impl ErasedOutput {
    pub fn new(pin: ErasedPin<Output<PushPull>>) -> Self {
        Self { pin }
    }
}

impl ErrorType for ErasedOutput {
    type Error = Infallible;
}

impl OutputPin for ErasedOutput {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.pin.set_low();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.pin.set_high();
        Ok(())
    }
}

/// Digital input on a fixed pin.
pub struct InputLine<const P: char, const N: u8, MODE> {
    pin: gpio::Pin<P, N, Input<MODE>>,
}

impl<const P: char, const N: u8, MODE> InputLine<P, N, MODE> {
    pub fn new(pin: gpio::Pin<P, N, Input<MODE>>) -> Self {
        Self { pin }
    }

    pub fn free(self) -> gpio::Pin<P, N, Input<MODE>> {
        self.pin
    }
}

impl<const P: char, const N: u8, MODE> ErrorType for InputLine<P, N, MODE> {
    type Error = Infallible;
}

impl<const P: char, const N: u8, MODE> InputPin for InputLine<P, N, MODE> {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.pin.is_high())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(self.pin.is_low())
    }
}
