// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Serial Peripheral Interface (SPI) abstraction layer.
//!
//! - `SpiBus` wraps a configured HAL SPI instance with 8-bit words.
//! - `ChipSelect` is an active-low GPIO output wrapper for manual CS control.
//! - `ExclusiveDevice` pairs one bus with one chip select and implements the `embedded-hal` 1.0
//!   `SpiDevice` trait the sensor drivers are written against. Each sensor sits alone on its own
//!   SPI peripheral, so no bus sharing is needed.

use embedded_hal::spi::{self as eh_spi, ErrorKind, Operation, SpiDevice};
use stm32f7xx_hal::{
    gpio::{self, Output, PinState, PushPull},
    prelude::*,
    spi::{self, Enabled, Spi},
};

/// Wrapper around an enabled HAL SPI instance (8-bit words).
pub struct SpiBus<I, P> {
    spi: Spi<I, P, Enabled<u8>>,
}

impl<I, P> SpiBus<I, P>
where
    I: spi::Instance,
    P: spi::Pins<I>,
{
    pub fn new(spi: Spi<I, P, Enabled<u8>>) -> Self {
        Self { spi }
    }

    /// Perform a blocking, full-duplex transfer of one byte.
    pub fn transfer_byte(&mut self, byte: u8) -> Result<u8, spi::Error> {
        let mut tmp = [byte];
        self.spi.transfer(&mut tmp)?;
        Ok(tmp[0])
    }

    /// Transfer a byte buffer in-place.
    pub fn transfer_in_place(&mut self, buf: &mut [u8]) -> Result<(), spi::Error> {
        for b in buf.iter_mut() {
            *b = self.transfer_byte(*b)?;
        }
        Ok(())
    }

    pub fn free(self) -> Spi<I, P, Enabled<u8>> {
        self.spi
    }
}

/// Manual chip-select line, active-low, generic over any GPIO pin.
pub struct ChipSelect<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Output<PushPull>>,
}

impl<const P: char, const N: u8> ChipSelect<P, N> {
    /// Create an active-low chip select and set to the inactive state (i.e., high).
    pub fn active_low<MODE>(pin: gpio::Pin<P, N, MODE>) -> Self {
        let mut pin = pin.into_push_pull_output();
        pin.set_state(PinState::High);
        Self { pin }
    }

    /// Assert the chip select.
    #[inline]
    pub fn select(&mut self) {
        self.pin.set_low();
    }

    /// Deassert the chip select.
    #[inline]
    pub fn deselect(&mut self) {
        self.pin.set_high();
    }

    pub fn free(self) -> gpio::Pin<P, N, Output<PushPull>> {
        self.pin
    }
}

/// HAL SPI error surfaced through `embedded-hal`.
#[derive(Debug)]
pub struct SpiError(pub spi::Error);

impl eh_spi::Error for SpiError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// One SPI bus owned by a single device with its chip select.
pub struct ExclusiveDevice<I, P, const CP: char, const CN: u8> {
    bus: SpiBus<I, P>,
    cs: ChipSelect<CP, CN>,
    sysclk_hz: u32,
}

impl<I, P, const CP: char, const CN: u8> ExclusiveDevice<I, P, CP, CN>
where
    I: spi::Instance,
    P: spi::Pins<I>,
{
    /// `sysclk_hz` scales in-transaction delays into core cycles.
    pub fn new(bus: SpiBus<I, P>, cs: ChipSelect<CP, CN>, sysclk_hz: u32) -> Self {
        Self { bus, cs, sysclk_hz }
    }

    pub fn free(self) -> (SpiBus<I, P>, ChipSelect<CP, CN>) {
        (self.bus, self.cs)
    }

    fn run(&mut self, op: &mut Operation<'_, u8>) -> Result<(), spi::Error> {
        match op {
            Operation::Read(buf) => {
                for b in buf.iter_mut() {
                    *b = self.bus.transfer_byte(0x00)?;
                }
            }
            Operation::Write(buf) => {
                for &b in buf.iter() {
                    self.bus.transfer_byte(b)?;
                }
            }
            Operation::Transfer(read, write) => {
                for i in 0..read.len().max(write.len()) {
                    let out = write.get(i).copied().unwrap_or(0x00);
                    let v = self.bus.transfer_byte(out)?;
                    if let Some(slot) = read.get_mut(i) {
                        *slot = v;
                    }
                }
            }
            Operation::TransferInPlace(buf) => self.bus.transfer_in_place(buf)?,
            Operation::DelayNs(ns) => {
                let cycles = (*ns as u64 * self.sysclk_hz as u64) / 1_000_000_000 + 1;
                cortex_m::asm::delay(cycles.min(u32::MAX as u64) as u32);
            }
        }
        Ok(())
    }
}

impl<I, P, const CP: char, const CN: u8> eh_spi::ErrorType for ExclusiveDevice<I, P, CP, CN> {
    type Error = SpiError;
}

impl<I, P, const CP: char, const CN: u8> SpiDevice for ExclusiveDevice<I, P, CP, CN>
where
    I: spi::Instance,
    P: spi::Pins<I>,
{
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), SpiError> {
        self.cs.select();
        let mut result = Ok(());
        for op in operations.iter_mut() {
            result = self.run(op);
            if result.is_err() {
                break;
            }
        }
        // Release CS even when a transfer failed.
        self.cs.deselect();
        result.map_err(SpiError)
    }
}
