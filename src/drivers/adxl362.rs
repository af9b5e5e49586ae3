// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! ADXL362 SPI accelerometer driver.
//!
//! Every access is a single chip-select frame: a command byte (`0x0A` write, `0x0B` read), the
//! register address, then data. Multi-byte reads auto-increment the address, so one frame fetches
//! all three axes.

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::SpiDevice;

use super::Vector3;

/// SPI command bytes.
pub mod cmd {
    pub const WRITE_REG: u8 = 0x0A;
    pub const READ_REG: u8 = 0x0B;
}

// Register addresses
pub mod reg {
    pub const DEVID_AD: u8 = 0x00;
    pub const DEVID_MST: u8 = 0x01;
    pub const PARTID: u8 = 0x02;
    pub const STATUS: u8 = 0x0B;
    pub const XDATA_L: u8 = 0x0E;
    pub const SOFT_RESET: u8 = 0x1F;
    pub const FILTER_CTL: u8 = 0x2C;
    pub const POWER_CTL: u8 = 0x2D;
}

/// Value of `DEVID_AD`.
pub const DEVICE_ID: u8 = 0xAD;

/// Writing this to `SOFT_RESET` resets the part.
const SOFT_RESET_KEY: u8 = 0x52;

/// ±2 g range, 100 Hz output data rate.
const FILTER_CTL_2G_100HZ: u8 = 0x13;

/// `POWER_CTL` measurement mode.
const POWER_CTL_MEASURE: u8 = 0x02;

/// ADXL362 on its own SPI device (bus + chip select).
pub struct Adxl362<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> Adxl362<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    pub fn free(self) -> SPI {
        self.spi
    }

    pub fn write_reg(&mut self, addr: u8, value: u8) -> Result<(), SPI::Error> {
        self.spi.write(&[cmd::WRITE_REG, addr, value])
    }

    pub fn read_reg(&mut self, addr: u8) -> Result<u8, SPI::Error> {
        let mut buf = [cmd::READ_REG, addr, 0x00];
        self.spi.transfer_in_place(&mut buf)?;
        Ok(buf[2])
    }

    /// Reset the part and wait for it to come back.
    pub fn soft_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), SPI::Error> {
        self.write_reg(reg::SOFT_RESET, SOFT_RESET_KEY)?;
        delay.delay_ms(1);
        Ok(())
    }

    /// Configure ±2 g at 100 Hz and enter measurement mode.
    pub fn init(&mut self) -> Result<(), SPI::Error> {
        self.write_reg(reg::FILTER_CTL, FILTER_CTL_2G_100HZ)?;
        self.write_reg(reg::POWER_CTL, POWER_CTL_MEASURE)
    }

    /// Read `DEVID_AD`; [`DEVICE_ID`] on a healthy part.
    pub fn read_device_id(&mut self) -> Result<u8, SPI::Error> {
        self.read_reg(reg::DEVID_AD)
    }

    /// Read the 12-bit sign-extended X/Y/Z data registers.
    pub fn read_xyz(&mut self) -> Result<Vector3<i16>, SPI::Error> {
        let mut buf = [0u8; 8];
        buf[0] = cmd::READ_REG;
        buf[1] = reg::XDATA_L;
        self.spi.transfer_in_place(&mut buf)?;

        Ok(Vector3::new(
            i16::from_le_bytes([buf[2], buf[3]]),
            i16::from_le_bytes([buf[4], buf[5]]),
            i16::from_le_bytes([buf[6], buf[7]]),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    #[test]
    fn reset_and_init_sequence() {
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x0A, 0x1F, 0x52]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x0A, 0x2C, 0x13]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x0A, 0x2D, 0x02]),
            SpiTransaction::transaction_end(),
        ];
        let mut accel = Adxl362::new(SpiMock::new(&expectations));

        accel.soft_reset(&mut NoopDelay::new()).unwrap();
        accel.init().unwrap();

        accel.free().done();
    }

    #[test]
    fn device_id_read() {
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::transfer_in_place(vec![0x0B, 0x00, 0x00], vec![0x00, 0x00, 0xAD]),
            SpiTransaction::transaction_end(),
        ];
        let mut accel = Adxl362::new(SpiMock::new(&expectations));

        assert_eq!(accel.read_device_id().unwrap(), DEVICE_ID);

        accel.free().done();
    }

    #[test]
    fn xyz_is_little_endian_per_axis() {
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::transfer_in_place(
                vec![0x0B, 0x0E, 0, 0, 0, 0, 0, 0],
                vec![0x00, 0x00, 0x10, 0x00, 0xF0, 0xFF, 0xE8, 0x03],
            ),
            SpiTransaction::transaction_end(),
        ];
        let mut accel = Adxl362::new(SpiMock::new(&expectations));

        assert_eq!(accel.read_xyz().unwrap(), Vector3::new(16, -16, 1000));

        accel.free().done();
    }
}
