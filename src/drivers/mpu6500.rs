// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! MPU6500 SPI IMU driver.
//!
//! Register reads set bit 7 of the address byte; writes clear it. Sample registers are big-endian
//! and laid out X, Y, Z, so one burst read of six bytes returns a full triplet.

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::SpiDevice;

use super::Vector3;

// Register addresses
pub mod reg {
    pub const GYRO_CONFIG: u8 = 0x1B;
    pub const ACCEL_CONFIG: u8 = 0x1C;
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    pub const TEMP_OUT_H: u8 = 0x41;
    pub const GYRO_XOUT_H: u8 = 0x43;
    pub const USER_CTRL: u8 = 0x6A;
    pub const PWR_MGMT_1: u8 = 0x6B;
    pub const WHO_AM_I: u8 = 0x75;
}

/// Value of `WHO_AM_I`.
pub const DEVICE_ID: u8 = 0x70;

const READ_FLAG: u8 = 0x80;

const PWR_MGMT_1_RESET: u8 = 0x80;
/// Auto-select the best available clock (PLL once the gyro is up).
const PWR_MGMT_1_CLKSEL_AUTO: u8 = 0x01;
/// Disable the I2C slave so the part stays in SPI mode.
const USER_CTRL_I2C_IF_DIS: u8 = 0x10;

/// Gyroscope full-scale range.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum GyroScale {
    #[default]
    Dps250,
    Dps500,
    Dps1000,
    Dps2000,
}

impl GyroScale {
    /// `FS_SEL` field value for `GYRO_CONFIG` (bits 4:3).
    #[inline]
    pub fn config_bits(self) -> u8 {
        let fs_sel = match self {
            GyroScale::Dps250 => 0,
            GyroScale::Dps500 => 1,
            GyroScale::Dps1000 => 2,
            GyroScale::Dps2000 => 3,
        };
        fs_sel << 3
    }

    /// Sensitivity in LSB per degree per second.
    #[inline]
    pub fn lsb_per_dps(self) -> f32 {
        match self {
            GyroScale::Dps250 => 131.0,
            GyroScale::Dps500 => 65.5,
            GyroScale::Dps1000 => 32.8,
            GyroScale::Dps2000 => 16.4,
        }
    }

    /// Convert a raw gyro triplet to degrees per second.
    pub fn to_dps(self, raw: Vector3<i16>) -> Vector3<f32> {
        let scale = self.lsb_per_dps();
        raw.map(|v| v as f32 / scale)
    }
}

/// MPU6500 on its own SPI device (bus + chip select).
pub struct Mpu6500<SPI> {
    spi: SPI,
    gyro_scale: GyroScale,
}

impl<SPI: SpiDevice> Mpu6500<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self {
            spi,
            gyro_scale: GyroScale::default(),
        }
    }

    /// Select the gyro range programmed by [`Self::init`].
    pub fn with_gyro_scale(mut self, scale: GyroScale) -> Self {
        self.gyro_scale = scale;
        self
    }

    #[inline]
    pub fn gyro_scale(&self) -> GyroScale {
        self.gyro_scale
    }

    pub fn free(self) -> SPI {
        self.spi
    }

    pub fn write_reg(&mut self, addr: u8, value: u8) -> Result<(), SPI::Error> {
        self.spi.write(&[addr & !READ_FLAG, value])
    }

    pub fn read_reg(&mut self, addr: u8) -> Result<u8, SPI::Error> {
        let mut buf = [addr | READ_FLAG, 0x00];
        self.spi.transfer_in_place(&mut buf)?;
        Ok(buf[1])
    }

    /// Burst-read three big-endian 16-bit words starting at `addr`.
    fn read_triplet(&mut self, addr: u8) -> Result<Vector3<i16>, SPI::Error> {
        let mut buf = [0u8; 7];
        buf[0] = addr | READ_FLAG;
        self.spi.transfer_in_place(&mut buf)?;

        Ok(Vector3::new(
            i16::from_be_bytes([buf[1], buf[2]]),
            i16::from_be_bytes([buf[3], buf[4]]),
            i16::from_be_bytes([buf[5], buf[6]]),
        ))
    }

    /// Reset the device, select SPI mode, program ranges and return `WHO_AM_I`.
    ///
    /// The identity is returned rather than checked so the caller can report it.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<u8, SPI::Error> {
        self.write_reg(reg::PWR_MGMT_1, PWR_MGMT_1_RESET)?;
        delay.delay_ms(100);
        self.write_reg(reg::PWR_MGMT_1, PWR_MGMT_1_CLKSEL_AUTO)?;
        self.write_reg(reg::USER_CTRL, USER_CTRL_I2C_IF_DIS)?;
        self.write_reg(reg::GYRO_CONFIG, self.gyro_scale.config_bits())?;
        // ±2 g
        self.write_reg(reg::ACCEL_CONFIG, 0x00)?;
        delay.delay_ms(1);
        self.read_device_id()
    }

    pub fn read_device_id(&mut self) -> Result<u8, SPI::Error> {
        self.read_reg(reg::WHO_AM_I)
    }

    pub fn read_accel(&mut self) -> Result<Vector3<i16>, SPI::Error> {
        self.read_triplet(reg::ACCEL_XOUT_H)
    }

    pub fn read_gyro(&mut self) -> Result<Vector3<i16>, SPI::Error> {
        self.read_triplet(reg::GYRO_XOUT_H)
    }

    /// Convert a raw gyro sample using the configured range.
    #[inline]
    pub fn gyro_to_dps(&self, raw: Vector3<i16>) -> Vector3<f32> {
        self.gyro_scale.to_dps(raw)
    }
}
