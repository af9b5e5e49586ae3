// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the raw `hw/` layer and below the
//! application logic. They are written against the `embedded-hal` 1.0 traits, so the same code
//! runs against the board peripherals and against mocks on the host.
//!
//! ## Existing drivers
//!
//! - [`adxl362`] – Analog Devices ADXL362 3-axis accelerometer (SPI)
//! - [`mpu6500`] – InvenSense MPU6500 6-axis IMU (SPI)
//! - [`hcsr04`] – HC-SR04 ultrasonic ranger (trigger/echo GPIO)

pub mod adxl362;
pub mod hcsr04;
pub mod mpu6500;

pub use adxl362::Adxl362;
pub use hcsr04::{EchoPulse, Hcsr04, RangeError};
pub use mpu6500::{GyroScale, Mpu6500};

/// Three-axis sample.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T> Vector3<T> {
    #[inline]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Apply `f` to each axis.
    #[inline]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Vector3<U> {
        Vector3 {
            x: f(self.x),
            y: f(self.y),
            z: f(self.z),
        }
    }
}
