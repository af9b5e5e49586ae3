// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # TriSense Firmware
//!
//! Bare-metal sensor node for the NUCLEO-F767ZI (STM32F767ZI). It samples an ADXL362
//! accelerometer and an MPU6500 IMU over SPI, ranges with an HC-SR04 ultrasonic sensor, drives a
//! bank of status LEDs from the gyro reading, and reports everything on a USART console.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`app`] | Startup sequence and the poll loop (`SensorNode`) |
//! | [`drivers`] | Device-level drivers (ADXL362, MPU6500, HC-SR04) |
//! | [`hw`] | LED bank plus MCU-level wrappers around USART, SPI, GPIO, timers |
//! | [`time`] | 64-bit tick counter trait, tick arithmetic, deadlines |
//! | [`console`] | Leveled line logging over any `core::fmt::Write` sink |
//! | [`config`] | Board constants and loop timing |
//!
//! Everything except the MCU wrappers in [`hw`] is written against `embedded-hal` 1.0 traits and is
//! unit tested on the host.
//!
//! ## Getting Started
//!
//! Build docs:
//!
//! ```bash
//! cargo doc --no-deps --open
//! ```
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test --lib
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod config;
pub mod console;
pub mod drivers;
pub mod hw;
pub mod time;

#[cfg(test)]
mod testing;
