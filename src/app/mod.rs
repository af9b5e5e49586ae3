// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Application
//!
//! The sensor node itself: one owned context holding every device, a startup sequence, and the
//! fixed-order poll loop.
//!
//! ## Modules
//!
//! - [`node`] - `SensorNode` context and the poll loop.
//! - [`startup`] - One-shot bring-up with fatal error reporting.

pub mod node;
pub mod startup;

pub use node::{Devices, PollReport, Samples, SensorNode};
pub use startup::{Device, StartupError};
