// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Startup sequence.
//!
//! Runs once before the poll loop: blink the LED bank, reset and configure the ADXL362, bring up
//! the MPU6500, and report both device IDs on the console. Any failure here is fatal; the caller
//! logs it and never enters the loop.

use core::fmt::{self, Write};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::{self, SpiDevice};

use super::node::SensorNode;
use crate::config::{LED_ALL_ON, LED_BLINK_COUNT, LED_BLINK_HALF_PERIOD_US};
use crate::drivers::{adxl362, mpu6500};
use crate::hw::led::OutputBank;
use crate::time::TickCounter;

/// Sensor on the node.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Device {
    Adxl362,
    Mpu6500,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Device::Adxl362 => "ADXL362",
            Device::Mpu6500 => "MPU6500",
        })
    }
}

/// Error type for the startup sequence.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StartupError {
    /// SPI transfer to `device` failed.
    Spi(Device, spi::ErrorKind),
    /// The identity register did not hold the expected value.
    UnexpectedDeviceId { device: Device, expected: u8, found: u8 },
    /// The LED bank rejected a write.
    Leds,
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Spi(device, kind) => {
                write!(f, "{} SPI transfer failed: {:?}", device, kind)
            }
            StartupError::UnexpectedDeviceId {
                device,
                expected,
                found,
            } => write!(
                f,
                "{} device id mismatch: expected 0x{:02X}, found 0x{:02X}",
                device, expected, found
            ),
            StartupError::Leds => f.write_str("LED bank write failed"),
        }
    }
}

fn spi_err<E: spi::Error>(device: Device) -> impl FnOnce(E) -> StartupError {
    move |e| StartupError::Spi(device, e.kind())
}

fn expect_id(device: Device, expected: u8, found: u8) -> Result<(), StartupError> {
    if found == expected {
        Ok(())
    } else {
        Err(StartupError::UnexpectedDeviceId {
            device,
            expected,
            found,
        })
    }
}

impl<ACC, IMU, TRIG, ECHO, LEDS, CLK, DLY, W> SensorNode<ACC, IMU, TRIG, ECHO, LEDS, CLK, DLY, W>
where
    ACC: SpiDevice,
    IMU: SpiDevice,
    TRIG: OutputPin,
    ECHO: InputPin,
    LEDS: OutputBank,
    CLK: TickCounter,
    DLY: DelayNs,
    W: Write,
{
    /// Bring the sensors up. On error the node must not enter [`SensorNode::run`].
    pub fn start(&mut self) -> Result<(), StartupError> {
        self.devices
            .leds
            .blink(
                &mut self.delay,
                LED_ALL_ON,
                LED_BLINK_COUNT,
                LED_BLINK_HALF_PERIOD_US,
            )
            .map_err(|_| StartupError::Leds)?;

        let accel = &mut self.devices.accel;
        accel
            .soft_reset(&mut self.delay)
            .map_err(spi_err(Device::Adxl362))?;
        accel.init().map_err(spi_err(Device::Adxl362))?;
        let id = accel
            .read_device_id()
            .map_err(spi_err(Device::Adxl362))?;
        self.console.info(format_args!("Dev id is: {}", id));
        expect_id(Device::Adxl362, adxl362::DEVICE_ID, id)?;

        let id = self
            .devices
            .imu
            .init(&mut self.delay)
            .map_err(spi_err(Device::Mpu6500))?;
        self.console.info(format_args!("WHO_AM_I = 0x{:02X}", id));
        expect_id(Device::Mpu6500, mpu6500::DEVICE_ID, id)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::node::Devices;
    use crate::config::PollConfig;
    use crate::console::Console;
    use crate::drivers::{Adxl362, Hcsr04, Mpu6500};
    use crate::hw::led::LedBank;
    use crate::testing::{FailingSpi, RecordingBank, SharedClock};
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::Mock as PinMock;
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    fn frame(t: SpiTransaction<u8>) -> [SpiTransaction<u8>; 3] {
        [
            SpiTransaction::transaction_start(),
            t,
            SpiTransaction::transaction_end(),
        ]
    }

    fn adxl_bringup(id: u8) -> Vec<SpiTransaction<u8>> {
        let mut t = Vec::new();
        t.extend(frame(SpiTransaction::write_vec(vec![0x0A, 0x1F, 0x52])));
        t.extend(frame(SpiTransaction::write_vec(vec![0x0A, 0x2C, 0x13])));
        t.extend(frame(SpiTransaction::write_vec(vec![0x0A, 0x2D, 0x02])));
        t.extend(frame(SpiTransaction::transfer_in_place(
            vec![0x0B, 0x00, 0x00],
            vec![0x00, 0x00, id],
        )));
        t
    }

    fn mpu_bringup(id: u8) -> Vec<SpiTransaction<u8>> {
        let mut t = Vec::new();
        for (reg, val) in [(0x6B, 0x80), (0x6B, 0x01), (0x6A, 0x10), (0x1B, 0x00), (0x1C, 0x00)] {
            t.extend(frame(SpiTransaction::write_vec(vec![reg, val])));
        }
        t.extend(frame(SpiTransaction::transfer_in_place(
            vec![0xF5, 0x00],
            vec![0x00, id],
        )));
        t
    }

    type TestNode<ACC, IMU> = SensorNode<
        ACC,
        IMU,
        PinMock,
        PinMock,
        RecordingBank,
        SharedClock,
        NoopDelay,
        String,
    >;

    fn node<ACC: SpiDevice, IMU: SpiDevice>(accel: ACC, imu: IMU) -> TestNode<ACC, IMU> {
        let devices = Devices {
            accel: Adxl362::new(accel),
            imu: Mpu6500::new(imu),
            ranger: Hcsr04::new(PinMock::new(&[]), PinMock::new(&[])),
            leds: LedBank::new(RecordingBank::default()),
        };
        SensorNode::new(
            devices,
            SharedClock::new(0, 1, 1_000_000),
            NoopDelay::new(),
            Console::new(String::new()),
            PollConfig::default(),
        )
    }

    fn finish<ACC: SpiDevice, IMU: SpiDevice>(
        node: TestNode<ACC, IMU>,
    ) -> (ACC, IMU, Vec<u32>, String) {
        let (devices, _, _, console) = node.free();
        let (mut trig, mut echo) = devices.ranger.free();
        trig.done();
        echo.done();
        (
            devices.accel.free(),
            devices.imu.free(),
            devices.leds.free().writes,
            console.free(),
        )
    }

    #[test]
    fn healthy_startup_reports_ids() {
        let mut node = node(
            SpiMock::new(&adxl_bringup(0xAD)),
            SpiMock::new(&mpu_bringup(0x70)),
        );

        assert_eq!(node.start(), Ok(()));

        let (mut accel, mut imu, writes, log) = finish(node);
        accel.done();
        imu.done();
        assert_eq!(writes.len(), 2 * LED_BLINK_COUNT as usize);
        assert_eq!(writes[0], 0xFFFF);
        assert_eq!(writes[1], !0xFFFFu32);
        assert_eq!(log, "Dev id is: 173\r\nWHO_AM_I = 0x70\r\n");
    }

    #[test]
    fn wrong_accelerometer_id_is_fatal() {
        let mut node = node(SpiMock::new(&adxl_bringup(0x00)), SpiMock::new(&[]));

        assert_eq!(
            node.start(),
            Err(StartupError::UnexpectedDeviceId {
                device: Device::Adxl362,
                expected: 0xAD,
                found: 0x00,
            })
        );

        let (mut accel, mut imu, _, log) = finish(node);
        accel.done();
        imu.done();
        assert_eq!(log, "Dev id is: 0\r\n");
    }

    #[test]
    fn wrong_imu_id_is_fatal() {
        let mut node = node(
            SpiMock::new(&adxl_bringup(0xAD)),
            SpiMock::new(&mpu_bringup(0x71)),
        );

        let err = node.start().unwrap_err();
        assert_eq!(
            err,
            StartupError::UnexpectedDeviceId {
                device: Device::Mpu6500,
                expected: 0x70,
                found: 0x71,
            }
        );
        assert_eq!(
            format!("{}", err),
            "MPU6500 device id mismatch: expected 0x70, found 0x71"
        );

        let (mut accel, mut imu, _, _) = finish(node);
        accel.done();
        imu.done();
    }

    #[test]
    fn spi_failure_is_fatal() {
        let mut node = node(FailingSpi, FailingSpi);

        assert_eq!(
            node.start(),
            Err(StartupError::Spi(Device::Adxl362, spi::ErrorKind::ModeFault))
        );

        let (_, _, _, log) = finish(node);
        assert!(log.is_empty());
    }
}
