// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Sensor node context and poll loop.
//!
//! [`SensorNode`] owns every peripheral handle, the sample buffers and the console. Timing comes
//! from an injected [`DelayNs`] and [`TickCounter`], so the same loop runs on the board and under
//! host tests.

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::{Error as _, SpiDevice};

use crate::config::PollConfig;
use crate::console::{Console, Fixed2};
use crate::drivers::{Adxl362, EchoPulse, Hcsr04, Mpu6500, RangeError, Vector3};
use crate::hw::led::{LedBank, OutputBank};
use crate::time::TickCounter;

/// Device drivers making up the node.
pub struct Devices<ACC, IMU, TRIG, ECHO, LEDS: OutputBank> {
    pub accel: Adxl362<ACC>,
    pub imu: Mpu6500<IMU>,
    pub ranger: Hcsr04<TRIG, ECHO>,
    pub leds: LedBank<LEDS>,
}

/// Latest sensor values. Overwritten every cycle; a failed read leaves the previous value.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Samples {
    /// ADXL362 raw axes.
    pub accel: Vector3<i16>,
    /// MPU6500 accelerometer raw axes.
    pub imu_accel: Vector3<i16>,
    /// MPU6500 gyro raw axes.
    pub gyro: Vector3<i16>,
    /// Gyro in degrees per second.
    pub gyro_dps: Vector3<f32>,
    /// Last completed echo measurement.
    pub echo: Option<EchoPulse>,
}

/// Outcome of one poll cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PollReport {
    /// Cycle number, starting at 0 and wrapping.
    pub cycle: u32,
    pub samples: Samples,
    pub accel_ok: bool,
    pub imu_ok: bool,
    pub leds_ok: bool,
    pub range: Option<RangeError>,
}

pub struct SensorNode<ACC, IMU, TRIG, ECHO, LEDS, CLK, DLY, W>
where
    LEDS: OutputBank,
    W: Write,
{
    pub(crate) devices: Devices<ACC, IMU, TRIG, ECHO, LEDS>,
    pub(crate) clock: CLK,
    pub(crate) delay: DLY,
    pub(crate) console: Console<W>,
    config: PollConfig,
    samples: Samples,
    cycle: u32,
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
    pub fn new(
        devices: Devices<ACC, IMU, TRIG, ECHO, LEDS>,
        clock: CLK,
        delay: DLY,
        console: Console<W>,
        config: PollConfig,
    ) -> Self {
        Self {
            devices,
            clock,
            delay,
            console,
            config,
            samples: Samples::default(),
            cycle: 0,
        }
    }

    #[inline]
    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    #[inline]
    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    pub fn console(&mut self) -> &mut Console<W> {
        &mut self.console
    }

    pub fn leds(&self) -> &LedBank<LEDS> {
        &self.devices.leds
    }

    /// Tear down the node and return its constituent parts.
    pub fn free(self) -> (Devices<ACC, IMU, TRIG, ECHO, LEDS>, CLK, DLY, Console<W>) {
        (self.devices, self.clock, self.delay, self.console)
    }

    /// Run one cycle: accelerometer, IMU, gyro to LEDs, ranging, then the cycle delay.
    pub fn poll_once(&mut self) -> PollReport {
        let mut report = PollReport {
            cycle: self.cycle,
            ..PollReport::default()
        };
        self.cycle = self.cycle.wrapping_add(1);

        match self.devices.accel.read_xyz() {
            Ok(xyz) => {
                self.samples.accel = xyz;
                report.accel_ok = true;
            }
            Err(e) => self
                .console
                .warn(format_args!("ADXL362 read failed: {:?}", e.kind())),
        }

        match self.read_imu() {
            Ok((accel, gyro)) => {
                self.samples.imu_accel = accel;
                self.samples.gyro = gyro;
                self.samples.gyro_dps = self.devices.imu.gyro_to_dps(gyro);
                report.imu_ok = true;
                if self.config.report_gyro {
                    self.print_gyro();
                }
            }
            Err(e) => self
                .console
                .warn(format_args!("MPU6500 read failed: {:?}", e.kind())),
        }

        // Gyro X doubles as a diagnostic pattern on the LED bank (sign-extended).
        report.leds_ok = self
            .devices
            .leds
            .set_mask(self.samples.gyro.x as u32)
            .is_ok();

        match self.range() {
            Ok(pulse) => {
                self.samples.echo = Some(pulse);
                self.console.info(format_args!(
                    "Duration: {} us, distance: {} mm",
                    pulse.duration_us,
                    pulse.distance_mm()
                ));
            }
            Err(e) => {
                self.samples.echo = None;
                report.range = Some(e);
                self.console.warn(format_args!("ranging failed: {:?}", e));
            }
        }
        self.delay.delay_us(self.config.echo_settle_us);

        self.delay.delay_us(self.config.cycle_delay_us);

        report.samples = self.samples;
        report
    }

    /// Poll forever. Only a reset or power loss ends the loop.
    pub fn run(&mut self) -> ! {
        loop {
            self.poll_once();
        }
    }

    fn read_imu(&mut self) -> Result<(Vector3<i16>, Vector3<i16>), IMU::Error> {
        let accel = self.devices.imu.read_accel()?;
        let gyro = self.devices.imu.read_gyro()?;
        Ok((accel, gyro))
    }

    fn range(&mut self) -> Result<EchoPulse, RangeError> {
        let cfg = self.config;
        self.devices
            .ranger
            .trigger(&mut self.delay, cfg.trigger_pulse_us)?;
        // allow echo to rise
        self.delay.delay_us(cfg.echo_settle_us);
        self.devices
            .ranger
            .measure(&mut self.clock, cfg.echo_timeout_us)
    }

    /// Print the gyro rate in `X=1.25 Y=-0.50 Z=0.00` form.
    pub fn print_gyro(&mut self) {
        let dps = self.samples.gyro_dps;
        self.console.info(format_args!(
            "GYRO: X={} Y={} Z={}",
            Fixed2(dps.x),
            Fixed2(dps.y),
            Fixed2(dps.z)
        ));
    }
}
