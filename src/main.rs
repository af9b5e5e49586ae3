// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod firmware {
    use cortex_m::delay::Delay;
    use cortex_m_rt::entry;
    use panic_halt as _;

    use hal::{
        pac,
        prelude::*,
        serial::{Config, Serial},
        spi::{Mode, Phase, Polarity, Spi},
    };
    use stm32f7xx_hal as hal;

    use trisense::{
        app::{Devices, SensorNode},
        config::{self, PollConfig},
        console::Console,
        drivers::{Adxl362, Hcsr04, Mpu6500},
        hw::{
            BoardPins, CascadedTimer, ChipSelect, ErasedOutput, ExclusiveDevice, InputLine,
            LedBank, OutputLine, PinBank, SpiBus, SysTickDelay, Usart,
        },
    };

    #[entry]
    fn main() -> ! {
        // Peripherals
        let dp = pac::Peripherals::take().unwrap();
        let cp = cortex_m::Peripherals::take().unwrap();

        // Clocks
        let rcc = dp.RCC.constrain();
        let clocks = rcc.cfgr.freeze();
        let mut apb2 = rcc.apb2;
        let sysclk_hz = clocks.sysclk().raw();

        // 64-bit tick counter, running before anything else is brought up
        let clock = CascadedTimer::new(
            dp.TIM2,
            dp.TIM5,
            clocks.timclk1().raw(),
            config::TIMER_FREQUENCY_HZ,
        );
        let delay = SysTickDelay::new(Delay::new(cp.SYST, sysclk_hz));

        // GPIO
        let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD, dp.GPIOE, dp.GPIOF);

        // USART3 (ST-LINK VCP)
        let usart_cfg = Config {
            baud_rate: config::CONSOLE_BAUD.bps(),
            ..Default::default()
        };
        let serial = Serial::new(
            dp.USART3,
            (pins.usart3.tx, pins.usart3.rx),
            &clocks,
            usart_cfg,
        );
        let console = Console::new(Usart::new(serial));

        // SPI1: ADXL362, mode 0
        let mode0 = Mode {
            polarity: Polarity::IdleLow,
            phase: Phase::CaptureOnFirstTransition,
        };
        let spi1 = Spi::new(dp.SPI1, (pins.spi1.sck, pins.spi1.miso, pins.spi1.mosi))
            .enable::<u8>(mode0, config::SPI_CLOCK_HZ.Hz(), &clocks, &mut apb2);
        let accel = Adxl362::new(ExclusiveDevice::new(
            SpiBus::new(spi1),
            ChipSelect::active_low(pins.spi1.cs),
            sysclk_hz,
        ));

        // SPI4: MPU6500, mode 3
        let mode3 = Mode {
            polarity: Polarity::IdleHigh,
            phase: Phase::CaptureOnSecondTransition,
        };
        let spi4 = Spi::new(dp.SPI4, (pins.spi4.sck, pins.spi4.miso, pins.spi4.mosi))
            .enable::<u8>(mode3, config::SPI_CLOCK_HZ.Hz(), &clocks, &mut apb2);
        let imu = Mpu6500::new(ExclusiveDevice::new(
            SpiBus::new(spi4),
            ChipSelect::active_low(pins.spi4.cs),
            sysclk_hz,
        ));

        // HC-SR04
        let ranger = Hcsr04::new(
            OutputLine::new(pins.ranger.trig),
            InputLine::new(pins.ranger.echo),
        );

        // LED bank
        let leds = LedBank::new(PinBank::active_high(pins.leds.map(ErasedOutput::new)));

        let devices = Devices {
            accel,
            imu,
            ranger,
            leds,
        };
        let mut node = SensorNode::new(devices, clock, delay, console, PollConfig::default());

        if let Err(e) = node.start() {
            node.console().error(format_args!("startup failed: {}", e));
            loop {
                cortex_m::asm::nop();
            }
        }

        node.run()
    }
}

#[cfg(not(target_os = "none"))]
fn main() {}
