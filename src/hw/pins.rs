// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the NUCLEO-F767ZI sensor node.
//!
//! | Function        | Pins                                  |
//! |-----------------|---------------------------------------|
//! | User LEDs       | PB0 (LD1), PB7 (LD2), PB14 (LD3)      |
//! | Console USART3  | PD8 TX, PD9 RX (ST-LINK VCP)          |
//! | ADXL362 on SPI1 | PA5 SCK, PA6 MISO, PA7 MOSI, PD14 CS  |
//! | MPU6500 on SPI4 | PE12 SCK, PE13 MISO, PE14 MOSI, PE11 CS |
//! | HC-SR04         | PF13 TRIG, PF14 ECHO                  |

use stm32f7xx_hal::{
    gpio::{
        gpioa, gpiod, gpioe, gpiof, Alternate, ErasedPin, Input, Output, PullDown, PushPull,
    },
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD, dp.GPIOE, dp.GPIOF);
/// ```
pub struct BoardPins {
    /// LED bank, line 1 first.
    pub leds: [ErasedPin<Output<PushPull>>; 3],
    pub usart3: Usart3Pins,
    pub spi1: Spi1Pins,
    pub spi4: Spi4Pins,
    pub ranger: RangerPins,
}

pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

/// SPI1 SCK/MISO/MOSI and ADXL362 CS
pub struct Spi1Pins {
    pub sck: gpioa::PA5<Alternate<5>>,
    pub miso: gpioa::PA6<Alternate<5>>,
    pub mosi: gpioa::PA7<Alternate<5>>,
    pub cs: gpiod::PD14<Output<PushPull>>,
}

/// SPI4 SCK/MISO/MOSI and MPU6500 CS
pub struct Spi4Pins {
    pub sck: gpioe::PE12<Alternate<5>>,
    pub miso: gpioe::PE13<Alternate<5>>,
    pub mosi: gpioe::PE14<Alternate<5>>,
    pub cs: gpioe::PE11<Output<PushPull>>,
}

/// Ultrasonic ranger trigger and echo
pub struct RangerPins {
    pub trig: gpiof::PF13<Output<PushPull>>,
    pub echo: gpiof::PF14<Input<PullDown>>,
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(
        gpioa: pac::GPIOA,
        gpiob: pac::GPIOB,
        gpiod: pac::GPIOD,
        gpioe: pac::GPIOE,
        gpiof: pac::GPIOF,
    ) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();
        let gpiof = gpiof.split();

        Self {
            leds: [
                gpiob.pb0.into_push_pull_output().erase(),
                gpiob.pb7.into_push_pull_output().erase(),
                gpiob.pb14.into_push_pull_output().erase(),
            ],

            usart3: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },

            spi1: Spi1Pins {
                sck: gpioa.pa5.into_alternate::<5>(),
                miso: gpioa.pa6.into_alternate::<5>(),
                mosi: gpioa.pa7.into_alternate::<5>(),
                cs: gpiod.pd14.into_push_pull_output(),
            },

            spi4: Spi4Pins {
                sck: gpioe.pe12.into_alternate::<5>(),
                miso: gpioe.pe13.into_alternate::<5>(),
                mosi: gpioe.pe14.into_alternate::<5>(),
                cs: gpioe.pe11.into_push_pull_output(),
            },

            ranger: RangerPins {
                trig: gpiof.pf13.into_push_pull_output(),
                echo: gpiof.pf14.into_pull_down_input(),
            },
        }
    }
}
