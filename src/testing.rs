// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Host-side fakes shared by the unit tests.

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use core::fmt;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::spi::{self, Operation, SpiDevice};

use crate::hw::led::OutputBank;
use crate::time::TickCounter;

/// Tick counter advancing by `step` on each read. Clones share the same time.
#[derive(Clone)]
pub struct SharedClock {
    pub now: Rc<Cell<u64>>,
    pub step: u64,
    pub hz: u32,
}

impl SharedClock {
    pub fn new(start: u64, step: u64, hz: u32) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
            step,
            hz,
        }
    }
}

impl TickCounter for SharedClock {
    fn ticks(&mut self) -> u64 {
        let t = self.now.get();
        self.now.set(t.wrapping_add(self.step));
        t
    }

    fn frequency_hz(&self) -> u32 {
        self.hz
    }
}

/// Echo line driven by a [`SharedClock`]: high while `now - base` lies in `[rise, fall)`.
pub struct ScriptedEcho {
    now: Rc<Cell<u64>>,
    base: u64,
    rise: Option<u64>,
    fall: Option<u64>,
}

impl ScriptedEcho {
    pub fn new(clock: &SharedClock, rise: Option<u64>, fall: Option<u64>) -> Self {
        Self {
            now: clock.now.clone(),
            base: clock.now.get(),
            rise,
            fall,
        }
    }
}

impl digital::ErrorType for ScriptedEcho {
    type Error = Infallible;
}

impl InputPin for ScriptedEcho {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        let t = self.now.get().wrapping_sub(self.base);
        let risen = self.rise.map_or(false, |r| t >= r);
        let fallen = self.fall.map_or(false, |f| t >= f);
        Ok(risen && !fallen)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|h| !h)
    }
}

/// Output bank that records every mask written to it.
#[derive(Default)]
pub struct RecordingBank {
    pub writes: Vec<u32>,
}

impl OutputBank for RecordingBank {
    type Error = Infallible;

    fn write_mask(&mut self, mask: u32) -> Result<(), Infallible> {
        self.writes.push(mask);
        Ok(())
    }
}

/// Delay that records each requested wait in nanoseconds.
#[derive(Default)]
pub struct RecordingDelay {
    pub waits_ns: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_ns.push(ns);
    }
}

/// SPI device whose every transaction fails.
pub struct FailingSpi;

impl spi::ErrorType for FailingSpi {
    type Error = spi::ErrorKind;
}

impl SpiDevice for FailingSpi {
    fn transaction(&mut self, _operations: &mut [Operation<'_, u8>]) -> Result<(), spi::ErrorKind> {
        Err(spi::ErrorKind::ModeFault)
    }
}

/// Error returned by [`FlakyBank`] while failing.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BankFault;

/// Output bank that rejects writes while its shared flag is set. Only accepted writes are kept.
pub struct FlakyBank {
    fail: Rc<Cell<bool>>,
    pub writes: Vec<u32>,
}

impl FlakyBank {
    pub fn new() -> (Self, Rc<Cell<bool>>) {
        let fail = Rc::new(Cell::new(false));
        let bank = Self {
            fail: fail.clone(),
            writes: Vec::new(),
        };
        (bank, fail)
    }
}

impl OutputBank for FlakyBank {
    type Error = BankFault;

    fn write_mask(&mut self, mask: u32) -> Result<(), BankFault> {
        if self.fail.get() {
            return Err(BankFault);
        }
        self.writes.push(mask);
        Ok(())
    }
}

/// Ordered record of device accesses shared by every [`Traced`] wrapper in a test.
pub type EventLog = Rc<RefCell<Vec<String>>>;

/// Wraps a device and appends each access, tagged, to a shared [`EventLog`].
///
/// SPI transactions record their command byte, outputs their level, banks their mask, delays
/// their length, and console sinks each completed line. Inputs are polled and not recorded.
pub struct Traced<T> {
    pub inner: T,
    tag: &'static str,
    log: EventLog,
}

impl<T> Traced<T> {
    pub fn new(inner: T, tag: &'static str, log: &EventLog) -> Self {
        Self {
            inner,
            tag,
            log: log.clone(),
        }
    }

    fn record(&self, detail: fmt::Arguments<'_>) {
        self.log.borrow_mut().push(format!("{} {}", self.tag, detail));
    }
}

impl<T: spi::ErrorType> spi::ErrorType for Traced<T> {
    type Error = T::Error;
}

impl<T: SpiDevice> SpiDevice for Traced<T> {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), T::Error> {
        let command = match operations.first() {
            Some(Operation::Write(buf)) => buf.first().copied(),
            Some(Operation::TransferInPlace(buf)) => buf.first().copied(),
            _ => None,
        };
        self.record(format_args!("0x{:02X}", command.unwrap_or(0)));
        self.inner.transaction(operations)
    }
}

impl<T: digital::ErrorType> digital::ErrorType for Traced<T> {
    type Error = T::Error;
}

impl<T: OutputPin> OutputPin for Traced<T> {
    fn set_low(&mut self) -> Result<(), T::Error> {
        self.record(format_args!("low"));
        self.inner.set_low()
    }

    fn set_high(&mut self) -> Result<(), T::Error> {
        self.record(format_args!("high"));
        self.inner.set_high()
    }
}

impl<T: OutputBank> OutputBank for Traced<T> {
    type Error = T::Error;

    fn write_mask(&mut self, mask: u32) -> Result<(), T::Error> {
        self.record(format_args!("0x{:08X}", mask));
        self.inner.write_mask(mask)
    }
}

impl<T: DelayNs> DelayNs for Traced<T> {
    fn delay_ns(&mut self, ns: u32) {
        self.record(format_args!("{}ns", ns));
        self.inner.delay_ns(ns);
    }
}

impl fmt::Write for Traced<String> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.push_str(s);
        if self.inner.ends_with("\r\n") {
            let line = self.inner.trim_end().to_string();
            self.record(format_args!("{}", line));
            self.inner.clear();
        }
        Ok(())
    }
}
