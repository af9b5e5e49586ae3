// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Status console.
//!
//! Wraps any `core::fmt::Write` sink (the debug USART on the board, a `String` in tests) and
//! prints CRLF-terminated status lines with a level prefix. Write errors are dropped: the console
//! is informational and nothing downstream depends on it.

use core::fmt::{self, Write};
#[allow(unused_imports)]
use micromath::F32Ext;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    fn prefix(self) -> &'static str {
        match self {
            Level::Info => "",
            Level::Warn => "WARN: ",
            Level::Error => "ERROR: ",
        }
    }
}

pub struct Console<W: Write> {
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write one status line at `level`.
    pub fn log(&mut self, level: Level, args: fmt::Arguments<'_>) {
        let _ = self.out.write_str(level.prefix());
        let _ = self.out.write_fmt(args);
        let _ = self.out.write_str("\r\n");
    }

    #[inline]
    pub fn info(&mut self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    #[inline]
    pub fn warn(&mut self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args);
    }

    #[inline]
    pub fn error(&mut self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }

    pub fn free(self) -> W {
        self.out
    }
}

/// Fixed-point rendering with two decimals, e.g. `-1.25`.
///
/// Prints the integer part and the absolute hundredths separately so the sign survives values in
/// (-1, 0).
#[derive(Copy, Clone, Debug)]
pub struct Fixed2(pub f32);

impl fmt::Display for Fixed2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        let whole = v.trunc() as i32;
        let hundredths = ((v * 100.0) as i32 % 100).abs();
        if v < 0.0 && whole == 0 {
            f.write_str("-")?;
        }
        write!(f, "{}.{:02}", whole, hundredths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_prefixed_and_crlf_terminated() {
        let mut console = Console::new(String::new());
        console.info(format_args!("Duration: {} us", 580));
        console.warn(format_args!("echo timeout"));
        console.error(format_args!("spi"));
        assert_eq!(
            console.free(),
            "Duration: 580 us\r\nWARN: echo timeout\r\nERROR: spi\r\n"
        );
    }

    #[test]
    fn fixed2_formatting() {
        assert_eq!(format!("{}", Fixed2(1.25)), "1.25");
        assert_eq!(format!("{}", Fixed2(-3.5)), "-3.50");
        assert_eq!(format!("{}", Fixed2(-0.25)), "-0.25");
        assert_eq!(format!("{}", Fixed2(0.0)), "0.00");
    }
}
