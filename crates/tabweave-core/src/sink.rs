#![forbid(unsafe_code)]

//! Sink abstraction and the table command surface.
//!
//! A [`UnitSink`] is anywhere rendered code units can go. The common byte
//! writers (`Vec<u8>`, files, buffered and locked standard streams) are
//! sinks directly, [`WriterSink`] adapts any other [`io::Write`], and
//! `Vec<u16>` and `String` serve the wide unit types. A
//! [`Tabulator`](crate::tabulator::Tabulator) is itself a sink, which is
//! what makes nesting one table inside another's cell work without any
//! coordination.
//!
//! [`TableCommand`] is the control channel riding alongside the character
//! stream. Generic code can send commands to any sink it holds: the default
//! [`UnitSink::command`] implementation ignores them, so sprinkling
//! commands over a plain writer is harmless, and only a tabulator reacts.

use std::io;

use crate::cell::{Justify, Truncate, Wrap};
use crate::style::Style;
use crate::unit::CodeUnit;

/// A control command for a downstream tabulator.
///
/// Commands that carry cell configuration apply to the column currently
/// being written.
#[derive(Debug, Clone)]
pub enum TableCommand<U: CodeUnit> {
    /// Finish the current column. Closing the last column renders the row.
    EndColumn,
    /// Draw the top frame line, closing any partially written row first.
    TopLine,
    /// Draw a separator frame line, closing any partially written row first.
    HorizLine,
    /// Draw the bottom frame line, closing any partially written row first.
    BottomLine,
    /// Set the current column's width in code points. Zero is unbounded.
    SetWidth(usize),
    /// Set the current column's justification.
    SetJustify(Justify),
    /// Set the current column's truncation mode.
    SetTruncate(Truncate),
    /// Set the current column's wrap mode.
    SetWrap(Wrap),
    /// Set the current column's left and right padding.
    SetPad(Vec<U>, Vec<U>),
    /// Set the current column's truncation ellipsis.
    SetEllipsis(Vec<U>),
    /// Set the table frame style.
    SetStyle(Style<U>),
}

/// End the current column.
#[must_use]
pub fn endc<U: CodeUnit>() -> TableCommand<U> {
    TableCommand::EndColumn
}

/// Draw the top frame line.
#[must_use]
pub fn top_line<U: CodeUnit>() -> TableCommand<U> {
    TableCommand::TopLine
}

/// Draw a separator frame line.
#[must_use]
pub fn horiz_line<U: CodeUnit>() -> TableCommand<U> {
    TableCommand::HorizLine
}

/// Draw the bottom frame line.
#[must_use]
pub fn bottom_line<U: CodeUnit>() -> TableCommand<U> {
    TableCommand::BottomLine
}

/// Set the current column's width in code points.
#[must_use]
pub fn set_width<U: CodeUnit>(width: usize) -> TableCommand<U> {
    TableCommand::SetWidth(width)
}

/// Set the current column's justification.
#[must_use]
pub fn set_justify<U: CodeUnit>(justify: Justify) -> TableCommand<U> {
    TableCommand::SetJustify(justify)
}

/// Set the current column's truncation mode.
#[must_use]
pub fn set_truncate<U: CodeUnit>(truncate: Truncate) -> TableCommand<U> {
    TableCommand::SetTruncate(truncate)
}

/// Set the current column's wrap mode.
#[must_use]
pub fn set_wrap<U: CodeUnit>(wrap: Wrap) -> TableCommand<U> {
    TableCommand::SetWrap(wrap)
}

/// Set the current column's padding.
#[must_use]
pub fn set_pad<U: CodeUnit>(lpad: &str, rpad: &str) -> TableCommand<U> {
    TableCommand::SetPad(U::encode_str(lpad), U::encode_str(rpad))
}

/// Set the current column's truncation ellipsis.
#[must_use]
pub fn set_ellipsis<U: CodeUnit>(ellipsis: &str) -> TableCommand<U> {
    TableCommand::SetEllipsis(U::encode_str(ellipsis))
}

/// Set the table frame style.
#[must_use]
pub fn set_style<U: CodeUnit>(style: Style<U>) -> TableCommand<U> {
    TableCommand::SetStyle(style)
}

/// Receiver of rendered code units.
pub trait UnitSink<U: CodeUnit> {
    /// Write one unit.
    fn put(&mut self, unit: U) -> io::Result<()>;

    /// Write a run of units.
    fn put_slice(&mut self, units: &[U]) -> io::Result<()> {
        for &u in units {
            self.put(u)?;
        }
        Ok(())
    }

    /// Write `count` copies of `unit`.
    fn put_fill(&mut self, unit: U, count: usize) -> io::Result<()> {
        for _ in 0..count {
            self.put(unit)?;
        }
        Ok(())
    }

    /// Flush buffered output through to the final destination.
    fn flush_units(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Apply a table command. Sinks that are not tabulators ignore it.
    fn command(&mut self, cmd: TableCommand<U>) -> io::Result<()> {
        let _ = cmd;
        Ok(())
    }
}

impl<U: CodeUnit, S: UnitSink<U> + ?Sized> UnitSink<U> for &mut S {
    fn put(&mut self, unit: U) -> io::Result<()> {
        (**self).put(unit)
    }

    fn put_slice(&mut self, units: &[U]) -> io::Result<()> {
        (**self).put_slice(units)
    }

    fn put_fill(&mut self, unit: U, count: usize) -> io::Result<()> {
        (**self).put_fill(unit, count)
    }

    fn flush_units(&mut self) -> io::Result<()> {
        (**self).flush_units()
    }

    fn command(&mut self, cmd: TableCommand<U>) -> io::Result<()> {
        (**self).command(cmd)
    }
}

/// Adapts any [`io::Write`] into a byte sink.
///
/// The frequently used writers below are sinks on their own; reach for this
/// wrapper when yours is not.
#[derive(Debug)]
pub struct WriterSink<W: io::Write>(W);

impl<W: io::Write> WriterSink<W> {
    /// Wrap a writer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self(writer)
    }

    /// Unwrap the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.0
    }

    /// Borrow the writer.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.0
    }
}

macro_rules! byte_sink_via_io_write {
    ($($(#[$attr:meta])* $ty:ty $(, where ($($bound:tt)+))?;)+) => {$(
        $(#[$attr])*
        impl$(<$($bound)+>)? UnitSink<u8> for $ty {
            fn put(&mut self, unit: u8) -> io::Result<()> {
                io::Write::write_all(self, &[unit])
            }

            fn put_slice(&mut self, units: &[u8]) -> io::Result<()> {
                io::Write::write_all(self, units)
            }

            fn flush_units(&mut self) -> io::Result<()> {
                io::Write::flush(self)
            }
        }
    )+};
}

byte_sink_via_io_write! {
    Vec<u8>;
    std::fs::File;
    io::Stdout;
    io::StdoutLock<'_>;
    io::Stderr;
    io::StderrLock<'_>;
    io::Sink;
    io::Cursor<Vec<u8>>;
    io::BufWriter<W>, where (W: io::Write);
    io::LineWriter<W>, where (W: io::Write);
    Box<W>, where (W: io::Write + ?Sized);
}

impl<W: io::Write> UnitSink<u8> for WriterSink<W> {
    fn put(&mut self, unit: u8) -> io::Result<()> {
        self.0.write_all(&[unit])
    }

    fn put_slice(&mut self, units: &[u8]) -> io::Result<()> {
        self.0.write_all(units)
    }

    fn flush_units(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl UnitSink<u16> for Vec<u16> {
    fn put(&mut self, unit: u16) -> io::Result<()> {
        self.push(unit);
        Ok(())
    }

    fn put_slice(&mut self, units: &[u16]) -> io::Result<()> {
        self.extend_from_slice(units);
        Ok(())
    }
}

impl UnitSink<char> for String {
    fn put(&mut self, unit: char) -> io::Result<()> {
        self.push(unit);
        Ok(())
    }
}

impl UnitSink<char> for Vec<char> {
    fn put(&mut self, unit: char) -> io::Result<()> {
        self.push(unit);
        Ok(())
    }

    fn put_slice(&mut self, units: &[char]) -> io::Result<()> {
        self.extend_from_slice(units);
        Ok(())
    }
}
