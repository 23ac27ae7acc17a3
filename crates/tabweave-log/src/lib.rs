#![forbid(unsafe_code)]

//! Log record formatting over the column engine.
//!
//! A [`Logger`] writes log entries as table rows: a fixed-width metadata
//! column built from configurable [`Element`]s (timestamp, tag, source
//! file, line, caller payload, literal text) and an unbounded message
//! column, separated by a box-drawing gutter. Entries whose message spans
//! several lines stay aligned under the gutter, because the metadata
//! column blank-fills its width on continuation rows:
//!
//! ```text
//! 2019-04-13 17:13:42.441 net …/connect.rs [ 21] │ dialing upstream
//!                                                │     retry in 250ms
//! ```
//!
//! The format is declared once and stamps out loggers for any sink:
//!
//! ```
//! use std::io::Write as _;
//! use tabweave_log::LogFormat;
//!
//! let format = LogFormat::new().tag(3).literal(">");
//! let mut log = format.make_logger(Vec::new(), "net");
//! writeln!(log.entry().unwrap(), "dialing upstream").unwrap();
//! let out = String::from_utf8(log.finish().unwrap()).unwrap();
//! assert_eq!(out, "net > │ dialing upstream\n");
//! ```

use std::fmt;
use std::io;
use std::panic::Location;

use tabweave_core::{Cell, Justify, Style, Tabulator, Truncate, UnitSink, utflen_str};
use time::OffsetDateTime;
use time::macros::format_description;

/// Sub-second resolution of the timestamp element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampPrecision {
    /// Whole seconds, `2019-04-13 17:13:42`.
    Seconds,
    /// Milliseconds, `2019-04-13 17:13:42.441`.
    #[default]
    Millis,
    /// Microseconds, `2019-04-13 17:13:42.441000`.
    Micros,
}

/// One piece of the metadata column.
#[derive(Debug, Clone)]
pub enum Element {
    /// UTC wall-clock time of the entry.
    Timestamp(TimestampPrecision),
    /// The logger's tag, cut on the right when it overflows.
    Tag { width: usize },
    /// The call site's file path, cut on the left so the tail survives.
    File { width: usize },
    /// The call site's line number, right justified.
    Line { width: usize },
    /// The per-entry payload passed to [`Logger::entry_with`].
    User { width: usize },
    /// Fixed text between other elements.
    Literal(String),
}

/// Data available to elements while an entry header is rendered.
struct EntryContext<'a> {
    tag: &'a str,
    location: &'static Location<'static>,
    payload: Option<&'a dyn fmt::Display>,
}

impl Element {
    /// The cell this element renders into. Elements carry no left padding
    /// and one space of right padding; literals sit flush.
    fn cell(&self) -> Cell<u8> {
        match *self {
            Element::Timestamp(precision) => {
                let probe = format_timestamp(OffsetDateTime::UNIX_EPOCH, precision);
                Cell::new(utflen_str(&probe)).pad("", " ")
            }
            Element::Tag { width } => Cell::new(width).pad("", " ").truncate(Truncate::Right),
            Element::File { width } => Cell::new(width).pad("", " ").truncate(Truncate::Left),
            Element::Line { width } => Cell::new(width)
                .pad("", " ")
                .justify(Justify::Right)
                .truncate(Truncate::Left),
            Element::User { width } => Cell::new(width).pad("", " ").truncate(Truncate::Right),
            Element::Literal(ref text) => {
                Cell::new(utflen_str(text)).pad("", "").ellipsis("")
            }
        }
    }

    fn render(&self, ctx: &EntryContext<'_>) -> String {
        match *self {
            Element::Timestamp(precision) => {
                format_timestamp(OffsetDateTime::now_utc(), precision)
            }
            Element::Tag { .. } => ctx.tag.to_string(),
            Element::File { .. } => ctx.location.file().to_string(),
            Element::Line { .. } => ctx.location.line().to_string(),
            Element::User { .. } => ctx.payload.map(|p| p.to_string()).unwrap_or_default(),
            Element::Literal(ref text) => text.clone(),
        }
    }
}

fn format_timestamp(at: OffsetDateTime, precision: TimestampPrecision) -> String {
    let base = at
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .unwrap_or_default();
    match precision {
        TimestampPrecision::Seconds => base,
        TimestampPrecision::Millis => format!("{base}.{:03}", at.millisecond()),
        TimestampPrecision::Micros => format!("{base}.{:06}", at.microsecond()),
    }
}

/// Ordered element list shared by every logger stamped from it.
///
/// Keep one format per program so entries from different loggers line up.
#[derive(Debug, Clone, Default)]
pub struct LogFormat {
    elements: Vec<Element>,
}

impl LogFormat {
    /// An empty format. Entries carry only the message column.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append any element.
    #[must_use]
    pub fn element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Append a timestamp element.
    #[must_use]
    pub fn timestamp(self, precision: TimestampPrecision) -> Self {
        self.element(Element::Timestamp(precision))
    }

    /// Append a tag element `width` code points wide.
    #[must_use]
    pub fn tag(self, width: usize) -> Self {
        self.element(Element::Tag { width })
    }

    /// Append a source-file element `width` code points wide.
    #[must_use]
    pub fn file(self, width: usize) -> Self {
        self.element(Element::File { width })
    }

    /// Append a line-number element `width` code points wide.
    #[must_use]
    pub fn line(self, width: usize) -> Self {
        self.element(Element::Line { width })
    }

    /// Append a payload element `width` code points wide.
    #[must_use]
    pub fn user(self, width: usize) -> Self {
        self.element(Element::User { width })
    }

    /// Append fixed text.
    #[must_use]
    pub fn literal(self, text: &str) -> Self {
        self.element(Element::Literal(text.to_string()))
    }

    /// Build a logger writing to `sink` under the given tag.
    pub fn make_logger<W: UnitSink<u8>>(&self, sink: W, tag: &str) -> Logger<W> {
        let meta_width: usize = self.elements.iter().map(|e| e.cell().cell_width()).sum();
        let cells = vec![
            Cell::new(meta_width).pad("", " ").ellipsis(""),
            Cell::new(0).pad(" ", ""),
        ];
        let mut tab = Tabulator::new(sink, cells);
        tab.set_style(Style::borderless_box());
        Logger {
            tab,
            elements: self.elements.clone(),
            tag: tag.to_string(),
        }
    }
}

/// A sink-owning log writer. See the crate docs for the output shape.
pub struct Logger<W: UnitSink<u8>> {
    tab: Tabulator<u8, W>,
    elements: Vec<Element>,
    tag: String,
}

impl<W: UnitSink<u8>> Logger<W> {
    /// Start a new entry and return the writer for its message text.
    ///
    /// Any message still open from the previous entry is closed first. The
    /// call site recorded in the entry is the caller of this method.
    #[track_caller]
    pub fn entry(&mut self) -> io::Result<&mut Self> {
        let location = Location::caller();
        self.start_entry(location, None)
    }

    /// Like [`Logger::entry`], with a payload for [`Element::User`].
    #[track_caller]
    pub fn entry_with(&mut self, payload: &dyn fmt::Display) -> io::Result<&mut Self> {
        let location = Location::caller();
        self.start_entry(location, Some(payload))
    }

    /// Close any open entry and return the sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.align_to_first_column()?;
        self.tab.finish()
    }

    fn start_entry(
        &mut self,
        location: &'static Location<'static>,
        payload: Option<&dyn fmt::Display>,
    ) -> io::Result<&mut Self> {
        self.align_to_first_column()?;
        debug_assert_eq!(
            self.tab.current_column(),
            0,
            "entry header must start in the metadata column"
        );

        let cells: Vec<Cell<u8>> = self.elements.iter().map(Element::cell).collect();
        let ctx = EntryContext {
            tag: &self.tag,
            location,
            payload,
        };
        use std::fmt::Write as _;
        let mut header = Tabulator::new(&mut self.tab, cells);
        header.set_style(Style::empty());
        for element in &self.elements {
            header
                .write_str(&element.render(&ctx))
                .map_err(|_| io::Error::other("header formatting failed"))?;
            header.next_column()?;
        }
        header.finish()?;

        self.tab.next_column()?;
        Ok(self)
    }

    fn align_to_first_column(&mut self) -> io::Result<()> {
        while self.tab.current_column() != 0 {
            self.tab.next_column()?;
        }
        Ok(())
    }
}

impl<W: UnitSink<u8>> io::Write for Logger<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.tab.put_slice(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.tab.sync()
    }
}

impl<W: UnitSink<u8>> fmt::Debug for Logger<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("tag", &self.tag)
            .field("elements", &self.elements.len())
            .finish_non_exhaustive()
    }
}
