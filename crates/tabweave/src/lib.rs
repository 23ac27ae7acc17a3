#![forbid(unsafe_code)]

//! Umbrella crate re-exporting the tabweave workspace.
//!
//! Pull in this crate to get the column engine and the log overlay under
//! one roof:
//!
//! ```
//! use std::fmt::Write as _;
//! use tabweave::{Cell, Style, Tabulator};
//!
//! let mut tab = Tabulator::new(Vec::new(), vec![Cell::new(6), Cell::new(6)]);
//! tab.set_style(Style::rounded_box());
//! write!(tab, "left").unwrap();
//! tab.next_column().unwrap();
//! write!(tab, "right").unwrap();
//! tab.next_column().unwrap();
//! let out = String::from_utf8(tab.finish().unwrap()).unwrap();
//! assert_eq!(out, "│ left   │ right  │\n");
//! ```

pub use tabweave_core::{
    Cell, CodeUnit, Justify, RowGlyphs, Style, StylePreset, TableCommand, Tabulator, Truncate,
    UnitSink, Wrap, WriterSink, utflen, utflen_str,
};

pub use tabweave_core::{cell, sink, style, tabulator, unit};

/// Table-backed log formatting.
pub mod logging {
    pub use tabweave_log::{Element, LogFormat, Logger, TimestampPrecision};
}
