#![forbid(unsafe_code)]

//! Streaming tabular text formatting.
//!
//! This crate turns a plain character stream into bordered multi-column
//! output. A [`Tabulator`] wraps a sink (`Vec<u8>`, files, and standard
//! streams directly; [`sink::WriterSink`] adapts any other
//! [`std::io::Write`]), buffers what is written into per-column [`Cell`]s,
//! and renders complete rows with configurable borders, padding,
//! justification, wrapping, and truncation. Width accounting is done in
//! Unicode code points, so multi-byte content lines up with single-byte
//! content.
//!
//! - [`unit`] - code-unit scoring and code-point counting
//! - [`cell`] - per-column state: wrap, truncate, justify, pads
//! - [`style`] - border glyph presets, ASCII through box drawing
//! - [`sink`] - the sink abstraction and the table command surface
//! - [`tabulator`] - the engine tying it together
//!
//! # Example
//! ```
//! use std::fmt::Write as _;
//! use tabweave_core::{Cell, Justify, Style, Tabulator, Truncate};
//!
//! let cells = vec![
//!     Cell::new(8).justify(Justify::Right),
//!     Cell::new(10).truncate(Truncate::Right),
//! ];
//! let mut tab = Tabulator::new(Vec::new(), cells);
//! tab.set_style(Style::box_drawing());
//!
//! tab.top_line().unwrap();
//! write!(tab, "42").unwrap();
//! tab.next_column().unwrap();
//! write!(tab, "a very long label").unwrap();
//! tab.next_column().unwrap();
//! tab.bottom_line().unwrap();
//!
//! let out = String::from_utf8(tab.finish().unwrap()).unwrap();
//! assert_eq!(
//!     out,
//!     "┌──────────┬────────────┐\n\
//!      │       42 │ a very lo… │\n\
//!      └──────────┴────────────┘\n",
//! );
//! ```

pub mod cell;
pub mod sink;
pub mod style;
pub mod tabulator;
pub mod unit;

pub use cell::{Cell, Justify, Truncate, Wrap};
pub use sink::{TableCommand, UnitSink, WriterSink};
pub use style::{RowGlyphs, Style, StylePreset};
pub use tabulator::Tabulator;
pub use unit::{CodeUnit, utflen, utflen_str};
