#![forbid(unsafe_code)]

//! The column engine.
//!
//! A [`Tabulator`] wraps a sink and turns the character stream written into
//! it into bordered, padded, multi-column rows. Characters land in the
//! active column's [`Cell`]; [`Tabulator::next_column`] advances the active
//! column and, when it wraps around, drains the finished row. Draining is
//! incremental where formatting allows: content that can be placed without
//! knowing the rest of the row streams through on [`Tabulator::sync`].
//!
//! The engine owns its sink for as long as it lives. [`Tabulator::finish`]
//! closes any partial row and hands the sink back; dropping the engine does
//! the same close best-effort. Because a tabulator is itself a
//! [`UnitSink`], a second tabulator can be constructed over `&mut` the
//! first; the inner engine's rendered rows then land in the outer engine's
//! active cell as ordinary content, which is all nesting takes.
//!
//! # Example
//! ```
//! use std::fmt::Write as _;
//! use tabweave_core::{Cell, Tabulator};
//!
//! let mut tab = Tabulator::new(Vec::<u8>::new(), vec![Cell::new(5), Cell::new(5)]);
//! write!(tab, "one").unwrap();
//! tab.next_column().unwrap();
//! write!(tab, "two").unwrap();
//! tab.next_column().unwrap();
//! let out = tab.finish().unwrap();
//! assert_eq!(out, b"| one   | two   |\n");
//! ```

use std::fmt;
use std::io;

use crate::cell::{Cell, Justify, Truncate, Wrap};
use crate::sink::{TableCommand, UnitSink};
use crate::style::{RowGlyphs, Style};
use crate::unit::CodeUnit;

/// Streaming table formatter over an owned sink.
pub struct Tabulator<U: CodeUnit, W: UnitSink<U>> {
    /// `None` only after `finish` has taken the sink.
    inner: Option<W>,
    cells: Vec<Cell<U>>,
    col: usize,
    sync_col: usize,
    line_start: bool,
    style: Style<U>,
}

impl<U: CodeUnit, W: UnitSink<U>> Tabulator<U, W> {
    /// Wrap `sink` and format writes into the given columns.
    ///
    /// An empty cell list degrades to a single unbounded column so the
    /// engine always has an active cell.
    #[must_use]
    pub fn new(sink: W, cells: Vec<Cell<U>>) -> Self {
        let cells = if cells.is_empty() {
            vec![Cell::new(0)]
        } else {
            cells
        };
        Self {
            inner: Some(sink),
            cells,
            col: 0,
            sync_col: 0,
            line_start: true,
            style: Style::ascii(),
        }
    }

    /// Wrap `sink` with one default cell per width.
    #[must_use]
    pub fn with_widths(sink: W, widths: &[usize]) -> Self {
        Self::new(sink, widths.iter().map(|&w| Cell::new(w)).collect())
    }

    /// The index of the column currently receiving characters.
    #[must_use]
    pub fn current_column(&self) -> usize {
        self.col
    }

    /// The cell currently receiving characters.
    pub fn current_cell(&mut self) -> &mut Cell<U> {
        &mut self.cells[self.col]
    }

    /// The active frame style.
    #[must_use]
    pub fn style(&self) -> &Style<U> {
        &self.style
    }

    /// Set the frame style.
    pub fn set_style(&mut self, style: Style<U>) -> &mut Self {
        self.style = style;
        self
    }

    /// Set the current column's width.
    pub fn set_width(&mut self, width: usize) -> &mut Self {
        self.current_cell().set_width(width);
        self
    }

    /// Set the current column's justification.
    pub fn set_justify(&mut self, justify: Justify) -> &mut Self {
        self.current_cell().set_justify(justify);
        self
    }

    /// Set the current column's truncation mode.
    pub fn set_truncate(&mut self, truncate: Truncate) -> &mut Self {
        self.current_cell().set_truncate(truncate);
        self
    }

    /// Set the current column's wrap mode.
    pub fn set_wrap(&mut self, wrap: Wrap) -> &mut Self {
        self.current_cell().set_wrap(wrap);
        self
    }

    /// Set the current column's padding.
    pub fn set_pad(&mut self, lpad: &str, rpad: &str) -> &mut Self {
        self.current_cell().set_pad(lpad, rpad);
        self
    }

    /// Set the current column's truncation ellipsis.
    pub fn set_ellipsis(&mut self, ellipsis: &str) -> &mut Self {
        self.current_cell().set_ellipsis(ellipsis);
        self
    }

    /// Finish the current column and make the next one active. When the
    /// last column is finished, the whole row is drained to the sink.
    pub fn next_column(&mut self) -> io::Result<()> {
        debug_assert!(self.col < self.cells.len(), "active column out of range");
        self.col += 1;
        if self.col == self.cells.len() {
            self.col = 0;
            self.drain(true)?;
        }
        Ok(())
    }

    /// Draw the top frame line. A partially written row is closed first.
    pub fn top_line(&mut self) -> io::Result<()> {
        self.rule(|style| &style.top)
    }

    /// Draw the separator frame line. A partially written row is closed
    /// first.
    pub fn horiz_line(&mut self) -> io::Result<()> {
        self.rule(|style| &style.middle)
    }

    /// Draw the bottom frame line. A partially written row is closed first.
    pub fn bottom_line(&mut self) -> io::Result<()> {
        self.rule(|style| &style.bottom)
    }

    /// Drain whatever can be emitted without forcing rows closed, then
    /// flush the sink.
    pub fn sync(&mut self) -> io::Result<()> {
        self.drain(false)?;
        match self.inner.as_mut() {
            Some(sink) => sink.flush_units(),
            None => Ok(()),
        }
    }

    /// Close any partial row and return the wrapped sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.close()?;
        self.inner
            .take()
            .ok_or_else(|| io::Error::other("tabulator sink already released"))
    }

    fn close(&mut self) -> io::Result<()> {
        if self.inner.is_none() {
            return Ok(());
        }
        if self.col != 0 || self.cells.iter().any(|c| !c.is_empty()) {
            self.col = 0;
            self.drain(true)?;
        }
        Ok(())
    }

    /// Move buffered cell content to the sink in row order.
    ///
    /// With `all_cells` set the current row is forced closed: every cell
    /// emits a complete line, trailing cells included. Otherwise cells emit
    /// what they can and the pass stops at the first cell that needs more
    /// input before it can commit anything.
    fn drain(&mut self, all_cells: bool) -> io::Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("drain", all_cells).entered();

        debug_assert!(self.sync_col < self.cells.len(), "drain column in range");
        let Some(sink) = self.inner.as_mut() else {
            return Ok(());
        };

        loop {
            let pending_row = if all_cells {
                self.sync_col > 0
            } else {
                self.sync_col < self.col
            };
            let scan_from = if all_cells { 0 } else { self.sync_col };
            if !pending_row && self.cells[scan_from..].iter().all(Cell::is_empty) {
                break;
            }

            if self.line_start {
                sink.put_slice(&self.style.cell.left)?;
                self.line_start = false;
            }

            let later_content = self.cells[self.sync_col + 1..]
                .iter()
                .any(|c| !c.is_empty());
            let force = all_cells || self.sync_col != self.col || later_content;
            let full = self.cells[self.sync_col].write_line(sink, force)?;
            if !full {
                // The cell is waiting for input it cannot commit without.
                break;
            }

            if self.sync_col + 1 == self.cells.len() {
                sink.put_slice(&self.style.cell.right)?;
                sink.put(U::NEWLINE)?;
                self.line_start = true;
            } else {
                sink.put_slice(&self.style.cell.center)?;
            }
            self.sync_col += 1;
            if self.sync_col == self.cells.len() {
                self.sync_col = 0;
            }
        }
        Ok(())
    }

    fn rule(&mut self, row: fn(&Style<U>) -> &RowGlyphs<U>) -> io::Result<()> {
        if self.col != 0 {
            self.col = 0;
            self.drain(true)?;
        }
        let Some(sink) = self.inner.as_mut() else {
            return Ok(());
        };
        let glyphs = row(&self.style);

        sink.put_slice(&glyphs.left)?;
        let mut first = true;
        for cell in &self.cells {
            if !first {
                sink.put_slice(&glyphs.center)?;
            }
            first = false;
            fill_segment(sink, &glyphs.line, cell.cell_width())?;
        }
        sink.put_slice(&glyphs.right)?;
        sink.put(U::NEWLINE)
    }
}

/// Repeat the line glyph sequence across `width` code points, cycling
/// through multi-glyph patterns. An empty pattern draws nothing.
fn fill_segment<U, S>(sink: &mut S, line: &[U], mut width: usize) -> io::Result<()>
where
    U: CodeUnit,
    S: UnitSink<U> + ?Sized,
{
    if line.is_empty() {
        return Ok(());
    }
    let mut i = 0;
    let mut run = 0i32;
    while width > 0 {
        run += line[i].score();
        sink.put(line[i])?;
        i += 1;
        if i == line.len() {
            i = 0;
        }
        if run == 0 {
            width -= 1;
        }
    }
    Ok(())
}

impl<U: CodeUnit, W: UnitSink<U>> UnitSink<U> for Tabulator<U, W> {
    fn put(&mut self, unit: U) -> io::Result<()> {
        self.cells[self.col].put(unit);
        Ok(())
    }

    fn flush_units(&mut self) -> io::Result<()> {
        self.sync()
    }

    fn command(&mut self, cmd: TableCommand<U>) -> io::Result<()> {
        match cmd {
            TableCommand::EndColumn => self.next_column(),
            TableCommand::TopLine => self.top_line(),
            TableCommand::HorizLine => self.horiz_line(),
            TableCommand::BottomLine => self.bottom_line(),
            TableCommand::SetWidth(w) => {
                self.set_width(w);
                Ok(())
            }
            TableCommand::SetJustify(j) => {
                self.set_justify(j);
                Ok(())
            }
            TableCommand::SetTruncate(t) => {
                self.set_truncate(t);
                Ok(())
            }
            TableCommand::SetWrap(w) => {
                self.set_wrap(w);
                Ok(())
            }
            TableCommand::SetPad(lpad, rpad) => {
                self.current_cell().set_pad_units(lpad, rpad);
                Ok(())
            }
            TableCommand::SetEllipsis(e) => {
                self.current_cell().set_ellipsis_units(e);
                Ok(())
            }
            TableCommand::SetStyle(style) => {
                self.set_style(style);
                Ok(())
            }
        }
    }
}

impl<U: CodeUnit, W: UnitSink<U>> fmt::Write for Tabulator<U, W> {
    /// Buffer text into the active cell. Buffering cannot fail; sink errors
    /// surface when the row drains.
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for unit in U::encode_str(s) {
            self.cells[self.col].put(unit);
        }
        Ok(())
    }
}

impl<U: CodeUnit, W: UnitSink<U>> Drop for Tabulator<U, W> {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

impl<U: CodeUnit, W: UnitSink<U>> fmt::Debug for Tabulator<U, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tabulator")
            .field("columns", &self.cells.len())
            .field("col", &self.col)
            .field("sync_col", &self.sync_col)
            .field("line_start", &self.line_start)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink;
    use std::fmt::Write as _;

    fn render(tab: Tabulator<u8, Vec<u8>>) -> String {
        String::from_utf8(tab.finish().unwrap()).unwrap()
    }

    #[test]
    fn single_cell_row() {
        let mut tab = Tabulator::with_widths(Vec::new(), &[10]);
        write!(tab, "abc").unwrap();
        tab.next_column().unwrap();
        assert_eq!(render(tab), "| abc        |\n");
    }

    #[test]
    fn trailing_cells_render_blank() {
        let mut tab = Tabulator::with_widths(Vec::new(), &[10, 10]);
        write!(tab, "abc").unwrap();
        tab.next_column().unwrap();
        tab.next_column().unwrap();
        assert_eq!(render(tab), "| abc        |            |\n");
    }

    #[test]
    fn empty_cell_list_degrades_to_one_column() {
        let mut tab = Tabulator::new(Vec::new(), Vec::new());
        write!(tab, "x").unwrap();
        tab.next_column().unwrap();
        assert_eq!(render(tab), "| x |\n");
    }

    #[test]
    fn streaming_sync_emits_what_it_can() {
        let mut tab = Tabulator::with_widths(Vec::new(), &[0]);
        write!(tab, "hel").unwrap();
        tab.sync().unwrap();
        write!(tab, "lo").unwrap();
        tab.next_column().unwrap();
        assert_eq!(render(tab), "| hello |\n");
    }

    #[test]
    fn sync_does_not_force_right_justified_content() {
        let mut tab = Tabulator::with_widths(Vec::new(), &[8]);
        tab.set_justify(Justify::Right);
        write!(tab, "abc").unwrap();
        tab.sync().unwrap();
        tab.sync().unwrap();
        tab.next_column().unwrap();
        assert_eq!(render(tab), "|      abc |\n");
    }

    #[test]
    fn rule_lines_span_cell_widths() {
        let mut tab = Tabulator::with_widths(Vec::new(), &[3, 2]);
        tab.top_line().unwrap();
        tab.horiz_line().unwrap();
        tab.bottom_line().unwrap();
        assert_eq!(render(tab), "+-----+----+\n+-----+----+\n+-----+----+\n");
    }

    #[test]
    fn rule_closes_a_partial_row() {
        let mut tab = Tabulator::with_widths(Vec::new(), &[4, 4]);
        write!(tab, "ab").unwrap();
        tab.next_column().unwrap();
        tab.horiz_line().unwrap();
        assert_eq!(render(tab), "| ab   |      |\n+------+------+\n");
    }

    #[test]
    fn multi_glyph_rule_pattern_cycles() {
        let mut tab = Tabulator::with_widths(Vec::new(), &[4]);
        tab.set_style(Style {
            top: RowGlyphs::new("<", "", ">", "ab"),
            ..Style::ascii()
        });
        tab.top_line().unwrap();
        assert_eq!(render(tab), "<ababab>\n");
    }

    #[test]
    fn drop_drains_the_partial_row() {
        let mut out: Vec<u8> = Vec::new();
        {
            let mut tab = Tabulator::with_widths(&mut out, &[6]);
            write!(tab, "x").unwrap();
        }
        assert_eq!(String::from_utf8(out).unwrap(), "| x      |\n");
    }

    #[test]
    fn finish_returns_the_sink() {
        let tab = Tabulator::with_widths(vec![0xAAu8], &[4]);
        let sink = tab.finish().unwrap();
        assert_eq!(sink[0], 0xAA, "the original sink comes back");
    }

    #[test]
    fn commands_dispatch_to_the_engine() {
        let mut tab = Tabulator::with_widths(Vec::new(), &[10]);
        tab.command(sink::set_width(6)).unwrap();
        tab.command(sink::set_justify(Justify::Right)).unwrap();
        tab.command(sink::set_pad("[", "]")).unwrap();
        tab.put_slice(b"ab").unwrap();
        tab.command(sink::endc()).unwrap();
        assert_eq!(render(tab), "|[    ab]|\n");
    }

    #[test]
    fn wide_unit_engine_renders_into_a_string() {
        let mut tab: Tabulator<char, String> =
            Tabulator::new(String::new(), vec![Cell::new(4)]);
        tab.set_style(Style::box_drawing());
        write!(tab, "héllo").unwrap();
        tab.next_column().unwrap();
        let out = tab.finish().unwrap();
        assert_eq!(out, "│ héll │\n│ o    │\n");
    }

    #[test]
    fn nested_engine_output_lands_in_the_outer_cell() {
        let mut outer = Tabulator::with_widths(Vec::new(), &[12]);
        {
            let mut inner = Tabulator::with_widths(&mut outer, &[3]);
            write!(inner, "ab").unwrap();
            inner.next_column().unwrap();
        }
        outer.next_column().unwrap();
        assert_eq!(render(outer), "| | ab  |      |\n");
    }
}
