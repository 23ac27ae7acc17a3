#![forbid(unsafe_code)]

//! Per-column cell state and single-line emission.
//!
//! A [`Cell`] buffers the raw units written to one column and knows how to
//! emit them one rendered line at a time: measuring in code points, finding
//! wrap points, truncating with an ellipsis, justifying, and padding. The
//! buffer is a deque because truncation pops from both ends and wrap-point
//! search walks from both ends; front-pops during emission are hot.
//!
//! Emission is incremental. A left-justified unbounded cell streams its
//! content as it arrives; right-justified and truncating cells hold their
//! content until the row is forced closed, because their output cannot be
//! known earlier.

use std::collections::VecDeque;
use std::io;

use crate::sink::UnitSink;
use crate::unit::{CodeUnit, utflen};

/// Horizontal placement of cell content within a fixed-width column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    /// Content flush left, fill on the right.
    #[default]
    Left,
    /// Content flush right, fill on the left.
    Right,
    /// Fill split evenly, remainder on the right.
    Center,
}

/// What to do with content that does not fit on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Truncate {
    /// Do not truncate; content wraps onto additional lines.
    #[default]
    None,
    /// Drop the left part and mark the cut with the ellipsis.
    Left,
    /// Drop the right part and mark the cut with the ellipsis.
    Right,
}

/// Where wrapped lines may break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wrap {
    /// Break at any code point.
    #[default]
    Character,
    /// Break at whitespace; a word longer than the column falls back to a
    /// character break.
    Word,
}

/// One column's buffering and rendering state.
#[derive(Debug, Clone)]
pub struct Cell<U: CodeUnit> {
    buf: VecDeque<U>,
    width: usize,
    written: usize,
    cell_start: bool,
    justify: Justify,
    truncate: Truncate,
    wrap: Wrap,
    lpad: Vec<U>,
    rpad: Vec<U>,
    ellipsis: Vec<U>,
}

impl<U: CodeUnit> Cell<U> {
    /// Create a cell `width` code points wide. Zero means unbounded: the
    /// cell streams until a newline and never wraps or truncates.
    ///
    /// Defaults: one space of padding on each side, left justification, no
    /// truncation, character wrapping, `…` ellipsis.
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            buf: VecDeque::new(),
            width,
            written: 0,
            cell_start: true,
            justify: Justify::default(),
            truncate: Truncate::default(),
            wrap: Wrap::default(),
            lpad: vec![U::SPACE],
            rpad: vec![U::SPACE],
            ellipsis: U::DEFAULT_ELLIPSIS.to_vec(),
        }
    }

    /// Set the justification.
    #[must_use]
    pub fn justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    /// Set the truncation mode.
    #[must_use]
    pub fn truncate(mut self, truncate: Truncate) -> Self {
        self.truncate = truncate;
        self.check_ellipsis_fits();
        self
    }

    /// Set the wrap mode.
    #[must_use]
    pub fn wrap(mut self, wrap: Wrap) -> Self {
        self.wrap = wrap;
        self
    }

    /// Set the left and right padding. Padding does not count against the
    /// column width.
    #[must_use]
    pub fn pad(mut self, lpad: &str, rpad: &str) -> Self {
        self.lpad = U::encode_str(lpad);
        self.rpad = U::encode_str(rpad);
        self
    }

    /// Set the truncation ellipsis.
    #[must_use]
    pub fn ellipsis(mut self, ellipsis: &str) -> Self {
        self.ellipsis = U::encode_str(ellipsis);
        self.check_ellipsis_fits();
        self
    }

    /// Change the column width.
    pub fn set_width(&mut self, width: usize) -> &mut Self {
        self.width = width;
        self.check_ellipsis_fits();
        self
    }

    /// Change the justification.
    pub fn set_justify(&mut self, justify: Justify) -> &mut Self {
        self.justify = justify;
        self
    }

    /// Change the truncation mode.
    pub fn set_truncate(&mut self, truncate: Truncate) -> &mut Self {
        self.truncate = truncate;
        self.check_ellipsis_fits();
        self
    }

    /// Change the wrap mode.
    pub fn set_wrap(&mut self, wrap: Wrap) -> &mut Self {
        self.wrap = wrap;
        self
    }

    /// Change the padding.
    pub fn set_pad(&mut self, lpad: &str, rpad: &str) -> &mut Self {
        self.set_pad_units(U::encode_str(lpad), U::encode_str(rpad))
    }

    /// Change the padding from already encoded units.
    pub fn set_pad_units(&mut self, lpad: Vec<U>, rpad: Vec<U>) -> &mut Self {
        self.lpad = lpad;
        self.rpad = rpad;
        self
    }

    /// Change the truncation ellipsis.
    pub fn set_ellipsis(&mut self, ellipsis: &str) -> &mut Self {
        self.set_ellipsis_units(U::encode_str(ellipsis))
    }

    /// Change the truncation ellipsis from already encoded units.
    pub fn set_ellipsis_units(&mut self, ellipsis: Vec<U>) -> &mut Self {
        self.ellipsis = ellipsis;
        self.check_ellipsis_fits();
        self
    }

    /// The column width in code points. Zero is unbounded.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The full rendered width: column width plus both pads, in code points.
    #[must_use]
    pub fn cell_width(&self) -> usize {
        self.width
            + utflen(self.lpad.iter().copied())
            + utflen(self.rpad.iter().copied())
    }

    /// Whether the cell holds no pending content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Append one unit to the cell buffer.
    pub fn put(&mut self, unit: U) {
        self.buf.push_back(unit);
    }

    // A bounded ellipsis must leave room for at least one content code
    // point, otherwise truncation could never make progress.
    fn check_ellipsis_fits(&self) {
        debug_assert!(
            self.width == 0 || self.width > utflen(self.ellipsis.iter().copied()),
            "cell width ({}) must exceed the ellipsis width",
            self.width,
        );
    }

    /// Emit up to one rendered line of this cell's content into `sink`.
    ///
    /// With `force` set the cell must complete a row line: justification
    /// and truncation are resolved now and the closing fill and padding are
    /// written. Without it the cell may stream a partial prefix, or decline
    /// entirely when its policy needs the full line before anything can be
    /// placed.
    ///
    /// Returns whether a full row line was completed. `false` means the
    /// cell wrote nothing or only a prefix and must be re-entered.
    pub fn write_line<S>(&mut self, sink: &mut S, force: bool) -> io::Result<bool>
    where
        S: UnitSink<U> + ?Sized,
    {
        let mut wrote_full = force;
        if !force && self.truncate != Truncate::None {
            // Truncation needs the whole line before it can cut.
            return Ok(wrote_full);
        }

        let mut end = self.truncate_buf();
        let mut out_width = utflen(self.buf.iter().take(end).copied()) + self.written;

        if !force && out_width < self.width && self.justify != Justify::Left {
            // Fill ahead of the content cannot be sized yet.
            return Ok(wrote_full);
        }

        let mut lfill = 0usize;
        let mut rfill = 0usize;
        if self.width > 0 {
            let mut run = 0i32;
            while out_width > self.width {
                debug_assert!(end > 0, "line trim walked past the buffer start");
                end -= 1;
                run += self.buf[end].score();
                if run == 0 {
                    out_width -= 1;
                }
            }
            wrote_full = wrote_full || out_width == self.width;

            let total_fill = self.width - out_width;
            match self.justify {
                Justify::Center => {
                    lfill = total_fill / 2;
                    rfill = total_fill - lfill;
                }
                Justify::Left => rfill = total_fill,
                Justify::Right => lfill = total_fill,
            }
        }

        if self.cell_start {
            sink.put_slice(&self.lpad)?;
            sink.put_fill(U::SPACE, lfill)?;
            self.cell_start = false;
        }

        for _ in 0..end {
            if let Some(unit) = self.buf.pop_front() {
                sink.put(unit)?;
            }
        }
        wrote_full = wrote_full || self.buf.front() == Some(&U::NEWLINE);

        // The unit that ended the line (a newline or the wrap-point space)
        // is consumed, not emitted. Word wrapping also swallows any run of
        // whitespace so the next line starts at the next word.
        if self.buf.front().is_some_and(|&u| u.is_whitespace()) {
            self.buf.pop_front();
        }
        if self.wrap == Wrap::Word {
            while self.buf.front().is_some_and(|&u| u.is_whitespace()) {
                self.buf.pop_front();
            }
        }
        wrote_full = wrote_full || !self.buf.is_empty();

        if wrote_full {
            sink.put_fill(U::SPACE, rfill)?;
            sink.put_slice(&self.rpad)?;
            self.cell_start = true;
            self.written = 0;
        } else {
            self.written = out_width;
        }
        Ok(wrote_full)
    }

    /// Resolve truncation and return the end index (exclusive) of the units
    /// to emit on this line.
    ///
    /// For truncating cells that overflow, the buffer itself is cut down to
    /// one line and the ellipsis spliced in, and the whole buffer is the
    /// answer.
    fn truncate_buf(&mut self) -> usize {
        if self.width == 0 {
            return self
                .buf
                .iter()
                .position(|&u| u == U::NEWLINE)
                .unwrap_or(self.buf.len());
        }

        if self.truncate == Truncate::None {
            let avail = self.width.saturating_sub(self.written);
            return self.find_output_end(avail);
        }

        if utflen(self.buf.iter().copied()) > self.width {
            let keep = self.width - utflen(self.ellipsis.iter().copied());
            match self.truncate {
                Truncate::Right => {
                    let end = self.find_output_end(keep);
                    self.buf.truncate(end);
                    if !self.buf.is_empty() {
                        self.buf.extend(self.ellipsis.iter().copied());
                    }
                }
                Truncate::Left => {
                    let start = self.find_output_start(keep);
                    for _ in 0..start {
                        self.buf.pop_front();
                    }
                    if !self.buf.is_empty() {
                        for &u in self.ellipsis.iter().rev() {
                            self.buf.push_front(u);
                        }
                    }
                }
                Truncate::None => {}
            }
        }
        self.buf.len()
    }

    /// Index one past the last unit of the longest prefix holding at most
    /// `avail` code points, stopping early at a newline (which is excluded).
    ///
    /// The returned index is always a code-point boundary.
    fn find_line_end(&self, mut avail: usize) -> usize {
        let mut run = 0i32;
        for (i, &u) in self.buf.iter().enumerate() {
            if avail == 0 {
                return i;
            }
            run += u.score();
            if run == 0 {
                avail -= 1;
                if u == U::NEWLINE {
                    return i;
                }
            }
        }
        self.buf.len()
    }

    /// Start index of the longest suffix holding at most `avail` code
    /// points, stopping early at a newline (which is excluded).
    fn find_line_start(&self, mut avail: usize) -> usize {
        let len = self.buf.len();
        let mut run = 0i32;
        for (k, &u) in self.buf.iter().rev().enumerate() {
            if avail == 0 {
                return len - k;
            }
            run += u.score();
            if run == 0 {
                avail -= 1;
                if u == U::NEWLINE {
                    return len - k;
                }
            }
        }
        0
    }

    /// Forward wrap-point search: the line end for `avail` code points,
    /// slid back to a word boundary when word wrapping applies.
    ///
    /// The scan window extends one unit past the measured line so that a
    /// space sitting exactly on the boundary still counts as a break. When
    /// the window holds no whitespace at all, a line already carrying
    /// content defers the whole word to the next line (returning the buffer
    /// start, an empty emission the drain loop tolerates), and a fresh line
    /// breaks the oversized word at the character boundary.
    fn find_output_end(&self, avail: usize) -> usize {
        let end = self.find_line_end(avail);
        if self.wrap != Wrap::Word || end == self.buf.len() {
            return end;
        }
        let scan_end = end + 1;
        match (0..scan_end).rev().find(|&i| self.buf[i].is_whitespace()) {
            Some(ws) => ws,
            None if self.written > 0 => 0,
            None => end,
        }
    }

    /// Reverse counterpart of [`Cell::find_output_end`] for left
    /// truncation: the start of the kept suffix, slid forward past the
    /// first whitespace when word wrapping applies.
    fn find_output_start(&self, avail: usize) -> usize {
        let start = self.find_line_start(avail);
        if self.wrap != Wrap::Word || start == 0 {
            return start;
        }
        let scan_start = start - 1;
        match (scan_start..self.buf.len()).find(|&i| self.buf[i].is_whitespace()) {
            Some(ws) => ws + 1,
            None => start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(cell: &mut Cell<u8>, s: &str) {
        for b in s.bytes() {
            cell.put(b);
        }
    }

    fn one_line(cell: &mut Cell<u8>, force: bool) -> (String, bool) {
        let mut out: Vec<u8> = Vec::new();
        let full = cell.write_line(&mut out, force).unwrap();
        (String::from_utf8(out).unwrap(), full)
    }

    #[test]
    fn defaults() {
        let cell: Cell<u8> = Cell::new(10);
        assert_eq!(cell.width(), 10);
        assert_eq!(cell.cell_width(), 12);
        assert!(cell.is_empty());
    }

    #[test]
    fn cell_width_measures_pads_in_code_points() {
        let cell: Cell<u8> = Cell::new(4).pad("ă", "€");
        assert_eq!(cell.cell_width(), 6);
    }

    #[test]
    fn full_line_is_padded_and_filled() {
        let mut cell: Cell<u8> = Cell::new(6);
        feed(&mut cell, "abc");
        let (out, full) = one_line(&mut cell, true);
        assert!(full);
        assert_eq!(out, " abc    ");
        assert!(cell.is_empty());
    }

    #[test]
    fn character_wrap_leaves_remainder() {
        let mut cell: Cell<u8> = Cell::new(4);
        feed(&mut cell, "abcdef");
        let (out, full) = one_line(&mut cell, true);
        assert!(full);
        assert_eq!(out, " abcd ");
        let (out, full) = one_line(&mut cell, true);
        assert!(full);
        assert_eq!(out, " ef   ");
        assert!(cell.is_empty());
    }

    #[test]
    fn multi_byte_content_counts_once_per_code_point() {
        let mut cell: Cell<u8> = Cell::new(4);
        feed(&mut cell, "ăƀçđê");
        let (out, _) = one_line(&mut cell, true);
        assert_eq!(out, " ăƀçđ ");
        let (out, _) = one_line(&mut cell, true);
        assert_eq!(out, " ê    ");
    }

    #[test]
    fn wrap_never_splits_a_code_point() {
        let mut cell: Cell<u8> = Cell::new(3).wrap(Wrap::Word);
        feed(&mut cell, "abé");
        let (out, _) = one_line(&mut cell, true);
        assert_eq!(out, " abé ");

        let mut cell: Cell<u8> = Cell::new(2).wrap(Wrap::Word);
        feed(&mut cell, "abé");
        let (out, _) = one_line(&mut cell, true);
        assert_eq!(out, " ab ");
        let (out, _) = one_line(&mut cell, true);
        assert_eq!(out, " é  ");
    }

    #[test]
    fn right_justify_defers_without_force() {
        let mut cell: Cell<u8> = Cell::new(8).justify(Justify::Right);
        feed(&mut cell, "abc");
        let (out, full) = one_line(&mut cell, false);
        assert!(!full);
        assert!(out.is_empty(), "nothing may be placed before the fill");
        let (out, full) = one_line(&mut cell, true);
        assert!(full);
        assert_eq!(out, "      abc ");
    }

    #[test]
    fn left_justify_streams_without_force() {
        let mut cell: Cell<u8> = Cell::new(8);
        feed(&mut cell, "abc");
        let (out, full) = one_line(&mut cell, false);
        assert!(!full);
        assert_eq!(out, " abc", "prefix streams, closing fill withheld");
        feed(&mut cell, "de");
        let (out, full) = one_line(&mut cell, true);
        assert!(full);
        assert_eq!(out, "de    ");
    }

    #[test]
    fn truncate_waits_for_row_close() {
        let mut cell: Cell<u8> = Cell::new(6).truncate(Truncate::Right);
        feed(&mut cell, "abcdefgh");
        let (out, full) = one_line(&mut cell, false);
        assert!(!full);
        assert!(out.is_empty());
        let (out, full) = one_line(&mut cell, true);
        assert!(full);
        assert_eq!(out, " abcde… ");
        assert!(cell.is_empty(), "truncation discards the overflow");
    }

    #[test]
    fn truncate_left_keeps_the_tail() {
        let mut cell: Cell<u8> = Cell::new(6).truncate(Truncate::Left);
        feed(&mut cell, "abcdefgh");
        let (out, _) = one_line(&mut cell, true);
        assert_eq!(out, " …defgh ");
    }

    #[test]
    fn truncate_short_content_is_untouched() {
        let mut cell: Cell<u8> = Cell::new(6).truncate(Truncate::Left);
        feed(&mut cell, "abc");
        let (out, _) = one_line(&mut cell, true);
        assert_eq!(out, " abc    ");
    }

    #[test]
    fn custom_ellipsis() {
        let mut cell: Cell<u8> = Cell::new(7).truncate(Truncate::Right).ellipsis("...");
        feed(&mut cell, "abcdefghij");
        let (out, _) = one_line(&mut cell, true);
        assert_eq!(out, " abcd... ");
    }

    #[test]
    fn word_wrap_defers_oversized_word_mid_line() {
        let mut cell: Cell<u8> = Cell::new(10).wrap(Wrap::Word);
        feed(&mut cell, "abcd ");
        let (out, full) = one_line(&mut cell, false);
        assert!(!full);
        assert_eq!(out, " abcd ");
        feed(&mut cell, "efghijkl");
        let (out, full) = one_line(&mut cell, false);
        assert!(full, "the deferred word closes the current line");
        assert_eq!(out, "      ");
        let (out, full) = one_line(&mut cell, true);
        assert!(full);
        assert_eq!(out, " efghijkl   ");
    }

    #[test]
    fn newline_closes_the_line_and_is_consumed() {
        let mut cell: Cell<u8> = Cell::new(0);
        feed(&mut cell, "hello\nworld");
        let (out, full) = one_line(&mut cell, false);
        assert!(full);
        assert_eq!(out, " hello ");
        let (out, full) = one_line(&mut cell, false);
        assert!(!full, "no newline yet for the second line");
        assert_eq!(out, " world");
    }

    #[test]
    fn zero_width_streams_immediately() {
        let mut cell: Cell<u8> = Cell::new(0);
        feed(&mut cell, "abc");
        let (out, full) = one_line(&mut cell, false);
        assert!(!full);
        assert_eq!(out, " abc");
        assert!(cell.is_empty());
    }

    #[test]
    fn center_justification_splits_fill() {
        let mut cell: Cell<u8> = Cell::new(10).justify(Justify::Center);
        feed(&mut cell, "1234");
        let (out, _) = one_line(&mut cell, true);
        assert_eq!(out, "    1234    ");
    }
}
