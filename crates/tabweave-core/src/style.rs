#![forbid(unsafe_code)]

//! Border styles for rendered tables.
//!
//! A [`Style`] is four glyph rows: the top edge, the separator between data
//! rows, the bottom edge, and the vertical bars drawn around cell content.
//! Each row carries a left glyph, a center glyph placed between adjacent
//! columns, a right glyph, and the horizontal fill. Empty glyph strings are
//! simply not drawn, which is how the markdown and borderless presets leave
//! their edges open.

use crate::unit::CodeUnit;

/// Glyphs for one horizontal row of a table frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowGlyphs<U: CodeUnit> {
    /// Leftmost glyph of the row. Empty means the row starts flush.
    pub left: Vec<U>,
    /// Glyph where the row crosses a column boundary.
    pub center: Vec<U>,
    /// Rightmost glyph of the row. Empty means the row ends flush.
    pub right: Vec<U>,
    /// Fill repeated (by code point) across each cell's width. Empty means
    /// no horizontal fill at all.
    pub line: Vec<U>,
}

impl<U: CodeUnit> RowGlyphs<U> {
    /// Build a glyph row from string literals, transcoded to the unit type.
    #[must_use]
    pub fn new(left: &str, center: &str, right: &str, line: &str) -> Self {
        Self {
            left: U::encode_str(left),
            center: U::encode_str(center),
            right: U::encode_str(right),
            line: U::encode_str(line),
        }
    }
}

/// A complete table frame style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style<U: CodeUnit> {
    /// Glyphs for the top edge.
    pub top: RowGlyphs<U>,
    /// Glyphs for the separator between data rows.
    pub middle: RowGlyphs<U>,
    /// Glyphs for the bottom edge.
    pub bottom: RowGlyphs<U>,
    /// Glyphs for the vertical bars of data rows. The `line` field of this
    /// row is unused by data rows and left empty in every preset.
    pub cell: RowGlyphs<U>,
}

/// Identifier for a built-in style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StylePreset {
    Empty,
    Ascii,
    Markdown,
    Box,
    HeavyBox,
    DoubleBox,
    RoundedBox,
    BorderlessAscii,
    BorderlessBox,
    BorderlessHeavyBox,
    BorderlessDoubleBox,
}

impl<U: CodeUnit> Style<U> {
    /// Look up a built-in style by preset id.
    #[must_use]
    pub fn preset(preset: StylePreset) -> Self {
        match preset {
            StylePreset::Empty => Self::empty(),
            StylePreset::Ascii => Self::ascii(),
            StylePreset::Markdown => Self::markdown(),
            StylePreset::Box => Self::box_drawing(),
            StylePreset::HeavyBox => Self::heavy_box(),
            StylePreset::DoubleBox => Self::double_box(),
            StylePreset::RoundedBox => Self::rounded_box(),
            StylePreset::BorderlessAscii => Self::borderless_ascii(),
            StylePreset::BorderlessBox => Self::borderless_box(),
            StylePreset::BorderlessHeavyBox => Self::borderless_heavy_box(),
            StylePreset::BorderlessDoubleBox => Self::borderless_double_box(),
        }
    }

    fn rows(rows: [[&str; 4]; 4]) -> Self {
        let [t, m, b, c] = rows;
        Self {
            top: RowGlyphs::new(t[0], t[1], t[2], t[3]),
            middle: RowGlyphs::new(m[0], m[1], m[2], m[3]),
            bottom: RowGlyphs::new(b[0], b[1], b[2], b[3]),
            cell: RowGlyphs::new(c[0], c[1], c[2], c[3]),
        }
    }

    /// No frame characters anywhere. Rows reduce to padded cell content.
    #[must_use]
    pub fn empty() -> Self {
        Self::rows([["", "", "", ""]; 4])
    }

    /// Plus, dash, and pipe characters.
    #[must_use]
    pub fn ascii() -> Self {
        Self::rows([
            ["+", "+", "+", "-"],
            ["+", "+", "+", "-"],
            ["+", "+", "+", "-"],
            ["|", "|", "|", ""],
        ])
    }

    /// Markdown table rendering. Only the header separator and the column
    /// bars are drawn. Zero-width columns give the best results.
    #[must_use]
    pub fn markdown() -> Self {
        Self::rows([
            ["", "", "", ""],
            ["", "|", "", "-"],
            ["", "", "", ""],
            ["", "|", "", ""],
        ])
    }

    /// Light box-drawing characters.
    #[must_use]
    pub fn box_drawing() -> Self {
        Self::rows([
            ["┌", "┬", "┐", "─"],
            ["├", "┼", "┤", "─"],
            ["└", "┴", "┘", "─"],
            ["│", "│", "│", ""],
        ])
    }

    /// Heavy box-drawing characters.
    #[must_use]
    pub fn heavy_box() -> Self {
        Self::rows([
            ["┏", "┳", "┓", "━"],
            ["┣", "╋", "┫", "━"],
            ["┗", "┻", "┛", "━"],
            ["┃", "┃", "┃", ""],
        ])
    }

    /// Double-line box-drawing characters.
    #[must_use]
    pub fn double_box() -> Self {
        Self::rows([
            ["╔", "╦", "╗", "═"],
            ["╠", "╬", "╣", "═"],
            ["╚", "╩", "╝", "═"],
            ["║", "║", "║", ""],
        ])
    }

    /// Light box-drawing characters with arc corners.
    #[must_use]
    pub fn rounded_box() -> Self {
        Self::rows([
            ["╭", "┬", "╮", "─"],
            ["├", "┼", "┤", "─"],
            ["╰", "┴", "╯", "─"],
            ["│", "│", "│", ""],
        ])
    }

    /// [`Style::ascii`] without the outer edges.
    #[must_use]
    pub fn borderless_ascii() -> Self {
        Self::rows([
            ["", "", "", ""],
            ["", "+", "", "-"],
            ["", "", "", ""],
            ["", "|", "", ""],
        ])
    }

    /// [`Style::box_drawing`] without the outer edges.
    #[must_use]
    pub fn borderless_box() -> Self {
        Self::rows([
            ["", "", "", ""],
            ["", "┼", "", "─"],
            ["", "", "", ""],
            ["", "│", "", ""],
        ])
    }

    /// [`Style::heavy_box`] without the outer edges.
    #[must_use]
    pub fn borderless_heavy_box() -> Self {
        Self::rows([
            ["", "", "", ""],
            ["", "╋", "", "━"],
            ["", "", "", ""],
            ["", "┃", "", ""],
        ])
    }

    /// [`Style::double_box`] without the outer edges.
    #[must_use]
    pub fn borderless_double_box() -> Self {
        Self::rows([
            ["", "", "", ""],
            ["", "╬", "", "═"],
            ["", "", "", ""],
            ["", "║", "", ""],
        ])
    }
}

impl<U: CodeUnit> Default for Style<U> {
    fn default() -> Self {
        Self::ascii()
    }
}
