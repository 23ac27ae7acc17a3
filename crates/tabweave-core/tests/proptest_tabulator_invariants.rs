#![forbid(unsafe_code)]

//! Property tests for the quantified engine invariants.

use std::fmt::Write as _;

use proptest::prelude::*;
use tabweave_core::{Tabulator, Truncate, Wrap, utflen_str};

fn render(tab: Tabulator<u8, Vec<u8>>) -> String {
    String::from_utf8(tab.finish().unwrap()).unwrap()
}

proptest! {
    /// Code-point counting agrees with `chars()` on any valid string.
    #[test]
    fn utflen_matches_char_count(s in any::<String>()) {
        prop_assert_eq!(utflen_str(&s), s.chars().count());
    }

    /// A truncating cell emits exactly one line per row close, and that
    /// line is exactly the column width plus pads and borders.
    #[test]
    fn truncation_emits_one_exact_line(
        s in "[a-zA-Z0-9 ]{0,120}",
        width in 2usize..30,
        right in any::<bool>(),
    ) {
        let mut tab = Tabulator::with_widths(Vec::new(), &[width]);
        tab.set_truncate(if right { Truncate::Right } else { Truncate::Left });
        write!(tab, "{s}").unwrap();
        tab.next_column().unwrap();
        let out = render(tab);

        let lines: Vec<&str> = out.lines().collect();
        prop_assert_eq!(lines.len(), 1, "one line per row close: {:?}", out);
        // | + lpad + width + rpad + |
        prop_assert_eq!(utflen_str(lines[0]), width + 4);
    }

    /// Character-wrapped rows always render at the exact cell width, and
    /// joining the content chunks reproduces the input.
    #[test]
    fn character_wrap_conserves_content(
        s in "[a-zA-Z0-9]{1,80}",
        width in 1usize..20,
    ) {
        let mut tab = Tabulator::with_widths(Vec::new(), &[width]);
        tab.set_wrap(Wrap::Character);
        write!(tab, "{s}").unwrap();
        tab.next_column().unwrap();
        let out = render(tab);

        let mut rejoined = String::new();
        for line in out.lines() {
            prop_assert_eq!(utflen_str(line), width + 4, "line {:?}", line);
            let chunk = line
                .strip_prefix("| ")
                .and_then(|l| l.strip_suffix(" |"))
                .expect("framed line");
            rejoined.push_str(chunk.trim_end());
        }
        prop_assert_eq!(rejoined, s);
    }

    /// Every rendered row line of a multi-column table has the same width:
    /// the sum of the cell widths plus the border glyphs.
    #[test]
    fn rows_conserve_total_width(
        a in "[a-z ]{0,40}",
        b in "[a-z ]{0,40}",
        c in "[a-z ]{0,40}",
        widths in prop::array::uniform3(1usize..12),
    ) {
        let mut tab = Tabulator::with_widths(Vec::new(), &widths);
        for text in [&a, &b, &c] {
            write!(tab, "{text}").unwrap();
            tab.next_column().unwrap();
        }
        let out = render(tab);

        let expected: usize = widths.iter().map(|w| w + 2).sum::<usize>() + 4;
        for line in out.lines() {
            prop_assert_eq!(utflen_str(line), expected, "line {:?}", line);
        }
    }

    /// Multi-byte input never tears: every rendered line is valid UTF-8
    /// at the same code-point width as ASCII input would be.
    #[test]
    fn multi_byte_lines_hold_the_width(
        s in "[ăƀçđê€𝄞a-z]{1,40}",
        width in 2usize..16,
    ) {
        let mut tab = Tabulator::with_widths(Vec::new(), &[width]);
        tab.set_wrap(Wrap::Character);
        write!(tab, "{s}").unwrap();
        tab.next_column().unwrap();
        // `render` already proves the output is valid UTF-8.
        let out = render(tab);
        for line in out.lines() {
            prop_assert_eq!(utflen_str(line), width + 4, "line {:?}", line);
        }
    }
}
