//! # Font Metrics
//!
//! Advance widths of the two standard PDF fonts the invoice uses, plus the
//! text measuring, wrapping and WinAnsi encoding built on them.
//!
//! Helvetica and Helvetica-Bold are base-14 fonts, so every PDF viewer ships
//! them and nothing has to be embedded. Widths are in 1/1000 em and cover
//! printable ASCII; anything else is measured as a digit.
//!
//! The rupee sign has no WinAnsi code point and is written as `Rs.`
//! everywhere, including when measuring.

use crate::document::Font;
use crate::geometry::pt_to_mm;

/// Helvetica widths for 0x20..=0x7E.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // {..~
];

/// Helvetica-Bold widths for 0x20..=0x7E.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    333, 333, 584, 584, 584, 611, 975, // :..@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    333, 278, 333, 584, 556, 333, // [..`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a-m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n-z
    389, 280, 389, 584, // {..~
];

const FALLBACK_WIDTH: u16 = 556;

const RUPEE_REPLACEMENT: &str = "Rs.";

const ELLIPSIS: &str = "...";

fn glyph_width(font: Font, c: char) -> u32 {
    let table = match font {
        Font::Regular => &HELVETICA,
        Font::Bold => &HELVETICA_BOLD,
    };
    match c {
        ' '..='~' => table[c as usize - 0x20] as u32,
        '₹' => RUPEE_REPLACEMENT.chars().map(|r| glyph_width(font, r)).sum(),
        _ => FALLBACK_WIDTH as u32,
    }
}

/// Width of `text` set in `font` at `size_pt`, in millimetres.
pub fn text_width_mm(text: &str, font: Font, size_pt: f32) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(font, c)).sum();
    pt_to_mm(units as f32 * size_pt / 1000.0)
}

/// Greedy word wrap into lines no wider than `max_width_mm`.
///
/// Explicit newlines start a new line. A single word wider than the limit
/// is broken between characters. Blank input yields no lines.
pub fn split_text_to_size(text: &str, font: Font, size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let fits = |s: &str| text_width_mm(s, font, size_pt) <= max_width_mm;
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if fits(&candidate) {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            // Oversized word: hard-break it.
            for c in word.chars() {
                current.push(c);
                if !fits(&current) && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// Cuts `text` to fit `max_width_mm`, ending it with `...` when shortened.
pub fn truncate_to_width(text: &str, font: Font, size_pt: f32, max_width_mm: f32) -> String {
    if text_width_mm(text, font, size_pt) <= max_width_mm {
        return text.to_string();
    }

    let mut kept: Vec<char> = text.chars().collect();
    while !kept.is_empty() {
        kept.pop();
        let candidate: String = kept.iter().collect::<String>().trim_end().to_string() + ELLIPSIS;
        if text_width_mm(&candidate, font, size_pt) <= max_width_mm {
            return candidate;
        }
    }
    ELLIPSIS.to_string()
}

/// Encodes text for a WinAnsi simple font string.
///
/// Latin-1 maps one to one, a few typographic marks map to their 0x80-0x9F
/// slots, the rupee sign becomes `Rs.` and anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ' '..='~' => out.push(c as u8),
            '₹' => out.extend_from_slice(RUPEE_REPLACEMENT.as_bytes()),
            '\t' | '\n' | '\r' => out.push(b' '),
            '\u{A0}'..='\u{FF}' => out.push(c as u32 as u8),
            '€' => out.push(0x80),
            '…' => out.push(0x85),
            '‘' => out.push(0x91),
            '’' => out.push(0x92),
            '“' => out.push(0x93),
            '”' => out.push(0x94),
            '•' => out.push(0x95),
            '–' => out.push(0x96),
            '—' => out.push(0x97),
            '™' => out.push(0x99),
            _ => out.push(b'?'),
        }
    }
    out
}
