//! Text measurement for the built-in Helvetica faces
//!
//! Widths are the standard AFM advance widths in 1/1000 em for printable
//! ASCII; anything else is measured as a digit.

use textwrap::core::Fragment;
use textwrap::wrap_algorithms::wrap_first_fit;

const FALLBACK_WIDTH: u16 = 556;

/// Line height as a multiple of the font size
pub const LINE_SPACING: f64 = 1.15;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn char_width(c: char, bold: bool) -> u16 {
    let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
    match c as u32 {
        code @ 32..=126 => table[(code - 32) as usize],
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` in points
pub fn text_width(text: &str, size: f64, bold: bool) -> f64 {
    let units: u32 = text.chars().map(|c| char_width(c, bold) as u32).sum();
    units as f64 * size / 1000.0
}

/// Height of one text line in points
pub fn line_height(size: f64) -> f64 {
    size * LINE_SPACING
}

/// A word (or a piece of an overlong word) measured in points
#[derive(Debug)]
struct MeasuredWord<'a> {
    text: &'a str,
    width: f64,
    /// Width of the space that follows, zero inside a split word
    space: f64,
}

impl Fragment for MeasuredWord<'_> {
    fn width(&self) -> f64 {
        self.width
    }

    fn whitespace_width(&self) -> f64 {
        self.space
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

/// Measure the words of one paragraph, cutting words wider than
/// `max_width` into pieces that fit.
fn measure_words(paragraph: &str, max_width: f64, size: f64, bold: bool) -> Vec<MeasuredWord<'_>> {
    let space = text_width(" ", size, bold);
    let mut words = Vec::new();

    for word in paragraph.split_whitespace() {
        let width = text_width(word, size, bold);
        if width <= max_width {
            words.push(MeasuredWord { text: word, width, space });
            continue;
        }

        let mut start = 0;
        let mut piece_width = 0.0;
        for (idx, c) in word.char_indices() {
            let w = char_width(c, bold) as f64 * size / 1000.0;
            if piece_width + w > max_width && idx > start {
                words.push(MeasuredWord {
                    text: &word[start..idx],
                    width: piece_width,
                    space: 0.0,
                });
                start = idx;
                piece_width = 0.0;
            }
            piece_width += w;
        }
        words.push(MeasuredWord {
            text: &word[start..],
            width: piece_width,
            space,
        });
    }

    words
}

/// Break `text` into lines no wider than `max_width`.
///
/// Words wider than a whole line are split by character. Blank text still
/// takes one (empty) line.
pub fn wrap_text(text: &str, max_width: f64, size: f64, bold: bool) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let words = measure_words(paragraph, max_width, size, bold);
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        for line in wrap_first_fit(&words, &[max_width]) {
            let mut joined = String::new();
            for (idx, word) in line.iter().enumerate() {
                if idx > 0 && line[idx - 1].space > 0.0 {
                    joined.push(' ');
                }
                joined.push_str(word.text);
            }
            lines.push(joined);
        }
    }

    lines
}
