//! Static glyph-width table for Helvetica and the line-wrapping built on it.
//!
//! Widths are the Adobe core-font metrics in 1/1000 em for ASCII 0x20..=0x7E.
//! Bold text is approximated by scaling the regular widths; the error is well
//! inside the right margin slack. Non-ASCII characters fall back to the
//! average width.

/// US letter, in points.
pub const PAGE_WIDTH_PT: f32 = 612.0;
pub const PAGE_HEIGHT_PT: f32 = 792.0;
pub const MARGIN_PT: f32 = 50.0;

pub const TEXT_WIDTH_PT: f32 = PAGE_WIDTH_PT - 2.0 * MARGIN_PT;

/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT: f32 = 1.25;

const BOLD_SCALE: f32 = 1.06;
const AVERAGE_WIDTH: u16 = 556;

/// Index = (char as usize) - 32.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    // sp    !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
      278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
      556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
      278, 278, 584, 584, 584, 556, 1015,
    // A-Z
      667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
      722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
      278, 278, 278, 469, 556, 333,
    // a-z
      556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
      556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
      334, 260, 334, 584,
];

/// Rendered width of `text` in points at `size_pt`.
pub fn measure(text: &str, size_pt: f32, bold: bool) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as usize;
            if (32..=126).contains(&code) {
                u32::from(HELVETICA_WIDTHS[code - 32])
            } else {
                u32::from(AVERAGE_WIDTH)
            }
        })
        .sum();
    let width = units as f32 / 1000.0 * size_pt;
    if bold {
        width * BOLD_SCALE
    } else {
        width
    }
}

/// Greedy word wrap to `max_width_pt`.
///
/// A single word wider than the line is hard-split by characters.
pub fn wrap_text(text: &str, size_pt: f32, bold: bool, max_width_pt: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if measure(&candidate, size_pt, bold) <= max_width_pt {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if measure(word, size_pt, bold) <= max_width_pt {
            current = word.to_string();
        } else {
            let mut pieces = split_long_word(word, size_pt, bold, max_width_pt);
            current = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_long_word(word: &str, size_pt: f32, bold: bool, max_width_pt: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for c in word.chars() {
        piece.push(c);
        if measure(&piece, size_pt, bold) > max_width_pt && piece.chars().count() > 1 {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(c);
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

pub fn line_advance(size_pt: f32) -> f32 {
    size_pt * LINE_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_known_widths() {
        // "Hi" = 722 + 222 = 944 units → 9.44pt at 10pt.
        assert!((measure("Hi", 10.0, false) - 9.44).abs() < 1e-4);
        assert!(measure("Hi", 10.0, true) > measure("Hi", 10.0, false));
    }

    #[test]
    fn test_measure_non_ascii_uses_average() {
        assert!((measure("é", 10.0, false) - 5.56).abs() < 1e-4);
    }

    #[test]
    fn test_short_text_is_single_line() {
        let lines = wrap_text("Degree: Computer Science", 11.0, false, TEXT_WIDTH_PT);
        assert_eq!(lines, vec!["Degree: Computer Science"]);
    }

    #[test]
    fn test_long_text_wraps_within_width() {
        let text = "Skills: ".to_string() + &["JavaScript"; 30].join(", ");
        let lines = wrap_text(&text, 11.0, false, TEXT_WIDTH_PT);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(measure(line, 11.0, false) <= TEXT_WIDTH_PT);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_oversized_word_is_hard_split() {
        let word = "x".repeat(400);
        let lines = wrap_text(&word, 11.0, false, 100.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(measure(line, 11.0, false) <= 100.0);
        }
    }

    #[test]
    fn test_empty_text_yields_one_empty_line() {
        assert_eq!(wrap_text("", 11.0, false, 100.0), vec![String::new()]);
    }
}
