//! Metrics for the standard Type1 fonts used by the PDF exporter.
//!
//! The standard fonts are not embedded, so text is encoded as WinAnsi and
//! measured with the Helvetica and Helvetica-Bold AFM advance widths.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
    Italic,
    Mono,
}

impl Font {
    pub const ALL: [Font; 4] = [Font::Regular, Font::Bold, Font::Italic, Font::Mono];

    /// Name under which the font is registered in the page resources.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Italic => "F3",
            Font::Mono => "F4",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
            Font::Italic => "Helvetica-Oblique",
            Font::Mono => "Courier",
        }
    }

    /// Advance width of `text` set at `size` points.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = encode_win_ansi(text)
            .into_iter()
            .map(|byte| self.glyph_width(byte))
            .sum();
        units as f32 * size / 1000.0
    }

    fn glyph_width(self, byte: u8) -> u32 {
        match self {
            Font::Mono => 600,
            Font::Regular | Font::Italic => afm_width(&HELVETICA_ASCII, byte),
            Font::Bold => afm_width(&HELVETICA_BOLD_ASCII, byte),
        }
    }
}

/// Helvetica widths for the printable ASCII range, starting at the space.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' .. '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0' .. '9'
    278, 278, 584, 584, 584, 556, 1015, // ':' .. '@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A' .. 'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N' .. 'Z'
    278, 278, 278, 469, 556, 333, // '[' .. '`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a' .. 'm'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n' .. 'z'
    334, 260, 334, 584, // '{' .. '~'
];

/// Helvetica-Bold widths for the same range.
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' .. '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0' .. '9'
    333, 333, 584, 584, 584, 611, 975, // ':' .. '@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A' .. 'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N' .. 'Z'
    333, 278, 333, 584, 556, 333, // '[' .. '`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a' .. 'm'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n' .. 'z'
    389, 280, 389, 584, // '{' .. '~'
];

// Bullet, ellipsis and em dash share their widths across both weights.
fn afm_width(ascii: &[u16; 95], byte: u8) -> u32 {
    match byte {
        32..=126 => u32::from(ascii[usize::from(byte - 32)]),
        0x95 => 350,
        0x97 => 1000,
        0x85 => 1000,
        _ => 556,
    }
}

/// Encodes `text` for a font using `WinAnsiEncoding`. Characters outside the
/// encoding become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' => b' ',
            c if (c as u32) < 0x80 => c as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            c if (0xA0..=0xFF).contains(&(c as u32)) => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_and_typographic_characters_encode() {
        assert_eq!(encode_win_ansi("A©•"), vec![b'A', 0xA9, 0x95]);
        assert_eq!(
            encode_win_ansi("10× — “x”"),
            vec![b'1', b'0', 0xD7, b' ', 0x97, b' ', 0x93, b'x', 0x94]
        );
    }

    #[test]
    fn unmappable_characters_become_question_marks() {
        assert_eq!(encode_win_ansi("τ⊗∫"), b"???".to_vec());
    }

    #[test]
    fn widths_follow_helvetica_metrics() {
        // "Hi" = 722 + 222 units
        let width = Font::Regular.text_width("Hi", 10.0);
        assert!((width - 9.44).abs() < 1e-4);
        assert_eq!(Font::Mono.text_width("abcd", 10.0), 24.0);
        assert!(Font::Bold.text_width("Hi", 10.0) > width);
    }

    #[test]
    fn bold_uses_its_own_metrics() {
        // "il" = 278 + 278 units in Helvetica-Bold, 222 + 222 in Helvetica
        assert!((Font::Bold.text_width("il", 10.0) - 5.56).abs() < 1e-4);
        assert!((Font::Regular.text_width("il", 10.0) - 4.44).abs() < 1e-4);
        // "tr" = 333 + 389
        assert!((Font::Bold.text_width("tr", 10.0) - 7.22).abs() < 1e-4);
        // same widths for digits and the bullet
        assert_eq!(
            Font::Bold.text_width("2026 •", 10.0),
            Font::Regular.text_width("2026 •", 10.0)
        );
    }
}
