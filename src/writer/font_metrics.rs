//! Base-14 Helvetica metrics and WinAnsi text encoding.
//!
//! Documents use the standard Helvetica faces only, so no font program is
//! embedded. Text is encoded to WinAnsiEncoding bytes to match the font
//! dictionaries written by [`super::PdfWriter`].

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Standard faces used by invoice documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    /// Helvetica
    Helvetica,
    /// Helvetica-Bold
    HelveticaBold,
}

impl Font {
    /// PostScript base font name, also used as the page resource key.
    pub fn base_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Width of a single character in 1/1000 em.
    pub fn char_width(&self, ch: char) -> f32 {
        let table = match self {
            Font::Helvetica => &*HELVETICA_WIDTHS,
            Font::HelveticaBold => &*HELVETICA_BOLD_WIDTHS,
        };
        let base = base_letter(ch);
        table.get(&base).copied().unwrap_or(DEFAULT_WIDTH)
    }

    /// Width of `text` in points at `font_size`.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let units: f32 = text.chars().map(|c| self.char_width(c)).sum();
        units * font_size / 1000.0
    }
}

const DEFAULT_WIDTH: f32 = 556.0;

/// ASCII 32..=126 in order.
const ASCII_PRINTABLE: &str =
    " !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~";

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

fn width_table(widths: &[u16; 95]) -> HashMap<char, f32> {
    let mut table: HashMap<char, f32> = ASCII_PRINTABLE
        .chars()
        .zip(widths.iter())
        .map(|(ch, w)| (ch, *w as f32))
        .collect();
    table.insert('€', 556.0);
    table.insert('–', 556.0);
    table.insert('\u{00A0}', 278.0);
    table
}

lazy_static! {
    static ref HELVETICA_WIDTHS: HashMap<char, f32> = width_table(&HELVETICA);
    static ref HELVETICA_BOLD_WIDTHS: HashMap<char, f32> = width_table(&HELVETICA_BOLD);
}

/// Accented Latin letters share the advance width of their base letter.
fn base_letter(ch: char) -> char {
    match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => 'O',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ç' => 'c',
        'Ç' => 'C',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        'š' => 's',
        'Š' => 'S',
        'ž' => 'z',
        'Ž' => 'Z',
        other => other,
    }
}

/// Encode text as WinAnsiEncoding (Windows-1252) bytes.
///
/// Latin-1 maps one to one. Unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(ch: char) -> u8 {
    let code = ch as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => code as u8,
        _ => match ch {
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            'Š' => 0x8A,
            'Ž' => 0x8E,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            'š' => 0x9A,
            'ž' => 0x9E,
            '\t' | '\n' | '\r' => b' ',
            _ => b'?',
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_widths() {
        assert_eq!(Font::Helvetica.char_width('0'), 556.0);
        assert_eq!(Font::HelveticaBold.char_width('9'), 556.0);
    }

    #[test]
    fn test_text_width() {
        // "LASKU" = L 556 + A 667 + S 667 + K 667 + U 722 = 3279
        let width = Font::Helvetica.text_width("LASKU", 10.0);
        assert!((width - 32.79).abs() < 1e-3);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = Font::Helvetica.text_width("Yhteensä", 12.0);
        let bold = Font::HelveticaBold.text_width("Yhteensä", 12.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_accented_letters_use_base_width() {
        assert_eq!(Font::Helvetica.char_width('ä'), Font::Helvetica.char_width('a'));
        assert_eq!(Font::HelveticaBold.char_width('Ö'), Font::HelveticaBold.char_width('O'));
    }

    #[test]
    fn test_base_names() {
        assert_eq!(Font::Helvetica.base_name(), "Helvetica");
        assert_eq!(Font::HelveticaBold.base_name(), "Helvetica-Bold");
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Summa"), b"Summa".to_vec());
        assert_eq!(encode_win_ansi("Jäsen"), vec![b'J', 0xE4, b's', b'e', b'n']);
        assert_eq!(encode_win_ansi("5 €"), vec![b'5', b' ', 0x80]);
        assert_eq!(encode_win_ansi("Å ö"), vec![0xC5, b' ', 0xF6]);
        assert_eq!(encode_win_ansi("漢"), vec![b'?']);
    }
}
