//! # Character Tables
//!
//! Converts Unicode text into the single-byte code pages the printer can
//! load into a character table slot, and records which typefaces each
//! table can be printed with.
//!
//! | Table | Selector | Typefaces |
//! |-------|----------|-----------|
//! | PC437 | (1, 0) | 0-11 |
//! | PC1250 | (48, 0) | 0-4 |
//! | PC1251 | (49, 0) | 0-4 |
//!
//! ASCII (U+0000–U+007F) is identical in every table. The upper half is
//! looked up per table; characters a table cannot represent are reported
//! back to the caller instead of being replaced, so the layout engine can
//! switch tables for them.

use std::fmt;
use std::str::FromStr;

use crate::error::PinfeedError;

/// A printer character table (code page) that text can be encoded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterTable {
    /// IBM PC code page 437 (box drawing, Greek, Western accents)
    Pc437,
    /// Windows-1250 (Central European)
    #[default]
    Pc1250,
    /// Windows-1251 (Cyrillic)
    Pc1251,
}

impl CharacterTable {
    /// Every registered table.
    pub const ALL: [Self; 3] = [Self::Pc437, Self::Pc1250, Self::Pc1251];

    /// Tables tried, in order, for characters the active table cannot encode.
    pub const FALLBACKS: [Self; 2] = [Self::Pc1250, Self::Pc437];

    /// Table substituted when a typeface is not available in the active one.
    pub const SUBSTITUTE: Self = Self::Pc437;

    /// Table slot the engine loads code pages into.
    pub const SLOT: u8 = 1;

    /// Registry name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Pc437 => "PC437",
            Self::Pc1250 => "PC1250",
            Self::Pc1251 => "PC1251",
        }
    }

    /// Code page pair for `ESC ( t`.
    pub fn selector(self) -> (u8, u8) {
        match self {
            Self::Pc437 => (1, 0),
            Self::Pc1250 => (48, 0),
            Self::Pc1251 => (49, 0),
        }
    }

    /// Whether typeface `font` has glyphs for this table.
    pub fn supports(self, font: u8) -> bool {
        match self {
            Self::Pc437 => font <= 11,
            Self::Pc1250 | Self::Pc1251 => font <= 4,
        }
    }

    fn upper_half(self) -> &'static [char; 128] {
        match self {
            Self::Pc437 => &PC437_UPPER,
            Self::Pc1250 => &PC1250_UPPER,
            Self::Pc1251 => &PC1251_UPPER,
        }
    }

    /// Encode a single character, if the table has it.
    pub fn encode_char(self, ch: char) -> Option<u8> {
        if (ch as u32) < 0x80 {
            return Some(ch as u8);
        }
        self.upper_half()
            .iter()
            .position(|&c| c == ch)
            .map(|i| 0x80 + i as u8)
    }

    /// Encode a whole string.
    ///
    /// Every table is single-byte, so the output has exactly one byte per
    /// `char`. On failure returns the byte offset into `text` of the first
    /// character that has no representation.
    ///
    /// ```
    /// use pinfeed::protocol::codepage::CharacterTable;
    ///
    /// assert_eq!(CharacterTable::Pc1251.encode("Да"), Ok(vec![0xC4, 0xE0]));
    /// assert_eq!(CharacterTable::Pc1251.encode("aŠ"), Err(1));
    /// ```
    pub fn encode(self, text: &str) -> Result<Vec<u8>, usize> {
        let mut out = Vec::with_capacity(text.len());
        for (index, ch) in text.char_indices() {
            match self.encode_char(ch) {
                Some(byte) => out.push(byte),
                None => return Err(index),
            }
        }
        Ok(out)
    }
}

impl fmt::Display for CharacterTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CharacterTable {
    type Err = PinfeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|table| table.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PinfeedError::UnknownCharacterTable(s.to_string()))
    }
}

// Upper halves (0x80-0xFF). '\0' marks an unassigned byte.

#[rustfmt::skip]
const PC437_UPPER: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{A0}',
];

#[rustfmt::skip]
const PC1250_UPPER: [char; 128] = [
    '€', '\0', '\u{201A}', '\0', '\u{201E}', '…', '†', '‡', '\0', '‰', 'Š', '‹', 'Ś', 'Ť', 'Ž', 'Ź',
    '\0', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '•', '–', '—', '\0', '™', 'š', '›', 'ś', 'ť', 'ž', 'ź',
    '\u{A0}', 'ˇ', '˘', 'Ł', '¤', 'Ą', '¦', '§', '¨', '©', 'Ş', '«', '¬', '\u{AD}', '®', 'Ż',
    '°', '±', '˛', 'ł', '´', 'µ', '¶', '·', '¸', 'ą', 'ş', '»', 'Ľ', '˝', 'ľ', 'ż',
    'Ŕ', 'Á', 'Â', 'Ă', 'Ä', 'Ĺ', 'Ć', 'Ç', 'Č', 'É', 'Ę', 'Ë', 'Ě', 'Í', 'Î', 'Ď',
    'Đ', 'Ń', 'Ň', 'Ó', 'Ô', 'Ő', 'Ö', '×', 'Ř', 'Ů', 'Ú', 'Ű', 'Ü', 'Ý', 'Ţ', 'ß',
    'ŕ', 'á', 'â', 'ă', 'ä', 'ĺ', 'ć', 'ç', 'č', 'é', 'ę', 'ë', 'ě', 'í', 'î', 'ď',
    'đ', 'ń', 'ň', 'ó', 'ô', 'ő', 'ö', '÷', 'ř', 'ů', 'ú', 'ű', 'ü', 'ý', 'ţ', '˙',
];

#[rustfmt::skip]
const PC1251_UPPER: [char; 128] = [
    'Ђ', 'Ѓ', '\u{201A}', 'ѓ', '\u{201E}', '…', '†', '‡', '€', '‰', 'Љ', '‹', 'Њ', 'Ќ', 'Ћ', 'Џ',
    'ђ', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '•', '–', '—', '\0', '™', 'љ', '›', 'њ', 'ќ', 'ћ', 'џ',
    '\u{A0}', 'Ў', 'ў', 'Ј', '¤', 'Ґ', '¦', '§', 'Ё', '©', 'Є', '«', '¬', '\u{AD}', '®', 'Ї',
    '°', '±', 'І', 'і', 'ґ', 'µ', '¶', '·', 'ё', '№', 'є', '»', 'ј', 'Ѕ', 'ѕ', 'ї',
    'А', 'Б', 'В', 'Г', 'Д', 'Е', 'Ж', 'З', 'И', 'Й', 'К', 'Л', 'М', 'Н', 'О', 'П',
    'Р', 'С', 'Т', 'У', 'Ф', 'Х', 'Ц', 'Ч', 'Ш', 'Щ', 'Ъ', 'Ы', 'Ь', 'Э', 'Ю', 'Я',
    'а', 'б', 'в', 'г', 'д', 'е', 'ж', 'з', 'и', 'й', 'к', 'л', 'м', 'н', 'о', 'п',
    'р', 'с', 'т', 'у', 'ф', 'х', 'ц', 'ч', 'ш', 'щ', 'ъ', 'ы', 'ь', 'э', 'ю', 'я',
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        for table in CharacterTable::ALL {
            assert_eq!(table.encode("Hello, world!"), Ok(b"Hello, world!".to_vec()));
        }
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(CharacterTable::Pc437.encode(""), Ok(vec![]));
    }

    #[test]
    fn test_pc437_box_drawing() {
        assert_eq!(CharacterTable::Pc437.encode("┌─┐"), Ok(vec![0xDA, 0xC4, 0xBF]));
        assert_eq!(CharacterTable::Pc437.encode_char('\u{A0}'), Some(0xFF));
    }

    #[test]
    fn test_pc1250_central_european() {
        assert_eq!(CharacterTable::Pc1250.encode("Šž"), Ok(vec![0x8A, 0x9E]));
        assert_eq!(CharacterTable::Pc1250.encode_char('\u{AD}'), Some(0xAD));
        assert_eq!(CharacterTable::Pc1250.encode_char('–'), Some(0x96));
        assert_eq!(CharacterTable::Pc1250.encode_char('—'), Some(0x97));
    }

    #[test]
    fn test_pc1251_cyrillic() {
        assert_eq!(CharacterTable::Pc1251.encode("Ая"), Ok(vec![0xC0, 0xFF]));
        assert_eq!(CharacterTable::Pc1251.encode_char('Ё'), Some(0xA8));
    }

    #[test]
    fn test_unassigned_bytes_never_match() {
        // '\0' is below 0x80 and encodes through the ASCII path,
        // so unassigned upper slots can't be hit by lookup.
        assert_eq!(CharacterTable::Pc1250.encode_char('\0'), Some(0x00));
        assert_eq!(CharacterTable::Pc1250.upper_half()[0x01], '\0');
        assert_eq!(CharacterTable::Pc1251.upper_half()[0x18], '\0');
    }

    #[test]
    fn test_encode_reports_byte_offset() {
        // 'é' is two bytes in UTF-8, so 'Ж' starts at byte 3.
        assert_eq!(CharacterTable::Pc1250.encode("aéЖ"), Err(3));
        assert_eq!(CharacterTable::Pc437.encode("Ж"), Err(0));
    }

    #[test]
    fn test_upper_half_encodes_to_its_own_byte() {
        for table in CharacterTable::ALL {
            for byte in 0x80..=0xFFu8 {
                let ch = table.upper_half()[usize::from(byte - 0x80)];
                if ch != '\0' {
                    assert_eq!(table.encode_char(ch), Some(byte), "{} {:#04x}", table, byte);
                }
            }
        }
    }

    #[test]
    fn test_font_support() {
        assert!(CharacterTable::Pc437.supports(11));
        assert!(CharacterTable::Pc1250.supports(4));
        assert!(!CharacterTable::Pc1250.supports(5));
        assert!(!CharacterTable::Pc1251.supports(10));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("PC1250".parse::<CharacterTable>().unwrap(), CharacterTable::Pc1250);
        assert_eq!("pc437".parse::<CharacterTable>().unwrap(), CharacterTable::Pc437);
        assert!(matches!(
            "PC869".parse::<CharacterTable>(),
            Err(PinfeedError::UnknownCharacterTable(_))
        ));
    }

    #[test]
    fn test_selectors() {
        assert_eq!(CharacterTable::Pc437.selector(), (1, 0));
        assert_eq!(CharacterTable::Pc1250.selector(), (48, 0));
        assert_eq!(CharacterTable::Pc1251.selector(), (49, 0));
    }
}
