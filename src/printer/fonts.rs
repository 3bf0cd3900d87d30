//! # Typefaces and Glyph Metrics
//!
//! Typeface registry and the proportional width table for Epson ESC/P2
//! printers.
//!
//! ## Units
//!
//! Widths are in 1/360 inch at the 10.5 pt reference size. A glyph printed
//! at another point size is scaled by `size / 10.5`.
//!
//! ## Typefaces
//!
//! | Code | Name | Proportional | Scalable |
//! |------|------|--------------|----------|
//! | 0 | Roman | yes | yes |
//! | 1 | Sans Serif | yes | yes |
//! | 2 | Courier | | |
//! | 3 | Prestige | | |
//! | 4 | Script | | |
//! | 5 | OCR-B | | |
//! | 7 | Orator | | |
//! | 8 | Orator-S | | |
//! | 9 | Script C | yes | |
//! | 10 | Roman T | yes | yes |
//! | 11 | Sans Serif H | yes | yes |

use crate::error::PinfeedError;

/// Point sizes the multipoint command accepts (20 and 21 print alike, as
/// do 10 and 10.5).
pub const SUPPORTED_SIZES: [f32; 15] = [
    8.0, 10.0, 10.5, 12.0, 14.0, 16.0, 18.0, 20.0, 21.0, 22.0, 24.0, 26.0, 28.0, 30.0, 32.0,
];

/// Typefaces that honor the point size of `ESC X`.
pub const SCALABLE_FONTS: [u8; 4] = [0, 1, 10, 11];

/// Typefaces that print correctly in proportional mode.
pub const PROPORTIONAL_FONTS: [u8; 5] = [0, 1, 9, 10, 11];

/// Size every width in the table is measured at.
pub const REFERENCE_POINTS: f64 = 10.5;

/// Glyph advance at 10 cpi.
pub const TEN_CPI_WIDTH: u16 = 36;

/// Named typefaces in device-code order, as printed on the sample page.
pub const FONTS: [(&str, u8); 11] = [
    ("Roman", 0),
    ("SansSerif", 1),
    ("Courier", 2),
    ("Prestige", 3),
    ("Script", 4),
    ("OCR-B", 5),
    ("Orator", 7),
    ("Orator-S", 8),
    ("Script C", 9),
    ("Roman T", 10),
    ("Sans serif H", 11),
];

/// Device typeface code for a font name.
///
/// Unknown names select Roman (code 0).
///
/// ```
/// use pinfeed::printer::fonts::font_code;
///
/// assert_eq!(font_code("EpsonSansSerifProportional"), 1);
/// assert_eq!(font_code("Courier"), 2);
/// assert_eq!(font_code("Comic Sans"), 0);
/// ```
pub fn font_code(name: &str) -> u8 {
    match name {
        "EpsonRomanProportional" => 0,
        "EpsonSansSerifProportional" => 1,
        other => FONTS
            .iter()
            .find(|(font, _)| *font == other)
            .map(|&(_, code)| code)
            .unwrap_or(0),
    }
}

#[inline]
pub fn is_scalable(code: u8) -> bool {
    SCALABLE_FONTS.contains(&code)
}

#[inline]
pub fn is_proportional(code: u8) -> bool {
    PROPORTIONAL_FONTS.contains(&code)
}

/// Character spacing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pitch {
    /// Per-glyph widths from the width table
    Proportional,
    /// Fixed 10 characters per inch
    TenCpi,
}

impl Pitch {
    /// Pitch a typeface is printed in.
    pub fn for_font(code: u8) -> Self {
        if is_proportional(code) {
            Self::Proportional
        } else {
            Self::TenCpi
        }
    }
}

// ============================================================================
// POINT SIZE
// ============================================================================

/// A validated point size, stored in half points (the `ESC X` unit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointSize(u8);

impl PointSize {
    /// 10.5 pt, the size selected by `ESC P` and `ESC @`.
    pub const DEFAULT: Self = Self(21);

    /// Validate a size against [`SUPPORTED_SIZES`].
    ///
    /// ```
    /// use pinfeed::printer::fonts::PointSize;
    ///
    /// assert_eq!(PointSize::new(14.0).unwrap().half_points(), 28);
    /// assert!(PointSize::new(15.0).is_err());
    /// ```
    pub fn new(points: f32) -> Result<Self, PinfeedError> {
        if SUPPORTED_SIZES.contains(&points) {
            Ok(Self((points * 2.0) as u8))
        } else {
            Err(PinfeedError::UnsupportedFontSize(points))
        }
    }

    #[inline]
    pub fn half_points(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn points(self) -> f64 {
        f64::from(self.0) / 2.0
    }

    /// Width multiplier relative to the reference size.
    #[inline]
    pub fn scale_factor(self) -> f64 {
        self.points() / REFERENCE_POINTS
    }
}

impl Default for PointSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ============================================================================
// GLYPH WIDTHS
// ============================================================================

/// Advance of `byte` in the given pitch, in 1/360 inch at 10.5 pt.
///
/// Bytes without a proportional width are undefined in both pitches, so a
/// document measures the same way regardless of typeface.
pub fn glyph_advance(byte: u8, pitch: Pitch) -> Option<u16> {
    let width = glyph_width(byte)?;
    Some(match pitch {
        Pitch::Proportional => width,
        Pitch::TenCpi if width == 0 => 0,
        Pitch::TenCpi => TEN_CPI_WIDTH,
    })
}

/// Proportional width of an encoded byte, in 1/360 inch at 10.5 pt.
///
/// The table follows the PC1250 layout; the device prints every supported
/// table with the same advances. Returns `None` for bytes with no glyph.
///
/// ```
/// use pinfeed::printer::fonts::glyph_width;
///
/// assert_eq!(glyph_width(b' '), Some(30));
/// assert_eq!(glyph_width(b'W'), Some(42));
/// assert_eq!(glyph_width(0x7F), None);
/// ```
#[rustfmt::skip]
pub fn glyph_width(byte: u8) -> Option<u16> {
    let width = match byte {
        b'\t' => 30,
        b'\n' | b'\r' => 0,

        // ASCII
        32 => 30, 33 => 18, 34..=36 => 30, 37..=38 => 36, 39 => 18,
        40..=41 => 24, 42..=43 => 30, 44 => 18, 45 => 30, 46 => 18,
        47..=57 => 30, 58..=59 => 18, 60..=63 => 30,
        64..=72 => 36, 73 => 24, 74 => 30, 75..=76 => 36, 77 => 42,
        78..=84 => 36, 85 => 42, 86 => 36, 87 => 42, 88..=89 => 36,
        90 => 30, 91 => 24, 92 => 30, 93 => 24, 94..=95 => 30,
        96 => 18, 97 => 30, 98 => 36, 99 => 30, 100 => 36, 101 => 30,
        102 => 24, 103..=104 => 36, 105 => 18, 106 => 24, 107 => 36,
        108 => 18, 109 => 42, 110 => 36, 111 => 30, 112..=113 => 36,
        114..=115 => 30, 116 => 24, 117..=118 => 36, 119 => 42,
        120 => 30, 121 => 36, 122 => 30, 123 => 24, 124 => 18,
        125 => 24, 126 => 30,

        // Upper half
        128..=129 => 36, 130 => 18, 131..=132 => 30, 133 => 36,
        134..=136 => 30, 137 => 36, 138 => 30, 139..=141 => 18,
        142..=144 => 36, 145..=146 => 18, 147..=149 => 30, 150 => 36,
        151 => 42, 152..=153 => 36, 154 => 42, 155..=156 => 30,
        157 => 36, 158 => 42, 159..=160 => 30, 161 => 18, 162 => 30,
        163..=165 => 36, 166 => 30, 167 => 24, 168 => 30, 169 => 36,
        170..=173 => 30, 174 => 36, 175..=183 => 30,

        _ => return None,
    };
    Some(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_codes() {
        assert_eq!(font_code("EpsonRomanProportional"), 0);
        assert_eq!(font_code("Roman"), 0);
        assert_eq!(font_code("SansSerif"), 1);
        assert_eq!(font_code("Orator-S"), 8);
        assert_eq!(font_code("Sans serif H"), 11);
        assert_eq!(font_code("OCR-A"), 0);
    }

    #[test]
    fn test_font_classes() {
        assert!(is_scalable(10));
        assert!(!is_scalable(9));
        assert!(is_proportional(9));
        assert!(!is_proportional(2));
        assert_eq!(Pitch::for_font(2), Pitch::TenCpi);
        assert_eq!(Pitch::for_font(11), Pitch::Proportional);
    }

    #[test]
    fn test_point_size() {
        let size = PointSize::new(10.5).unwrap();
        assert_eq!(size, PointSize::DEFAULT);
        assert_eq!(size.scale_factor(), 1.0);
        assert_eq!(PointSize::new(21.0).unwrap().scale_factor(), 2.0);
        assert_eq!(PointSize::new(32.0).unwrap().half_points(), 64);
    }

    #[test]
    fn test_unsupported_sizes() {
        for points in [0.0, 9.0, 11.0, 15.0, 33.0] {
            assert!(matches!(
                PointSize::new(points),
                Err(PinfeedError::UnsupportedFontSize(p)) if p == points
            ));
        }
    }

    #[test]
    fn test_every_supported_size_is_valid() {
        for points in SUPPORTED_SIZES {
            let size = PointSize::new(points).unwrap();
            assert_eq!(size.points(), f64::from(points));
        }
    }

    #[test]
    fn test_glyph_width_samples() {
        assert_eq!(glyph_width(b'a'), Some(30));
        assert_eq!(glyph_width(b'i'), Some(18));
        assert_eq!(glyph_width(b'm'), Some(42));
        assert_eq!(glyph_width(b'-'), Some(30));
        assert_eq!(glyph_width(0xAD), Some(30));
        assert_eq!(glyph_width(0x96), Some(36));
        assert_eq!(glyph_width(0x97), Some(42));
    }

    #[test]
    fn test_glyph_width_undefined() {
        assert_eq!(glyph_width(0x00), None);
        assert_eq!(glyph_width(0x1B), None);
        assert_eq!(glyph_width(0x7F), None);
        assert_eq!(glyph_width(0xB8), None);
        assert_eq!(glyph_width(0xFF), None);
    }

    #[test]
    fn test_control_widths() {
        assert_eq!(glyph_width(b'\t'), Some(30));
        assert_eq!(glyph_width(b'\n'), Some(0));
        assert_eq!(glyph_width(b'\r'), Some(0));
    }

    #[test]
    fn test_ten_cpi_advance() {
        assert_eq!(glyph_advance(b'i', Pitch::TenCpi), Some(36));
        assert_eq!(glyph_advance(b'\r', Pitch::TenCpi), Some(0));
        assert_eq!(glyph_advance(0x7F, Pitch::TenCpi), None);
        assert_eq!(glyph_advance(b'i', Pitch::Proportional), Some(18));
    }
}
