//! # Printer Configuration
//!
//! Run-wide settings for the ESC/P2 engine and the conversions from inches
//! to the device's command units.
//!
//! ## Command Units
//!
//! | Quantity | Unit | Constant |
//! |----------|------|----------|
//! | Page format, vertical moves | 1/360 in | [`DEVICE_UNITS`] |
//! | Line spacing | 1/180 in | [`SPACING_UNITS`] |
//! | Horizontal position | 1/60 in | [`POSITION_UNITS`] |
//! | Left margin | 1/10 in | [`MARGIN_UNITS`] |
//!
//! ## Usage
//!
//! ```
//! use pinfeed::printer::PrinterConfig;
//! use pinfeed::protocol::codepage::CharacterTable;
//!
//! let config = PrinterConfig::default().with_character_table(CharacterTable::Pc1251);
//! assert_eq!(config.character_table, CharacterTable::Pc1251);
//! assert!((config.tab_spacing - 12.5 / 25.4).abs() < 1e-12);
//! ```

use crate::error::PinfeedError;
use crate::protocol::codepage::CharacterTable;

pub const DEVICE_UNITS: f64 = 360.0;
pub const SPACING_UNITS: f64 = 180.0;
pub const POSITION_UNITS: f64 = 60.0;
pub const MARGIN_UNITS: f64 = 10.0;

/// # Printer Configuration
///
/// ## Fields
///
/// - **character_table**: code page loaded at init and used for all text
/// - **tab_spacing**: distance between default tab stops, in inches
/// - **preserve_leading_whitespace**: keep leading spaces on the first line
///   of a paragraph and after a manual line break
/// - **line_spacing_scale**: line pitch relative to the nominal font height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrinterConfig {
    pub character_table: CharacterTable,
    pub tab_spacing: f64,
    pub preserve_leading_whitespace: bool,
    pub line_spacing_scale: f64,
}

impl PrinterConfig {
    /// Settings for Epson 24-pin ESC/P2 printers (LQ series).
    pub const ESCP2: Self = Self {
        character_table: CharacterTable::Pc1250,
        tab_spacing: 12.5 / 25.4,
        preserve_leading_whitespace: true,
        line_spacing_scale: 1.15,
    };

    pub fn with_character_table(mut self, table: CharacterTable) -> Self {
        self.character_table = table;
        self
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::ESCP2
    }
}

// ============================================================================
// PAGE SELECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Odd,
    Even,
}

/// Which physical pages produce output.
///
/// Pages are numbered from 1. Content on unselected pages is laid out and
/// discarded.
///
/// ```
/// use pinfeed::printer::config::{PageSelection, Parity};
///
/// let selection = PageSelection { first_page: 3, parity: Some(Parity::Even) };
/// assert!(!selection.contains(2));
/// assert!(!selection.contains(3));
/// assert!(selection.contains(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSelection {
    pub first_page: u32,
    pub parity: Option<Parity>,
}

impl PageSelection {
    pub const ALL: Self = Self {
        first_page: 1,
        parity: None,
    };

    pub fn contains(&self, page: u32) -> bool {
        page >= self.first_page
            && match self.parity {
                None => true,
                Some(Parity::Odd) => page % 2 == 1,
                Some(Parity::Even) => page % 2 == 0,
            }
    }

    /// First selected page at or after `page`.
    pub fn next_selected(&self, page: u32) -> u32 {
        let page = page.max(self.first_page);
        if self.contains(page) { page } else { page + 1 }
    }
}

impl Default for PageSelection {
    fn default() -> Self {
        Self::ALL
    }
}

// ============================================================================
// UNIT CONVERSION
// ============================================================================

/// Convert inches to a 16-bit command argument, truncating toward zero.
///
/// Products within 1e-6 of an integer snap to it, so 0.1 in at 360/in is 36
/// and not 35.
///
/// ```
/// use pinfeed::printer::config::{to_device_units, DEVICE_UNITS, POSITION_UNITS};
///
/// assert_eq!(to_device_units(0.4, DEVICE_UNITS, "top margin").unwrap(), 144);
/// assert_eq!(to_device_units(0.6, POSITION_UNITS, "position").unwrap(), 36);
/// assert_eq!(to_device_units(0.2583, POSITION_UNITS, "position").unwrap(), 15);
/// assert!(to_device_units(-0.1, POSITION_UNITS, "position").is_err());
/// ```
pub fn to_device_units(inches: f64, per_inch: f64, what: &'static str) -> Result<u16, PinfeedError> {
    let units = inches * per_inch;
    let rounded = units.round();
    let units = if (units - rounded).abs() < 1e-6 {
        rounded
    } else {
        units.trunc()
    };
    if units.is_finite() && (0.0..=f64::from(u16::MAX)).contains(&units) {
        Ok(units as u16)
    } else {
        Err(PinfeedError::OutOfRange {
            what,
            value: inches,
        })
    }
}

/// Narrow a command argument to a single byte.
pub fn to_byte(value: u16, what: &'static str) -> Result<u8, PinfeedError> {
    u8::try_from(value).map_err(|_| PinfeedError::OutOfRange {
        what,
        value: f64::from(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PrinterConfig::default();
        assert_eq!(config.character_table, CharacterTable::Pc1250);
        assert!(config.preserve_leading_whitespace);
        assert_eq!(config.line_spacing_scale, 1.15);
    }

    #[test]
    fn test_page_selection_all() {
        let all = PageSelection::default();
        assert!(all.contains(1));
        assert!(all.contains(9999));
    }

    #[test]
    fn test_page_selection_first_page() {
        let from_five = PageSelection {
            first_page: 5,
            parity: None,
        };
        assert!(!from_five.contains(4));
        assert!(from_five.contains(5));
        assert!(from_five.contains(6));
    }

    #[test]
    fn test_page_selection_parity() {
        let odd = PageSelection {
            first_page: 1,
            parity: Some(Parity::Odd),
        };
        assert!(odd.contains(1));
        assert!(!odd.contains(2));
        assert!(odd.contains(3));
    }

    #[test]
    fn test_next_selected() {
        assert_eq!(PageSelection::ALL.next_selected(1), 1);
        let even_from_three = PageSelection {
            first_page: 3,
            parity: Some(Parity::Even),
        };
        assert_eq!(even_from_three.next_selected(1), 4);
        assert_eq!(even_from_three.next_selected(5), 6);
        assert_eq!(even_from_three.next_selected(6), 6);
    }

    #[test]
    fn test_unit_truncation() {
        assert_eq!(to_device_units(11.0 - 0.5 + 0.2, DEVICE_UNITS, "bottom").unwrap(), 3852);
        assert_eq!(to_device_units(0.5 - 0.1, MARGIN_UNITS, "left margin").unwrap(), 4);
        assert_eq!(to_device_units(0.0999, POSITION_UNITS, "position").unwrap(), 5);
    }

    #[test]
    fn test_unit_range() {
        assert!(to_device_units(f64::INFINITY, POSITION_UNITS, "position").is_err());
        assert!(to_device_units(f64::NAN, POSITION_UNITS, "position").is_err());
        assert!(to_device_units(200.0, DEVICE_UNITS, "vertical move").is_err());
    }

    #[test]
    fn test_to_byte() {
        assert_eq!(to_byte(255, "line spacing").unwrap(), 255);
        assert!(matches!(
            to_byte(256, "line spacing"),
            Err(PinfeedError::OutOfRange { what: "line spacing", .. })
        ));
    }
}
