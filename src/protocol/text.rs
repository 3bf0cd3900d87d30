//! # ESC/P2 Text Styling Commands
//!
//! This module implements the character-level commands: typeface,
//! pitch and point size, emphasis, underline, super/subscript, and the
//! character table assignment.
//!
//! ## Text Styling Overview
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Bold | ESC E / ESC F | Emphasized text |
//! | Italic | ESC 4 / ESC 5 | Italic text |
//! | Underline | ESC - n | Continuous underline |
//! | Superscript | ESC S 0 / ESC T | Raised half-height text |
//! | Subscript | ESC S 1 / ESC T | Lowered half-height text |
//!
//! ## Pitch
//!
//! ESC/P2 prints either proportionally (each glyph has its own width) or
//! at a fixed pitch. Multipoint mode (`ESC X`) combines a pitch with a point
//! size for the scalable typefaces.

use super::commands::{ESC, u16_le};

// ============================================================================
// TYPEFACE
// ============================================================================

/// # Select Typeface (ESC k n)
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | ESC k n |
/// | Hex     | 1B 6B n |
///
/// `n` is the device typeface code (0 = Roman, 1 = Sans Serif, ...).
///
/// ## Example
///
/// ```
/// use pinfeed::protocol::text;
///
/// assert_eq!(text::font(2), vec![0x1B, 0x6B, 0x02]);
/// ```
#[inline]
pub fn font(code: u8) -> Vec<u8> {
    vec![ESC, b'k', code]
}

/// # Select Letter Quality (ESC x n)
///
/// `true` selects LQ/NLQ printing, `false` draft.
#[inline]
pub fn letter_quality(enabled: bool) -> Vec<u8> {
    vec![ESC, b'x', enabled as u8]
}

// ============================================================================
// PITCH & POINT SIZE
// ============================================================================

/// Pitch argument for the multipoint command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultipointPitch {
    /// Keep the current pitch, change only the point size (m = 0).
    Keep = 0,
    /// Select proportional spacing (m = 1).
    Proportional = 1,
}

/// # Turn Proportional Mode On/Off (ESC p n)
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | ESC p n |
/// | Hex     | 1B 70 n |
#[inline]
pub fn proportional(enabled: bool) -> Vec<u8> {
    vec![ESC, b'p', enabled as u8]
}

/// # Select 10 cpi (ESC P)
///
/// Selects 10 characters per inch and cancels multipoint mode, which also
/// returns the point size to 10.5.
#[inline]
pub fn ten_cpi() -> Vec<u8> {
    vec![ESC, b'P']
}

/// # Select Pitch and Point Size (ESC X m nL nH)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC X m nL nH |
/// | Hex     | 1B 58 m nL nH |
///
/// ## Parameters
///
/// - `pitch`: [`MultipointPitch::Keep`] or [`MultipointPitch::Proportional`]
/// - `half_points`: point size in 1/2 point units (21 = 10.5 pt)
///
/// Only the scalable typefaces honor the point size.
///
/// ## Example
///
/// ```
/// use pinfeed::protocol::text::{multipoint, MultipointPitch};
///
/// // 14 pt, proportional
/// assert_eq!(multipoint(MultipointPitch::Proportional, 28), vec![0x1B, 0x58, 1, 28, 0]);
/// // back to 10.5 pt, pitch unchanged
/// assert_eq!(multipoint(MultipointPitch::Keep, 21), vec![0x1B, 0x58, 0, 21, 0]);
/// ```
pub fn multipoint(pitch: MultipointPitch, half_points: u16) -> Vec<u8> {
    let [lo, hi] = u16_le(half_points);
    vec![ESC, b'X', pitch as u8, lo, hi]
}

// ============================================================================
// EMPHASIS
// ============================================================================

/// # Select Bold (ESC E)
#[inline]
pub fn bold_on() -> Vec<u8> {
    vec![ESC, b'E']
}

/// # Cancel Bold (ESC F)
#[inline]
pub fn bold_off() -> Vec<u8> {
    vec![ESC, b'F']
}

/// # Select Italic (ESC 4)
#[inline]
pub fn italic_on() -> Vec<u8> {
    vec![ESC, b'4']
}

/// # Cancel Italic (ESC 5)
#[inline]
pub fn italic_off() -> Vec<u8> {
    vec![ESC, b'5']
}

/// # Turn Underline On/Off (ESC - n)
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | ESC - n |
/// | Hex     | 1B 2D n |
#[inline]
pub fn underline(enabled: bool) -> Vec<u8> {
    vec![ESC, b'-', enabled as u8]
}

// ============================================================================
// SUPERSCRIPT / SUBSCRIPT
// ============================================================================

/// Vertical script position of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Superscript = 0,
    Subscript = 1,
}

/// # Select Superscript/Subscript (ESC S n)
///
/// ## Example
///
/// ```
/// use pinfeed::protocol::text::{script, Script};
///
/// assert_eq!(script(Script::Superscript), vec![0x1B, 0x53, 0x00]);
/// assert_eq!(script(Script::Subscript), vec![0x1B, 0x53, 0x01]);
/// ```
#[inline]
pub fn script(position: Script) -> Vec<u8> {
    vec![ESC, b'S', position as u8]
}

/// # Cancel Superscript/Subscript (ESC T)
#[inline]
pub fn script_off() -> Vec<u8> {
    vec![ESC, b'T']
}

// ============================================================================
// CHARACTER TABLES
// ============================================================================

/// # Assign Character Table (ESC ( t 3 0 d1 d2 d3)
///
/// Loads a registered code page into one of the printer's table slots.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC ( t 3 0 d1 d2 d3 |
/// | Hex     | 1B 28 74 03 00 d1 d2 d3 |
///
/// ## Parameters
///
/// - `slot`: table slot `d1` (0-3)
/// - `selector`: code page pair `(d2, d3)`, e.g. `(48, 0)` for PC1250
///
/// ## Example
///
/// ```
/// use pinfeed::protocol::text::assign_table;
///
/// let cmd = assign_table(1, (48, 0));
/// assert_eq!(cmd, vec![0x1B, 0x28, 0x74, 3, 0, 1, 48, 0]);
/// ```
pub fn assign_table(slot: u8, selector: (u8, u8)) -> Vec<u8> {
    let (d2, d3) = selector;
    vec![ESC, b'(', b't', 3, 0, slot, d2, d3]
}

/// # Select Character Table (ESC t n)
///
/// Makes table slot `n` the active one for the upper half of the byte range.
#[inline]
pub fn select_table(slot: u8) -> Vec<u8> {
    vec![ESC, b't', slot]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font() {
        assert_eq!(font(0), vec![0x1B, 0x6B, 0x00]);
        assert_eq!(font(11), vec![0x1B, 0x6B, 0x0B]);
    }

    #[test]
    fn test_letter_quality() {
        assert_eq!(letter_quality(true), vec![0x1B, 0x78, 0x01]);
        assert_eq!(letter_quality(false), vec![0x1B, 0x78, 0x00]);
    }

    #[test]
    fn test_pitch_commands() {
        assert_eq!(proportional(true), vec![0x1B, 0x70, 0x01]);
        assert_eq!(proportional(false), vec![0x1B, 0x70, 0x00]);
        assert_eq!(ten_cpi(), vec![0x1B, 0x50]);
    }

    #[test]
    fn test_multipoint() {
        assert_eq!(
            multipoint(MultipointPitch::Proportional, 64),
            vec![0x1B, 0x58, 0x01, 0x40, 0x00]
        );
        assert_eq!(
            multipoint(MultipointPitch::Keep, 21),
            vec![0x1B, 0x58, 0x00, 0x15, 0x00]
        );
    }

    #[test]
    fn test_emphasis() {
        assert_eq!(bold_on(), vec![0x1B, 0x45]);
        assert_eq!(bold_off(), vec![0x1B, 0x46]);
        assert_eq!(italic_on(), vec![0x1B, 0x34]);
        assert_eq!(italic_off(), vec![0x1B, 0x35]);
        assert_eq!(underline(true), vec![0x1B, 0x2D, 0x01]);
        assert_eq!(underline(false), vec![0x1B, 0x2D, 0x00]);
    }

    #[test]
    fn test_script() {
        assert_eq!(script(Script::Superscript), vec![0x1B, 0x53, 0x00]);
        assert_eq!(script(Script::Subscript), vec![0x1B, 0x53, 0x01]);
        assert_eq!(script_off(), vec![0x1B, 0x54]);
    }

    #[test]
    fn test_tables() {
        assert_eq!(
            assign_table(1, (49, 0)),
            vec![0x1B, 0x28, 0x74, 0x03, 0x00, 0x01, 0x31, 0x00]
        );
        assert_eq!(select_table(1), vec![0x1B, 0x74, 0x01]);
    }
}
