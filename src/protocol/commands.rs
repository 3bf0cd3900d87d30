//! # ESC/P2 Device Commands
//!
//! This module implements the page- and paper-level part of the ESC/P2
//! command protocol used by Epson dot-matrix printers (LQ/FX/DLQ series and
//! compatibles).
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `CR`, `LF`, `FF`
//! - Two bytes: `ESC @`, `ESC 2`
//! - With parameters: `ESC 3 n`, `ESC $ nL nH`
//! - Extended: `ESC ( c nL nH ...` where `nL nH` is the parameter length
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`
//!
//! ## Units
//!
//! | Command | Unit |
//! |---------|------|
//! | `ESC 3` line spacing | 1/180 inch |
//! | `ESC $` horizontal position | 1/60 inch |
//! | `ESC ( v` vertical move | 1/360 inch |
//! | `ESC ( c` page format | 1/360 inch |
//! | `ESC l` left margin | 1/10 inch (column at 10 cpi) |
//!
//! ## Reference
//!
//! Based on the "ESC/P2 Reference Manual" by Seiko Epson Corporation.

// ============================================================================
// CONTROL CHARACTERS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// CR (Carriage Return) - Move the print head to the left margin
pub const CR: u8 = 0x0D;

/// LF (Line Feed) - Advance the paper by the current line spacing
pub const LF: u8 = 0x0A;

/// FF (Form Feed) - Eject the page and move to top-of-form of the next one
pub const FF: u8 = 0x0C;

/// Line spacing selected by `ESC 2`, in 1/180 inch.
pub const SIXTH_INCH_SPACING: u8 = 30;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on defaults: formatting cleared, margins
/// reset, line spacing 1/6 inch, character table assignments restored.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// ## Example
///
/// ```
/// use pinfeed::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// LINE SPACING
// ============================================================================

/// # Select 1/6 Inch Line Spacing (ESC 2)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC 2 |
/// | Hex     | 1B 32 |
#[inline]
pub fn line_spacing_sixth() -> Vec<u8> {
    vec![ESC, b'2']
}

/// # Set n/180 Inch Line Spacing (ESC 3 n)
///
/// ## Protocol Details
///
/// | Format  | Bytes     |
/// |---------|-----------|
/// | ASCII   | ESC 3 n   |
/// | Hex     | 1B 33 n   |
///
/// ## Parameters
///
/// - `n`: spacing in 1/180 inch (0-255)
///
/// A spacing of exactly 30 (1/6 inch) is sent as the `ESC 2` shorthand, so
/// callers never need to special-case it.
///
/// ## Example
///
/// ```
/// use pinfeed::protocol::commands;
///
/// assert_eq!(commands::line_spacing(34), vec![0x1B, 0x33, 34]);
/// assert_eq!(commands::line_spacing(30), vec![0x1B, 0x32]);
/// ```
pub fn line_spacing(n: u8) -> Vec<u8> {
    if n == SIXTH_INCH_SPACING {
        line_spacing_sixth()
    } else {
        vec![ESC, b'3', n]
    }
}

// ============================================================================
// PAGE FORMAT & MARGINS
// ============================================================================

/// # Set Page Format (ESC ( c 4 0 tL tH bL bH)
///
/// Sets the top and bottom margins measured from the top edge of the page.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC ( c 4 0 tL tH bL bH |
/// | Hex     | 1B 28 63 04 00 tL tH bL bH |
///
/// ## Parameters
///
/// - `top`: top margin in 1/360 inch
/// - `bottom`: bottom margin in 1/360 inch, measured from the top of the page
///
/// ## Example
///
/// ```
/// use pinfeed::protocol::commands;
///
/// let cmd = commands::page_format(144, 3852);
/// assert_eq!(cmd, vec![0x1B, 0x28, 0x63, 4, 0, 0x90, 0x00, 0x0C, 0x0F]);
/// ```
pub fn page_format(top: u16, bottom: u16) -> Vec<u8> {
    let [tl, th] = u16_le(top);
    let [bl, bh] = u16_le(bottom);
    vec![ESC, b'(', b'c', 4, 0, tl, th, bl, bh]
}

/// # Set Left Margin (ESC l n)
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | ESC l n |
/// | Hex     | 1B 6C n |
///
/// `n` is a column count at 10 cpi, i.e. the margin in 1/10 inch.
#[inline]
pub fn left_margin(n: u8) -> Vec<u8> {
    vec![ESC, b'l', n]
}

// ============================================================================
// PRINT POSITION
// ============================================================================

/// # Set Absolute Horizontal Position (ESC $ nL nH)
///
/// Moves the print position to `position` 1/60 inch from the left margin.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC $ nL nH |
/// | Hex     | 1B 24 nL nH |
///
/// ## Example
///
/// ```
/// use pinfeed::protocol::commands;
///
/// assert_eq!(commands::horizontal_position(300), vec![0x1B, 0x24, 0x2C, 0x01]);
/// ```
pub fn horizontal_position(position: u16) -> Vec<u8> {
    let [lo, hi] = u16_le(position);
    vec![ESC, b'$', lo, hi]
}

/// # Set Relative Vertical Position (ESC ( v 2 0 nL nH)
///
/// Advances the paper by `distance` 1/360 inch without printing.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC ( v 2 0 nL nH |
/// | Hex     | 1B 28 76 02 00 nL nH |
pub fn relative_vertical_position(distance: u16) -> Vec<u8> {
    let [lo, hi] = u16_le(distance);
    vec![ESC, b'(', b'v', 2, 0, lo, hi]
}

// ============================================================================
// PAPER MOTION
// ============================================================================

/// Carriage return
#[inline]
pub fn carriage_return() -> Vec<u8> {
    vec![CR]
}

/// Line feed
#[inline]
pub fn line_feed() -> Vec<u8> {
    vec![LF]
}

/// Form feed
#[inline]
pub fn form_feed() -> Vec<u8> {
    vec![FF]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ## Example
///
/// ```
/// use pinfeed::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(3852), [0x0C, 0x0F]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================
