//! # IR Opcodes
//!
//! This module defines the intermediate representation (IR) for ESC/P2
//! output. Layout decides *what* the printer must do as a sequence of
//! opcodes; codegen turns them into bytes and [`super::state`] tracks what
//! the device looks like after each one.
//!
//! ## Design Philosophy
//!
//! ```text
//! Layout → IR (inspectable) → PrinterState (diff) → Codegen → Bytes
//! ```
//!
//! Each opcode is one device command. Style changes are individual ops so
//! the state machine can diff attributes one at a time.

use crate::printer::fonts::PointSize;
use crate::protocol::codepage::CharacterTable;
use crate::protocol::text::Script;

/// IR opcodes for ESC/P2 printers.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    // ========== Printer Control ==========
    /// Initialize printer (ESC @). Resets to power-on state.
    Init,

    /// Set line spacing in 1/180 inch.
    SetLineSpacing(u8),

    /// Load a code page into the working table slot.
    SetCharacterTable(CharacterTable),

    /// Make a table slot the active one (ESC t).
    SelectTableSlot(u8),

    /// Letter quality on, draft off.
    SetLetterQuality(bool),

    // ========== Page Layout ==========
    /// Top and bottom margins from the top of the page, in 1/360 inch.
    SetPageFormat { top: u16, bottom: u16 },

    /// Left margin in 1/10 inch.
    SetLeftMargin(u8),

    // ========== Style Changes ==========
    /// Select typeface by device code.
    SetFont(u8),

    /// Proportional mode on/off (ESC p).
    SetProportional(bool),

    /// Select 10 cpi and cancel multipoint (ESC P).
    SelectTenCpi,

    /// Point size, optionally switching to proportional pitch (ESC X).
    SetMultipoint { proportional: bool, size: PointSize },

    SetBold(bool),

    SetItalic(bool),

    SetUnderline(bool),

    /// Superscript, subscript, or neither.
    SetScript(Option<Script>),

    // ========== Positioning ==========
    /// Absolute horizontal position from the left margin, in 1/60 inch.
    HorizontalPosition(u16),

    /// Feed paper by 1/360 inch units without printing.
    VerticalAdvance(u16),

    CarriageReturn,

    LineFeed,

    FormFeed,

    // ========== Content ==========
    /// Text already encoded in the active character table.
    Text(Vec<u8>),
}

/// A sequence of ops that compiles to one contiguous byte buffer.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub ops: Vec<Op>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Add an op to the program.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// Add multiple ops to the program.
    pub fn extend(&mut self, ops: impl IntoIterator<Item = Op>) {
        self.ops.extend(ops);
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter()
    }
}

impl FromIterator<Op> for Program {
    fn from_iter<T: IntoIterator<Item = Op>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Program {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
