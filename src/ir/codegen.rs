//! # Code Generation
//!
//! Converts IR ops to ESC/P2 protocol bytes.

use super::ops::{Op, Program};
use crate::protocol::codepage::CharacterTable;
use crate::protocol::text::MultipointPitch;
use crate::protocol::{commands, text};

impl Op {
    /// Append this op's command bytes to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        match self {
            // ===== Printer Control =====
            Op::Init => out.extend(commands::init()),
            Op::SetLineSpacing(n) => out.extend(commands::line_spacing(*n)),
            Op::SetCharacterTable(table) => {
                out.extend(text::assign_table(CharacterTable::SLOT, table.selector()));
            }
            Op::SelectTableSlot(slot) => out.extend(text::select_table(*slot)),
            Op::SetLetterQuality(enabled) => out.extend(text::letter_quality(*enabled)),

            // ===== Page Layout =====
            Op::SetPageFormat { top, bottom } => out.extend(commands::page_format(*top, *bottom)),
            Op::SetLeftMargin(n) => out.extend(commands::left_margin(*n)),

            // ===== Style Changes =====
            Op::SetFont(code) => out.extend(text::font(*code)),
            Op::SetProportional(enabled) => out.extend(text::proportional(*enabled)),
            Op::SelectTenCpi => out.extend(text::ten_cpi()),
            Op::SetMultipoint { proportional, size } => {
                let pitch = if *proportional {
                    MultipointPitch::Proportional
                } else {
                    MultipointPitch::Keep
                };
                out.extend(text::multipoint(pitch, u16::from(size.half_points())));
            }
            Op::SetBold(true) => out.extend(text::bold_on()),
            Op::SetBold(false) => out.extend(text::bold_off()),
            Op::SetItalic(true) => out.extend(text::italic_on()),
            Op::SetItalic(false) => out.extend(text::italic_off()),
            Op::SetUnderline(enabled) => out.extend(text::underline(*enabled)),
            Op::SetScript(Some(position)) => out.extend(text::script(*position)),
            Op::SetScript(None) => out.extend(text::script_off()),

            // ===== Positioning =====
            Op::HorizontalPosition(pos) => out.extend(commands::horizontal_position(*pos)),
            Op::VerticalAdvance(n) => out.extend(commands::relative_vertical_position(*n)),
            Op::CarriageReturn => out.push(commands::CR),
            Op::LineFeed => out.push(commands::LF),
            Op::FormFeed => out.push(commands::FF),

            // ===== Content =====
            Op::Text(bytes) => out.extend_from_slice(bytes),
        }
    }

    /// Compile a single op.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_to(&mut out);
        out
    }
}

impl Program {
    /// Compile the IR program to ESC/P2 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for op in &self.ops {
            op.write_to(&mut out);
        }
        out
    }
}
