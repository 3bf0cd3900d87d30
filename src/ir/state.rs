//! # Printer State
//!
//! Tracks what the device looks like after each op, and computes the op
//! lists that move it into a run's style and back out again.
//!
//! ## Run Transitions
//!
//! A styled run never mutates state implicitly. Before any of its text is
//! laid out, [`StyleTransition::plan`] diffs the current style against the
//! run's style and returns both halves:
//!
//! ```text
//! enter ops ─► run text ─► exit ops      (state after == state before)
//! ```
//!
//! Only attributes that differ produce ops, in this order for both halves:
//! character table, pitch/point size, italic, bold, underline, font, script.

use crate::printer::fonts::{Pitch, PointSize};
use crate::protocol::codepage::CharacterTable;
use crate::protocol::commands::SIXTH_INCH_SPACING;
use crate::protocol::text::Script;

use super::ops::Op;

/// Character-level attributes of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleState {
    pub font: u8,
    pub table: CharacterTable,
    pub pitch: Pitch,
    pub size: PointSize,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub script: Option<Script>,
}

impl Default for StyleState {
    /// Power-on style (after `ESC @`).
    fn default() -> Self {
        Self {
            font: 0,
            table: CharacterTable::Pc437,
            pitch: Pitch::TenCpi,
            size: PointSize::DEFAULT,
            bold: false,
            italic: false,
            underline: false,
            script: None,
        }
    }
}

impl StyleState {
    /// Update the state for an op. Ops that don't touch style are ignored.
    pub fn apply(&mut self, op: &Op) {
        match op {
            Op::Init => *self = Self::default(),
            Op::SetCharacterTable(table) => self.table = *table,
            Op::SetFont(code) => self.font = *code,
            Op::SetProportional(true) => self.pitch = Pitch::Proportional,
            Op::SetProportional(false) => self.pitch = Pitch::TenCpi,
            Op::SelectTenCpi => {
                self.pitch = Pitch::TenCpi;
                self.size = PointSize::DEFAULT;
            }
            Op::SetMultipoint { proportional, size } => {
                if *proportional {
                    self.pitch = Pitch::Proportional;
                }
                self.size = *size;
            }
            Op::SetBold(b) => self.bold = *b,
            Op::SetItalic(i) => self.italic = *i,
            Op::SetUnderline(u) => self.underline = *u,
            Op::SetScript(s) => self.script = *s,
            _ => {}
        }
    }
}

/// Paragraph- and page-level attributes of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// Line spacing in 1/180 inch.
    pub line_spacing: u8,
    /// Left margin last sent, in 1/10 inch.
    pub left_margin: Option<u8>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            line_spacing: SIXTH_INCH_SPACING,
            left_margin: None,
        }
    }
}

impl PageState {
    pub fn apply(&mut self, op: &Op) {
        match op {
            Op::Init => *self = Self::default(),
            Op::SetLineSpacing(n) => self.line_spacing = *n,
            Op::SetLeftMargin(n) => self.left_margin = Some(*n),
            _ => {}
        }
    }
}

/// Full device state, owned by one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrinterState {
    pub style: StyleState,
    pub page: PageState,
}

impl PrinterState {
    pub fn apply(&mut self, op: &Op) {
        self.style.apply(op);
        self.page.apply(op);
    }

    pub fn apply_all<'a>(&mut self, ops: impl IntoIterator<Item = &'a Op>) {
        for op in ops {
            self.apply(op);
        }
    }
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Ops that move the device into a run's style and back out.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleTransition {
    pub enter: Vec<Op>,
    pub exit: Vec<Op>,
}

impl StyleTransition {
    /// Diff `current` against `target`.
    ///
    /// Applying `enter` to `current` yields `target`; applying `exit` after
    /// that yields `current` again.
    pub fn plan(current: &StyleState, target: &StyleState) -> Self {
        let mut enter = Vec::new();
        let mut exit = Vec::new();

        if current.table != target.table {
            enter.push(Op::SetCharacterTable(target.table));
            exit.push(Op::SetCharacterTable(current.table));
        }

        if current.pitch != target.pitch || current.size != target.size {
            match target.pitch {
                Pitch::Proportional => {
                    enter.push(Op::SetMultipoint {
                        proportional: true,
                        size: target.size,
                    });
                    if current.size != target.size {
                        exit.push(Op::SetMultipoint {
                            proportional: false,
                            size: current.size,
                        });
                    }
                    if current.pitch == Pitch::TenCpi {
                        exit.push(Op::SetProportional(false));
                    }
                }
                Pitch::TenCpi => {
                    enter.push(Op::SetProportional(false));
                    enter.push(Op::SelectTenCpi);
                    if current.pitch == Pitch::Proportional {
                        exit.push(Op::SetProportional(true));
                    }
                    if current.size != PointSize::DEFAULT {
                        exit.push(Op::SetMultipoint {
                            proportional: false,
                            size: current.size,
                        });
                    }
                }
            }
        }

        if current.italic != target.italic {
            enter.push(Op::SetItalic(target.italic));
            exit.push(Op::SetItalic(current.italic));
        }
        if current.bold != target.bold {
            enter.push(Op::SetBold(target.bold));
            exit.push(Op::SetBold(current.bold));
        }
        if current.underline != target.underline {
            enter.push(Op::SetUnderline(target.underline));
            exit.push(Op::SetUnderline(current.underline));
        }
        if current.font != target.font {
            enter.push(Op::SetFont(target.font));
            exit.push(Op::SetFont(current.font));
        }
        if current.script != target.script {
            enter.push(Op::SetScript(target.script));
            exit.push(Op::SetScript(current.script));
        }

        Self { enter, exit }
    }

    pub fn is_empty(&self) -> bool {
        self.enter.is_empty() && self.exit.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn after_init() -> StyleState {
        let mut state = StyleState::default();
        for op in [
            Op::Init,
            Op::SetCharacterTable(CharacterTable::Pc1250),
            Op::SetFont(0),
            Op::SetProportional(true),
        ] {
            state.apply(&op);
        }
        state
    }

    fn replay(state: &StyleState, ops: &[Op]) -> StyleState {
        let mut state = *state;
        for op in ops {
            state.apply(op);
        }
        state
    }

    fn size(points: f32) -> PointSize {
        PointSize::new(points).unwrap()
    }

    #[test]
    fn test_identical_styles_need_nothing() {
        let state = after_init();
        assert!(StyleTransition::plan(&state, &state).is_empty());
    }

    #[test]
    fn test_bold_italic_order() {
        let current = after_init();
        let target = StyleState {
            bold: true,
            italic: true,
            ..current
        };
        let t = StyleTransition::plan(&current, &target);
        assert_eq!(t.enter, vec![Op::SetItalic(true), Op::SetBold(true)]);
        assert_eq!(t.exit, vec![Op::SetItalic(false), Op::SetBold(false)]);
    }

    #[test]
    fn test_scaled_proportional_run() {
        let current = after_init();
        let target = StyleState {
            size: size(14.0),
            ..current
        };
        let t = StyleTransition::plan(&current, &target);
        assert_eq!(
            t.enter,
            vec![Op::SetMultipoint {
                proportional: true,
                size: size(14.0)
            }]
        );
        assert_eq!(
            t.exit,
            vec![Op::SetMultipoint {
                proportional: false,
                size: PointSize::DEFAULT
            }]
        );
    }

    #[test]
    fn test_fixed_pitch_run() {
        let current = after_init();
        let target = StyleState {
            font: 2,
            pitch: Pitch::TenCpi,
            ..current
        };
        let t = StyleTransition::plan(&current, &target);
        assert_eq!(
            t.enter,
            vec![Op::SetProportional(false), Op::SelectTenCpi, Op::SetFont(2)]
        );
        assert_eq!(t.exit, vec![Op::SetProportional(true), Op::SetFont(0)]);
    }

    #[test]
    fn test_transitions_are_symmetric() {
        let bases = [
            StyleState::default(),
            after_init(),
            StyleState {
                size: size(24.0),
                bold: true,
                ..after_init()
            },
        ];
        let targets = [
            StyleState {
                table: CharacterTable::Pc437,
                font: 11,
                size: size(32.0),
                underline: true,
                script: Some(Script::Superscript),
                ..after_init()
            },
            StyleState {
                font: 5,
                pitch: Pitch::TenCpi,
                size: PointSize::DEFAULT,
                italic: true,
                script: Some(Script::Subscript),
                ..after_init()
            },
            StyleState {
                table: CharacterTable::Pc1251,
                size: size(8.0),
                ..after_init()
            },
            StyleState::default(),
        ];

        for base in &bases {
            for target in &targets {
                let t = StyleTransition::plan(base, target);
                let entered = replay(base, &t.enter);
                assert_eq!(&entered, target, "enter {:?} -> {:?}", base, target);
                let restored = replay(&entered, &t.exit);
                assert_eq!(&restored, base, "exit {:?} -> {:?}", target, base);
            }
        }
    }

    #[test]
    fn test_page_state_tracks_spacing() {
        let mut state = PrinterState::default();
        state.apply_all(&[
            Op::SetLineSpacing(34),
            Op::CarriageReturn,
            Op::LineFeed,
            Op::VerticalAdvance(36),
        ]);
        assert_eq!(state.page.line_spacing, 34);
        state.apply(&Op::SetLeftMargin(4));
        assert_eq!(state.page.left_margin, Some(4));
        state.apply(&Op::Init);
        assert_eq!(state.page, PageState::default());
    }

    #[test]
    fn test_init_resets_everything() {
        let mut state = PrinterState::default();
        state.apply_all(&[Op::SetBold(true), Op::SetLeftMargin(4), Op::SetLineSpacing(40)]);
        state.apply(&Op::Init);
        assert_eq!(state, PrinterState::default());
    }
}
