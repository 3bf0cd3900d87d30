//! # Print Engine
//!
//! Drives a [`Document`] through layout and writes the result to a
//! [`Sink`], one command or one line per write.
//!
//! ## Output Shape
//!
//! ```text
//! init ─► margins ─► ┬─ [margin top] line* [margin bottom] ─┬─► CR FF ─► ESC @
//!                    └──────────── per paragraph ───────────┘
//! ```
//!
//! Each line is `[ESC 3 n]` when the spacing changes, then `CR LF` and the
//! justified line in a single write. Page breaks write `CR FF` and, under
//! mirrored margins, the next page's margins.
//!
//! ## Page Selection
//!
//! Pages are counted through `page_break_before` paragraphs and page-break
//! runs. Content on pages outside the [`PageSelection`] is laid out and
//! dropped; only selected pages are ejected.

use std::collections::VecDeque;

use crate::document::{Content, Document, PageSetup, Paragraph, Run};
use crate::error::PinfeedError;
use crate::ir::{Op, PageState, PrinterState, Program};
use crate::layout::word::Word;
use crate::layout::{LayoutContext, LayoutEvent, LineBreaker, justify};
use crate::printer::config::{
    DEVICE_UNITS, MARGIN_UNITS, PageSelection, PrinterConfig, SPACING_UNITS, to_byte,
    to_device_units,
};
use crate::printer::fonts::REFERENCE_POINTS;
use crate::protocol::codepage::CharacterTable;
use crate::protocol::commands::SIXTH_INCH_SPACING;
use crate::transport::Sink;

/// Line pitch in 1/180 in for a line of `height` points.
fn line_spacing(height: f64, factor: f64, scale: f64) -> Result<u8, PinfeedError> {
    let height = if height > 0.0 { height } else { REFERENCE_POINTS };
    let units = to_device_units(height / 72.0 * scale * factor, SPACING_UNITS, "line spacing")?;
    to_byte(units, "line spacing")
}

/// Writes programs to the sink, keeping paper motion in step.
struct Output<'a, S> {
    sink: &'a mut S,
    page: &'a mut PageState,
    setup: &'a PageSetup,
}

impl<S: Sink> Output<'_, S> {
    fn write(&mut self, program: &Program) -> Result<(), PinfeedError> {
        for op in program {
            self.page.apply(op);
        }
        self.sink.write_all(&program.to_bytes())
    }

    fn command(&mut self, op: Op) -> Result<(), PinfeedError> {
        self.write(&Program::from_iter([op]))
    }

    /// Page format and left margin for a physical page, if the left margin
    /// differs from the one last sent.
    fn margins(&mut self, page: u32) -> Result<(), PinfeedError> {
        let left = to_device_units(self.setup.left_margin(page) - 0.1, MARGIN_UNITS, "left margin")?;
        let left = to_byte(left, "left margin")?;
        if self.page.left_margin == Some(left) {
            return Ok(());
        }
        let top = to_device_units(self.setup.margin_top - 0.1, DEVICE_UNITS, "top margin")?;
        let bottom = to_device_units(
            self.setup.height - self.setup.margin_bottom + 0.2,
            DEVICE_UNITS,
            "bottom margin",
        )?;
        self.command(Op::SetPageFormat { top, bottom })?;
        self.command(Op::SetLeftMargin(left))
    }

    /// Relative paper feed, skipped when zero.
    fn advance(&mut self, inches: f64) -> Result<(), PinfeedError> {
        if inches == 0.0 {
            return Ok(());
        }
        let units = to_device_units(inches, DEVICE_UNITS, "vertical move")?;
        self.command(Op::VerticalAdvance(units))
    }

    /// Eject the current page and prepare margins for `next`.
    fn eject(&mut self, next: u32) -> Result<(), PinfeedError> {
        self.write(&Program::from_iter([Op::CarriageReturn, Op::FormFeed]))?;
        self.margins(next)
    }
}

/// # ESC/P2 Print Engine
///
/// Owns the sink and the tracked [`PrinterState`]; nothing else writes to
/// either.
///
/// ```
/// use pinfeed::document::{Document, Paragraph, ParagraphStyle, Run, RunStyle};
/// use pinfeed::engine::Engine;
/// use pinfeed::printer::PrinterConfig;
///
/// let doc = Document {
///     paragraphs: vec![Paragraph::new(
///         ParagraphStyle::default(),
///         vec![Run::text(RunStyle::default(), "Hello")],
///     )],
///     ..Default::default()
/// };
///
/// let mut engine = Engine::new(Vec::new(), PrinterConfig::default());
/// engine.print_document(&doc).unwrap();
/// let bytes = engine.into_sink();
/// assert!(bytes.starts_with(b"\x1b@\x1b2"));
/// assert!(bytes.ends_with(b"\r\x0c\x1b@"));
/// ```
pub struct Engine<S> {
    sink: S,
    config: PrinterConfig,
    selection: PageSelection,
    state: PrinterState,
    setup: PageSetup,
    /// Physical page the layout is on, counted from 1.
    page: u32,
}

impl<S: Sink> Engine<S> {
    pub fn new(sink: S, config: PrinterConfig) -> Self {
        Self {
            sink,
            config,
            selection: PageSelection::ALL,
            state: PrinterState::default(),
            setup: PageSetup::default(),
            page: 1,
        }
    }

    pub fn with_selection(mut self, selection: PageSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn state(&self) -> &PrinterState {
        &self.state
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Print a whole document.
    ///
    /// Font sizes and page geometry are checked before the first byte is
    /// written; any later error aborts with the output written so far.
    pub fn print_document(&mut self, doc: &Document) -> Result<(), PinfeedError> {
        doc.validate()?;
        self.setup = doc.page;
        self.page = 1;

        log::debug!(
            "Printing {} paragraphs on {}x{} in pages",
            doc.paragraphs.len(),
            doc.page.width,
            doc.page.height
        );

        self.begin()?;
        for (index, paragraph) in doc.paragraphs.iter().enumerate() {
            self.paragraph(index, paragraph)?;
        }
        self.finish()
    }

    fn output(&mut self) -> Output<'_, S> {
        Output {
            sink: &mut self.sink,
            page: &mut self.state.page,
            setup: &self.setup,
        }
    }

    /// Send a command that may change any part of the state.
    fn command(&mut self, op: Op) -> Result<(), PinfeedError> {
        self.state.apply(&op);
        self.sink.write_all(&op.to_bytes())
    }

    fn begin(&mut self) -> Result<(), PinfeedError> {
        for op in [
            Op::Init,
            Op::SetLineSpacing(SIXTH_INCH_SPACING),
            Op::SetCharacterTable(self.config.character_table),
            Op::SelectTableSlot(CharacterTable::SLOT),
            Op::SetFont(0),
            Op::SetProportional(true),
            Op::SetLetterQuality(true),
        ] {
            self.command(op)?;
        }
        let first = self.selection.next_selected(1);
        self.output().margins(first)
    }

    fn paragraph(&mut self, index: usize, paragraph: &Paragraph) -> Result<(), PinfeedError> {
        let style = &paragraph.style;

        if index > 0 && style.page_break_before {
            self.page += 1;
            if self.selection.contains(self.page - 1) {
                let next = self.selection.next_selected(self.page);
                self.output().eject(next)?;
            }
        }

        // Drop runs on unprinted pages. A page break stays only if the page
        // it ends was printed, and remembers the page it opens.
        let start = self.page;
        let mut runs: Vec<&Run> = Vec::new();
        let mut breaks = VecDeque::new();
        for run in &paragraph.runs {
            if run.content == Content::PageBreak {
                self.page += 1;
                if self.selection.contains(self.page - 1) {
                    runs.push(run);
                    breaks.push_back(self.page);
                }
            } else if self.selection.contains(self.page) {
                runs.push(run);
            }
        }

        let opens_with_break = paragraph
            .runs
            .first()
            .is_some_and(|run| run.content == Content::PageBreak);
        let begin = self.selection.contains(start)
            || (opens_with_break && self.selection.contains(start + 1));
        let end = self.selection.contains(self.page);

        log::debug!(
            "Paragraph {} on pages {}-{}: {} of {} runs printed",
            index,
            start,
            self.page,
            runs.len(),
            paragraph.runs.len()
        );

        if begin {
            self.output().advance(style.margin_top)?;
        }

        let mut ctx = LayoutContext::new(style, &self.setup, &self.config);
        ctx.continued = !begin;

        let PrinterState {
            style: device_style,
            page: page_state,
        } = &mut self.state;
        let mut out = Output {
            sink: &mut self.sink,
            page: page_state,
            setup: &self.setup,
        };

        for event in LineBreaker::new(runs.iter().copied(), ctx, device_style) {
            match event? {
                LayoutEvent::Line(line) if line.last && !end => {
                    // the paragraph ends on an unprinted page; only restore style
                    let controls: Program = line
                        .words
                        .iter()
                        .flat_map(Word::controls)
                        .cloned()
                        .collect();
                    if !controls.is_empty() {
                        out.write(&controls)?;
                    }
                }
                LayoutEvent::Line(line) => {
                    let spacing =
                        line_spacing(line.height, style.line_height, self.config.line_spacing_scale)?;
                    if spacing != out.page.line_spacing {
                        out.command(Op::SetLineSpacing(spacing))?;
                    }
                    let mut program = Program::from_iter([Op::CarriageReturn, Op::LineFeed]);
                    program.extend(justify(line, &ctx)?);
                    out.write(&program)?;
                }
                LayoutEvent::PageBreak => {
                    let opened = breaks.pop_front().unwrap_or(self.page);
                    log::debug!("Page break, page {} follows", opened);
                    out.eject(self.selection.next_selected(opened))?;
                }
            }
        }

        if end {
            self.output().advance(style.margin_bottom)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), PinfeedError> {
        if self.selection.contains(self.page) {
            self.output()
                .write(&Program::from_iter([Op::CarriageReturn, Op::FormFeed]))?;
        }
        self.command(Op::Init)
    }
}
