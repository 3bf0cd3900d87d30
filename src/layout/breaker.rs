//! # Line Breaking
//!
//! First layout pass. [`LineBreaker`] consumes a paragraph's runs and
//! lazily yields finished lines and page breaks.
//!
//! ## Algorithm
//!
//! Greedy, one segment at a time:
//!
//! 1. Spaces and tabs flush the pending word into the line first. Spaces
//!    are always appended (trailing ones are trimmed by the justifier).
//!    A tab with no stop left on the line is infinitely wide, so it ends
//!    the line and opens the next one.
//! 2. If the line plus the pending word plus the new segment would exceed
//!    the usable width by more than [`BREAK_TOLERANCE`], the line ends:
//!    a trailing tab moves to the next line with the text that follows it,
//!    otherwise the pending word goes to whichever line it can break from.
//! 3. The segment joins the pending word, which is flushed first if it
//!    may break. Segments without a break opportunity between them (a
//!    style change in the middle of a word) stay in one word.
//!
//! Style transitions are planned per run against the caller's
//! [`StyleState`] and travel inside the words as zero-width ops.

use std::collections::VecDeque;

use crate::document::{Content, PageSetup, ParagraphStyle, Run, RunStyle, Slant, Weight};
use crate::error::PinfeedError;
use crate::ir::{Op, StyleState, StyleTransition};
use crate::printer::PrinterConfig;
use crate::printer::fonts::{self, Pitch, PointSize};
use crate::protocol::codepage::CharacterTable;

use super::word::{Metrics, Word, WordKind, segment};

/// Overflow allowed at a break decision, for glyph rounding in the device.
pub const BREAK_TOLERANCE: f64 = 5.0 / 360.0;

/// A finished line, ready for justification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub words: Vec<Word>,
    /// Sum of word widths, in inches.
    pub width: f64,
    /// Tallest point size of any text on the line.
    pub height: f64,
    /// First line of the paragraph; the text indent applies.
    pub indented: bool,
    /// Last line of the paragraph; justified lines are not stretched.
    pub last: bool,
}

impl Line {
    pub fn push(&mut self, word: Word) {
        self.width += word.width;
        if word.has_text() {
            self.height = self.height.max(word.height);
        }
        self.words.push(word);
    }

    fn pop(&mut self) -> Option<Word> {
        let word = self.words.pop()?;
        self.width -= word.width;
        Some(word)
    }

    pub fn ends_with_tab(&self) -> bool {
        self.words.last().is_some_and(Word::is_tab)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEvent {
    Line(Line),
    PageBreak,
}

/// How a line ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineEnd {
    /// Ran out of width.
    Wrap,
    /// Line break or page break in the content.
    Forced,
    /// End of paragraph.
    Final,
}

/// Everything both layout passes need to know about a paragraph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutContext {
    pub paragraph: ParagraphStyle,
    /// Width between the page margins, in inches.
    pub text_width: f64,
    pub tab_spacing: f64,
    /// Table text is encoded in unless a character forces a fallback.
    pub table: CharacterTable,
    /// Keep leading spaces at the start of the paragraph and after line breaks.
    pub preserve_leading_whitespace: bool,
    /// The paragraph began on an unprinted page: its first printed line is
    /// not indented and gets no leading whitespace.
    pub continued: bool,
}

impl LayoutContext {
    pub fn new(paragraph: &ParagraphStyle, page: &PageSetup, config: &PrinterConfig) -> Self {
        Self {
            paragraph: *paragraph,
            text_width: page.text_width(),
            tab_spacing: config.tab_spacing,
            table: config.character_table,
            preserve_leading_whitespace: config.preserve_leading_whitespace,
            continued: false,
        }
    }

    /// Width available to a line.
    pub fn usable_width(&self, indented: bool) -> f64 {
        let mut width = self.text_width - self.paragraph.margin_left - self.paragraph.margin_right;
        if indented {
            width -= self.paragraph.text_indent;
        }
        width
    }

    /// Next tab stop after `x`, or infinity if it falls outside the line.
    pub fn next_tab(&self, x: f64, indented: bool) -> f64 {
        let stop = ((x / self.tab_spacing).floor() + 1.0) * self.tab_spacing;
        if stop >= self.usable_width(indented) {
            f64::INFINITY
        } else {
            stop
        }
    }

    /// Where a tab at `x` ends, clamped to the right edge of the line.
    pub fn tab_stop(&self, x: f64, indented: bool) -> f64 {
        self.next_tab(x, indented)
            .min(self.usable_width(indented))
            .max(x)
    }
}

/// A stretch of run text encoded in one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span<'t> {
    table: CharacterTable,
    text: &'t str,
}

/// Split text into spans the run's table can encode and spans that need a
/// fallback table.
///
/// A fallback span starts at a character `table` cannot encode and runs
/// over every following character `table` cannot encode either but the
/// fallback can.
fn plan_spans(text: &str, table: CharacterTable, font: u8) -> Result<Vec<Span<'_>>, PinfeedError> {
    let mut spans = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let at = match table.encode(rest) {
            Ok(_) => {
                spans.push(Span { table, text: rest });
                break;
            }
            Err(at) => at,
        };
        if at > 0 {
            spans.push(Span {
                table,
                text: &rest[..at],
            });
        }
        let tail = &rest[at..];
        let Some(ch) = tail.chars().next() else {
            break;
        };
        let fallback = CharacterTable::FALLBACKS
            .into_iter()
            .filter(|t| *t != table && t.supports(font))
            .find(|t| t.encode_char(ch).is_some())
            .ok_or(PinfeedError::Unencodable(ch))?;
        let len = tail
            .char_indices()
            .find(|&(_, c)| table.encode_char(c).is_some() || fallback.encode_char(c).is_none())
            .map_or(tail.len(), |(i, _)| i);
        spans.push(Span {
            table: fallback,
            text: &tail[..len],
        });
        rest = &tail[len..];
    }
    Ok(spans)
}

/// Device style a run asks for, given the table it will be encoded in.
fn run_target(style: &RunStyle, size: PointSize, table: CharacterTable) -> StyleState {
    let font = style.font_code();
    StyleState {
        font,
        table,
        pitch: Pitch::for_font(font),
        size: if fonts::is_scalable(font) {
            size
        } else {
            PointSize::DEFAULT
        },
        bold: style.weight == Weight::Bold,
        italic: style.slant == Slant::Italic,
        underline: style.underline,
        script: style.script(),
    }
}

/// Lazy first layout pass over one paragraph.
///
/// Yields each line as soon as it is decided. The final line carries
/// `last = true` and any style ops still pending, so the device always ends
/// the paragraph in the style it started in. After an error the iterator
/// is exhausted.
pub struct LineBreaker<'s, I> {
    runs: I,
    ctx: LayoutContext,
    style: &'s mut StyleState,
    line: Line,
    word: Word,
    allow_leading: bool,
    ready: VecDeque<LayoutEvent>,
    done: bool,
}

impl<'s, 'r, I> LineBreaker<'s, I>
where
    I: Iterator<Item = &'r Run>,
{
    pub fn new(
        runs: impl IntoIterator<IntoIter = I>,
        ctx: LayoutContext,
        style: &'s mut StyleState,
    ) -> Self {
        Self {
            runs: runs.into_iter(),
            ctx,
            style,
            line: Line {
                indented: !ctx.continued,
                ..Line::default()
            },
            word: Word::new(),
            allow_leading: ctx.preserve_leading_whitespace && !ctx.continued,
            ready: VecDeque::new(),
            done: false,
        }
    }

    fn feed(&mut self, run: &Run) -> Result<(), PinfeedError> {
        match &run.content {
            Content::Text(text) => self.add_text(&run.style, text)?,
            Content::Tab => self.add_text(&run.style, "\t")?,
            Content::LineBreak => {
                self.commit_word();
                self.finish_line(LineEnd::Forced);
                self.allow_leading = self.ctx.preserve_leading_whitespace;
            }
            Content::PageBreak => {
                self.commit_word();
                if !self.line.words.is_empty() {
                    self.finish_line(LineEnd::Forced);
                }
                self.ready.push_back(LayoutEvent::PageBreak);
            }
        }
        Ok(())
    }

    fn add_text(&mut self, style: &RunStyle, text: &str) -> Result<(), PinfeedError> {
        let size = style.point_size()?;
        if text.is_empty() {
            return Ok(());
        }

        let font = style.font_code();
        let mut table = self.ctx.table;
        if !table.supports(font) {
            log::warn!(
                "Character table {} has no glyphs for font {} ({}), using {}",
                table,
                font,
                style.font,
                CharacterTable::SUBSTITUTE
            );
            table = CharacterTable::SUBSTITUTE;
        }

        let spans = plan_spans(text, table, font)?;
        let target = run_target(style, size, table);
        let metrics = Metrics {
            pitch: target.pitch,
            size: target.size,
        };
        let transition = StyleTransition::plan(self.style, &target);
        self.push_controls(transition.enter);

        for span in spans {
            if span.table == table {
                self.break_text(span.text, span.table, metrics)?;
            } else {
                let fallback = StyleTransition::plan(
                    self.style,
                    &StyleState {
                        table: span.table,
                        ..*self.style
                    },
                );
                self.push_controls(fallback.enter);
                self.break_text(span.text, span.table, metrics)?;
                self.push_controls(fallback.exit);
            }
        }

        self.push_controls(transition.exit);
        Ok(())
    }

    /// Apply ops to the tracked style and attach them to the pending word.
    fn push_controls(&mut self, ops: Vec<Op>) {
        for op in &ops {
            self.style.apply(op);
        }
        self.word.push_controls(ops);
    }

    fn break_text(
        &mut self,
        text: &str,
        table: CharacterTable,
        metrics: Metrics,
    ) -> Result<(), PinfeedError> {
        let mut text = text;

        if self.allow_leading && self.line.words.is_empty() && !self.word.has_text() {
            let leading = text.bytes().take_while(|&b| b == b' ').count();
            if leading > 0 {
                let spaces = &text[..leading];
                let word = Word::measured(spaces, spaces.as_bytes().to_vec(), metrics, WordKind::Text, false)?;
                self.line.push(word);
                text = &text[leading..];
            }
        }

        for seg in segment(text) {
            let bytes = table.encode(seg.text).map_err(|at| {
                PinfeedError::Unencodable(seg.text[at..].chars().next().unwrap_or('\u{FFFD}'))
            })?;
            let mut word = Word::measured(seg.text, bytes, metrics, seg.kind, seg.may_break)?;

            match seg.kind {
                WordKind::Space => {
                    self.commit_word();
                    self.word.append(word);
                    self.commit_word();
                    continue;
                }
                WordKind::Tab => {
                    self.commit_word();
                    word.width = self.tab_width();
                    if self.overflows(&word) {
                        self.finish_line(LineEnd::Wrap);
                        word.width = self.tab_width();
                    }
                    // a line narrower than one tab spacing has no stop at all
                    word.width = word.width.min(self.room());
                    self.word.append(word);
                    self.commit_word();
                    continue;
                }
                WordKind::Text => {}
            }

            if self.overflows(&word) {
                if self.line.ends_with_tab() {
                    if self.line.words.len() > 1 {
                        self.move_trailing_tab();
                    }
                } else {
                    if self.word.may_break {
                        self.commit_word();
                    }
                    self.finish_line(LineEnd::Wrap);
                }
            }

            if self.word.may_break {
                self.commit_word();
            }
            self.word.append(word);
        }
        Ok(())
    }

    fn usable_width(&self) -> f64 {
        self.ctx.usable_width(self.line.indented)
    }

    /// Width of a tab placed at the current end of the line, infinite when
    /// no stop is left on it.
    fn tab_width(&self) -> f64 {
        let x = self.line.width;
        self.ctx.next_tab(x, self.line.indented) - x
    }

    fn room(&self) -> f64 {
        (self.usable_width() - self.line.width).max(0.0)
    }

    /// Whether adding `word` must end the current line first.
    ///
    /// An empty line only breaks when the pending word already ends at a
    /// hyphen, so the prefix can stay on a line of its own.
    fn overflows(&self, word: &Word) -> bool {
        let breakable = self.line.width > 0.0
            || (self.word.kind == WordKind::Text && self.word.may_break && self.word.has_text());
        breakable && self.line.width + self.word.width + word.width > self.usable_width() + BREAK_TOLERANCE
    }

    fn move_trailing_tab(&mut self) {
        let Some(mut tab) = self.line.pop() else {
            return;
        };
        self.finish_line(LineEnd::Wrap);
        tab.width = self.tab_width().min(self.room());
        self.line.push(tab);
    }

    /// Move the pending word into the line, if it has any text.
    fn commit_word(&mut self) {
        if !self.word.has_text() {
            return;
        }
        let mut word = std::mem::take(&mut self.word);

        if word.kind == WordKind::Space && self.line.words.is_empty() && !self.allow_leading {
            word.strip_text();
            self.word = word;
            return;
        }

        if let Some(previous) = self.line.words.last_mut() {
            if previous.ends_with_soft_hyphen() {
                self.line.width -= previous.strip_soft_hyphen();
            }
        }
        self.line.push(word);
    }

    fn finish_line(&mut self, end: LineEnd) {
        let mut line = std::mem::take(&mut self.line);
        if end != LineEnd::Wrap {
            if let Some(last) = line.words.last_mut() {
                if last.ends_with_soft_hyphen() {
                    line.width -= last.strip_soft_hyphen();
                }
            }
        }
        line.last = end == LineEnd::Final;
        self.ready.push_back(LayoutEvent::Line(line));
        self.allow_leading = false;
    }

    fn finish(&mut self) {
        self.commit_word();
        if !self.word.ops.is_empty() {
            let controls = std::mem::take(&mut self.word);
            self.line.push(controls);
        }
        self.finish_line(LineEnd::Final);
    }
}

impl<'s, 'r, I> Iterator for LineBreaker<'s, I>
where
    I: Iterator<Item = &'r Run>,
{
    type Item = Result<LayoutEvent, PinfeedError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.ready.pop_front() {
                return Some(Ok(event));
            }
            if self.done {
                return None;
            }
            match self.runs.next() {
                Some(run) => {
                    if let Err(err) = self.feed(run) {
                        self.done = true;
                        self.ready.clear();
                        return Some(Err(err));
                    }
                }
                None => {
                    self.finish();
                    self.done = true;
                }
            }
        }
    }
}

impl<'s, 'r, I> std::iter::FusedIterator for LineBreaker<'s, I> where I: Iterator<Item = &'r Run> {}
