//! # Justification
//!
//! Second layout pass: turns a finished [`Line`] into positioned ops.
//!
//! Every line starts with an absolute `ESC $` to its base offset, and every
//! tab or stretched space is followed by another one. Positions are always
//! computed from the line start, so rounding never accumulates across a
//! line.

use crate::document::Alignment;
use crate::error::PinfeedError;
use crate::ir::{Op, Program};
use crate::printer::config::{POSITION_UNITS, to_device_units};

use super::breaker::{LayoutContext, Line};
use super::word::Word;

/// Drop trailing spaces, keeping any style ops they carry.
fn trim_trailing_spaces(words: &mut [Word]) {
    for word in words.iter_mut().rev() {
        if word.is_space() {
            word.strip_text();
        } else if word.has_text() {
            break;
        }
    }
}

/// Width of the words with tabs advanced to their stops.
fn natural_width(words: &[Word], ctx: &LayoutContext, indented: bool) -> f64 {
    words.iter().fold(0.0, |x, word| {
        if word.is_tab() {
            ctx.tab_stop(x, indented)
        } else {
            x + word.width
        }
    })
}

fn position(inches: f64) -> Result<Op, PinfeedError> {
    Ok(Op::HorizontalPosition(to_device_units(
        inches,
        POSITION_UNITS,
        "horizontal position",
    )?))
}

/// How a justified line spreads its shortfall over its spaces.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Stretch {
    /// Only spaces after this word index stretch.
    after: Option<usize>,
    /// Multiplier for each stretched space's width.
    growth: f64,
}

impl Stretch {
    fn plan(words: &[Word], shortfall: f64) -> Option<Self> {
        let after = words.iter().rposition(Word::is_tab);
        let start = after.map_or(0, |i| i + 1);
        let spaces: f64 = words[start..]
            .iter()
            .filter(|w| w.is_space())
            .map(|w| w.width)
            .sum();
        if spaces <= 0.0 {
            return None;
        }
        Some(Self {
            after,
            growth: (shortfall / spaces + 1.0).max(0.0),
        })
    }

    fn applies(&self, index: usize, word: &Word) -> bool {
        word.is_space() && self.after.is_none_or(|tab| index > tab)
    }
}

/// Lay out one line at its final position.
///
/// ```
/// use pinfeed::document::{PageSetup, ParagraphStyle, Run, RunStyle};
/// use pinfeed::ir::{Op, StyleState};
/// use pinfeed::layout::{justify, LayoutContext, LayoutEvent, LineBreaker};
/// use pinfeed::printer::PrinterConfig;
///
/// let page = PageSetup { width: 2.0, ..PageSetup::default() };
/// let ctx = LayoutContext::new(&ParagraphStyle::default(), &page, &PrinterConfig::default());
/// let runs = [Run::text(RunStyle::sized(10.5), "hi")];
/// let mut style = StyleState::default();
///
/// let events: Vec<_> = LineBreaker::new(&runs, ctx, &mut style).collect::<Result<_, _>>().unwrap();
/// let LayoutEvent::Line(line) = events.into_iter().next().unwrap() else { unreachable!() };
/// let program = justify(line, &ctx).unwrap();
/// assert_eq!(program.ops[0], Op::HorizontalPosition(0));
/// ```
pub fn justify(line: Line, ctx: &LayoutContext) -> Result<Program, PinfeedError> {
    let Line {
        mut words,
        indented,
        last,
        ..
    } = line;
    trim_trailing_spaces(&mut words);

    let usable = ctx.usable_width(indented);
    let natural = natural_width(&words, ctx, indented);
    let shortfall = usable - natural;

    let mut stretch = None;
    let offset = match ctx.paragraph.alignment {
        Alignment::Start => 0.0,
        Alignment::Center => (shortfall / 2.0).max(0.0),
        Alignment::End => shortfall.max(0.0),
        Alignment::Justify => {
            if !last {
                stretch = Stretch::plan(&words, shortfall);
            }
            0.0
        }
    };

    let mut base = offset + ctx.paragraph.margin_left;
    if indented {
        base += ctx.paragraph.text_indent;
    }

    let mut program = Program::new();
    program.push(position(base)?);

    let mut x = 0.0;
    for (i, word) in words.into_iter().enumerate() {
        if word.is_tab() {
            program.extend(word.controls().cloned());
            x = ctx.tab_stop(x, indented);
            program.push(position(base + x)?);
        } else if let Some(stretch) = stretch.filter(|s| s.applies(i, &word)) {
            program.extend(word.controls().cloned());
            x += word.width * stretch.growth;
            program.push(position(base + x)?);
        } else {
            x += word.width;
            program.extend(word.ops);
        }
    }
    Ok(program)
}
