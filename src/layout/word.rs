//! # Words
//!
//! The unit of line breaking: encoded text plus the zero-width style ops
//! that travel with it, a measured width and a break flag.

use crate::error::PinfeedError;
use crate::ir::Op;
use crate::printer::config::DEVICE_UNITS;
use crate::printer::fonts::{self, Pitch, PointSize};

/// Soft hyphen: a break opportunity that only prints at a break.
pub const SOFT_HYPHEN: char = '\u{AD}';

/// Characters a word may break after. The hyphen stays with the word.
pub const HYPHENS: [char; 4] = ['-', SOFT_HYPHEN, '\u{2013}', '\u{2014}'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordKind {
    #[default]
    Text,
    Space,
    Tab,
}

/// Pitch and size a run is measured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub pitch: Pitch,
    pub size: PointSize,
}

impl Metrics {
    /// Width in inches of `bytes`, the encoding of `text` (one byte per char).
    pub fn measure(&self, text: &str, bytes: &[u8]) -> Result<f64, PinfeedError> {
        let mut units = 0u32;
        for (&byte, ch) in bytes.iter().zip(text.chars()) {
            let advance = fonts::glyph_advance(byte, self.pitch)
                .ok_or(PinfeedError::UndefinedWidth { byte, ch })?;
            units += u32::from(advance);
        }
        Ok(f64::from(units) / DEVICE_UNITS * self.size.scale_factor())
    }
}

/// A piece of a text run between break opportunities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub kind: WordKind,
    /// A line may break right after this segment.
    pub may_break: bool,
}

/// Split text at spaces, tabs and hyphens.
///
/// Spaces and tabs become single-character segments of their own. A
/// hyphen ends the segment it belongs to. Every segment except an
/// unterminated tail is break-eligible.
///
/// ```
/// use pinfeed::layout::word::{segment, WordKind};
///
/// let parts: Vec<_> = segment("well-known fact").iter().map(|s| s.text).collect();
/// assert_eq!(parts, ["well-", "known", " ", "fact"]);
/// assert!(!segment("fact")[0].may_break);
/// assert_eq!(segment("\t")[0].kind, WordKind::Tab);
/// ```
pub fn segment(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        let end = i + ch.len_utf8();
        let kind = match ch {
            ' ' => WordKind::Space,
            '\t' => WordKind::Tab,
            c if HYPHENS.contains(&c) => {
                segments.push(Segment {
                    text: &text[start..end],
                    kind: WordKind::Text,
                    may_break: true,
                });
                start = end;
                continue;
            }
            _ => continue,
        };
        if i > start {
            segments.push(Segment {
                text: &text[start..i],
                kind: WordKind::Text,
                may_break: true,
            });
        }
        segments.push(Segment {
            text: &text[i..end],
            kind,
            may_break: true,
        });
        start = end;
    }
    if start < text.len() {
        segments.push(Segment {
            text: &text[start..],
            kind: WordKind::Text,
            may_break: false,
        });
    }
    segments
}

/// Encoded text and style ops laid out as one unit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Word {
    pub ops: Vec<Op>,
    /// Width in inches.
    pub width: f64,
    /// Nominal point size of the tallest text in the word.
    pub height: f64,
    pub kind: WordKind,
    pub may_break: bool,
    /// Width of a trailing soft hyphen, if the word ends with one.
    soft_hyphen: Option<f64>,
}

impl Word {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure an encoded segment.
    pub fn measured(
        text: &str,
        bytes: Vec<u8>,
        metrics: Metrics,
        kind: WordKind,
        may_break: bool,
    ) -> Result<Self, PinfeedError> {
        let width = metrics.measure(text, &bytes)?;
        let soft_hyphen = match (text.chars().last(), bytes.last()) {
            (Some(SOFT_HYPHEN), Some(&byte)) => Some(metrics.measure("\u{AD}", &[byte])?),
            _ => None,
        };
        Ok(Self {
            ops: vec![Op::Text(bytes)],
            width,
            height: metrics.size.points(),
            kind,
            may_break,
            soft_hyphen,
        })
    }

    pub fn has_text(&self) -> bool {
        self.ops
            .iter()
            .any(|op| matches!(op, Op::Text(bytes) if !bytes.is_empty()))
    }

    pub fn is_space(&self) -> bool {
        self.kind == WordKind::Space && self.has_text()
    }

    pub fn is_tab(&self) -> bool {
        self.kind == WordKind::Tab && self.has_text()
    }

    /// All text bytes of the word, without its style ops.
    pub fn text(&self) -> Vec<u8> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(bytes) => Some(bytes.as_slice()),
                _ => None,
            })
            .flatten()
            .copied()
            .collect()
    }

    /// The word's style ops, in order.
    pub fn controls(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter().filter(|op| !matches!(op, Op::Text(_)))
    }

    pub fn push_controls(&mut self, ops: impl IntoIterator<Item = Op>) {
        self.ops.extend(ops);
    }

    /// Append `other`; the result breaks where `other` breaks.
    pub fn append(&mut self, other: Word) {
        if !self.has_text() {
            self.kind = other.kind;
        }
        if other.has_text() {
            self.soft_hyphen = other.soft_hyphen;
        }
        for op in other.ops {
            if let (Some(Op::Text(bytes)), Op::Text(more)) = (self.ops.last_mut(), &op) {
                bytes.extend_from_slice(more);
                continue;
            }
            self.ops.push(op);
        }
        self.width += other.width;
        self.height = self.height.max(other.height);
        self.may_break = other.may_break;
    }

    pub fn ends_with_soft_hyphen(&self) -> bool {
        self.soft_hyphen.is_some()
    }

    /// Remove a trailing soft hyphen, returning the width it took.
    pub fn strip_soft_hyphen(&mut self) -> f64 {
        let Some(width) = self.soft_hyphen.take() else {
            return 0.0;
        };
        let last_text = self.ops.iter_mut().rev().find_map(|op| match op {
            Op::Text(bytes) => Some(bytes),
            _ => None,
        });
        if let Some(bytes) = last_text {
            bytes.pop();
        }
        self.ops.retain(|op| !matches!(op, Op::Text(bytes) if bytes.is_empty()));
        self.width -= width;
        width
    }

    /// Drop the text, keeping only the style ops.
    pub fn strip_text(&mut self) {
        self.ops.retain(|op| !matches!(op, Op::Text(_)));
        self.width = 0.0;
        self.soft_hyphen = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: Metrics = Metrics {
        pitch: Pitch::Proportional,
        size: PointSize::DEFAULT,
    };

    fn word(text: &str, kind: WordKind, may_break: bool) -> Word {
        let bytes = text.bytes().collect();
        Word::measured(text, bytes, BODY, kind, may_break).unwrap()
    }

    fn texts(input: &str) -> Vec<&str> {
        segment(input).iter().map(|s| s.text).collect()
    }

    #[test]
    fn test_segment_spaces_and_tabs() {
        assert_eq!(texts("a b\tc"), ["a", " ", "b", "\t", "c"]);
        assert_eq!(texts("  x"), [" ", " ", "x"]);
        let kinds: Vec<_> = segment("a b\tc").iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            [WordKind::Text, WordKind::Space, WordKind::Text, WordKind::Tab, WordKind::Text]
        );
    }

    #[test]
    fn test_segment_hyphens_stay_attached() {
        assert_eq!(texts("a-b\u{AD}c\u{2013}d\u{2014}e"), ["a-", "b\u{AD}", "c\u{2013}", "d\u{2014}", "e"]);
        assert_eq!(texts("end-"), ["end-"]);
        assert!(segment("end-")[0].may_break);
    }

    #[test]
    fn test_segment_empty() {
        assert!(segment("").is_empty());
    }

    #[test]
    fn test_measure() {
        // a = 30, i = 18 (1/360 in)
        let w = word("ai", WordKind::Text, false);
        assert!((w.width - 48.0 / 360.0).abs() < 1e-12);
        assert_eq!(w.height, 10.5);

        let big = Metrics {
            pitch: Pitch::Proportional,
            size: PointSize::new(21.0).unwrap(),
        };
        assert!((big.measure("a", b"a").unwrap() - 60.0 / 360.0).abs() < 1e-12);

        let fixed = Metrics {
            pitch: Pitch::TenCpi,
            size: PointSize::DEFAULT,
        };
        assert!((fixed.measure("ii", b"ii").unwrap() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_measure_undefined_byte() {
        let err = BODY.measure("\u{7F}", &[0x7F]).unwrap_err();
        assert!(matches!(
            err,
            PinfeedError::UndefinedWidth { byte: 0x7F, ch: '\u{7F}' }
        ));
    }

    #[test]
    fn test_append_merges_text_and_takes_break() {
        let mut w = word("ab", WordKind::Text, false);
        w.append(word("c-", WordKind::Text, true));
        assert_eq!(w.ops, vec![Op::Text(b"abc-".to_vec())]);
        assert!(w.may_break);
        assert!((w.width - 126.0 / 360.0).abs() < 1e-12);
    }

    #[test]
    fn test_control_only_word_adopts_kind() {
        let mut w = Word::new();
        w.push_controls([Op::SetBold(true)]);
        assert!(!w.has_text());
        w.append(word(" ", WordKind::Space, true));
        assert!(w.is_space());
        assert_eq!(w.ops, vec![Op::SetBold(true), Op::Text(b" ".to_vec())]);
    }

    #[test]
    fn test_strip_soft_hyphen() {
        let mut w = Word::measured("ab\u{AD}", vec![b'a', b'b', 0xAD], BODY, WordKind::Text, true).unwrap();
        w.push_controls([Op::SetItalic(false)]);
        assert!(w.ends_with_soft_hyphen());
        let removed = w.strip_soft_hyphen();
        assert!((removed - 30.0 / 360.0).abs() < 1e-12);
        assert_eq!(w.ops, vec![Op::Text(b"ab".to_vec()), Op::SetItalic(false)]);
        assert!((w.width - 66.0 / 360.0).abs() < 1e-12);
        assert!(!w.ends_with_soft_hyphen());
        assert_eq!(w.strip_soft_hyphen(), 0.0);
    }

    #[test]
    fn test_soft_hyphen_cleared_by_following_text() {
        let mut w = Word::measured("a\u{AD}", vec![b'a', 0xAD], BODY, WordKind::Text, true).unwrap();
        w.append(word("b", WordKind::Text, false));
        assert!(!w.ends_with_soft_hyphen());
    }

    #[test]
    fn test_strip_text_keeps_controls() {
        let mut w = Word::new();
        w.push_controls([Op::SetUnderline(true)]);
        w.append(word(" ", WordKind::Space, true));
        w.strip_text();
        assert_eq!(w.ops, vec![Op::SetUnderline(true)]);
        assert_eq!(w.width, 0.0);
        assert!(!w.is_space());
    }
}
