//! # Engine Tests
//!
//! End-to-end byte streams: documents in, ESC/P2 out.

use pinfeed::document::{
    Alignment, Document, PageSetup, Paragraph, ParagraphStyle, Run, RunStyle, Weight,
};
use pinfeed::ir::StyleState;
use pinfeed::layout::{BREAK_TOLERANCE, LayoutContext, LayoutEvent, LineBreaker};
use pinfeed::printer::PrinterConfig;
use pinfeed::printer::fonts::Pitch;
use pinfeed::protocol::codepage::CharacterTable;
use pinfeed::{Engine, PinfeedError};
use pretty_assertions::assert_eq;

const INIT: &[u8] = b"\x1b@\x1b2\x1b(t\x03\x00\x01\x30\x00\x1bt\x01\x1bk\x00\x1bp\x01\x1bx\x01";
const LETTER_MARGINS: &[u8] = b"\x1b(c\x04\x00\x90\x00\x0c\x0f\x1bl\x04";
const FINISH: &[u8] = b"\r\x0c\x1b@";

fn body(text: &str) -> Run {
    Run::text(RunStyle::sized(10.5), text)
}

fn line_break() -> Run {
    Run::line_break(RunStyle::sized(10.5))
}

/// One paragraph on a page with `text_width` inches between half-inch margins.
fn single(alignment: Alignment, text_width: f64, runs: Vec<Run>) -> Document {
    Document {
        page: PageSetup {
            width: text_width + 1.0,
            ..PageSetup::default()
        },
        paragraphs: vec![Paragraph::new(
            ParagraphStyle {
                alignment,
                ..ParagraphStyle::default()
            },
            runs,
        )],
    }
}

fn print_with(doc: &Document, config: PrinterConfig) -> Result<Vec<u8>, PinfeedError> {
    let mut engine = Engine::new(Vec::new(), config);
    engine.print_document(doc)?;
    Ok(engine.into_sink())
}

fn print(doc: &Document) -> Vec<u8> {
    print_with(doc, PrinterConfig::default()).unwrap()
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

#[test]
fn test_justified_paragraph_stream() {
    let doc = single(
        Alignment::Justify,
        0.9375,
        vec![body("aaaa aaaa"), line_break(), body("b")],
    );

    let mut expected: Vec<u8> = Vec::new();
    expected.extend(INIT);
    expected.extend(LETTER_MARGINS);
    expected.extend(b"\r\n\x1b$\x00\x00aaaa\x1b$\x24\x00aaaa");
    expected.extend(b"\r\n\x1b$\x00\x00b");
    expected.extend(FINISH);

    assert_eq!(print(&doc), expected);
}

#[test]
fn test_unsupported_size_produces_no_output() {
    let doc = single(
        Alignment::Start,
        7.5,
        vec![body("fine"), Run::text(RunStyle::sized(15.0), "too big")],
    );
    let mut engine = Engine::new(Vec::new(), PrinterConfig::default());
    let err = engine.print_document(&doc).unwrap_err();
    assert!(matches!(err, PinfeedError::UnsupportedFontSize(s) if s == 15.0));
    assert!(engine.into_sink().is_empty());
}

#[test]
fn test_oversize_word_placed_alone() {
    let doc = single(Alignment::Start, 0.5, vec![body("a mmmmmmmmmmmm b")]);
    let out = print(&doc);
    assert_eq!(count(&out, b"\r\n"), 3);
    assert!(contains(&out, b"\r\n\x1b$\x00\x00mmmmmmmmmmmm\r\n"));
}

#[test]
fn test_soft_hyphen_hidden_inside_line() {
    let doc = single(Alignment::Start, 4.0, vec![body("foo\u{AD}bar")]);
    let out = print(&doc);
    assert!(contains(&out, b"foobar"));
    assert!(!out.contains(&0xAD));
}

#[test]
fn test_soft_hyphen_printed_at_break() {
    let doc = single(Alignment::Start, 0.4, vec![body("foo\u{AD}bar")]);
    let out = print(&doc);
    assert!(contains(&out, b"foo\xad\r\n\x1b$\x00\x00bar"));
}

#[test]
fn test_single_fallback_switch() {
    let config = PrinterConfig::default().with_character_table(CharacterTable::Pc1251);
    let doc = single(Alignment::Start, 7.5, vec![body("a\u{160}b")]);
    let out = print_with(&doc, config).unwrap();
    assert!(contains(
        &out,
        b"a\x1b(t\x03\x00\x01\x30\x00\x8a\x1b(t\x03\x00\x01\x31\x00b"
    ));
    // one load at init, one switch out, one switch back
    assert_eq!(count(&out, b"\x1b(t"), 3);
}

#[test]
fn test_style_change_inside_word_does_not_break() {
    let bold = RunStyle {
        weight: Weight::Bold,
        ..RunStyle::sized(10.5)
    };
    let doc = single(
        Alignment::Start,
        0.45,
        vec![body("aa"), Run::text(bold, "bb"), body("cc dd")],
    );
    let out = print(&doc);
    assert!(contains(&out, b"\r\n\x1b$\x00\x00aa\x1bEbb\x1bFcc\r\n\x1b$\x00\x00dd"));
}

#[test]
fn test_justified_space_fills_line() {
    // words 330/360 in, one space 30/360 in: natural width is 80% of 1.25 in
    let doc = single(
        Alignment::Justify,
        1.25,
        vec![body("mmmmm aaaa"), line_break(), body("x")],
    );
    let out = print(&doc);
    // the space ends 1/3 in (aaaa) before the right edge: 55/60 in
    assert!(contains(&out, b"mmmmm\x1b$\x37\x00aaaa\r\n"));
}

#[test]
fn test_line_width_bound() {
    let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
                eiusmod tempor incididunt ut labore et dolore magna aliqua.";
    let runs = [body(text)];
    let config = PrinterConfig::default();
    for width in [0.75, 1.0, 1.5, 2.25, 3.0] {
        let page = PageSetup {
            width: width + 1.0,
            ..PageSetup::default()
        };
        let ctx = LayoutContext::new(&ParagraphStyle::default(), &page, &config);
        let mut style = StyleState {
            table: CharacterTable::Pc1250,
            pitch: Pitch::Proportional,
            ..StyleState::default()
        };
        for event in LineBreaker::new(&runs, ctx, &mut style) {
            let LayoutEvent::Line(line) = event.unwrap() else {
                panic!("unexpected page break");
            };
            let words: Vec<_> = line.words.iter().filter(|w| w.has_text()).collect();
            let trimmed: f64 = words
                .iter()
                .rev()
                .skip_while(|w| w.is_space())
                .map(|w| w.width)
                .sum();
            let single_word = words.iter().filter(|w| !w.is_space()).count() == 1;
            assert!(
                single_word || trimmed <= ctx.usable_width(line.indented) + BREAK_TOLERANCE,
                "width {}: line of {} in",
                width,
                trimmed
            );
        }
    }
}

#[test]
fn test_unencodable_character_is_fatal() {
    let doc = single(Alignment::Start, 7.5, vec![body("\u{4E2D}")]);
    let err = print_with(&doc, PrinterConfig::default()).unwrap_err();
    assert!(matches!(err, PinfeedError::Unencodable('\u{4E2D}')));
}

#[test]
fn test_json_document_matches_rust_document() {
    let json = r#"{
        "page": {"width": 1.9375},
        "paragraphs": [{
            "style": {"alignment": "justify"},
            "runs": [
                {"style": {"size": 10.5}, "content": {"text": "aaaa aaaa"}},
                {"style": {"size": 10.5}, "content": "line_break"},
                {"style": {"size": 10.5}, "content": {"text": "b"}}
            ]
        }]
    }"#;
    let from_json = Document::from_json(json).unwrap();
    let from_rust = single(
        Alignment::Justify,
        0.9375,
        vec![body("aaaa aaaa"), line_break(), body("b")],
    );
    assert_eq!(print(&from_json), print(&from_rust));
}

#[test]
fn test_font_test_page() {
    let out = print(&Document::font_test_page());
    assert!(out.starts_with(INIT));
    assert!(out.ends_with(FINISH));
    assert!(contains(&out, b"c=0 10.5pt - The quick brown fox jumps over the lazy dog"));
    // OCR-B has no PC1250 glyphs: PC437 is loaded around the run
    assert!(contains(&out, b"\x1b(t\x03\x00\x01\x01\x00"));
    assert!(contains(&out, b"\x1bk\x05"));
    // 14 pt samples scale the proportional fonts
    assert!(contains(&out, b"\x1bX\x01\x1c\x00"));
}
