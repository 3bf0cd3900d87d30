//! Paragraph and run types for the document model.
//!
//! All types derive `Serialize + Deserialize` so the same types work for
//! both Rust API construction and JSON input. Every field has a default,
//! so a JSON document only needs to spell out what differs.

use serde::{Deserialize, Serialize};

use crate::error::PinfeedError;
use crate::printer::fonts::{self, PointSize};
use crate::protocol::text::Script;

// ============================================================================
// PAGE
// ============================================================================

/// Physical page geometry, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSetup {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    /// Swap left and right margins on even pages.
    pub mirrored: bool,
}

impl Default for PageSetup {
    /// US Letter with half-inch margins.
    fn default() -> Self {
        Self {
            width: 8.5,
            height: 11.0,
            margin_top: 0.5,
            margin_bottom: 0.5,
            margin_left: 0.5,
            margin_right: 0.5,
            mirrored: false,
        }
    }
}

impl PageSetup {
    /// Width between the page margins.
    pub fn text_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    /// Left margin of a physical page (numbered from 1).
    pub fn left_margin(&self, page: u32) -> f64 {
        if self.mirrored && page % 2 == 0 {
            self.margin_right
        } else {
            self.margin_left
        }
    }
}

// ============================================================================
// PARAGRAPH
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
    Justify,
}

/// Paragraph-level layout, fixed for the whole paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphStyle {
    pub alignment: Alignment,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    /// Extra indent of the first line.
    pub text_indent: f64,
    /// Line pitch multiplier (1.0 = single spacing).
    pub line_height: f64,
    /// Start the paragraph on a new page (ignored for the first paragraph).
    pub page_break_before: bool,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            alignment: Alignment::Start,
            margin_top: 0.0,
            margin_bottom: 0.0,
            margin_left: 0.0,
            margin_right: 0.0,
            text_indent: 0.0,
            line_height: 1.0,
            page_break_before: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paragraph {
    pub style: ParagraphStyle,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new(style: ParagraphStyle, runs: Vec<Run>) -> Self {
        Self { style, runs }
    }
}

// ============================================================================
// RUN
// ============================================================================

/// One styled piece of paragraph content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    #[serde(default)]
    pub style: RunStyle,
    pub content: Content,
}

impl Run {
    pub fn text(style: RunStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            content: Content::Text(text.into()),
        }
    }

    pub fn line_break(style: RunStyle) -> Self {
        Self {
            style,
            content: Content::LineBreak,
        }
    }

    pub fn tab(style: RunStyle) -> Self {
        Self {
            style,
            content: Content::Tab,
        }
    }

    pub fn page_break(style: RunStyle) -> Self {
        Self {
            style,
            content: Content::PageBreak,
        }
    }
}

/// Literal text or one of the three control markers.
///
/// In JSON: `{"text": "..."}`, `"line_break"`, `"tab"` or `"page_break"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Content {
    Text(String),
    LineBreak,
    Tab,
    PageBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slant {
    #[default]
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    #[default]
    Baseline,
    Superscript,
    Subscript,
}

/// Character formatting of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunStyle {
    /// Font name; unknown names print in Roman.
    pub font: String,
    /// Point size, one of [`fonts::SUPPORTED_SIZES`].
    pub size: f32,
    pub weight: Weight,
    pub slant: Slant,
    pub underline: bool,
    pub position: Position,
}

impl Default for RunStyle {
    fn default() -> Self {
        Self {
            font: "EpsonRomanProportional".to_string(),
            size: 12.0,
            weight: Weight::Normal,
            slant: Slant::Normal,
            underline: false,
            position: Position::Baseline,
        }
    }
}

impl RunStyle {
    /// Default style at a given size.
    pub fn sized(size: f32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn font_code(&self) -> u8 {
        fonts::font_code(&self.font)
    }

    pub fn point_size(&self) -> Result<PointSize, PinfeedError> {
        PointSize::new(self.size)
    }

    pub fn script(&self) -> Option<Script> {
        match self.position {
            Position::Baseline => None,
            Position::Superscript => Some(Script::Superscript),
            Position::Subscript => Some(Script::Subscript),
        }
    }
}
