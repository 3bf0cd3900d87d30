//! # Document Model
//!
//! The contract between a document source and the engine: page geometry
//! plus an ordered list of paragraphs, each an ordered list of styled runs.
//! `Document` is constructible in Rust and deserializable from JSON.
//!
//! ```
//! use pinfeed::document::*;
//!
//! // Rust construction
//! let doc = Document {
//!     paragraphs: vec![Paragraph::new(
//!         ParagraphStyle::default(),
//!         vec![Run::text(RunStyle::default(), "Hello")],
//!     )],
//!     ..Default::default()
//! };
//!
//! // JSON deserialization
//! let json = r#"{"paragraphs":[{"runs":[{"content":{"text":"Hello"}}]}]}"#;
//! assert_eq!(Document::from_json(json).unwrap(), doc);
//! ```

pub mod types;

pub use types::*;

use serde::{Deserialize, Serialize};

use crate::error::PinfeedError;
use crate::printer::fonts::{self, FONTS};

/// A complete printable document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub page: PageSetup,
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Parse a JSON document.
    pub fn from_json(json: &str) -> Result<Self, PinfeedError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a JSON document from a reader.
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, PinfeedError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Check everything that can be rejected before output starts.
    ///
    /// Fails on the first run whose point size is not supported, and on page
    /// geometry that leaves no room for text.
    pub fn validate(&self) -> Result<(), PinfeedError> {
        let page = &self.page;
        if !(page.text_width() > 0.0) || !(page.height > page.margin_top + page.margin_bottom) {
            return Err(PinfeedError::Document(format!(
                "page {}x{} in leaves no printable area",
                page.width, page.height
            )));
        }
        for run in self.paragraphs.iter().flat_map(|p| &p.runs) {
            run.style.point_size()?;
        }
        Ok(())
    }

    /// Sample page with one paragraph per typeface, at 10.5 pt and, for
    /// scalable typefaces, 14 pt.
    pub fn font_test_page() -> Self {
        let mut paragraphs = Vec::new();
        for (name, code) in FONTS {
            let sizes: &[f32] = if fonts::is_scalable(code) {
                &[10.5, 14.0]
            } else {
                &[10.5]
            };
            for &size in sizes {
                let style = RunStyle {
                    font: name.to_string(),
                    size,
                    ..RunStyle::default()
                };
                let text = format!(
                    "c={} {:.1}pt - The quick brown fox jumps over the lazy dog",
                    code, size
                );
                paragraphs.push(Paragraph::new(
                    ParagraphStyle::default(),
                    vec![Run::text(style, text)],
                ));
            }
        }
        Self {
            page: PageSetup::default(),
            paragraphs,
        }
    }
}
