//! # Error Types
//!
//! This module defines error types used throughout the pinfeed library.

use thiserror::Error;

/// Main error type for pinfeed operations
#[derive(Debug, Error)]
pub enum PinfeedError {
    /// Point size not in the device's supported list
    #[error("Unsupported font size: {0}pt")]
    UnsupportedFontSize(f32),

    /// Character table name not in the registry
    #[error("Unknown character table: {0}")]
    UnknownCharacterTable(String),

    /// Invalid command-line or configuration option
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// No registered table can encode the character
    #[error("The character {0:?} cannot be encoded in any character table")]
    Unencodable(char),

    /// Encoded byte has no glyph width
    #[error("Undefined glyph width for byte {byte:#04x} ({ch:?})")]
    UndefinedWidth { byte: u8, ch: char },

    /// A distance or position does not fit its command argument
    #[error("{what} out of range: {value}")]
    OutOfRange { what: &'static str, value: f64 },

    /// Malformed input document
    #[error("Document error: {0}")]
    Document(String),

    /// The sink accepted fewer bytes than were written
    #[error("Short write: {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    /// Transport-level errors (device setup)
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for PinfeedError {
    fn from(err: serde_json::Error) -> Self {
        Self::Document(err.to_string())
    }
}
