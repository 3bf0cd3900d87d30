//! # Printer Module
//!
//! This module provides printer-specific metrics and configuration.
//!
//! ## Modules
//!
//! - [`fonts`]: Typeface registry, point sizes and glyph widths
//! - [`config`]: Run-wide settings, page selection and unit conversion

pub mod config;
pub mod fonts;

pub use config::{PageSelection, Parity, PrinterConfig};
pub use fonts::{Pitch, PointSize};
