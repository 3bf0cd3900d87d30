//! # Layout
//!
//! Two passes turn a paragraph's runs into positioned ops:
//!
//! 1. [`LineBreaker`] segments and measures text into [`word::Word`]s and
//!    greedily fills lines, yielding [`LayoutEvent`]s lazily.
//! 2. [`justify`] trims each finished [`Line`], applies alignment and
//!    stretches spaces, producing a [`Program`](crate::ir::Program).
//!
//! Widths are in inches throughout; conversion to device units happens only
//! when a position op is built.

pub mod breaker;
pub mod justify;
pub mod word;

pub use breaker::{BREAK_TOLERANCE, LayoutContext, LayoutEvent, Line, LineBreaker};
pub use justify::justify;
