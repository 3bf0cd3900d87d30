//! # ESC/P2 Protocol Implementation
//!
//! This module provides low-level command builders for the ESC/P2 protocol
//! used by Epson dot-matrix printers.
//!
//! ## Module Structure
//!
//! - [`commands`]: Device, page and paper-motion commands (init, margins, positioning)
//! - [`text`]: Character styling (typeface, pitch, emphasis, character tables)
//! - [`codepage`]: Unicode to code page encoding for the selectable tables
//!
//! ## Usage Example
//!
//! ```
//! use pinfeed::protocol::{commands, text};
//!
//! let mut data: Vec<u8> = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::bold_on());
//! data.extend(b"HEADING");
//! data.extend(text::bold_off());
//! data.extend(commands::carriage_return());
//! data.extend(commands::line_feed());
//! ```
//!
//! Every builder is a pure function returning the exact bytes; nothing here
//! tracks printer state (see [`crate::ir`] for that).

pub mod codepage;
pub mod commands;
pub mod text;
