//! # Pinfeed - ESC/P2 Document Printing Library
//!
//! Pinfeed lays out styled documents for Epson 24-pin dot-matrix printers
//! and encodes them as ESC/P2 byte streams. It provides:
//!
//! - **Document model**: paragraphs of styled runs, from Rust or JSON
//! - **Layout**: proportional-width line breaking and justification
//! - **Character tables**: PC437, PC1250 and PC1251 with per-span fallback
//! - **Protocol implementation**: ESC/P2 command builders
//! - **Transport**: raw device files and any `io::Write`
//!
//! ## Quick Start
//!
//! ```no_run
//! use pinfeed::{
//!     document::Document,
//!     engine::Engine,
//!     transport::DeviceTransport,
//!     PrinterConfig,
//! };
//!
//! let doc = Document::from_json(&std::fs::read_to_string("letter.json")?)?;
//!
//! let transport = DeviceTransport::open("/dev/usb/lp0")?;
//! let mut engine = Engine::new(transport, PrinterConfig::default());
//! engine.print_document(&doc)?;
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`document`] | Document, paragraph and run types |
//! | [`layout`] | Line breaking and justification |
//! | [`ir`] | Printer ops, device state and style transitions |
//! | [`engine`] | Pages, paragraphs and line output |
//! | [`protocol`] | ESC/P2 command builders and character tables |
//! | [`transport`] | Output sinks |
//! | [`printer`] | Printer configuration and font metrics |
//! | [`error`] | Error types |
//!
//! ## Supported Printers
//!
//! Written against the Epson LQ series ESC/P2 command set. Widths come
//! from the proportional Roman metrics at 10.5 pt and scale with point
//! size.

pub mod document;
pub mod engine;
pub mod error;
pub mod ir;
pub mod layout;
pub mod printer;
pub mod protocol;
pub mod transport;

// Re-exports for convenience
pub use engine::Engine;
pub use error::PinfeedError;
pub use printer::PrinterConfig;
pub use transport::DeviceTransport;
