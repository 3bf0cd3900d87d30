//! # Intermediate Representation (IR)
//!
//! This module provides the IR layer between layout and raw ESC/P2 bytes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────┐     ┌──────────┐
//! │   Layout    │ ──► │     IR      │ ──► │ PrinterState │ ──► │ Codegen  │
//! │ (lines)     │     │  (Vec<Op>)  │     │  (diff/apply)│     │ (bytes)  │
//! └─────────────┘     └─────────────┘     └──────────────┘     └──────────┘
//! ```
//!
//! Every op the engine sends is also applied to its [`PrinterState`], so the
//! tracked state and the device never disagree.
//!
//! ## Example
//!
//! ```
//! use pinfeed::ir::{Op, PrinterState, Program, StyleTransition};
//!
//! let mut state = PrinterState::default();
//! let target = pinfeed::ir::StyleState { bold: true, ..state.style };
//! let transition = StyleTransition::plan(&state.style, &target);
//!
//! let mut program = Program::new();
//! program.extend(transition.enter.iter().cloned());
//! program.push(Op::Text(b"HELLO".to_vec()));
//! program.extend(transition.exit.iter().cloned());
//!
//! state.apply_all(&program);
//! assert!(!state.style.bold);
//! assert_eq!(program.to_bytes(), b"\x1bEHELLO\x1bF");
//! ```

mod codegen;
mod ops;
mod state;

pub use ops::*;
pub use state::*;
