//! # bf-arch — Brainfuck instruction decoder/encoder
//!
//! `bf-arch` is a pure Rust, dependency-light core that turns raw bytes of
//! the eight-opcode Brainfuck instruction set into structured instruction
//! records — mnemonic text, semantic category, size, branch targets, and a
//! stack-machine postfix expression — and turns mnemonic text back into
//! bytes.
//!
//! ## Quick Start
//!
//! ```rust
//! use bf_arch::{analyze, assemble, disassemble, Category};
//!
//! let ins = disassemble(0, b"+++").unwrap();
//! assert_eq!(ins.mnemonic, "add [ptr], 3");
//! assert_eq!(ins.size, 3);
//!
//! let ins = analyze(100, b"[>>>]").unwrap();
//! assert_eq!(ins.category, Category::CondJump);
//! assert_eq!(ins.jump_targets, vec![101, 105]);
//!
//! let out = assemble("add [ptr], 3").unwrap();
//! assert_eq!(out.bytes(), b"+++");
//! ```
//!
//! ## Features
//!
//! - **Run-length collapsing** — `>>>` is one instruction of size 3.
//! - **Forward bracket matching** — `[` resolves its branch target, pulling
//!   bytes beyond the supplied window through a [`ByteSource`] if one is
//!   available.
//! - **Postfix semantics** — each instruction carries an expression over the
//!   registers `ptr`, `pc`, `brk`, `scr`, `kbd` for an external evaluator.
//! - **`no_std` + `alloc`** — embeddable; `std` only gates the
//!   `std::error::Error` impl.
//!
//! This crate does not execute instructions and keeps no state between
//! calls; every call produces a fresh [`Instruction`].

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![allow(
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

extern crate alloc;

/// Analyzer: category, size, jump targets, semantics, bracket matching.
pub mod analyzer;
/// Decoder: mnemonic text and inferred size.
pub mod decoder;
/// Encoder: mnemonic text back to bytes.
pub mod encoder;
/// Error types.
pub mod error;
/// Instruction record, opcode set, run-length counting.
pub mod ir;
/// Static register schema.
pub mod registers;
/// Semantic postfix expressions.
pub mod semantics;

// Re-exports
pub use analyzer::{analyze, analyze_with, ByteSource};
pub use decoder::disassemble;
pub use encoder::{assemble, Encoded};
pub use error::BfError;
pub use ir::{
    opcode_id, run_length, Category, DecodeOptions, Instruction, Opcode, NOP_FILLER,
    TRAP_SENTINEL,
};
pub use semantics::SemExpr;

/// Decode the instruction at `address`, selecting outputs with `options`.
///
/// `CODE`/`SIZE` run the decoder (mnemonic + size); `ANALYZE`/`SEMANTIC` run
/// the analyzer (category, size, targets, semantics).  Both components run
/// independently against the same buffer when both are requested; the
/// analyzer's size wins.  An empty `options` returns the untouched record.
///
/// Bracket scans degrade without a byte-source; use [`decode_with`] to
/// supply one.
///
/// # Errors
///
/// Returns [`BfError::EmptyBuffer`] if `buf` is empty and any output was
/// requested.
///
/// # Examples
///
/// ```
/// use bf_arch::{decode, Category, DecodeOptions};
///
/// let ins = decode(0, b"<<", DecodeOptions::ALL).unwrap();
/// assert_eq!(ins.mnemonic, "sub ptr, 2");
/// assert_eq!(ins.category, Category::Sub);
/// assert_eq!(ins.size, 2);
/// ```
pub fn decode(address: u64, buf: &[u8], options: DecodeOptions) -> Result<Instruction, BfError> {
    decode_with(address, buf, options, None)
}

/// [`decode`] with a byte-source for bracket scans that outgrow `buf`.
///
/// # Errors
///
/// Returns [`BfError::EmptyBuffer`] if `buf` is empty and any output was
/// requested.
pub fn decode_with(
    address: u64,
    buf: &[u8],
    options: DecodeOptions,
    source: Option<&dyn ByteSource>,
) -> Result<Instruction, BfError> {
    let mut ins = Instruction::new(address);
    if options.intersects(DecodeOptions::CODE | DecodeOptions::SIZE) {
        decoder::disassemble_into(&mut ins, buf)?;
    }
    if options.intersects(DecodeOptions::ANALYZE | DecodeOptions::SEMANTIC) {
        analyzer::analyze_into(&mut ins, buf, source)?;
    }
    Ok(ins)
}
