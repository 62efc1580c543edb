//! Analyzer — semantic category, size, jump targets, and postfix semantics.
//!
//! Everything here is a single-pass classification except conditional jumps:
//! a `[` starts a forward scan for its matching `]`, which may need bytes
//! beyond the supplied window.  The scan runs over an owned scratch copy and
//! asks an optional [`ByteSource`] for a larger window whenever the scratch
//! runs out; with no source available it stops where the bytes stop.
//!
//! Forward and backward jumps are deliberately asymmetric: `[` resolves its
//! target statically here, while `]` defers to the `brk` register at
//! evaluation time.  The downstream evaluator consumes the two differently.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::BfError;
use crate::ir::{opcode_id, run_length, Category, Instruction, TRAP_SENTINEL};
use crate::semantics::SemExpr;

/// Bytes added to the scratch window per re-fetch during a bracket scan.
const BUFSIZE_INC: usize = 32;

/// External capability supplying bytes at an address, for bracket scans that
/// outgrow the supplied buffer.
///
/// `read_at` may return fewer bytes than requested (or none); the scan
/// treats a short read as the end of the addressable bytes.  Implementations
/// must be safe for concurrent use if instructions are analyzed from
/// multiple threads.
pub trait ByteSource {
    /// Read up to `len` bytes starting at `addr`.
    fn read_at(&self, addr: u64, len: usize) -> Vec<u8>;
}

/// Analyze the instruction at `address` without a byte-source.
///
/// Bracket scans that outgrow `buf` degrade as described in
/// [`analyze_with`].
///
/// # Errors
///
/// Returns [`BfError::EmptyBuffer`] if `buf` is empty.
///
/// # Examples
///
/// ```
/// use bf_arch::{analyze, Category};
///
/// let ins = analyze(100, b"[>>>]").unwrap();
/// assert_eq!(ins.category, Category::CondJump);
/// assert_eq!(ins.jump_targets, vec![101, 105]);
/// ```
pub fn analyze(address: u64, buf: &[u8]) -> Result<Instruction, BfError> {
    analyze_with(address, buf, None)
}

/// Analyze the instruction at `address`, pulling extra bytes from `source`
/// if a bracket scan outgrows `buf`.
///
/// Outcomes for a `[` scan:
/// - matching `]` found: `jump_targets = [address + 1, past_the_bracket]`
///   and the conditional-jump semantics are emitted;
/// - a 0x00 or 0xFF byte is hit first: `category` becomes
///   [`Category::Illegal`];
/// - the bytes run out (no source, or the source has nothing more): the
///   record stays a [`Category::CondJump`] with no targets — degraded, not
///   an error.
///
/// # Errors
///
/// Returns [`BfError::EmptyBuffer`] if `buf` is empty.
pub fn analyze_with(
    address: u64,
    buf: &[u8],
    source: Option<&dyn ByteSource>,
) -> Result<Instruction, BfError> {
    let mut ins = Instruction::new(address);
    analyze_into(&mut ins, buf, source)?;
    Ok(ins)
}

/// Analyzer core shared with [`decode`](crate::decode).
pub(crate) fn analyze_into(
    ins: &mut Instruction,
    buf: &[u8],
    source: Option<&dyn ByteSource>,
) -> Result<(), BfError> {
    let first = *buf.first().ok_or(BfError::EmptyBuffer)?;
    ins.size = 1;
    ins.opcode_id = opcode_id(first);
    ins.category = Category::Nop;

    match first {
        b'[' => {
            ins.category = Category::CondJump;
            match_bracket(ins, buf, source);
        }
        b']' => {
            ins.category = Category::UncondJump;
            ins.semantics = SemExpr::loop_back();
        }
        b'>' => {
            ins.category = Category::Add;
            ins.size = run_length(buf, b'>');
            ins.semantics = SemExpr::ptr_step(ins.size, true);
        }
        b'<' => {
            ins.category = Category::Sub;
            ins.size = run_length(buf, b'<');
            ins.semantics = SemExpr::ptr_step(ins.size, false);
        }
        b'+' => {
            ins.category = Category::Add;
            ins.size = run_length(buf, b'+');
            ins.semantics = SemExpr::cell_step(ins.size, true);
        }
        b'-' => {
            ins.category = Category::Sub;
            ins.size = run_length(buf, b'-');
            ins.semantics = SemExpr::cell_step(ins.size, false);
        }
        b'.' => {
            ins.category = Category::Store;
            ins.semantics = SemExpr::cell_out();
        }
        b',' => {
            ins.category = Category::Load;
            ins.semantics = SemExpr::cell_in();
        }
        0x00 | TRAP_SENTINEL => {
            ins.category = Category::Trap;
        }
        _ => {
            ins.semantics = SemExpr::no_op();
        }
    }
    Ok(())
}

/// Terminal states of a bracket scan.
enum Scan {
    /// Matching `]` found; `dst` is the address just past it.
    Matched { dst: u64 },
    /// A terminator byte (0x00 or 0xFF) turned up before any match.
    Illegal,
    /// Ran out of bytes with no way to get more.
    Exhausted,
}

/// Forward scan from a `[` to its matching `]`, growing the scratch window
/// through `source` as needed.
fn match_bracket(ins: &mut Instruction, buf: &[u8], source: Option<&dyn ByteSource>) {
    let mut scratch: Vec<u8> = buf.to_vec();
    let mut depth: i32 = 0;
    let mut offset: usize = 1;

    let outcome = loop {
        if offset >= scratch.len() {
            if !refill(ins.address, &mut scratch, source) || offset >= scratch.len() {
                break Scan::Exhausted;
            }
        }
        match scratch[offset] {
            0x00 | TRAP_SENTINEL => break Scan::Illegal,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == -1 {
                    // Targets wrap with the address space.
                    break Scan::Matched {
                        dst: ins.address.wrapping_add(offset as u64).wrapping_add(1),
                    };
                }
            }
            _ => {}
        }
        offset += 1;
    };

    match outcome {
        Scan::Matched { dst } => {
            ins.jump_targets = vec![ins.address.wrapping_add(1), dst];
            ins.semantics = SemExpr::loop_enter(dst);
        }
        Scan::Illegal => ins.category = Category::Illegal,
        // Degraded: category stays CondJump, targets stay empty.
        Scan::Exhausted => {}
    }
}

/// Replace the scratch wholesale with a larger window read from `source`.
/// Returns false when no source exists or the re-fetch brought nothing new.
fn refill(addr: u64, scratch: &mut Vec<u8>, source: Option<&dyn ByteSource>) -> bool {
    let Some(source) = source else {
        return false;
    };
    let fresh = source.read_at(addr, scratch.len() + BUFSIZE_INC);
    if fresh.len() <= scratch.len() {
        return false;
    }
    *scratch = fresh;
    true
}
