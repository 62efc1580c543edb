//! Decoder — mnemonic text and size, no control-flow analysis.
//!
//! Repeated opcodes collapse into one instruction with a repeat-count
//! operand: `>>>` reads as `add ptr, 3`, a single `>` as `inc ptr`.  The
//! trap bytes (0x00 and 0xFF) never collapse.  Bytes outside the opcode set
//! read as `nop`.

use alloc::format;
use alloc::string::String;

use crate::error::BfError;
use crate::ir::{run_length, Instruction, TRAP_SENTINEL};

/// Produce the mnemonic and size for the instruction at `address`.
///
/// # Errors
///
/// Returns [`BfError::EmptyBuffer`] if `buf` is empty.
///
/// # Examples
///
/// ```
/// let ins = bf_arch::disassemble(0, b"+++").unwrap();
/// assert_eq!(ins.mnemonic, "add [ptr], 3");
/// assert_eq!(ins.size, 3);
/// ```
pub fn disassemble(address: u64, buf: &[u8]) -> Result<Instruction, BfError> {
    let mut ins = Instruction::new(address);
    disassemble_into(&mut ins, buf)?;
    Ok(ins)
}

/// Decoder core shared with [`decode`](crate::decode) — fills `mnemonic`
/// and `size` on an existing record.
pub(crate) fn disassemble_into(ins: &mut Instruction, buf: &[u8]) -> Result<(), BfError> {
    let first = *buf.first().ok_or(BfError::EmptyBuffer)?;

    let rep = if first != 0 && first != TRAP_SENTINEL {
        run_length(buf, first)
    } else {
        1
    };

    let base = match first {
        b'[' => "while [ptr]",
        b']' => "loop",
        b'>' => {
            if rep > 1 {
                "add ptr"
            } else {
                "inc ptr"
            }
        }
        b'<' => {
            if rep > 1 {
                "sub ptr"
            } else {
                "dec ptr"
            }
        }
        b'+' => {
            if rep > 1 {
                "add [ptr]"
            } else {
                "inc [ptr]"
            }
        }
        b'-' => {
            if rep > 1 {
                "sub [ptr]"
            } else {
                "dec [ptr]"
            }
        }
        b',' => "in [ptr]",
        b'.' => "out [ptr]",
        0x00 | TRAP_SENTINEL => "trap",
        _ => "nop",
    };

    ins.mnemonic = if rep > 1 {
        // A mnemonic that already carries an operand word gets ", n",
        // a bare verb gets " n".
        if base.contains(' ') {
            format!("{}, {}", base, rep)
        } else {
            format!("{} {}", base, rep)
        }
    } else {
        String::from(base)
    };
    ins.size = rep;
    Ok(())
}
