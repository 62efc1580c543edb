//! Encoder — mnemonic text back to instruction bytes.
//!
//! The inverse of the decoder for the reconstructible subset.  Only the
//! leading verb is matched; an operand count is taken from after a comma
//! (`add ptr, 3` → three `>` bytes) and the indirect-memory form is detected
//! by the presence of `[` anywhere in the text.  The round trip is lossy in
//! documented ways: `nop 3` (decoded from three unknown bytes) carries no
//! comma, so it encodes back to a single filler byte.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::BfError;
use crate::ir::{NOP_FILLER, TRAP_SENTINEL};

/// The result of a successful encode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Encoded {
    bytes: Vec<u8>,
}

impl Encoded {
    /// The produced bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume and return the bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Number of bytes produced.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing was produced (possible with a zero operand count).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Encode one mnemonic into instruction bytes.
///
/// # Errors
///
/// Returns [`BfError::UnknownMnemonic`] if the text does not start with a
/// recognized verb, and [`BfError::InvalidOperand`] if the text after a
/// comma is not an unsigned repeat count.
///
/// # Examples
///
/// ```
/// let out = bf_arch::assemble("add ptr, 3").unwrap();
/// assert_eq!(out.bytes(), b">>>");
///
/// let out = bf_arch::assemble("while [ptr]").unwrap();
/// assert_eq!(out.bytes(), b"[");
/// ```
pub fn assemble(text: &str) -> Result<Encoded, BfError> {
    let text = text.trim();

    // Only the verb participates in matching; everything after it is
    // operand text.
    let verb_end = text
        .find(|c: char| c.is_whitespace() || c == ',')
        .unwrap_or(text.len());
    let verb = &text[..verb_end];

    // Repeat count after a comma.
    let count = match text.find(',') {
        Some(i) => {
            let operand = text[i + 1..].trim();
            Some(operand.parse::<usize>().map_err(|_| BfError::InvalidOperand {
                operand: String::from(operand),
            })?)
        }
        None => None,
    };
    // Indirect-memory form: the operand addresses the cell at ptr.
    let indirect = text.contains('[');

    let bytes = match verb {
        "trap" => match count {
            Some(n) => vec![TRAP_SENTINEL; n],
            None => vec![NOP_FILLER],
        },
        "nop" => vec![NOP_FILLER; count.unwrap_or(1)],
        "inc" => vec![if indirect { b'+' } else { b'>' }],
        "dec" => vec![if indirect { b'-' } else { b'<' }],
        "add" => vec![if indirect { b'+' } else { b'>' }; count.unwrap_or(1)],
        "sub" => vec![if indirect { b'-' } else { b'<' }; count.unwrap_or(1)],
        "while" => vec![b'['],
        "loop" => vec![b']'],
        "in" => vec![b','; count.unwrap_or(1)],
        "out" => vec![b'.'; count.unwrap_or(1)],
        _ => {
            return Err(BfError::UnknownMnemonic {
                mnemonic: String::from(text),
            })
        }
    };
    Ok(Encoded { bytes })
}
