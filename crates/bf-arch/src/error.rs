//! Error types for decode and encode failures.
//!
//! Most degraded outcomes in this crate are *not* errors: an illegal
//! instruction surfaces as [`Category::Illegal`](crate::ir::Category) and a
//! truncated bracket scan leaves the jump targets empty.  Only conditions
//! that make the requested operation meaningless are reported through
//! [`BfError`].

#[allow(unused_imports)]
use alloc::format;
use alloc::string::String;
use core::fmt;

/// Decode/encode error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BfError {
    /// `decode`/`analyze` was handed an empty byte window — there is no
    /// first byte to classify.
    EmptyBuffer,

    /// `assemble` input did not start with a recognized verb.
    UnknownMnemonic {
        /// The mnemonic text that was not recognized.
        mnemonic: String,
    },

    /// `assemble` input carried an operand after the comma that is not an
    /// unsigned repeat count.
    InvalidOperand {
        /// The operand text that failed to parse.
        operand: String,
    },
}

impl fmt::Display for BfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BfError::EmptyBuffer => {
                write!(f, "empty instruction buffer")
            }
            BfError::UnknownMnemonic { mnemonic } => {
                write!(f, "unknown mnemonic '{}'", mnemonic)
            }
            BfError::InvalidOperand { operand } => {
                write!(f, "invalid operand count '{}'", operand)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BfError {}
