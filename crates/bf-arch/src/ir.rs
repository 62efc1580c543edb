//! Core instruction representation.
//!
//! These types are the structured output of the decoder and analyzer and the
//! input to downstream consumers (renderers, evaluators).  The raw byte
//! window stays caller-owned; an [`Instruction`] never borrows from it and
//! never outlives the call that produced it.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops::BitOr;

use crate::semantics::SemExpr;

/// Distinguished byte treated as an end-of-stream/fault marker rather than a
/// real opcode.
pub const TRAP_SENTINEL: u8 = 0xFF;

/// Filler byte produced by the encoder for `nop` (and bare `trap`).  Decodes
/// back as `nop` since it matches no opcode.
pub const NOP_FILLER: u8 = 0x90;

/// The eight single-byte opcodes of the instruction set.
///
/// Each variant carries a stable 1-based identity in the fixed order
/// `[ ] < > + - , .` (see [`opcode_id`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Opcode {
    /// `[` — conditional forward jump past the matching `]`.
    While,
    /// `]` — unconditional backward jump to the matching `[`.
    Loop,
    /// `<` — decrement the data pointer.
    DecPtr,
    /// `>` — increment the data pointer.
    IncPtr,
    /// `+` — increment the cell at the data pointer.
    IncCell,
    /// `-` — decrement the cell at the data pointer.
    DecCell,
    /// `,` — read one byte of input into the cell at the data pointer.
    In,
    /// `.` — write the cell at the data pointer to the output.
    Out,
}

impl Opcode {
    /// Classify a raw byte, or `None` for anything outside the opcode set.
    #[must_use]
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'[' => Some(Opcode::While),
            b']' => Some(Opcode::Loop),
            b'<' => Some(Opcode::DecPtr),
            b'>' => Some(Opcode::IncPtr),
            b'+' => Some(Opcode::IncCell),
            b'-' => Some(Opcode::DecCell),
            b',' => Some(Opcode::In),
            b'.' => Some(Opcode::Out),
            _ => None,
        }
    }

    /// The raw byte for this opcode.
    #[must_use]
    pub fn byte(self) -> u8 {
        match self {
            Opcode::While => b'[',
            Opcode::Loop => b']',
            Opcode::DecPtr => b'<',
            Opcode::IncPtr => b'>',
            Opcode::IncCell => b'+',
            Opcode::DecCell => b'-',
            Opcode::In => b',',
            Opcode::Out => b'.',
        }
    }

    /// Stable 1-based identity in the fixed order `[ ] < > + - , .`.
    #[must_use]
    pub fn id(self) -> u8 {
        match self {
            Opcode::While => 1,
            Opcode::Loop => 2,
            Opcode::DecPtr => 3,
            Opcode::IncPtr => 4,
            Opcode::IncCell => 5,
            Opcode::DecCell => 6,
            Opcode::In => 7,
            Opcode::Out => 8,
        }
    }

    /// Whether consecutive occurrences of this opcode collapse into a single
    /// sized instruction.
    #[must_use]
    pub fn is_collapsible(self) -> bool {
        matches!(
            self,
            Opcode::IncPtr | Opcode::DecPtr | Opcode::IncCell | Opcode::DecCell
        )
    }
}

/// Map any byte to its opcode identity, or 0 if unrecognized.
///
/// Total function over all 256 byte values; the mapping never changes.
///
/// # Examples
///
/// ```
/// use bf_arch::opcode_id;
///
/// assert_eq!(opcode_id(b'['), 1);
/// assert_eq!(opcode_id(b'.'), 8);
/// assert_eq!(opcode_id(b'x'), 0);
/// ```
#[must_use]
pub fn opcode_id(byte: u8) -> u8 {
    Opcode::from_byte(byte).map_or(0, Opcode::id)
}

/// Count the leading bytes of `buf` equal to `byte`.
///
/// Scans from offset 0 and stops at the first differing byte or at buffer
/// end; never reads past `buf.len()`.
///
/// # Examples
///
/// ```
/// use bf_arch::run_length;
///
/// assert_eq!(run_length(b"+++<", b'+'), 3);
/// assert_eq!(run_length(b"<+++", b'+'), 0);
/// ```
#[must_use]
pub fn run_length(buf: &[u8], byte: u8) -> usize {
    buf.iter().take_while(|&&b| b == byte).count()
}

/// Semantic category of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// No effect on machine state.
    #[default]
    Nop,
    /// Addition — to the data pointer or to the cell it addresses.
    Add,
    /// Subtraction — from the data pointer or from the cell it addresses.
    Sub,
    /// Read from the input register into memory.
    Load,
    /// Write memory to the output register.
    Store,
    /// Conditional forward jump (`[`).
    CondJump,
    /// Unconditional backward jump (`]`).
    UncondJump,
    /// End-of-stream/fault marker.
    Trap,
    /// Bracket scan hit a terminator before finding a match.
    Illegal,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Nop => "nop",
            Category::Add => "add",
            Category::Sub => "sub",
            Category::Load => "load",
            Category::Store => "store",
            Category::CondJump => "cjmp",
            Category::UncondJump => "ujmp",
            Category::Trap => "trap",
            Category::Illegal => "ill",
        };
        write!(f, "{}", name)
    }
}

/// Output selection flags for [`decode`](crate::decode).
///
/// A hand-rolled bitset: combine flags with `|`, query with
/// [`contains`](DecodeOptions::contains).  `CODE`/`SIZE` run the decoder,
/// `ANALYZE`/`SEMANTIC` run the analyzer; requesting both runs both
/// components independently against the same buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodeOptions(u8);

impl DecodeOptions {
    /// Request the mnemonic text.
    pub const CODE: Self = Self(1);
    /// Request the instruction size.
    pub const SIZE: Self = Self(1 << 1);
    /// Request category, size, and jump targets.
    pub const ANALYZE: Self = Self(1 << 2);
    /// Request the semantic postfix expression.
    pub const SEMANTIC: Self = Self(1 << 3);
    /// All outputs.
    pub const ALL: Self = Self(0b1111);

    /// Whether every flag in `other` is set in `self`.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether any flag in `other` is set in `self`.
    #[must_use]
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for DecodeOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// One decoded/analyzed instruction.
///
/// Constructed fresh per call with [`Instruction::new`]; the decoder fills
/// `mnemonic` and `size`, the analyzer fills `category`, `size`,
/// `opcode_id`, `jump_targets`, and `semantics`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    /// Location of the instruction's first byte.
    pub address: u64,
    /// Number of bytes this instruction consumes (always >= 1).  Equals the
    /// run length for collapsible opcodes, 1 for everything else.
    pub size: usize,
    /// Opcode identity in `0..=8`; 0 means the byte is not an opcode.
    pub opcode_id: u8,
    /// Semantic category.
    pub category: Category,
    /// Human-readable disassembly, optionally with a repeat-count operand.
    pub mnemonic: String,
    /// Empty, or exactly `[fallthrough, branch_taken]` for a resolved
    /// conditional jump.
    pub jump_targets: Vec<u64>,
    /// Postfix expression over the register set; empty when not requested
    /// or not applicable.
    pub semantics: SemExpr,
}

impl Instruction {
    /// Fresh record for the instruction starting at `address`.
    #[must_use]
    pub fn new(address: u64) -> Self {
        Self {
            address,
            size: 1,
            opcode_id: 0,
            category: Category::Nop,
            mnemonic: String::new(),
            jump_targets: Vec::new(),
            semantics: SemExpr::empty(),
        }
    }

    /// Whether the analyzer flagged this instruction as illegal.
    #[must_use]
    pub fn is_illegal(&self) -> bool {
        self.category == Category::Illegal
    }
}
