//! Semantic postfix expressions.
//!
//! Every instruction's effect on the abstract machine is described as a
//! comma-separated, stack-machine postfix expression over the registers in
//! [`registers`](crate::registers): operands push, operators pop.  The
//! dialect in brief:
//!
//! - `ptr`, `pc`, `brk`, `scr`, `kbd` — register reads (or write targets
//!   before an assignment operator)
//! - `$$` — the address of the instruction being evaluated
//! - `+=`, `-=`, `=` — assignment operators; a `[1]` suffix makes the
//!   destination the one-byte memory cell addressed by the popped value
//! - `[1]` — one-byte memory read at the popped address
//! - `!` — logical not; `?{` ... `}` — conditional block
//!
//! Expressions are generated here and consumed by an external evaluator;
//! this crate never executes them.

use alloc::format;
use alloc::string::String;
use core::fmt;

/// A postfix expression describing one instruction's effect.
///
/// Thin wrapper over the textual form; construct via the per-effect
/// constructors below.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SemExpr(String);

impl SemExpr {
    /// No expression (instruction not analyzed, or has no semantics).
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// The explicit no-op marker: a lone `,`.
    #[must_use]
    pub fn no_op() -> Self {
        Self(String::from(","))
    }

    /// `>`/`<` collapsed `n` times: add `n` to (or subtract from) the data
    /// pointer itself.
    #[must_use]
    pub fn ptr_step(n: usize, forward: bool) -> Self {
        let op = if forward { "+=" } else { "-=" };
        Self(format!("{},ptr,{}", n, op))
    }

    /// `+`/`-` collapsed `n` times: add `n` to (or subtract from) the cell
    /// addressed by the data pointer — an indirect one-byte store.
    #[must_use]
    pub fn cell_step(n: usize, up: bool) -> Self {
        let op = if up { "+=" } else { "-=" };
        Self(format!("{},ptr,{}[1]", n, op))
    }

    /// `.`: write the cell at `ptr` to the output register `scr`, then
    /// advance `scr`.
    #[must_use]
    pub fn cell_out() -> Self {
        Self(String::from("ptr,[1],scr,=[1],scr,++="))
    }

    /// `,`: read the input register `kbd` into the cell at `ptr`, then
    /// advance `kbd`.
    #[must_use]
    pub fn cell_in() -> Self {
        Self(String::from("kbd,[1],ptr,=[1],kbd,++="))
    }

    /// `]`: pop the bracket stack `brk` and jump back to the popped address.
    /// The backward target is resolved at evaluation time through `brk`,
    /// not computed here.
    #[must_use]
    pub fn loop_back() -> Self {
        Self(String::from("brk,--=,brk,[1],pc,="))
    }

    /// `[` with its matching `]` resolved to `dst`: push the current address
    /// onto `brk`, then jump to `dst` if the cell at `ptr` is zero (popping
    /// the bracket entry), otherwise fall through.
    #[must_use]
    pub fn loop_enter(dst: u64) -> Self {
        Self(format!(
            "$$,brk,=[1],brk,++=,ptr,[1],!,?{{,0x{:x},pc,=,brk,--=,}}",
            dst
        ))
    }

    /// The textual form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether no expression was generated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SemExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SemExpr {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
