//! Static register schema.
//!
//! The semantic expressions reference five named registers living at fixed
//! offsets in a shared register-state block.  The table is a process-wide
//! constant; there is no mutable register state in this crate.

use alloc::string::String;
use core::fmt::Write;

/// One register in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegisterDef {
    /// Register name as it appears in semantic expressions.
    pub name: &'static str,
    /// Width in bits.
    pub bits: u32,
    /// Byte offset within the register-state block.
    pub offset: u32,
    /// What the register holds.
    pub desc: &'static str,
}

/// The five registers, in block-offset order.
pub const REGISTERS: [RegisterDef; 5] = [
    RegisterDef {
        name: "ptr",
        bits: 32,
        offset: 0,
        desc: "data pointer",
    },
    RegisterDef {
        name: "pc",
        bits: 32,
        offset: 4,
        desc: "program counter",
    },
    RegisterDef {
        name: "brk",
        bits: 32,
        offset: 8,
        desc: "bracket-address stack pointer",
    },
    RegisterDef {
        name: "scr",
        bits: 32,
        offset: 12,
        desc: "output (screen)",
    },
    RegisterDef {
        name: "kbd",
        bits: 32,
        offset: 16,
        desc: "input (keyboard)",
    },
];

/// Role aliases hosts expect: `(role, register name)`.  `ptr` doubles as
/// both stack pointer and first address operand.
pub const ROLE_ALIASES: [(&str, &str); 4] =
    [("PC", "pc"), ("BP", "brk"), ("SP", "ptr"), ("A0", "ptr")];

/// Look up a register by name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static RegisterDef> {
    REGISTERS.iter().find(|reg| reg.name == name)
}

/// The textual register profile consumed by hosts.
///
/// One `=ROLE\tname` line per alias, then one `gpr\tname\t.bits\toffset\t0`
/// line per register.
///
/// # Examples
///
/// ```
/// let profile = bf_arch::registers::register_profile();
/// assert!(profile.starts_with("=PC\tpc\n"));
/// assert!(profile.contains("gpr\tptr\t.32\t0\t0\n"));
/// ```
#[must_use]
pub fn register_profile() -> String {
    let mut out = String::new();
    for (role, reg) in ROLE_ALIASES {
        // Infallible: writing to a String cannot fail.
        let _ = writeln!(out, "={}\t{}", role, reg);
    }
    for reg in &REGISTERS {
        let _ = writeln!(out, "gpr\t{}\t.{}\t{}\t0", reg.name, reg.bits, reg.offset);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_contiguous_32_bit_slots() {
        for (i, reg) in REGISTERS.iter().enumerate() {
            assert_eq!(reg.bits, 32);
            assert_eq!(reg.offset as usize, i * 4);
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(lookup("brk").map(|r| r.offset), Some(8));
        assert!(lookup("rax").is_none());
    }

    #[test]
    fn profile_lists_aliases_then_registers() {
        let profile = register_profile();
        let lines: alloc::vec::Vec<&str> = profile.lines().collect();
        assert_eq!(lines.len(), ROLE_ALIASES.len() + REGISTERS.len());
        assert_eq!(lines[0], "=PC\tpc");
        assert_eq!(lines[3], "=A0\tptr");
        assert_eq!(lines[4], "gpr\tptr\t.32\t0\t0");
        assert_eq!(lines[8], "gpr\tkbd\t.32\t16\t0");
    }
}
