//! Integration tests for bf_arch.
//!
//! These tests exercise the public API end-to-end: byte windows in,
//! instruction records out, mnemonic text back to bytes.

use bf_arch::{
    analyze, analyze_with, assemble, decode, disassemble, BfError, ByteSource, Category,
    DecodeOptions, NOP_FILLER, TRAP_SENTINEL,
};

/// Byte-source backed by a program image based at address `base`.
struct Image {
    base: u64,
    bytes: Vec<u8>,
}

impl ByteSource for Image {
    fn read_at(&self, addr: u64, len: usize) -> Vec<u8> {
        let Some(start) = addr.checked_sub(self.base) else {
            return Vec::new();
        };
        let start = start as usize;
        if start >= self.bytes.len() {
            return Vec::new();
        }
        let end = start.saturating_add(len).min(self.bytes.len());
        self.bytes[start..end].to_vec()
    }
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn scenario_loop_head_at_100() {
    let ins = disassemble(100, b"[>>>]").unwrap();
    assert_eq!(ins.mnemonic, "while [ptr]");
    assert_eq!(ins.size, 1);

    let ins = analyze(100, b"[>>>]").unwrap();
    assert_eq!(ins.category, Category::CondJump);
    assert_eq!(ins.jump_targets, vec![101, 105]);
}

#[test]
fn scenario_triple_plus_at_0() {
    let ins = disassemble(0, b"+++").unwrap();
    assert_eq!(ins.mnemonic, "add [ptr], 3");
    assert_eq!(ins.size, 3);

    let ins = analyze(0, b"+++").unwrap();
    assert_eq!(ins.category, Category::Add);
    assert_eq!(ins.size, 3);
}

// ============================================================================
// Combined decode
// ============================================================================

#[test]
fn decode_runs_both_components() {
    let ins = decode(0, b"<<", DecodeOptions::ALL).unwrap();
    assert_eq!(ins.mnemonic, "sub ptr, 2");
    assert_eq!(ins.category, Category::Sub);
    assert_eq!(ins.size, 2);
    assert_eq!(ins.opcode_id, 3);
    assert_eq!(ins.semantics.as_str(), "2,ptr,-=");
}

#[test]
fn decode_code_only_leaves_analysis_defaults() {
    let ins = decode(0, b"[", DecodeOptions::CODE).unwrap();
    assert_eq!(ins.mnemonic, "while [ptr]");
    assert_eq!(ins.category, Category::Nop);
    assert_eq!(ins.opcode_id, 0);
    assert!(ins.semantics.is_empty());
}

#[test]
fn decode_analyze_only_leaves_mnemonic_empty() {
    let ins = decode(0, b"]", DecodeOptions::ANALYZE).unwrap();
    assert!(ins.mnemonic.is_empty());
    assert_eq!(ins.category, Category::UncondJump);
}

#[test]
fn decode_no_options_is_a_no_op() {
    let ins = decode(7, b"+", DecodeOptions::default()).unwrap();
    assert_eq!(ins.address, 7);
    assert!(ins.mnemonic.is_empty());
    assert_eq!(ins.category, Category::Nop);
}

#[test]
fn decode_empty_buffer_fails() {
    assert_eq!(
        decode(0, b"", DecodeOptions::ALL),
        Err(BfError::EmptyBuffer)
    );
    assert_eq!(analyze(0, b""), Err(BfError::EmptyBuffer));
}

// ============================================================================
// Round trips (lossy in documented ways)
// ============================================================================

#[test]
fn collapsible_opcodes_round_trip() {
    for &op in &[b'>', b'<', b'+', b'-', b',', b'.'] {
        for n in [1usize, 2, 5] {
            let buf = vec![op; n];
            let ins = disassemble(0, &buf).unwrap();
            let out = assemble(&ins.mnemonic).unwrap();
            assert_eq!(
                out.bytes(),
                &buf[..],
                "round trip failed for {:?} x {}",
                op as char,
                n
            );
        }
    }
}

#[test]
fn bracket_mnemonics_round_trip_to_single_bytes() {
    let out = assemble(&disassemble(0, b"[").unwrap().mnemonic).unwrap();
    assert_eq!(out.bytes(), b"[");
    assert_eq!(out.len(), 1);

    let out = assemble(&disassemble(0, b"]").unwrap().mnemonic).unwrap();
    assert_eq!(out.bytes(), b"]");
    assert_eq!(out.len(), 1);
}

#[test]
fn unknown_byte_run_loses_its_count() {
    // Three unknown bytes decode to "nop 3" (no comma), which encodes back
    // to a single filler byte.
    let ins = disassemble(0, b"xxx").unwrap();
    assert_eq!(ins.mnemonic, "nop 3");
    let out = assemble(&ins.mnemonic).unwrap();
    assert_eq!(out.bytes(), [NOP_FILLER]);
}

#[test]
fn trap_run_encodes_to_sentinels() {
    let out = assemble("trap, 3").unwrap();
    assert_eq!(out.bytes(), [TRAP_SENTINEL; 3]);
    // Each byte analyzes back as a trap.
    let ins = analyze(0, out.bytes()).unwrap();
    assert_eq!(ins.category, Category::Trap);
    assert_eq!(ins.size, 1);
}

#[test]
fn unknown_mnemonic_is_rejected() {
    assert!(matches!(
        assemble("blt x1, x2, target"),
        Err(BfError::UnknownMnemonic { .. })
    ));
}

// ============================================================================
// Bracket matching against a byte-source
// ============================================================================

#[test]
fn bracket_scan_pulls_from_source() {
    let mut program = vec![b'['];
    program.extend_from_slice(&[b'-'; 100]);
    program.push(b']');
    let image = Image {
        base: 0x400,
        bytes: program,
    };

    let window = image.read_at(0x400, 8);
    assert_eq!(window.len(), 8);
    let ins = analyze_with(0x400, &window, Some(&image)).unwrap();
    assert_eq!(ins.category, Category::CondJump);
    assert_eq!(ins.jump_targets, vec![0x401, 0x400 + 102]);
}

#[test]
fn bracket_scan_degrades_without_source() {
    let ins = analyze(0x400, b"[------").unwrap();
    assert_eq!(ins.category, Category::CondJump);
    assert!(ins.jump_targets.is_empty());
}

#[test]
fn bracket_scan_flags_illegal_via_decode() {
    let ins = decode(0, &[b'[', 0x00], DecodeOptions::ANALYZE).unwrap();
    assert_eq!(ins.category, Category::Illegal);
    assert!(ins.is_illegal());
}

// ============================================================================
// Walking a real program
// ============================================================================

#[test]
fn walk_a_program_by_size() {
    // ++[>+++<-] — sizes: 2, 1, 1, 3, 1, 1, 1
    let program = b"++[>+++<-]";
    let mut addr = 0u64;
    let mut mnemonics = Vec::new();
    while (addr as usize) < program.len() {
        let ins = decode(addr, &program[addr as usize..], DecodeOptions::ALL).unwrap();
        assert!(ins.size >= 1);
        mnemonics.push(ins.mnemonic.clone());
        addr += ins.size as u64;
    }
    assert_eq!(
        mnemonics,
        vec![
            "add [ptr], 2",
            "while [ptr]",
            "inc ptr",
            "add [ptr], 3",
            "dec ptr",
            "dec [ptr]",
            "loop",
        ]
    );
}
