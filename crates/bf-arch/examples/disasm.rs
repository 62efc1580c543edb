//! Walk a Brainfuck program and print a disassembly listing.
//!
//! Run with: `cargo run --example disasm`

use bf_arch::{decode, DecodeOptions};

fn main() {
    // Prints "Hi" on a classic 8-bit tape machine.
    let program: &[u8] = b"++++++++[>+++++++++<-]>.+++++++++++++++++++++++++.";

    let mut addr = 0u64;
    while (addr as usize) < program.len() {
        let ins = decode(addr, &program[addr as usize..], DecodeOptions::ALL)
            .expect("non-empty window");
        let window = &program[addr as usize..addr as usize + ins.size];
        let hex: String = window.iter().map(|b| format!("{b:02x}")).collect();
        println!(
            "{:08x}  {:<20} {:<16} {}",
            addr,
            hex,
            ins.mnemonic,
            ins.semantics.as_str()
        );
        addr += ins.size as u64;
    }
}
