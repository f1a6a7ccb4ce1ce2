//! Assembler for the tern bytecode listing format.
//!
//! One instruction per line, `#` starts a comment. `try`, `catch <name>`,
//! `finally` and `end` delimit a try construct; the assembler lays out the
//! marker opcodes and their distances.
mod assembler;
mod lexer;
mod mnemonics;

pub use assembler::{AsmError, AsmErrorKind, assemble};
pub use lexer::{Operand, tokenize_line};
pub use mnemonics::Mnemonic;
