//! Bytecode representation for the tern interpreter.
//!
//! - `Op` / `Meta` - executable opcodes and the structural marker opcodes
//! - `Program` - a flat op array plus its literal pool
//! - `ProgramBuilder` - compiler-side emitter for try/catch/finally constructs
mod builder;
mod bytecode;
mod encoding;

pub use builder::{BuildError, ProgramBuilder};
pub use bytecode::*;
pub use encoding::{EncodeError, Idx, decode_distance, encode_distance};
