//! Bytecode interpreter.
//!
//! This module contains the block executor, the try/catch/finally construct
//! and the `Vm` entry point.

mod context;
mod cursor;
mod dispatch;
mod machine;
mod try_catch;

pub use context::{Interp, OperandStack};
pub use dispatch::run_block;
pub use machine::Vm;
