#![allow(dead_code)]

use tern_asm::assemble;
use tern_runtime::{Completion, Fault, Value, Vm};

/// Assembles and runs a listing on a fresh VM.
pub fn run_listing(src: &str) -> (Vm, Result<Completion, Fault>) {
    let program = assemble(src).unwrap_or_else(|e| panic!("assemble failed: {e}\n{src}"));
    let mut vm = Vm::new();
    let result = vm.run(&program);
    (vm, result)
}

pub fn completion_of(src: &str) -> Completion {
    let (_, result) = run_listing(src);
    result.unwrap_or_else(|f| panic!("unexpected fault: {f}"))
}

pub fn int(i: i64) -> Value {
    Value::Int(i)
}
