use tern_ir::{Op, decode_distance};
use tracing::trace;

use super::context::Interp;
use super::cursor::read_opcode;
use super::try_catch::op_try;
use crate::completion::Completion;
use crate::config::MAX_DEPTH_LIMIT;
use crate::core::scope;
use crate::core::value::Value;
use crate::errors::Fault;

/// Executes opcodes from `it.pos` until a block boundary or an abrupt
/// completion.
///
/// Reaching a marker opcode or the end of the program yields `Empty` with
/// the cursor on the boundary. An abrupt completion leaves the cursor on the
/// opcode that produced it; for a nested construct that is its `Try` op, so
/// the cursor stays strictly inside the enclosing span.
///
/// Nesting is bounded by `VmConfig::max_depth`, never above `MAX_DEPTH_LIMIT`.
pub fn run_block(it: &mut Interp<'_>) -> Result<Completion, Fault> {
    let limit = it.config().max_depth.min(MAX_DEPTH_LIMIT);
    if it.depth >= limit {
        return Err(Fault::StackOverflow { limit });
    }
    it.depth += 1;
    let result = run_loop(it);
    it.depth -= 1;
    result
}

fn run_loop(it: &mut Interp<'_>) -> Result<Completion, Fault> {
    let len = it.program.ops.len();
    loop {
        let pos = it.pos;
        if pos == len {
            return Ok(Completion::Empty);
        }
        let op = read_opcode(it, pos)?;
        trace!(target: "tern::vm", pos, depth = it.depth, ?op, "dispatch");
        let completion = match op {
            Op::Meta(_) => return Ok(Completion::Empty),
            Op::Try(hi, lo) => {
                let c = op_try(it, *hi, *lo)?;
                if c.is_abrupt() {
                    it.pos = pos;
                }
                c
            }
            Op::Jump(hi, lo) => {
                let to = pos + decode_distance(*hi, *lo);
                if to <= pos {
                    return Err(Fault::NonForwardJump { pos });
                }
                if to > len {
                    return Err(Fault::PositionOutOfRange { pos: to, len });
                }
                it.pos = to;
                Completion::Empty
            }
            _ => {
                let c = step(it, op)?;
                if !c.is_abrupt() {
                    it.pos = pos + 1;
                }
                c
            }
        };
        if completion.is_abrupt() {
            return Ok(completion);
        }
    }
}

/// Executes one ordinary opcode. The caller moves the cursor.
fn step(it: &mut Interp<'_>, op: &Op) -> Result<Completion, Fault> {
    let c = match op {
        Op::Nop => Completion::Empty,
        Op::PushInt(i) => {
            it.push(Value::Int(*i));
            Completion::Empty
        }
        Op::PushLit(idx) => {
            let s = it.name(*idx)?;
            it.push(Value::Str(s));
            Completion::Empty
        }
        Op::PushUndefined => {
            it.push(Value::Undefined);
            Completion::Empty
        }
        Op::NewObject(idx) => {
            let tag = it.name(*idx)?;
            let obj = it.heap.alloc(tag);
            it.push(Value::Object(obj));
            Completion::Empty
        }
        Op::Load(idx) => {
            let name = it.name(*idx)?;
            match scope::lookup(&it.scope, &name) {
                Some(v) => {
                    it.push(v);
                    Completion::Empty
                }
                None => Completion::Throw(Value::str(&format!(
                    "ReferenceError: {name} is not defined"
                ))),
            }
        }
        Op::Store(idx) => {
            let name = it.name(*idx)?;
            let v = it.pop()?;
            if let Err(v) = scope::assign(&it.scope, &name, v.clone()) {
                scope::declare(&scope::outermost(&it.scope), name, v);
            }
            Completion::Normal(v)
        }
        Op::Var(idx) => {
            let name = it.name(*idx)?;
            scope::declare(&it.scope, name, Value::Undefined);
            Completion::Empty
        }
        Op::Add => {
            let b = it.pop()?;
            let a = it.pop()?;
            match a.add(&b) {
                Ok(v) => {
                    it.push(v);
                    Completion::Empty
                }
                Err(msg) => Completion::Throw(Value::str(&msg)),
            }
        }
        Op::Pop => Completion::Normal(it.pop()?),
        Op::Print => {
            let v = it.pop()?;
            it.print(&v);
            Completion::Empty
        }
        Op::Throw => Completion::Throw(it.pop()?),
        Op::Return => Completion::Return(it.pop()?),
        Op::Break(label) => Completion::Break(label.map(|l| it.name(l)).transpose()?),
        Op::Continue(label) => Completion::Continue(label.map(|l| it.name(l)).transpose()?),
        Op::Exit => Completion::Exit,
        Op::Jump(..) | Op::Try(..) | Op::Meta(_) => unreachable!("handled by run_loop"),
    };
    Ok(c)
}
