//! Interpreter context threaded through reentrant block execution.

use std::io::Write;
use std::rc::Rc;

use smallvec::SmallVec;
use tern_ir::Program;

use crate::config::VmConfig;
use crate::core::heap::Heap;
use crate::core::scope::ScopeRef;
use crate::core::value::{Name, Value};
use crate::errors::Fault;

pub type OperandStack = SmallVec<[Value; 16]>;

/// Mutable interpreter state. Every nested block execution borrows it
/// exclusively; `pos` and `scope` are the only fields a try construct moves.
pub struct Interp<'a> {
    pub program: &'a Program,
    pub pos: usize,
    pub scope: ScopeRef,
    pub stack: OperandStack,
    pub heap: &'a mut Heap,
    pub(crate) depth: usize,
    config: VmConfig,
    output: &'a mut String,
    names: Vec<Option<Name>>,
}

impl<'a> Interp<'a> {
    pub fn new(
        program: &'a Program,
        heap: &'a mut Heap,
        output: &'a mut String,
        scope: ScopeRef,
        config: VmConfig,
    ) -> Self {
        Self {
            program,
            pos: 0,
            scope,
            stack: SmallVec::new(),
            heap,
            depth: 0,
            config,
            output,
            names: vec![None; program.literals.len()],
        }
    }

    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    /// Current block nesting.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Literal `idx` as a shared name, created once per literal.
    pub fn name(&mut self, idx: u32) -> Result<Name, Fault> {
        let slot = self
            .names
            .get_mut(idx as usize)
            .ok_or(Fault::LiteralOutOfRange(idx))?;
        if let Some(n) = slot {
            return Ok(n.clone());
        }
        let s = self
            .program
            .literal(idx)
            .ok_or(Fault::LiteralOutOfRange(idx))?;
        let n: Name = Rc::from(s);
        *slot = Some(n.clone());
        Ok(n)
    }

    #[inline]
    pub fn pop(&mut self) -> Result<Value, Fault> {
        self.stack
            .pop()
            .ok_or(Fault::StackUnderflow { pos: self.pos })
    }

    #[inline]
    pub fn push(&mut self, v: Value) {
        self.stack.push(v);
    }

    pub fn print(&mut self, v: &Value) {
        if self.config.capture_output {
            self.output.push_str(&v.to_string());
            self.output.push('\n');
        } else {
            let mut out = std::io::stdout().lock();
            let _ = writeln!(out, "{v}");
        }
    }
}
