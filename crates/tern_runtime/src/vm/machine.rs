use tern_ir::Program;
use tracing::debug;

use super::context::Interp;
use super::dispatch::run_block;
use crate::completion::Completion;
use crate::config::VmConfig;
use crate::core::heap::Heap;
use crate::core::scope::{self, ScopeRef};
use crate::core::value::Value;
use crate::errors::Fault;

pub struct Vm {
    pub output: String,
    config: VmConfig,
    heap: Heap,
    globals: ScopeRef,
}

impl Vm {
    pub fn new() -> Self {
        Self::with_config(VmConfig::default())
    }

    pub fn with_config(config: VmConfig) -> Self {
        Self {
            output: String::new(),
            config,
            heap: Heap::new(),
            globals: scope::global_scope(),
        }
    }

    /// Runs `program` from its first op in the global scope. The returned
    /// completion owns its payload.
    pub fn run(&mut self, program: &Program) -> Result<Completion, Fault> {
        let mut it = Interp::new(
            program,
            &mut self.heap,
            &mut self.output,
            self.globals.clone(),
            self.config,
        );
        let completion = run_block(&mut it)?;
        let len = program.ops.len();
        if completion.is_empty() && it.pos != len {
            let kind = program.ops[it.pos]
                .as_meta()
                .map(|m| m.kind.as_str())
                .unwrap_or("non-marker");
            return Err(Fault::UnexpectedMarker { pos: it.pos, kind });
        }
        debug!(target: "tern::vm", completion = completion.kind().as_str(), "program finished");
        Ok(completion)
    }

    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn global_scope(&self) -> &ScopeRef {
        &self.globals
    }

    pub fn global(&self, name: &str) -> Option<Value> {
        self.globals.borrow().get_own(name).cloned()
    }

    /// Drops every global binding.
    pub fn reset_globals(&mut self) {
        self.globals.borrow_mut().clear();
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}
