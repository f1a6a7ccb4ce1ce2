//! tern runtime: values, scopes, completion values and the bytecode interpreter.

#![allow(clippy::new_without_default)]
#![allow(clippy::should_implement_trait)]

pub mod core;
pub mod vm;
pub mod errors;

mod completion;
mod config;

// Re-exports from core/
pub use core::heap::{Heap, ObjRef, ObjectId};
pub use core::scope::{Scope, ScopeRef};
pub use core::value::{Name, Value};

// Re-exports from vm/
pub use vm::{Interp, Vm, run_block};

pub use completion::{Completion, CompletionKind};
pub use config::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT, VmConfig};
pub use errors::Fault;
pub use tern_ir::{Op, Program};
