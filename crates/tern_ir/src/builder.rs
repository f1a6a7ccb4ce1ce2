//! Emitter for programs containing try/catch/finally constructs.
//!
//! A construct is laid out as:
//!
//! ```text
//! try -> T                      ; T = first marker after the try span
//! [try body]
//! T: meta catch -> C            ; optional
//!    meta catch_exception_identifier <name>
//!    [catch body]
//! C: meta finally -> F          ; optional
//!    [finally body]
//! F: meta end_try_catch_finally
//! ```
//!
//! Distances are relative to the op carrying them and are patched when the
//! following span is closed.

use ahash::RandomState;
use hashbrown::HashMap;

use crate::bytecode::{Meta, MetaKind, Op, Program};
use crate::encoding::{EncodeError, encode_distance};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("`{0}` without an open try")]
    NoOpenTry(&'static str),
    #[error("catch must directly follow the try body")]
    MisplacedCatch,
    #[error("finally must follow the try body or the catch body")]
    MisplacedFinally,
    #[error("{0} try construct(s) left open")]
    UnclosedTry(usize),
    #[error("literal pool overflow")]
    TooManyLiterals,
    #[error("jump distance must be at least 1")]
    ZeroJump,
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Try,
    Catch(usize),   // position of the Catch marker
    Finally(usize), // position of the Finally marker
}

#[derive(Debug)]
struct OpenTry {
    try_pos: usize,
    phase: Phase,
}

#[derive(Debug, Default)]
pub struct ProgramBuilder {
    program: Program,
    interned: HashMap<String, u32, RandomState>,
    open: Vec<OpenTry>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, op: Op) -> usize {
        let pos = self.program.ops.len();
        self.program.ops.push(op);
        pos
    }

    pub fn position(&self) -> usize {
        self.program.ops.len()
    }

    /// Number of constructs currently open.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn intern(&mut self, s: &str) -> Result<u32, BuildError> {
        if let Some(&idx) = self.interned.get(s) {
            return Ok(idx);
        }
        let idx = u32::try_from(self.program.literals.len())
            .map_err(|_| BuildError::TooManyLiterals)?;
        self.program.literals.push(s.to_string());
        self.interned.insert(s.to_string(), idx);
        Ok(idx)
    }

    pub fn push_str(&mut self, s: &str) -> Result<usize, BuildError> {
        let idx = self.intern(s)?;
        Ok(self.emit(Op::PushLit(idx)))
    }

    pub fn new_object(&mut self, tag: &str) -> Result<usize, BuildError> {
        let idx = self.intern(tag)?;
        Ok(self.emit(Op::NewObject(idx)))
    }

    pub fn load(&mut self, name: &str) -> Result<usize, BuildError> {
        let idx = self.intern(name)?;
        Ok(self.emit(Op::Load(idx)))
    }

    pub fn store(&mut self, name: &str) -> Result<usize, BuildError> {
        let idx = self.intern(name)?;
        Ok(self.emit(Op::Store(idx)))
    }

    pub fn var(&mut self, name: &str) -> Result<usize, BuildError> {
        let idx = self.intern(name)?;
        Ok(self.emit(Op::Var(idx)))
    }

    pub fn brk(&mut self, label: Option<&str>) -> Result<usize, BuildError> {
        let label = label.map(|l| self.intern(l)).transpose()?;
        Ok(self.emit(Op::Break(label)))
    }

    pub fn cont(&mut self, label: Option<&str>) -> Result<usize, BuildError> {
        let label = label.map(|l| self.intern(l)).transpose()?;
        Ok(self.emit(Op::Continue(label)))
    }

    /// Forward jump `distance` ops ahead of the jump itself.
    pub fn jump(&mut self, distance: usize) -> Result<usize, BuildError> {
        if distance == 0 {
            return Err(BuildError::ZeroJump);
        }
        let (hi, lo) = encode_distance(distance)?;
        Ok(self.emit(Op::Jump(hi, lo)))
    }

    /// Opens a construct and returns the position of its `Try` op.
    pub fn begin_try(&mut self) -> usize {
        let try_pos = self.emit(Op::Try(0, 0));
        self.open.push(OpenTry {
            try_pos,
            phase: Phase::Try,
        });
        try_pos
    }

    pub fn begin_catch(&mut self, name: &str) -> Result<(), BuildError> {
        let open = self.open.last().ok_or(BuildError::NoOpenTry("catch"))?;
        if open.phase != Phase::Try {
            return Err(BuildError::MisplacedCatch);
        }
        let try_pos = open.try_pos;
        self.patch_try(try_pos)?;
        let name_idx = self.intern(name)?;
        let (hi, lo) = encode_distance(name_idx as usize)?;
        let catch_pos = self.emit(Op::Meta(Meta::new(MetaKind::Catch)));
        self.emit(Op::Meta(Meta {
            kind: MetaKind::CatchExceptionIdentifier,
            data_1: hi,
            data_2: lo,
        }));
        if let Some(open) = self.open.last_mut() {
            open.phase = Phase::Catch(catch_pos);
        }
        Ok(())
    }

    pub fn begin_finally(&mut self) -> Result<(), BuildError> {
        let open = self.open.last().ok_or(BuildError::NoOpenTry("finally"))?;
        let (try_pos, phase) = (open.try_pos, open.phase);
        match phase {
            Phase::Try => self.patch_try(try_pos)?,
            Phase::Catch(catch_pos) => self.patch_meta(catch_pos)?,
            Phase::Finally(_) => return Err(BuildError::MisplacedFinally),
        }
        let finally_pos = self.emit(Op::Meta(Meta::new(MetaKind::Finally)));
        if let Some(open) = self.open.last_mut() {
            open.phase = Phase::Finally(finally_pos);
        }
        Ok(())
    }

    pub fn end_try(&mut self) -> Result<usize, BuildError> {
        let open = self.open.pop().ok_or(BuildError::NoOpenTry("end"))?;
        match open.phase {
            Phase::Try => self.patch_try(open.try_pos)?,
            Phase::Catch(pos) | Phase::Finally(pos) => self.patch_meta(pos)?,
        }
        Ok(self.emit(Op::Meta(Meta::new(MetaKind::EndTryCatchFinally))))
    }

    pub fn finish(self) -> Result<Program, BuildError> {
        if !self.open.is_empty() {
            return Err(BuildError::UnclosedTry(self.open.len()));
        }
        Ok(self.program)
    }

    fn patch_try(&mut self, try_pos: usize) -> Result<(), BuildError> {
        let (hi, lo) = encode_distance(self.position() - try_pos)?;
        self.program.ops[try_pos] = Op::Try(hi, lo);
        Ok(())
    }

    fn patch_meta(&mut self, pos: usize) -> Result<(), BuildError> {
        let (hi, lo) = encode_distance(self.position() - pos)?;
        if let Op::Meta(m) = &mut self.program.ops[pos] {
            m.data_1 = hi;
            m.data_2 = lo;
        }
        Ok(())
    }
}
