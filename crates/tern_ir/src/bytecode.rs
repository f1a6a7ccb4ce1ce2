use std::fmt;

use crate::encoding::{Idx, decode_distance};

/// Structural marker kinds. Markers delimit a try construct and are never
/// executed as ordinary opcodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetaKind {
    Catch,                    // data_1/data_2: distance to the end of the catch span
    CatchExceptionIdentifier, // data_1/data_2: literal index of the bound name
    Finally,                  // data_1/data_2: distance to the end of the finally span
    EndTryCatchFinally,
}

impl MetaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetaKind::Catch => "catch",
            MetaKind::CatchExceptionIdentifier => "catch_exception_identifier",
            MetaKind::Finally => "finally",
            MetaKind::EndTryCatchFinally => "end_try_catch_finally",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Meta {
    pub kind: MetaKind,
    pub data_1: Idx,
    pub data_2: Idx,
}

impl Meta {
    pub fn new(kind: MetaKind) -> Self {
        Self {
            kind,
            data_1: 0,
            data_2: 0,
        }
    }

    /// Distance operand of a Catch or Finally marker.
    #[inline]
    pub fn distance(&self) -> usize {
        decode_distance(self.data_1, self.data_2)
    }

    /// Literal operand of a CatchExceptionIdentifier marker.
    #[inline]
    pub fn literal_index(&self) -> u32 {
        decode_distance(self.data_1, self.data_2) as u32
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Nop,
    PushInt(i64),
    PushLit(u32), // Index into literal pool
    PushUndefined,
    NewObject(u32), // Index into literal pool (object tag)
    Load(u32),      // Index into literal pool (name)
    Store(u32),     // Index into literal pool (name)
    Var(u32),       // Index into literal pool (name)
    Add,
    Pop,
    Print,
    Jump(Idx, Idx), // Forward distance from this op
    Throw,
    Return,
    Break(Option<u32>),    // Optional label literal
    Continue(Option<u32>), // Optional label literal
    Exit,
    Try(Idx, Idx), // Distance from this op to the first marker after the try span
    Meta(Meta),
}

impl Op {
    #[inline]
    pub fn as_meta(&self) -> Option<&Meta> {
        match self {
            Op::Meta(m) => Some(m),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub ops: Vec<Op>,
    pub literals: Vec<String>,
}

impl Program {
    pub fn literal(&self, idx: u32) -> Option<&str> {
        self.literals.get(idx as usize).map(String::as_str)
    }

    fn fmt_op(&self, f: &mut fmt::Formatter<'_>, pos: usize, op: &Op) -> fmt::Result {
        let lit = |idx: &u32| match self.literal(*idx) {
            Some(s) => format!("{s:?}"),
            None => format!("#{idx}?"),
        };
        match op {
            Op::Nop => write!(f, "nop"),
            Op::PushInt(i) => write!(f, "push {i}"),
            Op::PushLit(idx) => write!(f, "push {}", lit(idx)),
            Op::PushUndefined => write!(f, "undefined"),
            Op::NewObject(idx) => write!(f, "new {}", lit(idx)),
            Op::Load(idx) => write!(f, "load {}", lit(idx)),
            Op::Store(idx) => write!(f, "store {}", lit(idx)),
            Op::Var(idx) => write!(f, "var {}", lit(idx)),
            Op::Add => write!(f, "add"),
            Op::Pop => write!(f, "pop"),
            Op::Print => write!(f, "print"),
            Op::Jump(hi, lo) => {
                let d = decode_distance(*hi, *lo);
                write!(f, "jump +{d} -> {}", pos + d)
            }
            Op::Throw => write!(f, "throw"),
            Op::Return => write!(f, "return"),
            Op::Break(None) => write!(f, "break"),
            Op::Break(Some(l)) => write!(f, "break {}", lit(l)),
            Op::Continue(None) => write!(f, "continue"),
            Op::Continue(Some(l)) => write!(f, "continue {}", lit(l)),
            Op::Exit => write!(f, "exit"),
            Op::Try(hi, lo) => write!(f, "try -> {}", pos + decode_distance(*hi, *lo)),
            Op::Meta(m) => match m.kind {
                MetaKind::Catch | MetaKind::Finally => {
                    write!(f, "meta {} -> {}", m.kind.as_str(), pos + m.distance())
                }
                MetaKind::CatchExceptionIdentifier => {
                    write!(f, "meta {} {}", m.kind.as_str(), lit(&m.literal_index()))
                }
                MetaKind::EndTryCatchFinally => write!(f, "meta {}", m.kind.as_str()),
            },
        }
    }
}

/// Disassembly listing, one op per line prefixed by its position.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.ops.len().max(1).to_string().len();
        for (pos, op) in self.ops.iter().enumerate() {
            write!(f, "{pos:>width$}  ")?;
            self.fmt_op(f, pos, op)?;
            writeln!(f)?;
        }
        Ok(())
    }
}
