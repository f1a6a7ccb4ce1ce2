//! Completion values.
//!
//! A `Completion` is not `Clone`: whoever holds it owns its payload, and
//! replacing one completion with another releases the old payload.

use std::fmt;

use crate::core::value::{Name, Value};

#[derive(Debug, PartialEq)]
pub enum Completion {
    /// Execution reached the end of its span.
    Empty,
    Normal(Value),
    Throw(Value),
    Return(Value),
    Break(Option<Name>),
    Continue(Option<Name>),
    /// Engine-level termination.
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Empty,
    Normal,
    Throw,
    Return,
    Break,
    Continue,
    Exit,
}

impl CompletionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CompletionKind::Empty => "empty",
            CompletionKind::Normal => "normal",
            CompletionKind::Throw => "throw",
            CompletionKind::Return => "return",
            CompletionKind::Break => "break",
            CompletionKind::Continue => "continue",
            CompletionKind::Exit => "exit",
        }
    }
}

impl Completion {
    pub fn kind(&self) -> CompletionKind {
        match self {
            Completion::Empty => CompletionKind::Empty,
            Completion::Normal(_) => CompletionKind::Normal,
            Completion::Throw(_) => CompletionKind::Throw,
            Completion::Return(_) => CompletionKind::Return,
            Completion::Break(_) => CompletionKind::Break,
            Completion::Continue(_) => CompletionKind::Continue,
            Completion::Exit => CompletionKind::Exit,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Completion::Empty)
    }

    #[inline]
    pub fn is_throw(&self) -> bool {
        matches!(self, Completion::Throw(_))
    }

    #[inline]
    pub fn is_exit(&self) -> bool {
        matches!(self, Completion::Exit)
    }

    /// Anything that stops a block before its end.
    #[inline]
    pub fn is_abrupt(&self) -> bool {
        !matches!(self, Completion::Empty | Completion::Normal(_))
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Completion::Normal(v) | Completion::Throw(v) | Completion::Return(v) => Some(v),
            _ => None,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Completion::Break(l) | Completion::Continue(l) => l.as_deref(),
            _ => None,
        }
    }

    /// Moves the payload out, transferring its ownership to the caller.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Completion::Normal(v) | Completion::Throw(v) | Completion::Return(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Completion::Empty => f.write_str("Empty"),
            Completion::Normal(v) => write!(f, "Normal({v})"),
            Completion::Throw(v) => write!(f, "Throw({v})"),
            Completion::Return(v) => write!(f, "Return({v})"),
            Completion::Break(None) => f.write_str("Break"),
            Completion::Break(Some(l)) => write!(f, "Break({l})"),
            Completion::Continue(None) => f.write_str("Continue"),
            Completion::Continue(Some(l)) => write!(f, "Continue({l})"),
            Completion::Exit => f.write_str("Exit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn abrupt_kinds() {
        assert!(!Completion::Empty.is_abrupt());
        assert!(!Completion::Normal(Value::Undefined).is_abrupt());
        assert!(Completion::Throw(Value::Int(1)).is_abrupt());
        assert!(Completion::Break(None).is_abrupt());
        assert!(Completion::Exit.is_abrupt());
    }

    #[test]
    fn payload_and_label_accessors() {
        let c = Completion::Return(Value::Int(4));
        assert_eq!(c.kind(), CompletionKind::Return);
        assert_eq!(c.value(), Some(&Value::Int(4)));
        assert_eq!(c.into_value(), Some(Value::Int(4)));

        let b = Completion::Continue(Some(Rc::from("outer")));
        assert_eq!(b.label(), Some("outer"));
        assert_eq!(b.value(), None);
        assert_eq!(b.to_string(), "Continue(outer)");
    }
}
