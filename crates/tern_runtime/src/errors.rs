//! Internal faults.
//!
//! A `Fault` means the bytecode stream is corrupt or was mis-generated. It is
//! never turned into a language-level throw and interpretation of the
//! offending construct stops.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    #[error("malformed try construct at {pos}: expected {expected}, found {found}")]
    MalformedConstruct {
        pos: usize,
        expected: &'static str,
        found: String,
    },
    #[error("`{kind}` marker at {pos} outside of a try construct")]
    UnexpectedMarker { pos: usize, kind: &'static str },
    #[error("{span} span ended at {pos} with {completion} completion, span end is {end}")]
    CursorMismatch {
        span: &'static str,
        pos: usize,
        end: usize,
        completion: &'static str,
    },
    #[error("position {pos} is outside the program ({len} ops)")]
    PositionOutOfRange { pos: usize, len: usize },
    #[error("jump at {pos} does not move forward")]
    NonForwardJump { pos: usize },
    #[error("literal #{0} is not in the literal pool")]
    LiteralOutOfRange(u32),
    #[error("operand stack underflow at {pos}")]
    StackUnderflow { pos: usize },
    #[error("block nesting exceeded the limit of {limit}")]
    StackOverflow { limit: usize },
    #[error("binding `{0}` already exists in a fresh scope")]
    DuplicateBinding(String),
}
