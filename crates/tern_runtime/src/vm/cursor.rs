//! Reading opcodes and structural markers at the cursor.

use tern_ir::{Meta, MetaKind, Op};

use super::context::Interp;
use crate::errors::Fault;

#[inline]
pub(crate) fn read_opcode<'a>(it: &Interp<'a>, pos: usize) -> Result<&'a Op, Fault> {
    let program = it.program;
    program.ops.get(pos).ok_or(Fault::PositionOutOfRange {
        pos,
        len: program.ops.len(),
    })
}

/// Marker at the cursor, which must be one of `allowed`.
pub(crate) fn read_meta(
    it: &Interp<'_>,
    allowed: &[MetaKind],
    expected: &'static str,
) -> Result<Meta, Fault> {
    let op = read_opcode(it, it.pos)?;
    match op.as_meta() {
        Some(m) if allowed.contains(&m.kind) => Ok(*m),
        Some(m) => Err(Fault::MalformedConstruct {
            pos: it.pos,
            expected,
            found: format!("meta {}", m.kind.as_str()),
        }),
        None => Err(Fault::MalformedConstruct {
            pos: it.pos,
            expected,
            found: format!("{op:?}"),
        }),
    }
}

/// Absolute end position carried by the Catch or Finally marker at the cursor.
pub(crate) fn read_meta_end(it: &Interp<'_>, kind: MetaKind) -> Result<usize, Fault> {
    let meta = read_meta(it, &[kind], kind.as_str())?;
    let end = it.pos + meta.distance();
    let len = it.program.ops.len();
    if end >= len {
        return Err(Fault::PositionOutOfRange { pos: end, len });
    }
    Ok(end)
}
