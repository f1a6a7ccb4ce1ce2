//! `try` / `catch` / `finally` construct.
//!
//! See also: ECMA-262 v5, 12.14
//!
//! The construct is entered with the cursor on its `Try` op and left with the
//! cursor after the `end_try_catch_finally` marker. Each span runs through a
//! reentrant `run_block` call and must stop exactly on the marker that ends
//! it unless it completed abruptly. An `Exit` completion coming out of the try
//! or catch span is returned as is; neither catch nor finally runs for it.

use tern_ir::{MetaKind, decode_distance};
use tracing::debug;

use super::context::Interp;
use super::cursor::{read_meta, read_meta_end};
use super::dispatch::run_block;
use crate::completion::Completion;
use crate::core::scope;
use crate::core::value::Value;
use crate::errors::Fault;

const AFTER_TRY: &[MetaKind] = &[
    MetaKind::Catch,
    MetaKind::Finally,
    MetaKind::EndTryCatchFinally,
];
const AFTER_CATCH: &[MetaKind] = &[MetaKind::Finally, MetaKind::EndTryCatchFinally];

pub(crate) fn op_try(it: &mut Interp<'_>, hi: u8, lo: u8) -> Result<Completion, Fault> {
    let start = it.pos;
    let try_end = start + decode_distance(hi, lo);
    let stack_base = it.stack.len();
    debug!(target: "tern::try", start, try_end, depth = it.depth(), "enter try");

    it.pos += 1;
    let mut completion = run_block(it)?;
    check_span_end(it, "try", try_end, &completion)?;
    it.pos = try_end;
    it.stack.truncate(stack_base);

    let marker = read_meta(it, AFTER_TRY, "catch, finally or end marker after try body")?;
    if completion.is_exit() {
        debug!(target: "tern::try", start, "exit after try body");
        return Ok(completion);
    }

    if marker.kind == MetaKind::Catch {
        let catch_end = read_meta_end(it, MetaKind::Catch)?;
        it.pos += 1;
        completion = match completion {
            Completion::Throw(thrown) => run_catch(it, thrown, catch_end)?,
            other => other,
        };
        it.pos = catch_end;
        it.stack.truncate(stack_base);
    }

    let marker = read_meta(it, AFTER_CATCH, "finally or end marker after catch")?;
    if completion.is_exit() {
        debug!(target: "tern::try", start, "exit after catch body");
        return Ok(completion);
    }

    if marker.kind == MetaKind::Finally {
        let finally_end = read_meta_end(it, MetaKind::Finally)?;
        it.pos += 1;
        let finally_completion = run_block(it)?;
        check_span_end(it, "finally", finally_end, &finally_completion)?;
        it.pos = finally_end;
        it.stack.truncate(stack_base);
        if !finally_completion.is_empty() {
            debug!(
                target: "tern::try",
                start,
                replaced = completion.kind().as_str(),
                by = finally_completion.kind().as_str(),
                "finally overrides completion"
            );
            completion = finally_completion;
        }
    }

    read_meta(it, &[MetaKind::EndTryCatchFinally], "end marker")?;
    it.pos += 1;
    debug!(target: "tern::try", start, completion = completion.kind().as_str(), "leave try");
    Ok(completion)
}

/// Runs the catch span with `thrown` bound in a fresh child scope. The
/// active scope is restored before returning, faults included.
fn run_catch(it: &mut Interp<'_>, thrown: Value, catch_end: usize) -> Result<Completion, Fault> {
    let ident = read_meta(
        it,
        &[MetaKind::CatchExceptionIdentifier],
        "catch exception identifier",
    )?;
    it.pos += 1;
    let name = it.name(ident.literal_index())?;
    debug!(target: "tern::try", %name, thrown = %thrown, "bind caught exception");

    let catch_scope = scope::create_child_scope(&it.scope);
    scope::bind_mutable(&catch_scope, name, thrown)?;

    let outer = std::mem::replace(&mut it.scope, catch_scope);
    let result = run_block(it);
    let catch_scope = std::mem::replace(&mut it.scope, outer);
    scope::release_scope(catch_scope);

    let completion = result?;
    check_span_end(it, "catch", catch_end, &completion)?;
    Ok(completion)
}

fn check_span_end(
    it: &Interp<'_>,
    span: &'static str,
    end: usize,
    completion: &Completion,
) -> Result<(), Fault> {
    let ok = if completion.is_empty() {
        it.pos == end
    } else {
        it.pos < end
    };
    if ok {
        return Ok(());
    }
    Err(Fault::CursorMismatch {
        span,
        pos: it.pos,
        end,
        completion: completion.kind().as_str(),
    })
}
