//! Live-object accounting across every path through a try construct.
//!
//! Each `new` allocates a tracked object. After a run, the only live objects
//! must be the ones reachable from the returned completion or from globals.

mod common;

use common::run_listing;
use tern_runtime::{Completion, Value};

fn live(vm: &tern_runtime::Vm) -> usize {
    vm.heap().live_objects()
}

#[test]
fn caught_and_discarded_exception_is_released() {
    let (vm, result) = run_listing(
        "try
           new Error
           throw
         catch e
         end",
    );
    assert_eq!(result.unwrap(), Completion::Empty);
    assert_eq!(vm.heap().allocated(), 1);
    assert_eq!(live(&vm), 0);
}

#[test]
fn caught_exception_returned_has_a_single_owner() {
    let (vm, result) = run_listing(
        "try
           new Error
           throw
         catch e
           load e
           return
         end",
    );
    let completion = result.unwrap();
    let Completion::Return(Value::Object(obj)) = &completion else {
        panic!("expected returned object, got {completion:?}");
    };
    assert_eq!(obj.tag(), "Error");
    assert_eq!(obj.ref_count(), 1);
    assert_eq!(live(&vm), 1);
    drop(completion);
    assert_eq!(live(&vm), 0);
}

#[test]
fn finally_override_releases_superseded_payload() {
    let (vm, result) = run_listing(
        "try
           new First
           return
         finally
           new Second
           return
         end",
    );
    let completion = result.unwrap();
    assert_eq!(vm.heap().allocated(), 2);
    assert_eq!(live(&vm), 1);
    let tag = completion.value().and_then(Value::as_obj).map(|o| o.tag().to_string());
    assert_eq!(tag.as_deref(), Some("Second"));
    drop(completion);
    assert_eq!(live(&vm), 0);
}

#[test]
fn finally_override_releases_uncaught_throw() {
    let (vm, result) = run_listing(
        "try
           new Error
           throw
         finally
           break out
         end",
    );
    assert!(matches!(result.unwrap(), Completion::Break(Some(_))));
    assert_eq!(live(&vm), 0);
}

#[test]
fn empty_finally_keeps_prior_payload_alive() {
    let (vm, result) = run_listing(
        "try
           new Error
           throw
         finally
           new Scratch
           pop
         end",
    );
    let completion = result.unwrap();
    assert!(completion.is_throw());
    assert_eq!(live(&vm), 1);
    drop(completion);
    assert_eq!(live(&vm), 0);
}

#[test]
fn catch_rethrow_releases_original_exception() {
    let (vm, result) = run_listing(
        "try
           new Original
           throw
         catch e
           new Replacement
           throw
         end",
    );
    let completion = result.unwrap();
    assert_eq!(live(&vm), 1);
    let tag = completion.value().and_then(Value::as_obj).map(|o| o.tag().to_string());
    assert_eq!(tag.as_deref(), Some("Replacement"));
}

#[test]
fn operand_stack_leftovers_are_released_on_abrupt_span() {
    let (vm, result) = run_listing(
        "try
           new A
           new B
           push 1
           throw
         catch e
           new C
           push 2
           throw
         finally
           new D
           push 3
           return
         end",
    );
    assert_eq!(result.unwrap(), Completion::Return(Value::Int(3)));
    assert_eq!(vm.heap().allocated(), 4);
    assert_eq!(live(&vm), 0);
}

#[test]
fn exit_short_circuit_releases_stack_values() {
    let (vm, result) = run_listing(
        "try
           new Pending
           exit
         catch e
         finally
         end",
    );
    assert_eq!(result.unwrap(), Completion::Exit);
    assert_eq!(live(&vm), 0);
}

#[test]
fn exception_kept_in_global_outlives_catch_scope() {
    let (mut vm, result) = run_listing(
        "try
           new Error
           throw
         catch e
           load e
           store kept
         end",
    );
    assert_eq!(result.unwrap(), Completion::Empty);
    assert_eq!(live(&vm), 1);
    let kept = vm.global("kept").unwrap();
    assert_eq!(kept.as_obj().map(|o| o.ref_count()), Some(2));
    drop(kept);
    vm.reset_globals();
    assert_eq!(live(&vm), 0);
}

#[test]
fn nested_constructs_release_everything() {
    let (vm, result) = run_listing(
        "try
           try
             new Inner
             throw
           catch a
             new Middle
             throw
           finally
             new Cleanup
             pop
           end
         catch b
           load b
           pop
         finally
         end",
    );
    assert_eq!(result.unwrap(), Completion::Empty);
    assert_eq!(vm.heap().allocated(), 3);
    assert_eq!(live(&vm), 0);
}
