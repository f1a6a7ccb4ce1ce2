use tern_asm::{AsmErrorKind, assemble};
use tern_ir::{BuildError, MetaKind, Op, decode_distance};

#[test]
fn assembles_try_catch_listing() {
    let p = assemble(
        r#"
# try { throw 3 } catch (e) { return e + 1 }
try
  push 3
  throw
catch e
  load e
  push 1
  add
  return
end
"#,
    )
    .unwrap();
    assert_eq!(p.ops.len(), 10);
    assert_eq!(p.ops[0], Op::Try(0, 3));
    assert_eq!(p.ops[3].as_meta().map(|m| m.kind), Some(MetaKind::Catch));
    assert_eq!(
        p.ops[4].as_meta().map(|m| m.kind),
        Some(MetaKind::CatchExceptionIdentifier)
    );
    assert_eq!(
        p.ops[9].as_meta().map(|m| m.kind),
        Some(MetaKind::EndTryCatchFinally)
    );
    let catch = p.ops[3].as_meta().unwrap();
    assert_eq!(3 + catch.distance(), 9);
}

#[test]
fn labels_and_strings_use_the_literal_pool() {
    let p = assemble("push \"boom\"\nbreak outer\ncontinue\n").unwrap();
    assert_eq!(p.literals, vec!["boom".to_string(), "outer".to_string()]);
    assert_eq!(p.ops[1], Op::Break(Some(1)));
    assert_eq!(p.ops[2], Op::Continue(None));
}

#[test]
fn jump_distance_is_encoded() {
    let p = assemble("jump 300").unwrap();
    let Op::Jump(hi, lo) = p.ops[0] else {
        panic!("expected jump, got {:?}", p.ops[0]);
    };
    assert_eq!(decode_distance(hi, lo), 300);
}

#[test]
fn errors_carry_line_numbers() {
    let err = assemble("nop\nfrobnicate\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.kind, AsmErrorKind::UnknownMnemonic("frobnicate".into()));
    assert_eq!(err.to_string(), "line 2: unknown mnemonic `frobnicate`");

    let err = assemble("push").unwrap_err();
    assert_eq!(err.kind, AsmErrorKind::MissingOperand("push"));

    let err = assemble("add 1").unwrap_err();
    assert_eq!(err.kind, AsmErrorKind::TrailingInput("1".into()));

    let err = assemble("load 5").unwrap_err();
    assert_eq!(err.kind, AsmErrorKind::BadOperand("5".into()));
}

#[test]
fn structural_misuse_is_reported() {
    let err = assemble("catch e").unwrap_err();
    assert_eq!(err.kind, AsmErrorKind::Build(BuildError::NoOpenTry("catch")));

    let err = assemble("try\nnop\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.kind, AsmErrorKind::Build(BuildError::UnclosedTry(1)));

    let err = assemble("try\nfinally\ncatch e\nend").unwrap_err();
    assert_eq!(err.line, 3);
    assert_eq!(err.kind, AsmErrorKind::Build(BuildError::MisplacedCatch));
}

#[test]
fn zero_distance_jump_is_rejected() {
    let err = assemble("nop\njump 0\npush 1\nreturn").unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.kind, AsmErrorKind::Build(BuildError::ZeroJump));

    let err = assemble("jump -1").unwrap_err();
    assert_eq!(err.kind, AsmErrorKind::BadOperand("-1".into()));
}
