use tern_ir::{BuildError, Op, Program, ProgramBuilder};

use crate::lexer::{Operand, tokenize_line};
use crate::mnemonics::{MNEMONICS, Mnemonic};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AsmErrorKind {
    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),
    #[error("`{0}` expects an operand")]
    MissingOperand(&'static str),
    #[error("bad operand `{0}`")]
    BadOperand(String),
    #[error("unexpected trailing `{0}`")]
    TrailingInput(String),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error(transparent)]
    Build(#[from] BuildError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct AsmError {
    pub line: usize,
    pub kind: AsmErrorKind,
}

/// Assembles a listing into a program.
pub fn assemble(src: &str) -> Result<Program, AsmError> {
    let mut b = ProgramBuilder::new();
    let mut last_line = 0;
    for (i, line) in src.lines().enumerate() {
        let line_no = i + 1;
        last_line = line_no;
        let toks = tokenize_line(line).map_err(|kind| AsmError {
            line: line_no,
            kind,
        })?;
        assemble_line(&mut b, toks).map_err(|kind| AsmError {
            line: line_no,
            kind,
        })?;
    }
    b.finish().map_err(|e| AsmError {
        line: last_line,
        kind: e.into(),
    })
}

fn assemble_line(b: &mut ProgramBuilder, toks: Vec<Operand>) -> Result<(), AsmErrorKind> {
    let mut toks = toks.into_iter();
    let Some(head) = toks.next() else {
        return Ok(());
    };
    let Operand::Word(word) = head else {
        return Err(AsmErrorKind::UnknownMnemonic(head.describe()));
    };
    let mnemonic = *MNEMONICS
        .get(word.as_str())
        .ok_or_else(|| AsmErrorKind::UnknownMnemonic(word.clone()))?;
    let operand = toks.next();
    if let Some(extra) = toks.next() {
        return Err(AsmErrorKind::TrailingInput(extra.describe()));
    }

    match mnemonic {
        Mnemonic::Nop => no_operand(b, operand, Op::Nop)?,
        Mnemonic::Undefined => no_operand(b, operand, Op::PushUndefined)?,
        Mnemonic::Add => no_operand(b, operand, Op::Add)?,
        Mnemonic::Pop => no_operand(b, operand, Op::Pop)?,
        Mnemonic::Print => no_operand(b, operand, Op::Print)?,
        Mnemonic::Throw => no_operand(b, operand, Op::Throw)?,
        Mnemonic::Return => no_operand(b, operand, Op::Return)?,
        Mnemonic::Exit => no_operand(b, operand, Op::Exit)?,
        Mnemonic::Push => match operand {
            Some(Operand::Int(i)) => {
                b.emit(Op::PushInt(i));
            }
            Some(Operand::Str(s)) => {
                b.push_str(&s)?;
            }
            Some(other) => return Err(AsmErrorKind::BadOperand(other.describe())),
            None => return Err(AsmErrorKind::MissingOperand("push")),
        },
        Mnemonic::New => {
            b.new_object(&word_operand("new", operand)?)?;
        }
        Mnemonic::Load => {
            b.load(&word_operand("load", operand)?)?;
        }
        Mnemonic::Store => {
            b.store(&word_operand("store", operand)?)?;
        }
        Mnemonic::Var => {
            b.var(&word_operand("var", operand)?)?;
        }
        Mnemonic::Jump => match operand {
            Some(Operand::Int(d)) if d >= 0 => {
                b.jump(d as usize)?;
            }
            Some(other) => return Err(AsmErrorKind::BadOperand(other.describe())),
            None => return Err(AsmErrorKind::MissingOperand("jump")),
        },
        Mnemonic::Break => {
            let label = optional_word(operand)?;
            b.brk(label.as_deref())?;
        }
        Mnemonic::Continue => {
            let label = optional_word(operand)?;
            b.cont(label.as_deref())?;
        }
        Mnemonic::Try => {
            if let Some(extra) = operand {
                return Err(AsmErrorKind::TrailingInput(extra.describe()));
            }
            b.begin_try();
        }
        Mnemonic::Catch => {
            b.begin_catch(&word_operand("catch", operand)?)?;
        }
        Mnemonic::Finally => {
            if let Some(extra) = operand {
                return Err(AsmErrorKind::TrailingInput(extra.describe()));
            }
            b.begin_finally()?;
        }
        Mnemonic::End => {
            if let Some(extra) = operand {
                return Err(AsmErrorKind::TrailingInput(extra.describe()));
            }
            b.end_try()?;
        }
    }
    Ok(())
}

fn no_operand(b: &mut ProgramBuilder, operand: Option<Operand>, op: Op) -> Result<(), AsmErrorKind> {
    if let Some(extra) = operand {
        return Err(AsmErrorKind::TrailingInput(extra.describe()));
    }
    b.emit(op);
    Ok(())
}

fn word_operand(mnemonic: &'static str, operand: Option<Operand>) -> Result<String, AsmErrorKind> {
    match operand {
        Some(Operand::Word(w)) => Ok(w),
        Some(other) => Err(AsmErrorKind::BadOperand(other.describe())),
        None => Err(AsmErrorKind::MissingOperand(mnemonic)),
    }
}

fn optional_word(operand: Option<Operand>) -> Result<Option<String>, AsmErrorKind> {
    match operand {
        Some(Operand::Word(w)) => Ok(Some(w)),
        Some(other) => Err(AsmErrorKind::BadOperand(other.describe())),
        None => Ok(None),
    }
}
