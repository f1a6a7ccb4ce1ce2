//! Line tokenizer.

use crate::assembler::AsmErrorKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    Word(String),
    Int(i64),
    Str(String),
}

impl Operand {
    pub fn describe(&self) -> String {
        match self {
            Operand::Word(w) => w.clone(),
            Operand::Int(i) => i.to_string(),
            Operand::Str(s) => format!("{s:?}"),
        }
    }
}

/// Splits one listing line into tokens, dropping a trailing `#` comment.
pub fn tokenize_line(line: &str) -> Result<Vec<Operand>, AsmErrorKind> {
    let mut out = Vec::new();
    let mut chars = line.char_indices().peekable();
    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '#' {
            break;
        }
        if c == '"' {
            chars.next();
            let mut s = String::new();
            let mut closed = false;
            while let Some((_, c)) = chars.next() {
                match c {
                    '"' => {
                        closed = true;
                        break;
                    }
                    '\\' => match chars.next() {
                        Some((_, 'n')) => s.push('\n'),
                        Some((_, 't')) => s.push('\t'),
                        Some((_, other)) => s.push(other),
                        None => break,
                    },
                    _ => s.push(c),
                }
            }
            if !closed {
                return Err(AsmErrorKind::UnterminatedString);
            }
            out.push(Operand::Str(s));
            continue;
        }
        let mut end = line.len();
        while let Some(&(i, c)) = chars.peek() {
            if c.is_whitespace() || c == '#' || c == '"' {
                end = i;
                break;
            }
            chars.next();
        }
        let word = &line[start..end];
        let numeric = word.strip_prefix('+').unwrap_or(word);
        if numeric
            .strip_prefix('-')
            .unwrap_or(numeric)
            .starts_with(|c: char| c.is_ascii_digit())
        {
            let i = numeric
                .parse::<i64>()
                .map_err(|_| AsmErrorKind::BadOperand(word.to_string()))?;
            out.push(Operand::Int(i));
        } else {
            out.push(Operand::Word(word.to_string()));
        }
    }
    Ok(out)
}
