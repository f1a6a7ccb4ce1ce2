use phf::phf_map;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mnemonic {
    Nop,
    Push,
    Undefined,
    New,
    Load,
    Store,
    Var,
    Add,
    Pop,
    Print,
    Jump,
    Throw,
    Return,
    Break,
    Continue,
    Exit,
    Try,
    Catch,
    Finally,
    End,
}

pub(crate) static MNEMONICS: phf::Map<&'static str, Mnemonic> = phf_map! {
    "nop" => Mnemonic::Nop,
    "push" => Mnemonic::Push,
    "undefined" => Mnemonic::Undefined,
    "new" => Mnemonic::New,
    "load" => Mnemonic::Load,
    "store" => Mnemonic::Store,
    "var" => Mnemonic::Var,
    "add" => Mnemonic::Add,
    "pop" => Mnemonic::Pop,
    "print" => Mnemonic::Print,
    "jump" => Mnemonic::Jump,
    "throw" => Mnemonic::Throw,
    "return" => Mnemonic::Return,
    "break" => Mnemonic::Break,
    "continue" => Mnemonic::Continue,
    "exit" => Mnemonic::Exit,
    "try" => Mnemonic::Try,
    "catch" => Mnemonic::Catch,
    "finally" => Mnemonic::Finally,
    "end" => Mnemonic::End,
};
