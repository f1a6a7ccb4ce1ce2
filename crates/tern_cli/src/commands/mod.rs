use tern_ir::Program;

use crate::args::CliArgs;

pub(crate) mod check;
pub(crate) mod dis;
pub(crate) mod run;

/// Reads and assembles the single `<file>` argument. Exits with status 2 on
/// any usage or load error.
pub(crate) fn load_program(args: &CliArgs) -> Program {
    if args.positional.len() != 1 {
        eprintln!("Missing <file>");
        std::process::exit(2);
    }
    let path = args.positional[0].as_str();
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Read failed: {path}: {e}");
            std::process::exit(2);
        }
    };
    match tern_asm::assemble(&text) {
        Ok(p) => {
            tracing::debug!(target: "tern::cli", path, ops = p.ops.len(), "assembled");
            p
        }
        Err(e) => {
            eprintln!("{path}:{e}");
            std::process::exit(2);
        }
    }
}

pub(crate) fn print_json(obj: serde_json::Value) {
    println!("{obj}");
}
