use std::io::Write;

use crate::args::CliArgs;
use crate::commands::load_program;

pub(crate) fn run(args: &CliArgs) {
    let program = load_program(args);
    let mut out = std::io::stdout().lock();
    if let Err(e) = write!(out, "{program}") {
        if e.kind() == std::io::ErrorKind::BrokenPipe {
            return;
        }
        eprintln!("stdout error: {e}");
        std::process::exit(2);
    }
}
