use serde_json::json;

use crate::args::CliArgs;
use crate::commands::{load_program, print_json};

pub(crate) fn run(args: &CliArgs) {
    let program = load_program(args);
    if args.json_out {
        print_json(json!({
            "ok": true,
            "ops": program.ops.len(),
            "literals": program.literals.len(),
        }));
    } else {
        println!("ok");
    }
}
