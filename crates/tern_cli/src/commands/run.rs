use std::io::Write;

use serde_json::json;
use tern_runtime::{Completion, Value, Vm};

use crate::args::CliArgs;
use crate::commands::{load_program, print_json};

pub(crate) fn run(args: &CliArgs) {
    let program = load_program(args);
    let mut vm = Vm::with_config(args.config);
    let result = vm.run(&program);
    let output = vm.take_output();

    let completion = match result {
        Ok(c) => c,
        Err(fault) => {
            let _ = write!(std::io::stdout().lock(), "{output}");
            eprintln!("InternalFault: {fault}");
            std::process::exit(1);
        }
    };

    if args.json_out {
        print_json(completion_json(&completion, output));
    } else {
        let mut stdout = std::io::stdout().lock();
        let _ = write!(stdout, "{output}");
        let _ = writeln!(stdout, "completion: {completion}");
    }

    if let Completion::Throw(v) = &completion {
        eprintln!("Uncaught: {v}");
        std::process::exit(1);
    }
}

fn completion_json(c: &Completion, output: String) -> serde_json::Value {
    json!({
        "kind": c.kind().as_str(),
        "value": c.value().map(value_json),
        "label": c.label(),
        "output": output,
    })
}

fn value_json(v: &Value) -> serde_json::Value {
    match v {
        Value::Undefined => serde_json::Value::Null,
        Value::Int(i) => json!(i),
        Value::Str(s) => serde_json::Value::String(s.to_string()),
        Value::Object(_) => json!(v.to_string()),
    }
}
