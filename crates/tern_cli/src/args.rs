use tern_runtime::{MAX_DEPTH_LIMIT, VmConfig};

pub(crate) struct CliArgs {
    pub cmd: String,
    pub json_out: bool,
    pub verbose: bool,
    pub config: VmConfig,
    pub positional: Vec<String>,
}

pub(crate) fn usage() -> &'static str {
    "Usage: tern <run|dis|check> [json] [verbose] [depth=N] <file>"
}

pub(crate) fn parse_args() -> Result<CliArgs, String> {
    parse_from(std::env::args().skip(1).collect())
}

fn parse_from(mut argv: Vec<String>) -> Result<CliArgs, String> {
    if argv.is_empty() {
        return Err(usage().to_string());
    }
    let cmd = argv.remove(0);

    let mut json_out = false;
    let mut verbose = false;
    let mut config = VmConfig::default();
    let mut positional: Vec<String> = Vec::new();

    for a in argv {
        if a.starts_with("--") {
            return Err(format!("Unknown option: {a}"));
        }
        if a == "json" {
            json_out = true;
        } else if a == "verbose" {
            verbose = true;
        } else if let Some(n) = a.strip_prefix("depth=") {
            config.max_depth = parse_depth(n)?;
        } else {
            positional.push(a);
        }
    }

    Ok(CliArgs {
        cmd,
        json_out,
        verbose,
        config,
        positional,
    })
}

fn parse_depth(n: &str) -> Result<usize, String> {
    match n.parse::<usize>() {
        Ok(d) if (1..=MAX_DEPTH_LIMIT).contains(&d) => Ok(d),
        Ok(_) => Err(format!("Invalid depth: {n} (expected 1..={MAX_DEPTH_LIMIT})")),
        Err(_) => Err(format!("Invalid depth: {n}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flags_and_positionals() {
        let args = parse_from(argv(&["run", "json", "depth=8", "a.tasm"])).unwrap();
        assert_eq!(args.cmd, "run");
        assert!(args.json_out);
        assert!(!args.verbose);
        assert_eq!(args.config.max_depth, 8);
        assert_eq!(args.positional, vec!["a.tasm".to_string()]);
    }

    #[test]
    fn rejects_dashed_options_and_bad_depth() {
        assert!(parse_from(argv(&["run", "--json"])).is_err());
        assert_eq!(
            parse_from(argv(&["run", "depth=x"])).err().as_deref(),
            Some("Invalid depth: x")
        );
        assert_eq!(parse_from(Vec::new()).err().as_deref(), Some(usage()));
    }

    #[test]
    fn depth_is_bounded_by_the_runtime_ceiling() {
        let max = format!("depth={MAX_DEPTH_LIMIT}");
        let args = parse_from(argv(&["run", &max, "a.tasm"])).unwrap();
        assert_eq!(args.config.max_depth, MAX_DEPTH_LIMIT);

        let over = format!("depth={}", MAX_DEPTH_LIMIT + 1);
        let err = parse_from(argv(&["run", &over, "a.tasm"])).err().unwrap();
        assert!(err.starts_with("Invalid depth:"), "{err}");
        assert!(parse_from(argv(&["run", "depth=0", "a.tasm"])).is_err());
        assert!(parse_from(argv(&["run", &format!("depth={}", usize::MAX), "a.tasm"])).is_err());
    }
}
