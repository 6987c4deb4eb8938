use std::path::PathBuf;

use bigdecimal::BigDecimal;
use clap::{Args, Parser, Subcommand};
use decimex::{evaluate_report, parse_binding};
use decimex_eval::{extract_variables, Bindings, Evaluator, EvaluatorConfig, RoundingMode};
use log::{debug, LevelFilter};

#[derive(Debug, Parser)]
#[command(
    name = "decimex",
    version,
    about = "Evaluate arithmetic expressions to arbitrary-precision decimals",
    long_about = "decimex evaluates arithmetic expressions with variables to arbitrary-precision\n\
        decimal values. Operators are applied in the fixed order ^ * / + -, left to\n\
        right within each operator.\n\n\
        EXAMPLES:\n\
        \n  decimex eval '10/3' --scale 2                        Prints 3.33\n\
        \n  decimex eval 'a^2*((c/10)+b*c+a)' --var a=0.014 --var b=2 --var c=13.73\n\
        \n  decimex check '(100/10'                              Reports the mismatch\n\
        \n  decimex vars 'rate*(1+tax)'                          Lists rate and tax"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate an expression and print the result
    Eval(EvalArgs),

    /// Run the structural checks without evaluating
    Check(CheckArgs),

    /// List the variables an expression refers to
    Vars {
        #[arg(value_name = "EXPR")]
        expression: String,
    },
}

#[derive(Debug, Args, Clone)]
struct EvalArgs {
    #[arg(value_name = "EXPR")]
    expression: String,

    /// Bind a variable, e.g. --var rate=0.014
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
    vars: Vec<(String, BigDecimal)>,

    /// Fractional digits kept by divisions (overrides the config file)
    #[arg(long, value_name = "N")]
    scale: Option<u32>,

    /// Rounding mode for divisions, e.g. half_up or half_even
    #[arg(long, value_name = "MODE")]
    rounding: Option<RoundingMode>,

    /// TOML file with scale, rounding and max_depth
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print a JSON object instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args, Clone)]
struct CheckArgs {
    #[arg(value_name = "EXPR")]
    expression: String,

    /// Bind a variable, e.g. --var rate=0.014
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
    vars: Vec<(String, BigDecimal)>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG still wins over -v
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .try_init();
}

fn load_config(args: &EvalArgs) -> Result<EvaluatorConfig, String> {
    let mut config = match &args.config {
        Some(path) => EvaluatorConfig::load(path).map_err(|e| e.to_string())?,
        None => EvaluatorConfig::default(),
    };
    if let Some(scale) = args.scale {
        config.scale = scale;
    }
    if let Some(rounding) = args.rounding {
        config.rounding = rounding;
    }
    Ok(config)
}

fn run_eval(args: &EvalArgs) -> i32 {
    let config = match load_config(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    debug!("evaluating with {config:?}");

    let bindings: Bindings = args.vars.iter().cloned().collect();
    let report = evaluate_report(&Evaluator::from_config(config), &args.expression, &bindings);
    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize JSON: {e}");
                return 2;
            }
        }
    } else {
        match (&report.result, &report.error) {
            (Some(result), _) => println!("{result}"),
            (None, Some(error)) => eprintln!("error: {error}"),
            (None, None) => {}
        }
    }
    if report.is_ok() {
        0
    } else {
        1
    }
}

fn run_check(args: &CheckArgs) -> i32 {
    let bindings: Bindings = args.vars.iter().cloned().collect();
    let parsed = Evaluator::new().parse(args.expression.as_str(), bindings);
    match parsed.validate() {
        Ok(()) => {
            println!("valid");
            0
        }
        Err(err) => {
            println!("invalid: {}", err.cause());
            1
        }
    }
}

fn run_vars(expression: &str) -> i32 {
    for name in extract_variables(expression) {
        println!("{name}");
    }
    0
}

fn run_cli() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { 2 } else { 0 };
        }
    };
    init_logging(cli.verbose);

    match cli.command {
        Command::Eval(args) => run_eval(&args),
        Command::Check(args) => run_check(&args),
        Command::Vars { expression } => run_vars(&expression),
    }
}

fn main() {
    std::process::exit(run_cli());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::str::FromStr;

    fn eval_args(argv: &[&str]) -> EvalArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Eval(args) => args,
            other => panic!("expected Eval command, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_verbose_flag() {
        let cli = Cli::try_parse_from(["decimex", "-vvv", "vars", "a+b"]).unwrap();
        assert_eq!(cli.verbose, 3, "verbose count should be 3 for -vvv");
    }

    #[test]
    fn cli_parses_eval_with_bindings() {
        let args = eval_args(&[
            "decimex", "eval", "a*b", "--var", "a=1.5", "--var", "b=2", "--scale", "3",
            "--rounding", "half-even", "--json",
        ]);
        assert_eq!(args.expression, "a*b");
        assert_eq!(
            args.vars,
            vec![
                ("a".to_string(), BigDecimal::from_str("1.5").unwrap()),
                ("b".to_string(), BigDecimal::from(2)),
            ]
        );
        assert_eq!(args.scale, Some(3));
        assert_eq!(args.rounding, Some(RoundingMode::HalfEven));
        assert!(args.json);
    }

    #[test]
    fn cli_rejects_malformed_binding() {
        assert!(Cli::try_parse_from(["decimex", "eval", "a", "--var", "a"]).is_err());
        assert!(Cli::try_parse_from(["decimex", "eval", "1", "--rounding", "nearest"]).is_err());
    }

    #[test]
    fn flags_override_the_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "scale = 8\nrounding = \"floor\"\nmax_depth = 4").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = eval_args(&["decimex", "eval", "1", "--config", &path, "--scale", "2"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.scale, 2);
        assert_eq!(config.rounding, RoundingMode::Floor);
        assert_eq!(config.max_depth, 4);
    }

    #[test]
    fn missing_config_file_is_a_usage_error() {
        let args = eval_args(&["decimex", "eval", "1", "--config", "/nonexistent/decimex.toml"]);
        assert!(load_config(&args).is_err());
        assert_eq!(run_eval(&args), 2);
    }

    #[test]
    fn exit_codes_follow_the_outcome() {
        assert_eq!(run_eval(&eval_args(&["decimex", "eval", "10/3"])), 0);
        assert_eq!(run_eval(&eval_args(&["decimex", "eval", "()"])), 1);
        let check = CheckArgs {
            expression: "(1+2".to_string(),
            vars: Vec::new(),
        };
        assert_eq!(run_check(&check), 1);
        assert_eq!(run_vars("a+b"), 0);
    }
}
