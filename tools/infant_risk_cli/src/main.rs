use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use infant_model::{ArtifactLoader, ModelHandle};
use infant_risk::{Evaluation, EvaluatorConfig, FieldKind, InputRecord, RiskEvaluator};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputMode {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "infant-risk",
    version,
    about = "Infant mortality (0-11 months) risk evaluation from prenatal and household factors",
    long_about = "infant-risk scores a survey record with a trained classifier and prints\n\
        the risk level, the estimated probability and care recommendations.\n\n\
        EXAMPLES:\n\
        \n  infant-risk evaluate --model model.json --record answers.json\n\
        \n  infant-risk evaluate --model model.json --format json < answers.json\n\
        \n  infant-risk fields                     List the survey fields"
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
    /// Evaluate one survey record
    Evaluate(EvaluateArgs),
    /// Describe the survey fields and their allowed values
    Fields(FieldsArgs),
}

#[derive(Debug, Args, Clone)]
struct EvaluateArgs {
    /// Logistic model artifact (JSON)
    #[arg(long, value_name = "FILE")]
    model: PathBuf,

    /// Survey record as a JSON object (reads stdin if not provided)
    #[arg(long, value_name = "FILE")]
    record: Option<PathBuf>,

    /// Evaluator configuration (JSON): thresholds, profile, reload policy
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputMode::Text)]
    format: OutputMode,

    /// Also print the encoded row sent to the model
    #[arg(long)]
    show_row: bool,
}

#[derive(Debug, Args, Clone)]
struct FieldsArgs {
    #[arg(long, value_enum, default_value_t = OutputMode::Text)]
    format: OutputMode,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read_record_input(input: &Option<PathBuf>) -> Result<String, String> {
    if let Some(path) = input {
        fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {e}", path.display()))
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read from stdin: {e}"))?;
        Ok(buf)
    }
}

fn render_text(eval: &Evaluation, show_row: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Risk Level: {} ({})\n",
        eval.prediction.tier.label(),
        eval.prediction.tier.color()
    ));
    out.push_str(&format!(
        "Estimated probability of infant mortality: {}\n",
        eval.prediction.percentage()
    ));
    if !eval.recommendations.is_empty() {
        out.push_str("\nRecommendations:\n");
        for m in eval.recommendations.iter() {
            out.push_str(&format!("  - {m}\n"));
        }
    }
    if show_row {
        out.push_str(&format!("\nInputs sent to model '{}':\n", eval.model));
        for (column, value) in eval.row.columns() {
            out.push_str(&format!("  {column} = {value} [{}]\n", value.kind()));
        }
    }
    out
}

fn render_fields_text() -> String {
    let mut out = String::new();
    for spec in InputRecord::FIELDS {
        let detail = match spec.kind {
            FieldKind::Boolean { default } => format!("true/false, default {default}"),
            FieldKind::Integer {
                min,
                max,
                default,
                step,
            } => format!("integer {min}..={max}, default {default}, step {step}"),
            FieldKind::Ordinal { options, default } => {
                let names: Vec<&str> = options.iter().map(|w| w.as_str()).collect();
                format!("one of {}, default {default}", names.join(", "))
            }
        };
        out.push_str(&format!("{:<18} {}\n{:<18} {detail}\n", spec.name, spec.prompt, ""));
    }
    out
}

fn run_evaluate(args: &EvaluateArgs) -> Result<String, String> {
    let config = match &args.config {
        Some(path) => EvaluatorConfig::from_json_file(path).map_err(|e| e.to_string())?,
        None => EvaluatorConfig::default(),
    };
    let handle = ModelHandle::open(ArtifactLoader::new(&args.model)).map_err(|e| e.to_string())?;
    let mut evaluator = RiskEvaluator::new(handle, config).map_err(|e| e.to_string())?;

    let raw = read_record_input(&args.record)?;
    let value: JsonValue =
        serde_json::from_str(&raw).map_err(|e| format!("record is not valid JSON: {e}"))?;
    let eval = evaluator.evaluate_json(&value).map_err(|e| e.to_string())?;

    match args.format {
        OutputMode::Text => Ok(render_text(&eval, args.show_row)),
        OutputMode::Json => {
            let mut out = eval.to_json();
            if !args.show_row {
                if let Some(obj) = out.as_object_mut() {
                    obj.remove("model_input");
                }
            }
            serde_json::to_string_pretty(&out)
                .map(|s| s + "\n")
                .map_err(|e| format!("failed to serialize JSON: {e}"))
        }
    }
}

fn run_fields(args: &FieldsArgs) -> Result<String, String> {
    match args.format {
        OutputMode::Text => Ok(render_fields_text()),
        OutputMode::Json => serde_json::to_string_pretty(&InputRecord::FIELDS)
            .map(|s| s + "\n")
            .map_err(|e| format!("failed to serialize JSON: {e}")),
    }
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Command::Evaluate(args) => run_evaluate(args),
        Command::Fields(args) => run_fields(args),
    };
    match result {
        Ok(out) => {
            print!("{out}");
            0
        }
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    }
}

fn main() {
    std::process::exit(run_cli());
}
