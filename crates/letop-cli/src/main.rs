mod batch;
mod common;
mod literal;
mod matrix;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use letop_core::{apply, Operator, Value};
use tracing_subscriber::EnvFilter;

use common::{render_assign_error, render_error, CliError, ColorChoice, Palette};
use literal::{parse_literal, to_json};

#[derive(Parser, Debug)]
#[command(name = "letop", version, about = "Evaluate compound assignments (+=, -=, .=) on script values")]
struct Cli {
    /// Output format for results
    #[arg(long, value_enum, env = "LETOP_FORMAT", default_value = "text", global = true)]
    format: Format,

    /// When to color diagnostics
    #[arg(long, value_enum, env = "LETOP_COLOR", default_value = "auto", global = true)]
    color: ColorChoice,

    /// Log evaluator decisions to stderr (-v debug, -vv trace); LETOP_LOG otherwise
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply TARGET OP OPERAND once, values given as JSON literals
    Apply {
        #[arg(allow_hyphen_values = true)]
        target: String,
        #[arg(allow_hyphen_values = true)]
        op: String,
        #[arg(allow_hyphen_values = true)]
        operand: String,
    },
    /// Print which target/operand kinds each operator accepts
    Matrix,
    /// Apply every JSON line of FILE independently
    Batch { file: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("LETOP_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let palette = Palette::new(cli.color);

    let outcome = match cli.command {
        Command::Apply { target, op, operand } => run_apply(cli.format, palette, &target, &op, &operand),
        Command::Matrix => {
            run_matrix(cli.format);
            Ok(())
        }
        Command::Batch { file } => run_batch(cli.format, &file),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        // Already reported with its operands.
        Err(CliError::Assign(_)) => ExitCode::FAILURE,
        Err(e) => {
            render_error(palette, &e);
            ExitCode::FAILURE
        }
    }
}

fn literal(role: &'static str, text: &str) -> Result<Value, CliError> {
    parse_literal(text).map_err(|source| CliError::Literal { role, text: text.to_string(), source })
}

fn run_apply(format: Format, palette: Palette, target: &str, op: &str, operand: &str) -> Result<(), CliError> {
    let op: Operator = op.parse()?;
    let mut target = literal("target", target)?;
    let operand = literal("operand", operand)?;

    if let Err(e) = apply(&mut target, &operand, op) {
        render_assign_error(palette, &e, &target, &operand);
        return Err(e.into());
    }

    match format {
        Format::Text => println!("{}", target),
        Format::Json => println!(
            "{}",
            serde_json::json!({ "type": target.type_name(), "value": to_json(&target) })
        ),
    }
    Ok(())
}

fn run_matrix(format: Format) {
    let cells = matrix::cells();
    match format {
        Format::Text => print!("{}", matrix::render_text(&cells)),
        Format::Json => match serde_json::to_string_pretty(&cells) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{}", e),
        },
    }
}

fn run_batch(format: Format, path: &Path) -> Result<(), CliError> {
    let src = fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_path_buf(), source })?;
    let outcomes = batch::run(&src);

    for o in &outcomes {
        match format {
            Format::Text => match &o.error {
                None => println!("{}: {}", o.line, o.shown),
                Some(msg) => println!("{}: error: {}", o.line, msg),
            },
            Format::Json => match serde_json::to_string(o) {
                Ok(s) => println!("{}", s),
                Err(e) => eprintln!("{}", e),
            },
        }
    }

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    if failed > 0 {
        return Err(CliError::Batch { failed, total: outcomes.len() });
    }
    Ok(())
}
