use std::io::IsTerminal;
use std::path::PathBuf;

use clap::ValueEnum;
use letop_core::{AssignError, Operator, ParseOperatorError, Value};
use owo_colors::OwoColorize;
use thiserror::Error;

use crate::literal::LiteralError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("invalid {role} literal '{text}': {source}")]
    Literal {
        role: &'static str,
        text: String,
        source: LiteralError,
    },
    #[error(transparent)]
    Operator(#[from] ParseOperatorError),
    #[error(transparent)]
    Assign(#[from] AssignError),
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("{failed} of {total} batch lines failed")]
    Batch { failed: usize, total: usize },
}

impl CliError {
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Literal { .. } | CliError::Operator(_) => "Parse error",
            CliError::Assign(_) => "Assignment error",
            CliError::Io { .. } => "IO error",
            CliError::Batch { .. } => "Batch error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// Decides once whether stderr diagnostics get ANSI styling.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(choice: ColorChoice) -> Self {
        let enabled = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
            }
        };
        Self { enabled }
    }

    pub fn kind(&self, s: &str) -> String {
        if self.enabled { s.red().bold().to_string() } else { s.to_string() }
    }

    pub fn message(&self, s: &str) -> String {
        if self.enabled { s.red().to_string() } else { s.to_string() }
    }

    pub fn help(&self, s: &str) -> String {
        if self.enabled { s.yellow().to_string() } else { s.to_string() }
    }

    pub fn dim(&self, s: &str) -> String {
        if self.enabled { s.bright_black().to_string() } else { s.to_string() }
    }
}

pub fn render_error(palette: Palette, err: &CliError) {
    eprintln!("{}: {}", palette.kind(err.kind()), palette.message(&err.to_string()));
    if let CliError::Operator(_) = err {
        eprintln!("{}", palette.help("Help: compound operators are +=, -=, .= and ..="));
    }
}

/// Explains why `target op= operand` was refused.
pub fn assignment_hint(target: &Value, operand: &Value, op: Operator) -> &'static str {
    match (target, operand, op) {
        (_, Value::Func(_) | Value::Dict(_), _) => {
            "Funcref and Dict values can never appear on the right of a compound assignment."
        }
        (Value::Dict(_), _, _) => "A Dict cannot be updated with +=, -= or .=; assign its keys instead.",
        (Value::Func(_), _, _) => "A Funcref cannot be updated with a compound assignment.",
        (Value::Special(_), _, _) => "v:true, v:false and v:null cannot be updated with a compound assignment.",
        (Value::Unknown, _, _) => "The variable has no value yet; use a plain assignment first.",
        (Value::List(_), _, _) => "Lists only support += with another list: [1, 2] += [3].",
        (Value::Float(_), _, Operator::Concat) | (_, Value::Float(_), Operator::Concat) => {
            "Floats cannot be concatenated; convert with string() first."
        }
        (Value::Float(_), _, _) => "A Float can only absorb a Number, Float or String.",
        (_, Value::List(_), _) => "Numbers and strings cannot be combined with a List.",
        _ => "The operand has no value yet.",
    }
}

pub fn render_assign_error(palette: Palette, err: &AssignError, target: &Value, operand: &Value) {
    eprintln!("{}: {}", palette.kind("Assignment error"), palette.message(&err.to_string()));
    eprintln!(
        "  {} {} {}",
        palette.dim(target.type_name()),
        err.operator(),
        palette.dim(operand.type_name())
    );
    eprintln!("{}", palette.help(&format!("Help: {}", assignment_hint(target, operand, err.operator()))));
}
