//! Batch evaluation of JSON-lines input.
//!
//! Each non-empty line that does not start with `#` is an object
//! `{"target": .., "op": "+=", "operand": ..}`. Lines are independent: a
//! failing line is reported and the run continues.

use letop_core::{apply, Operator, Value};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use tracing::debug;

use crate::literal::{from_json, to_json};

#[derive(Debug, Deserialize)]
struct Case {
    target: Json,
    op: String,
    operand: Json,
}

#[derive(Debug, Serialize)]
pub struct Outcome {
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Json>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub shown: String,
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

pub fn run(src: &str) -> Vec<Outcome> {
    let mut out = Vec::new();
    for (idx, raw) in src.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let outcome = match eval_line(line) {
            Ok(v) => Outcome { line: idx + 1, result: Some(to_json(&v)), error: None, shown: v.to_string() },
            Err(msg) => Outcome { line: idx + 1, result: None, error: Some(msg), shown: String::new() },
        };
        debug!(line = outcome.line, ok = outcome.is_ok(), "batch line evaluated");
        out.push(outcome);
    }
    out
}

fn eval_line(line: &str) -> Result<Value, String> {
    let case: Case = serde_json::from_str(line).map_err(|e| format!("invalid case: {}", e))?;
    let op: Operator = case.op.parse().map_err(|e| format!("{}", e))?;
    let mut target = from_json(&case.target).map_err(|e| format!("invalid target: {}", e))?;
    let operand = from_json(&case.operand).map_err(|e| format!("invalid operand: {}", e))?;
    apply(&mut target, &operand, op).map_err(|e| e.to_string())?;
    Ok(target)
}
