//! The compatibility matrix, computed by running the evaluator itself.

use letop_core::{apply, Operator, Special, Value};
use serde::Serialize;

/// One representative per kind; rebuilt for every cell so list extension in
/// one cell cannot leak into the next.
fn sample(kind: &str) -> Value {
    match kind {
        "number" => Value::Number(7),
        "float" => Value::Float(1.5),
        "string" => Value::str("12"),
        "list" => Value::list(vec![Value::Number(1)]),
        "dict" => Value::dict([("a", Value::Number(1))]),
        "func" => Value::func("len"),
        "special" => Value::Special(Special::True),
        _ => Value::Unknown,
    }
}

pub const KINDS: [&str; 8] = ["number", "float", "string", "list", "dict", "func", "special", "unknown"];

#[derive(Debug, Serialize)]
pub struct Cell {
    pub op: String,
    pub target: &'static str,
    pub operand: &'static str,
    /// Kind of the updated target, or `None` when rejected.
    pub result: Option<&'static str>,
}

pub fn cells() -> Vec<Cell> {
    let mut out = Vec::with_capacity(Operator::ALL.len() * KINDS.len() * KINDS.len());
    for op in Operator::ALL {
        for target_kind in KINDS {
            for operand_kind in KINDS {
                let mut target = sample(target_kind);
                let result = apply(&mut target, &sample(operand_kind), op)
                    .ok()
                    .map(|()| target.type_name());
                out.push(Cell { op: op.to_string(), target: target_kind, operand: operand_kind, result });
            }
        }
    }
    out
}

/// Renders one table per operator; rows are targets, columns operands.
pub fn render_text(cells: &[Cell]) -> String {
    let width = KINDS.iter().map(|k| k.len()).max().unwrap_or(0) + 2;
    let mut s = String::new();
    for op in Operator::ALL {
        let op = op.to_string();
        s.push_str(&format!("{:<width$}", format!("target {}", op), width = width + 4));
        for k in KINDS {
            s.push_str(&format!("{:<width$}", k, width = width));
        }
        s.push('\n');
        for target in KINDS {
            s.push_str(&format!("{:<width$}", target, width = width + 4));
            for operand in KINDS {
                let cell = cells
                    .iter()
                    .find(|c| c.op == op && c.target == target && c.operand == operand);
                let shown = cell.and_then(|c| c.result).unwrap_or("E734");
                s.push_str(&format!("{:<width$}", shown, width = width));
            }
            s.push('\n');
        }
        s.push('\n');
    }
    s
}
