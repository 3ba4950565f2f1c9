//! Compound assignment: `target += operand`, `-=` and `.=`.
//!
//! Two mutation strategies are used and kept apart:
//!
//! - **content mutation**: a float target is updated through its existing
//!   storage and a list target is extended through its shared handle, so the
//!   variant tag never changes;
//! - **replacement**: number and string targets get a freshly computed value
//!   installed with `*target = new`, which drops the previous content.
//!
//! Every check that can reject runs before either strategy touches the
//! target, so a failed call leaves the target exactly as it was.

use tracing::{debug, trace};

use crate::coerce::{is_numeric_operand, to_float, to_number, to_text};
use crate::error::{incompatible, Result};
use crate::op::Operator;
use crate::value::{List, Value};

/// Applies `target <op>= operand`.
///
/// On success the target holds the result. On failure it is untouched and
/// [`crate::AssignError::IncompatibleTypes`] names the operator.
///
/// ```rust
/// use letop_core::{apply, Operator, Value};
///
/// let mut total = Value::Number(10);
/// apply(&mut total, &Value::Float(2.5), Operator::Add).unwrap();
/// assert_eq!(total, Value::Float(12.5));
/// ```
pub fn apply(target: &mut Value, operand: &Value, op: Operator) -> Result<()> {
    let outcome = dispatch(target, operand, op);
    if outcome.is_err() {
        trace!(
            target_type = target.type_name(),
            operand_type = operand.type_name(),
            operator = %op,
            "compound assignment rejected"
        );
    }
    outcome
}

fn dispatch(target: &mut Value, operand: &Value, op: Operator) -> Result<()> {
    // Funcrefs and dicts are never valid on the right.
    if matches!(operand, Value::Func(_) | Value::Dict(_)) {
        return incompatible(op);
    }

    match target {
        Value::Dict(_) | Value::Func(_) | Value::Special(_) | Value::Unknown => incompatible(op),
        Value::List(list) => extend_list(list.as_ref(), operand, op),
        Value::Float(f) => match (Arith::of(op), is_numeric_operand(operand)) {
            (Some(arith), true) => {
                *f = arith.float(*f, to_float(operand));
                Ok(())
            }
            _ => incompatible(op),
        },
        Value::Number(_) | Value::String(_) => {
            let new = match Arith::of(op) {
                Some(arith) => numeric_result(target, operand, arith, op)?,
                None => concat_result(target, operand, op)?,
            };
            *target = new;
            Ok(())
        }
    }
}

fn extend_list(list: Option<&List>, operand: &Value, op: Operator) -> Result<()> {
    match (op, operand) {
        (Operator::Add, Value::List(other)) => {
            if let (Some(list), Some(other)) = (list, other) {
                debug!(len = list.len(), added = other.len(), "extending list in place");
                list.extend_from(other);
            }
            Ok(())
        }
        _ => incompatible(op),
    }
}

/// `target ± operand` for a number or string target.
fn numeric_result(target: &Value, operand: &Value, arith: Arith, op: Operator) -> Result<Value> {
    let n = to_number(target);
    match operand {
        Value::Float(f) => Ok(Value::Float(arith.float(n as f64, *f))),
        Value::Number(_) | Value::String(_) | Value::Special(_) => {
            Ok(Value::Number(arith.int(n, to_number(operand))))
        }
        Value::List(_) | Value::Dict(_) | Value::Func(_) | Value::Unknown => incompatible(op),
    }
}

/// `target . operand` for a number or string target.
fn concat_result(target: &Value, operand: &Value, op: Operator) -> Result<Value> {
    match operand {
        Value::Number(_) | Value::String(_) | Value::Special(_) => {
            let mut s = to_text(target).into_owned();
            s.push_str(&to_text(operand));
            Ok(Value::String(s))
        }
        Value::Float(_) | Value::List(_) | Value::Dict(_) | Value::Func(_) | Value::Unknown => {
            incompatible(op)
        }
    }
}

/// The arithmetic half of the operator set.
#[derive(Debug, Clone, Copy)]
enum Arith {
    Add,
    Sub,
}

impl Arith {
    fn of(op: Operator) -> Option<Arith> {
        match op {
            Operator::Add => Some(Arith::Add),
            Operator::Subtract => Some(Arith::Sub),
            Operator::Concat => None,
        }
    }

    // Integer overflow wraps.
    fn int(self, a: i64, b: i64) -> i64 {
        match self {
            Arith::Add => a.wrapping_add(b),
            Arith::Sub => a.wrapping_sub(b),
        }
    }

    fn float(self, a: f64, b: f64) -> f64 {
        match self {
            Arith::Add => a + b,
            Arith::Sub => a - b,
        }
    }
}
