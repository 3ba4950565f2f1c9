//! Errors produced by the evaluator.
//!
//! The evaluator has exactly one failure mode: the combination of target
//! type, operand type and operator is not allowed. The error carries the
//! operator so the caller can report which statement failed; wording and
//! localization are left to the caller, with [`std::fmt::Display`] giving the
//! conventional English message.
//!
//! ```rust
//! use letop_core::{apply, AssignError, Operator, Value};
//!
//! let mut target = Value::Float(1.5);
//! let err = apply(&mut target, &Value::Number(2), Operator::Concat).unwrap_err();
//! assert_eq!(err, AssignError::IncompatibleTypes { operator: Operator::Concat });
//! assert_eq!(err.to_string(), "E734: Wrong variable type for .=");
//! ```

use thiserror::Error;

use crate::op::Operator;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignError {
    /// The target/operand/operator triple is not an allowed combination.
    #[error("E734: Wrong variable type for {operator}")]
    IncompatibleTypes { operator: Operator },
}

impl AssignError {
    pub fn operator(&self) -> Operator {
        match self {
            AssignError::IncompatibleTypes { operator } => *operator,
        }
    }
}

/// Result of a compound assignment.
pub type Result<T> = std::result::Result<T, AssignError>;

/// Shorthand for `Err(AssignError::IncompatibleTypes { operator })`.
pub fn incompatible<T>(operator: Operator) -> Result<T> {
    Err(AssignError::IncompatibleTypes { operator })
}

/// An operator spelling that is not one of `+=`, `-=`, `.=` or `..=`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown compound operator '{0}'")]
pub struct ParseOperatorError(pub String);
