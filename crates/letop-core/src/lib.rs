//! letop core: the value model of a dynamically typed script interpreter and
//! its compound-assignment evaluator.
//!
//! The crate provides the runtime [`Value`] type, the implicit conversions in
//! [`coerce`], and [`apply`], which evaluates `target += operand`,
//! `target -= operand` and `target .= operand` against the full matrix of
//! value kinds. Lists and dicts are shared handles, so extending a list is
//! visible through every alias of it.

pub mod value;
pub mod coerce;
pub mod op;
pub mod error;
pub mod assign;

pub use assign::apply;
pub use error::{AssignError, ParseOperatorError, Result};
pub use op::Operator;
pub use value::{Dict, FuncRef, List, Special, Value};
