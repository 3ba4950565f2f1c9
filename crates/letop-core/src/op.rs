//! Compound-assignment operators.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseOperatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+=`
    Add,
    /// `-=`
    Subtract,
    /// `.=` (also spelled `..=`)
    Concat,
}

impl Operator {
    pub const ALL: [Operator; 3] = [Operator::Add, Operator::Subtract, Operator::Concat];

    /// The binary operator the assignment is built on.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Concat => ".",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ParseOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+=" | "+" => Ok(Operator::Add),
            "-=" | "-" => Ok(Operator::Subtract),
            ".=" | "." | "..=" | ".." => Ok(Operator::Concat),
            other => Err(ParseOperatorError(other.to_string())),
        }
    }
}
