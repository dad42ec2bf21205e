use std::fmt;

use thiserror::Error;

/// Which kind of operator ran out of operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Unary => write!(f, "Unary"),
            Arity::Binary => write!(f, "Binary"),
        }
    }
}

/// Why an evaluation produced no usable number.
///
/// The `Display` strings are what a front end shows in place of the result,
/// so they are kept stable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("{0} is not set.")]
    UnboundVariable(String),

    #[error("{0} operand missing.")]
    MissingOperand(Arity),

    #[error("Insert a Number")]
    NotANumber,

    #[error("Infinite value")]
    InfiniteResult,

    #[error("Expression too complex")]
    TooComplex,

    #[error("Error")]
    Generic,
}

/// Result of evaluating the whole stack.
pub type CalcResult = Result<f64, EvalError>;
