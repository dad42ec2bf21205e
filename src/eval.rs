use std::collections::HashMap;

use crate::error::{Arity, CalcResult, EvalError};
use crate::token::Token;

/// Upper bound on evaluation steps for a single top-level call.
pub const MAX_STEPS: usize = 1 << 16;

/// Upper bound on nesting depth for a single top-level call.
pub const MAX_DEPTH: usize = 1024;

/// Evaluate a postfix stack from its top and classify the result.
///
/// The stack itself is never modified; remainders are tracked as prefix
/// lengths into it.
pub fn evaluate(stack: &[Token], variables: &HashMap<String, f64>) -> CalcResult {
    let mut evaluator = Evaluator::new(stack, variables);
    let (value, _) = evaluator.eval(stack.len())?;

    if value.is_nan() {
        Err(EvalError::NotANumber)
    } else if value.is_infinite() {
        Err(EvalError::InfiniteResult)
    } else {
        Ok(value)
    }
}

struct Evaluator<'a> {
    stack: &'a [Token],
    variables: &'a HashMap<String, f64>,
    steps: usize,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    fn new(stack: &'a [Token], variables: &'a HashMap<String, f64>) -> Self {
        Self {
            stack,
            variables,
            steps: 0,
            depth: 0,
        }
    }

    /// Reduce `stack[..end]` from its last entry.
    ///
    /// Returns the value and the length of the prefix left unconsumed.
    fn eval(&mut self, end: usize) -> Result<(f64, usize), EvalError> {
        self.steps += 1;
        if self.steps > MAX_STEPS || self.depth >= MAX_DEPTH {
            return Err(EvalError::TooComplex);
        }
        if end == 0 {
            return Err(EvalError::Generic);
        }

        let rest = end - 1;
        match &self.stack[rest] {
            Token::Operand(value) => Ok((*value, rest)),
            Token::Constant { value, .. } => Ok((*value, rest)),
            Token::Variable(name) => match self.variables.get(name) {
                Some(value) => Ok((*value, rest)),
                None => Err(EvalError::UnboundVariable(name.clone())),
            },
            Token::Unary { op, .. } => {
                let (operand, remaining) = self
                    .nested(rest)
                    .map_err(|e| missing(e, Arity::Unary))?;
                Ok((op(operand), remaining))
            }
            Token::Binary { op, .. } => {
                let (first, _) = self
                    .nested(rest)
                    .map_err(|e| missing(e, Arity::Binary))?;
                // The second operand is read after discarding exactly one
                // entry below the operator, whatever the first one consumed.
                let (second, remaining) = self
                    .nested(rest.saturating_sub(1))
                    .map_err(|e| missing(e, Arity::Binary))?;
                Ok((op(first, second), remaining))
            }
        }
    }

    fn nested(&mut self, end: usize) -> Result<(f64, usize), EvalError> {
        self.depth += 1;
        let result = self.eval(end);
        self.depth -= 1;
        result
    }
}

/// An operator that could not get its operand reports its own failure,
/// except when the evaluation was cut off for size.
fn missing(inner: EvalError, arity: Arity) -> EvalError {
    match inner {
        EvalError::TooComplex => EvalError::TooComplex,
        _ => EvalError::MissingOperand(arity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use crate::registry::Registry;

    fn run(program: &str) -> CalcResult {
        run_with(program, &HashMap::new())
    }

    fn run_with(program: &str, variables: &HashMap<String, f64>) -> CalcResult {
        let words: Vec<&str> = program.split_whitespace().collect();
        let stack = codec::import(&Registry::standard(), &words);
        evaluate(&stack, variables)
    }

    #[test]
    fn empty_stack_is_generic_error() {
        assert_eq!(run(""), Err(EvalError::Generic));
    }

    #[test]
    fn last_operand_wins() {
        assert_eq!(run("1 2 3"), Ok(3.0));
    }

    #[test]
    fn binary_operand_order() {
        assert_eq!(run("3 4 ×"), Ok(12.0));
        assert_eq!(run("8 2 ÷"), Ok(4.0));
        assert_eq!(run("8 2 -"), Ok(6.0));
        assert_eq!(run("8 2 +"), Ok(10.0));
    }

    #[test]
    fn chained_arithmetic() {
        // (3 + 4) × 5
        assert_eq!(run("3 4 + 5 ×"), Ok(35.0));
        assert_eq!(run("1 2 + 3 + 4 +"), Ok(10.0));
    }

    #[test]
    fn unary_and_constant() {
        assert_eq!(run("9 √"), Ok(3.0));
        assert_eq!(run("4 ±"), Ok(-4.0));
        assert_eq!(run("π"), Ok(std::f64::consts::PI));
        assert_eq!(run("0 Cos"), Ok(1.0));
    }

    #[test]
    fn unbound_variable() {
        let err = run("M").unwrap_err();
        assert_eq!(err, EvalError::UnboundVariable("M".into()));
        assert!(err.to_string().ends_with("is not set."));
    }

    #[test]
    fn bound_variable() {
        let mut vars = HashMap::new();
        vars.insert("M".to_string(), 2.5);
        assert_eq!(run_with("M 2 ×", &vars), Ok(5.0));
    }

    #[test]
    fn operator_reports_its_own_failure() {
        assert_eq!(run("√"), Err(EvalError::MissingOperand(Arity::Unary)));
        assert_eq!(run("3 +"), Err(EvalError::MissingOperand(Arity::Binary)));
        assert_eq!(run("+"), Err(EvalError::MissingOperand(Arity::Binary)));
        assert_eq!(run("M √"), Err(EvalError::MissingOperand(Arity::Unary)));
    }

    #[test]
    fn division_by_zero_is_infinite() {
        assert_eq!(run("1 0 ÷"), Err(EvalError::InfiniteResult));
    }

    #[test]
    fn zero_over_zero_is_nan() {
        assert_eq!(run("0 0 ÷"), Err(EvalError::NotANumber));
        assert_eq!(run("1 ± √"), Err(EvalError::NotANumber));
    }

    #[test]
    fn evaluation_leaves_stack_untouched() {
        let registry = Registry::standard();
        let stack = codec::import(&registry, &["3", "4", "+"]);
        let before = stack.clone();
        let _ = evaluate(&stack, &HashMap::new());
        assert_eq!(stack, before);
    }

    #[test]
    fn oversized_program_is_cut_off() {
        // right-nested additions re-evaluate their left side on every level
        let mut words = vec!["1"; 200];
        words.extend(std::iter::repeat("+").take(199));
        let stack = codec::import(&Registry::standard(), &words);
        assert_eq!(evaluate(&stack, &HashMap::new()), Err(EvalError::TooComplex));
    }

    #[test]
    fn long_left_chain_evaluates() {
        let mut words = vec!["1"];
        for _ in 0..500 {
            words.push("1");
            words.push("+");
        }
        let stack = codec::import(&Registry::standard(), &words);
        assert_eq!(evaluate(&stack, &HashMap::new()), Ok(501.0));
    }

    /// Runs `f` on a thread with room for the deepest permitted recursion.
    fn on_large_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
        std::thread::Builder::new()
            .stack_size(32 << 20)
            .spawn(f)
            .unwrap()
            .join()
            .unwrap()
    }

    #[test]
    fn deep_left_chain_hits_depth_limit() {
        let result = on_large_stack(|| {
            let mut words = vec!["1"];
            for _ in 0..MAX_DEPTH + 76 {
                words.push("1");
                words.push("+");
            }
            run(&words.join(" "))
        });
        assert_eq!(result, Err(EvalError::TooComplex));
    }

    #[test]
    fn deep_unary_chain_hits_depth_limit() {
        let result = on_large_stack(|| {
            let mut words = vec!["1"];
            words.extend(std::iter::repeat("±").take(MAX_DEPTH + 76));
            run(&words.join(" "))
        });
        assert_eq!(result, Err(EvalError::TooComplex));
    }

    #[test]
    fn unary_chain_below_depth_limit_evaluates() {
        let result = on_large_stack(|| {
            let mut words = vec!["2"];
            words.extend(std::iter::repeat("±").take(MAX_DEPTH - 2));
            run(&words.join(" "))
        });
        assert_eq!(result, Ok(2.0));
    }
}
