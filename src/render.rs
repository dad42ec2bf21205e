use crate::token::Token;

/// Render a postfix stack as infix text, one fragment per unreduced
/// sub-expression. A well-formed program yields a single fragment.
///
/// Parenthesization is decided by looking ahead to the next operator still
/// to be consumed: a binary result is wrapped when that operator has the
/// same symbol or the same precedence. This is a one-token heuristic, not a
/// precedence-climbing printer, and callers rely on its exact output.
pub fn describe(stack: &[Token]) -> Vec<String> {
    let mut fragments: Vec<String> = Vec::new();

    for (index, token) in stack.iter().enumerate() {
        match token {
            Token::Operand(_) | Token::Variable(_) | Token::Constant { .. } => {
                fragments.push(token.to_string());
            }
            Token::Unary { symbol, .. } => {
                // Nothing to apply to: the operator is dropped from the text.
                if let Some(operand) = fragments.pop() {
                    fragments.push(format!("{symbol}({operand})"));
                }
            }
            Token::Binary { symbol, .. } => {
                let rendered = match (fragments.pop(), fragments.pop()) {
                    (Some(second), Some(first)) => {
                        if wraps(token, next_operator(&stack[index + 1..])) {
                            format!("({first}{symbol}{second})")
                        } else {
                            format!("{first}{symbol}{second}")
                        }
                    }
                    (Some(only), None) => format!("?{symbol}{only}"),
                    _ => format!("/??{symbol}??\\"),
                };
                fragments.push(rendered);
            }
        }
    }

    fragments
}

/// Flat entry-order listing of the stack, e.g. `3 4 + 5 ×`.
pub fn history(stack: &[Token]) -> String {
    stack
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn next_operator(rest: &[Token]) -> Option<&Token> {
    rest.iter().find(|t| t.is_operator())
}

fn wraps(op: &Token, next: Option<&Token>) -> bool {
    match next {
        Some(next) => next.to_string() == op.to_string() || next.precedence() == op.precedence(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use crate::registry::Registry;

    fn describe_words(program: &str) -> Vec<String> {
        let words: Vec<&str> = program.split_whitespace().collect();
        describe(&codec::import(&Registry::standard(), &words))
    }

    #[test]
    fn empty_stack_has_no_fragments() {
        assert!(describe(&[]).is_empty());
    }

    #[test]
    fn operands_are_separate_fragments() {
        assert_eq!(describe_words("1 2.5 M π"), vec!["1", "2.5", "M", "π"]);
    }

    #[test]
    fn simple_binary() {
        assert_eq!(describe_words("3 4 +"), vec!["3+4"]);
    }

    #[test]
    fn followed_binary_is_wrapped() {
        assert_eq!(describe_words("3 4 + 5 ×"), vec!["(3+4)×5"]);
        assert_eq!(describe_words("1 2 3 + ×"), vec!["1×(2+3)"]);
    }

    #[test]
    fn binary_followed_by_unary_is_not_wrapped() {
        assert_eq!(describe_words("3 4 + √"), vec!["√(3+4)"]);
    }

    #[test]
    fn unary_wraps_its_operand() {
        assert_eq!(describe_words("M Sin"), vec!["Sin(M)"]);
        assert_eq!(describe_words("2 ± Cos"), vec!["Cos(±(2))"]);
    }

    #[test]
    fn unary_without_operand_is_dropped() {
        assert_eq!(describe_words("√ 3"), vec!["3"]);
    }

    #[test]
    fn binary_with_one_operand() {
        assert_eq!(describe_words("3 +"), vec!["?+3"]);
    }

    #[test]
    fn binary_with_no_operand() {
        assert_eq!(describe_words("×"), vec!["/??×??\\"]);
    }

    #[test]
    fn unreduced_fragments_are_kept() {
        assert_eq!(describe_words("1 2 + 3"), vec!["1+2", "3"]);
    }

    #[test]
    fn history_lists_entries() {
        assert_eq!(
            history(&codec::import(&Registry::standard(), &["3", "4.5", "+", "M", "×"])),
            "3 4.5 + M ×"
        );
    }
}
