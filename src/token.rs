use std::fmt;

/// Signature of a one-argument operator.
pub type UnaryFn = fn(f64) -> f64;

/// Signature of a two-argument operator.
///
/// Called as `op(first_popped, second)`: the first argument is the operand
/// nearest the top of the stack.
pub type BinaryFn = fn(f64, f64) -> f64;

/// Coarse ranking used only when rendering infix text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Binary,
    Atomic,
}

/// One entry on the calculator stack.
///
/// Operators never carry operands; what they consume is determined by
/// position in the stack alone.
#[derive(Debug, Clone)]
pub enum Token {
    Operand(f64),
    Variable(String),
    Constant { symbol: &'static str, value: f64 },
    Unary { symbol: &'static str, op: UnaryFn },
    Binary { symbol: &'static str, op: BinaryFn },
}

impl Token {
    pub fn precedence(&self) -> Precedence {
        match self {
            Token::Binary { .. } => Precedence::Binary,
            _ => Precedence::Atomic,
        }
    }

    /// True for entries a user typed as a value rather than an operation.
    pub fn is_operand_like(&self) -> bool {
        matches!(self, Token::Operand(_) | Token::Variable(_))
    }

    /// True for unary and binary operators.
    pub fn is_operator(&self) -> bool {
        matches!(self, Token::Unary { .. } | Token::Binary { .. })
    }
}

/// Operators compare by symbol; their function pointers are not meaningful identities.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Token::Operand(a), Token::Operand(b)) => a.to_bits() == b.to_bits(),
            (Token::Variable(a), Token::Variable(b)) => a == b,
            (Token::Constant { symbol: a, .. }, Token::Constant { symbol: b, .. })
            | (Token::Unary { symbol: a, .. }, Token::Unary { symbol: b, .. })
            | (Token::Binary { symbol: a, .. }, Token::Binary { symbol: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operand(value) => write!(f, "{}", format_number(*value)),
            Token::Variable(name) => write!(f, "{name}"),
            Token::Constant { symbol, .. }
            | Token::Unary { symbol, .. }
            | Token::Binary { symbol, .. } => write!(f, "{symbol}"),
        }
    }
}

/// Render a number the way the calculator shows and stores it.
///
/// Integral values drop the decimal point; anything else keeps the
/// shortest representation that parses back to the same `f64`.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Read a word as a number, accepting what `format_number` writes.
///
/// Words that do not start with a digit, a point or a signed digit are not
/// numbers, so names like `Inf` or `nan` stay variables. The only
/// non-finite spellings accepted are `inf`, `-inf` and `NaN`.
pub fn parse_number(word: &str) -> Option<f64> {
    match word {
        "inf" => return Some(f64::INFINITY),
        "-inf" => return Some(f64::NEG_INFINITY),
        "NaN" => return Some(f64::NAN),
        _ => {}
    }
    let unsigned = word.strip_prefix(['-', '+']).unwrap_or(word);
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    word.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(x: f64, y: f64) -> f64 {
        x + y
    }

    #[test]
    fn integral_operand_display() {
        assert_eq!(Token::Operand(42.0).to_string(), "42");
        assert_eq!(Token::Operand(-3.0).to_string(), "-3");
    }

    #[test]
    fn fractional_operand_display() {
        assert_eq!(Token::Operand(3.25).to_string(), "3.25");
        assert_eq!(Token::Operand(0.1).to_string(), "0.1");
    }

    #[test]
    fn large_integral_operand_parses_back() {
        let rendered = format_number(1e20);
        assert_eq!(rendered, "100000000000000000000");
        assert_eq!(rendered.parse::<f64>().ok(), Some(1e20));
    }

    #[test]
    fn symbol_display() {
        assert_eq!(Token::Variable("M".into()).to_string(), "M");
        let pi = Token::Constant { symbol: "π", value: std::f64::consts::PI };
        assert_eq!(pi.to_string(), "π");
        let plus = Token::Binary { symbol: "+", op: add };
        assert_eq!(plus.to_string(), "+");
    }

    #[test]
    fn precedence_levels() {
        assert_eq!(Token::Operand(1.0).precedence(), Precedence::Atomic);
        assert_eq!(Token::Unary { symbol: "√", op: f64::sqrt }.precedence(), Precedence::Atomic);
        assert_eq!(Token::Binary { symbol: "+", op: add }.precedence(), Precedence::Binary);
        assert!(Precedence::Binary < Precedence::Atomic);
    }

    #[test]
    fn operand_like() {
        assert!(Token::Operand(1.0).is_operand_like());
        assert!(Token::Variable("x".into()).is_operand_like());
        assert!(!Token::Constant { symbol: "π", value: 3.0 }.is_operand_like());
        assert!(!Token::Unary { symbol: "√", op: f64::sqrt }.is_operand_like());
    }

    #[test]
    fn number_words() {
        assert_eq!(parse_number("2.5"), Some(2.5));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number("+.5"), Some(0.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("inf"), Some(f64::INFINITY));
        assert_eq!(parse_number("-inf"), Some(f64::NEG_INFINITY));
        assert!(parse_number("NaN").is_some_and(f64::is_nan));
    }

    #[test]
    fn float_keywords_are_not_numbers() {
        for word in ["Inf", "INF", "infinity", "-Infinity", "+inf", "nan", "-nan", "e3", "-", "M"] {
            assert_eq!(parse_number(word), None, "{word}");
        }
    }

    #[test]
    fn non_finite_display_parses_back() {
        for value in [f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(parse_number(&format_number(value)), Some(value));
        }
        assert!(parse_number(&format_number(f64::NAN)).is_some_and(f64::is_nan));
    }
}
