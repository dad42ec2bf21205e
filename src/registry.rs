use std::collections::HashMap;

use crate::token::Token;

/// Fixed table of operator and constant symbols known to an engine.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: HashMap<&'static str, Token>,
}

impl Registry {
    /// The standard calculator keypad.
    pub fn standard() -> Self {
        let mut entries: HashMap<&'static str, Token> = HashMap::new();

        // Binary operators
        entries.insert("×", Token::Binary { symbol: "×", op: multiply });
        entries.insert("÷", Token::Binary { symbol: "÷", op: divide });
        entries.insert("+", Token::Binary { symbol: "+", op: add });
        entries.insert("-", Token::Binary { symbol: "-", op: subtract });

        // Unary operators
        entries.insert("√", Token::Unary { symbol: "√", op: f64::sqrt });
        entries.insert("Sin", Token::Unary { symbol: "Sin", op: f64::sin });
        entries.insert("Cos", Token::Unary { symbol: "Cos", op: f64::cos });
        entries.insert("±", Token::Unary { symbol: "±", op: negate });

        // Constants
        entries.insert(
            "π",
            Token::Constant {
                symbol: "π",
                value: std::f64::consts::PI,
            },
        );

        Self { entries }
    }

    pub fn get(&self, symbol: &str) -> Option<&Token> {
        self.entries.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(symbol)
    }

    /// All registered symbols, sorted.
    pub fn symbols(&self) -> Vec<&'static str> {
        let mut symbols: Vec<&'static str> = self.entries.keys().copied().collect();
        symbols.sort_unstable();
        symbols
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

// Binary functions receive the top-of-stack operand first.

fn multiply(x: f64, y: f64) -> f64 {
    x * y
}

fn divide(x: f64, y: f64) -> f64 {
    y / x
}

fn add(x: f64, y: f64) -> f64 {
    x + y
}

fn subtract(x: f64, y: f64) -> f64 {
    y - x
}

fn negate(x: f64) -> f64 {
    -x
}
