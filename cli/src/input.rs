use std::collections::HashMap;

use stackcalc::{parse_number, CalcResult, Engine, Token};

/// How a typed word is fed to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Operand(f64),
    Constant(String),
    Operation(String),
    Variable(String),
}

/// Classify a word: keypad symbol (directly or through an alias), number,
/// or variable name.
pub fn classify(engine: &Engine, aliases: &HashMap<String, String>, word: &str) -> Entry {
    let symbol = aliases.get(word).map_or(word, String::as_str);
    match engine.registry().get(symbol) {
        Some(Token::Constant { .. }) => return Entry::Constant(symbol.to_string()),
        Some(_) => return Entry::Operation(symbol.to_string()),
        None => {}
    }
    if let Some(value) = parse_number(word) {
        return Entry::Operand(value);
    }
    Entry::Variable(word.to_string())
}

/// Push one classified entry.
pub fn apply(engine: &mut Engine, entry: &Entry) -> CalcResult {
    match entry {
        Entry::Operand(value) => engine.push_operand(*value),
        Entry::Constant(symbol) => engine.push_constant(symbol),
        Entry::Operation(symbol) => engine.perform_operation(symbol),
        Entry::Variable(name) => engine.push_variable(name),
    }
}

/// Feed words one at a time, returning the result after the last one.
pub fn feed<S: AsRef<str>>(
    engine: &mut Engine,
    aliases: &HashMap<String, String>,
    words: &[S],
) -> CalcResult {
    let mut result = engine.evaluate_and_report();
    for word in words {
        let entry = classify(engine, aliases, word.as_ref());
        result = apply(engine, &entry);
    }
    result
}

/// Replace aliased words with the symbols they stand for.
pub fn canonical<S: AsRef<str>>(aliases: &HashMap<String, String>, words: &[S]) -> Vec<String> {
    words
        .iter()
        .map(|w| {
            let word = w.as_ref();
            aliases.get(word).cloned().unwrap_or_else(|| word.to_string())
        })
        .collect()
}

/// Parse `NAME=VALUE` into a binding.
pub fn parse_binding(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {s:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing variable name in {s:?}"));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value for {name}: {e}"))?;
    Ok((name.to_string(), value))
}
