use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::Engine;
use crate::registry::Registry;
use crate::token::{parse_number, Token};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid program document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Flatten a stack into its stored string form.
pub fn export(stack: &[Token]) -> Vec<String> {
    stack.iter().map(ToString::to_string).collect()
}

/// Rebuild a stack from stored strings.
///
/// Each word resolves, in order, to a registry entry, a number, or a
/// variable reference.
pub fn import<S: AsRef<str>>(registry: &Registry, words: &[S]) -> Vec<Token> {
    words
        .iter()
        .map(|word| resolve(registry, word.as_ref()))
        .collect()
}

fn resolve(registry: &Registry, word: &str) -> Token {
    if let Some(token) = registry.get(word) {
        return token.clone();
    }
    if let Some(value) = parse_number(word) {
        return Token::Operand(value);
    }
    Token::Variable(word.to_string())
}

/// A stored formula, as handed from the calculator to the plotting side
/// or written to disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub tokens: Vec<String>,
    /// Last rendered fragment at the time of capture, used as a title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Program {
    pub fn new(tokens: Vec<String>) -> Self {
        Self {
            tokens,
            label: None,
        }
    }

    pub fn from_engine(engine: &Engine) -> Self {
        Self {
            tokens: engine.program(),
            label: engine.label(),
        }
    }

    pub fn to_json(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(source: &str) -> Result<Self, CodecError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Replace the engine's stack with this program. Bindings are untouched.
    pub fn load_into(&self, engine: &mut Engine) {
        engine.set_program(&self.tokens);
    }
}
