use std::collections::HashMap;

use crate::codec;
use crate::error::CalcResult;
use crate::eval;
use crate::registry::Registry;
use crate::render;
use crate::token::Token;

/// The calculator: a postfix stack, the operators it understands, and the
/// current variable bindings.
///
/// Every mutator re-evaluates the whole stack and returns the outcome.
/// Not synchronized; confine an engine to one thread or guard it externally.
pub struct Engine {
    stack: Vec<Token>,
    registry: Registry,
    variables: HashMap<String, f64>,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_registry(Registry::standard())
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self {
            stack: Vec::new(),
            registry,
            variables: HashMap::new(),
        }
    }

    /// Push a number.
    pub fn push_operand(&mut self, value: f64) -> CalcResult {
        tracing::debug!(value, "push operand");
        self.stack.push(Token::Operand(value));
        self.evaluate_and_report()
    }

    /// Push a reference to a named variable.
    pub fn push_variable(&mut self, name: &str) -> CalcResult {
        tracing::debug!(name, "push variable");
        self.stack.push(Token::Variable(name.to_string()));
        self.evaluate_and_report()
    }

    /// Push the registered operator or constant for `symbol`.
    ///
    /// Unknown symbols leave the stack as it was; the returned result is
    /// then simply the current evaluation.
    pub fn perform_operation(&mut self, symbol: &str) -> CalcResult {
        self.push_known(symbol);
        self.evaluate_and_report()
    }

    /// Same lookup as [`Engine::perform_operation`], used by the constant keys.
    pub fn push_constant(&mut self, symbol: &str) -> CalcResult {
        self.push_known(symbol);
        self.evaluate_and_report()
    }

    fn push_known(&mut self, symbol: &str) {
        match self.registry.get(symbol) {
            Some(token) => {
                tracing::debug!(symbol, "push operator");
                self.stack.push(token.clone());
            }
            None => tracing::debug!(symbol, "ignoring unknown symbol"),
        }
    }

    /// Empty the stack. Variable bindings are kept.
    pub fn clear(&mut self) -> Option<f64> {
        self.stack.clear();
        self.evaluate()
    }

    /// Evaluate the stack, discarding the reason for a missing value.
    pub fn evaluate(&self) -> Option<f64> {
        self.evaluate_and_report().ok()
    }

    /// Evaluate the stack from the top.
    pub fn evaluate_and_report(&self) -> CalcResult {
        let result = eval::evaluate(&self.stack, &self.variables);
        if let Err(e) = &result {
            tracing::debug!(error = %e, len = self.stack.len(), "evaluation failed");
        }
        result
    }

    /// The stack in its stored string form.
    pub fn program(&self) -> Vec<String> {
        codec::export(&self.stack)
    }

    /// Replace the whole stack from stored strings.
    pub fn set_program<S: AsRef<str>>(&mut self, words: &[S]) {
        self.stack = codec::import(&self.registry, words);
        tracing::debug!(len = self.stack.len(), "program loaded");
    }

    /// Infix rendering of the stack, one fragment per open sub-expression.
    pub fn description(&self) -> Vec<String> {
        render::describe(&self.stack)
    }

    /// The description as a single comma-separated line.
    pub fn display(&self) -> String {
        self.description().join(", ")
    }

    /// The most recent sub-expression, suitable as a title for a plot.
    pub fn label(&self) -> Option<String> {
        self.description().pop()
    }

    /// Entry-order listing of the stack.
    pub fn history(&self) -> String {
        render::history(&self.stack)
    }

    /// Whether the last entry is a value the user typed rather than an operation.
    pub fn last_is_operand(&self) -> bool {
        self.stack.last().is_some_and(Token::is_operand_like)
    }

    pub fn stack(&self) -> &[Token] {
        &self.stack
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn set_variable(&mut self, name: &str, value: f64) {
        self.variables.insert(name.to_string(), value);
    }

    pub fn variable(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    pub fn remove_variable(&mut self, name: &str) -> Option<f64> {
        self.variables.remove(name)
    }

    pub fn variables(&self) -> &HashMap<String, f64> {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut HashMap<String, f64> {
        &mut self.variables
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
