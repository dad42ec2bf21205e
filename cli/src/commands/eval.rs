use serde::Serialize;
use stackcalc::{format_number, CalcResult, Engine};

use crate::config::Settings;
use crate::input;
use crate::output::{print_json, print_rows, OutputFormat};

/// Outcome of one evaluation, as printed.
#[derive(Debug, Serialize, PartialEq)]
pub struct Report {
    pub result: Option<f64>,
    pub error: Option<String>,
    pub expression: String,
    pub program: Vec<String>,
}

impl Report {
    pub fn new(engine: &Engine, result: &CalcResult) -> Self {
        Self {
            result: result.as_ref().ok().copied(),
            error: result.as_ref().err().map(ToString::to_string),
            expression: engine.display(),
            program: engine.program(),
        }
    }

    /// The value, or the error text in its place.
    pub fn shown(&self) -> String {
        match (self.result, &self.error) {
            (Some(value), _) => format_number(value),
            (None, Some(error)) => error.clone(),
            (None, None) => String::new(),
        }
    }
}

pub fn run(
    settings: &Settings,
    tokens: &[String],
    bindings: &[(String, f64)],
    format: &OutputFormat,
) -> Result<(), String> {
    let mut engine = Engine::new();
    for (name, value) in bindings {
        engine.set_variable(name, *value);
    }

    let result = input::feed(&mut engine, &settings.aliases, tokens);
    let report = Report::new(&engine, &result);

    if let Err(e) = result {
        return Err(format!("{e} ({})", report.expression));
    }

    match format {
        OutputFormat::Json => print_json(&report),
        _ => {
            print_rows(&["result", "expression"], &[vec![report.shown(), report.expression.clone()]], format)
        }
    }
}
