use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use stackcalc::{format_number, CalcResult, Engine, Program};

use crate::config::Settings;
use crate::home;
use crate::input;

const HELP: &str = "\
enter numbers, variables and operators separated by spaces, e.g. `3 4 + 5 ×`
operators: × ÷ + - √ Sin Cos ± π (aliases: * / sqrt sin cos neg pi)
commands:
  clear              empty the stack (variables are kept)
  set NAME [VALUE]   bind a variable (defaults to the current result)
  unset NAME         remove a binding
  vars               list bindings
  history            show the stack in entry order
  save NAME          store the stack as a named program
  load NAME          replace the stack with a stored program
  exit | quit        leave";

/// One parsed input line.
#[derive(Debug, PartialEq)]
enum Line<'a> {
    Empty,
    Quit,
    Help,
    Clear,
    Set(&'a str, Option<&'a str>),
    Unset(&'a str),
    Vars,
    History,
    Save(&'a str),
    Load(&'a str),
    Words(Vec<&'a str>),
}

fn parse_line(line: &str) -> Line<'_> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let command = match words[..] {
        [] => Some(Line::Empty),
        ["exit" | "quit"] => Some(Line::Quit),
        ["help"] => Some(Line::Help),
        ["clear"] => Some(Line::Clear),
        ["set", name] => Some(Line::Set(name, None)),
        ["set", name, value] => Some(Line::Set(name, Some(value))),
        ["unset", name] => Some(Line::Unset(name)),
        ["vars"] => Some(Line::Vars),
        ["history"] => Some(Line::History),
        ["save", name] => Some(Line::Save(name)),
        ["load", name] => Some(Line::Load(name)),
        _ => None,
    };
    command.unwrap_or(Line::Words(words))
}

pub enum Outcome {
    Print(Vec<String>),
    Quit,
}

/// REPL state: the engine plus where programs are stored.
pub struct Session {
    engine: Engine,
    aliases: HashMap<String, String>,
    home: Option<PathBuf>,
}

impl Session {
    pub fn new(settings: &Settings, home: Option<PathBuf>) -> Self {
        Self {
            engine: Engine::new(),
            aliases: settings.aliases.clone(),
            home,
        }
    }

    pub fn handle(&mut self, line: &str) -> Outcome {
        let lines = match parse_line(line) {
            Line::Empty => Vec::new(),
            Line::Quit => return Outcome::Quit,
            Line::Help => HELP.lines().map(String::from).collect(),
            Line::Clear => {
                self.engine.clear();
                vec!["0".to_string()]
            }
            Line::Set(name, value) => match self.set(name, value) {
                Ok(()) => self.report(&self.engine.evaluate_and_report()),
                Err(e) => vec![format!("error: {e}")],
            },
            Line::Unset(name) => match self.engine.remove_variable(name) {
                Some(_) => self.report(&self.engine.evaluate_and_report()),
                None => vec![format!("error: {name} is not set.")],
            },
            Line::Vars => self.vars(),
            Line::History => vec![self.engine.history()],
            Line::Save(name) => match self.save(name) {
                Ok(()) => vec![format!("saved {name}")],
                Err(e) => vec![format!("error: {e}")],
            },
            Line::Load(name) => match self.load(name) {
                Ok(()) => self.report(&self.engine.evaluate_and_report()),
                Err(e) => vec![format!("error: {e}")],
            },
            Line::Words(words) => {
                let result = input::feed(&mut self.engine, &self.aliases, &words);
                self.report(&result)
            }
        };
        Outcome::Print(lines)
    }

    fn set(&mut self, name: &str, value: Option<&str>) -> Result<(), String> {
        let value = match value {
            Some(text) => text
                .parse::<f64>()
                .map_err(|e| format!("invalid value for {name}: {e}"))?,
            None => self
                .engine
                .evaluate_and_report()
                .map_err(|e| format!("no result to store in {name}: {e}"))?,
        };
        self.engine.set_variable(name, value);
        Ok(())
    }

    fn vars(&self) -> Vec<String> {
        let mut bindings: Vec<(&String, &f64)> = self.engine.variables().iter().collect();
        bindings.sort_by(|a, b| a.0.cmp(b.0));
        if bindings.is_empty() {
            return vec!["no variables set".to_string()];
        }
        bindings
            .into_iter()
            .map(|(name, value)| format!("{name} = {}", format_number(*value)))
            .collect()
    }

    fn save(&self, name: &str) -> Result<(), String> {
        let home = self.home.as_deref().ok_or("no home directory for saved programs")?;
        home::save_program(home, name, &Program::from_engine(&self.engine))?;
        Ok(())
    }

    fn load(&mut self, name: &str) -> Result<(), String> {
        let home = self.home.as_deref().ok_or("no home directory for saved programs")?;
        let program = home::load_program(home, name)?;
        program.load_into(&mut self.engine);
        Ok(())
    }

    /// Result line, then the rendered expression when there is one.
    fn report(&self, result: &CalcResult) -> Vec<String> {
        let mut lines = vec![match result {
            Ok(value) => format!("= {}", format_number(*value)),
            Err(e) => e.to_string(),
        }];
        let description = self.engine.display();
        if !description.is_empty() {
            lines.push(format!("  {description}"));
        }
        lines
    }
}

/// Interactive calculator REPL. Reads lines from stdin and feeds them to the engine.
pub fn run(settings: &Settings, home: Option<PathBuf>) {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut session = Session::new(settings, home);

    loop {
        print!("calc> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF (Ctrl-D)
            Err(e) => {
                tracing::warn!("stdin: {e}");
                break;
            }
            Ok(_) => {}
        }

        match session.handle(&line) {
            Outcome::Quit => break,
            Outcome::Print(lines) => {
                for l in lines {
                    println!("{l}");
                }
            }
        }
    }
}
