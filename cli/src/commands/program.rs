use std::path::Path;

use stackcalc::{Engine, Program};

use crate::commands::plot;
use crate::config::{Profile, Settings};
use crate::home;
use crate::input;
use crate::output::{print_json, print_rows, OutputFormat};

/// Store a program under `name`, labelled with its rendered expression.
pub fn save(
    home: &Path,
    settings: &Settings,
    name: &str,
    tokens: &[String],
    format: &OutputFormat,
) -> Result<(), String> {
    let program = capture(settings, tokens);
    let path = home::save_program(home, name, &program)?;
    match format {
        OutputFormat::Json => print_json(&program),
        _ => {
            println!(
                "saved {name}: {} → {}",
                program.tokens.join(" "),
                program.label.as_deref().unwrap_or("")
            );
            tracing::debug!("wrote {}", path.display());
            Ok(())
        }
    }
}

pub fn show(home: &Path, name: &str, format: &OutputFormat) -> Result<(), String> {
    let program = home::load_program(home, name)?;
    match format {
        OutputFormat::Json => print_json(&program),
        _ => {
            let columns = ["name", "tokens", "label"];
            let row = vec![
                name.to_string(),
                program.tokens.join(" "),
                program.label.unwrap_or_default(),
            ];
            print_rows(&columns, &[row], format)
        }
    }
}

pub fn list(home: &Path, format: &OutputFormat) -> Result<(), String> {
    let names = home::list_programs(home)?;
    if names.is_empty() {
        println!("No saved programs.");
        return Ok(());
    }

    let mut rows = Vec::with_capacity(names.len());
    for name in &names {
        let label = match home::load_program(home, name) {
            Ok(program) => program.label.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("{e}");
                String::from("?")
            }
        };
        rows.push(vec![name.clone(), label]);
    }
    print_rows(&["name", "label"], &rows, format)
}

pub fn plot(
    home: &Path,
    settings: &Settings,
    name: &str,
    overrides: &Profile,
    stats: bool,
    format: &OutputFormat,
) -> Result<(), String> {
    let program = home::load_program(home, name)?;
    plot::plot_program(settings, &program, overrides, stats, format)
}

/// Build a program from typed words, resolving aliases and computing its label.
pub fn capture(settings: &Settings, tokens: &[String]) -> Program {
    let mut engine = Engine::new();
    engine.set_program(&input::canonical(&settings.aliases, tokens));
    Program::from_engine(&engine)
}
