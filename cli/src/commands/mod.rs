pub mod eval;
pub mod plot;
pub mod program;

use crate::config::{self, Profile};
use crate::home;
use crate::output::OutputFormat;

pub enum Command {
    Eval {
        tokens: Vec<String>,
        bindings: Vec<(String, f64)>,
    },
    Plot {
        tokens: Vec<String>,
        sweep: Profile,
        stats: bool,
    },
    ProgramSave {
        name: String,
        tokens: Vec<String>,
    },
    ProgramShow {
        name: String,
    },
    ProgramList,
    ProgramPlot {
        name: String,
        sweep: Profile,
        stats: bool,
    },
}

pub fn run(command: Command, profile_name: &str, format: &OutputFormat) -> Result<(), String> {
    let settings = config::load_config(profile_name);

    match command {
        Command::Eval { tokens, bindings } => eval::run(&settings, &tokens, &bindings, format),
        Command::Plot {
            tokens,
            sweep,
            stats,
        } => plot::run(&settings, &tokens, &sweep, stats, format),
        Command::ProgramSave { name, tokens } => {
            let home = home::ensure_home_dir()?;
            program::save(&home, &settings, &name, &tokens, format)
        }
        Command::ProgramShow { name } => {
            let home = home::ensure_home_dir()?;
            program::show(&home, &name, format)
        }
        Command::ProgramList => {
            let home = home::ensure_home_dir()?;
            program::list(&home, format)
        }
        Command::ProgramPlot { name, sweep, stats } => {
            let home = home::ensure_home_dir()?;
            program::plot(&home, &settings, &name, &sweep, stats, format)
        }
    }
}
