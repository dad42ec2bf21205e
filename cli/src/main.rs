mod commands;
mod config;
mod home;
mod input;
mod output;
mod repl;

use clap::{Args, Parser, Subcommand};
use output::OutputFormat;
use tracing::Level;

#[derive(Parser)]
#[command(name = "stackcalc", version, about = "Reverse-Polish calculator")]
struct Cli {
    /// Config profile to use
    #[arg(long, global = true, default_value = "default")]
    profile: String,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Log evaluation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Without a subcommand, start the interactive calculator
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Evaluate a postfix program, e.g. `stackcalc eval 3 4 + 5 ×`
    Eval {
        /// Bind a variable before evaluating (NAME=VALUE, repeatable)
        #[arg(long = "set", value_parser = input::parse_binding)]
        bindings: Vec<(String, f64)>,

        /// Numbers, variables and operators in entry order
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true, trailing_var_arg = true)]
        tokens: Vec<String>,
    },

    /// Sample a program across a range of one variable
    Plot {
        #[command(flatten)]
        sweep: SweepArgs,

        /// Numbers, variables and operators in entry order
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true, trailing_var_arg = true)]
        tokens: Vec<String>,
    },

    /// Saved programs
    Program {
        #[command(subcommand)]
        action: ProgramAction,
    },
}

#[derive(Subcommand)]
enum ProgramAction {
    /// Save a program under a name
    Save {
        name: String,

        #[arg(required = true, num_args = 1.., allow_hyphen_values = true, trailing_var_arg = true)]
        tokens: Vec<String>,
    },

    /// Show a saved program
    Show { name: String },

    /// List saved programs
    List,

    /// Sample a saved program
    Plot {
        name: String,

        #[command(flatten)]
        sweep: SweepArgs,
    },
}

#[derive(Args)]
struct SweepArgs {
    /// Variable to sweep (default from config, else M)
    #[arg(long)]
    variable: Option<String>,

    /// Start of the range
    #[arg(long, allow_hyphen_values = true)]
    min: Option<f64>,

    /// End of the range
    #[arg(long, allow_hyphen_values = true)]
    max: Option<f64>,

    /// Number of intervals; steps + 1 positions are evaluated
    #[arg(long)]
    steps: Option<usize>,

    /// Print the bounds of the sampled points instead of the points
    #[arg(long)]
    stats: bool,
}

impl SweepArgs {
    fn into_parts(self) -> (config::Profile, bool) {
        let profile = config::Profile {
            variable: self.variable,
            min: self.min,
            max: self.max,
            steps: self.steps,
        };
        (profile, self.stats)
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn to_command(command: CliCommand) -> commands::Command {
    match command {
        CliCommand::Eval { bindings, tokens } => commands::Command::Eval { tokens, bindings },
        CliCommand::Plot { sweep, tokens } => {
            let (sweep, stats) = sweep.into_parts();
            commands::Command::Plot {
                tokens,
                sweep,
                stats,
            }
        }
        CliCommand::Program { action } => match action {
            ProgramAction::Save { name, tokens } => commands::Command::ProgramSave { name, tokens },
            ProgramAction::Show { name } => commands::Command::ProgramShow { name },
            ProgramAction::List => commands::Command::ProgramList,
            ProgramAction::Plot { name, sweep } => {
                let (sweep, stats) = sweep.into_parts();
                commands::Command::ProgramPlot { name, sweep, stats }
            }
        },
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        let settings = config::load_config(&cli.profile);
        // Saving is unavailable without a home directory; evaluation still works.
        let home = home::ensure_home_dir()
            .map_err(|e| tracing::warn!("{e}"))
            .ok();
        repl::run(&settings, home);
        return;
    };

    if let Err(e) = commands::run(to_command(command), &cli.profile, &cli.format) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn bare_invocation_is_repl() {
        assert!(parse(&["stackcalc"]).command.is_none());
        assert!(parse(&["stackcalc", "--format", "json"]).command.is_none());
    }

    #[test]
    fn eval_accepts_operator_tokens() {
        let cli = parse(&["stackcalc", "eval", "--set", "M=2", "8", "-3", "-", "M", "×"]);
        match cli.command {
            Some(CliCommand::Eval { bindings, tokens }) => {
                assert_eq!(bindings, vec![("M".to_string(), 2.0)]);
                assert_eq!(tokens, vec!["8", "-3", "-", "M", "×"]);
            }
            _ => panic!("expected eval"),
        }
    }

    #[test]
    fn plot_sweep_flags() {
        let cli = parse(&["stackcalc", "plot", "--min", "-1", "--max", "1", "--steps", "4", "--stats", "M", "Sin"]);
        match cli.command {
            Some(CliCommand::Plot { sweep, tokens }) => {
                let (profile, stats) = sweep.into_parts();
                assert_eq!(profile.min, Some(-1.0));
                assert_eq!(profile.max, Some(1.0));
                assert_eq!(profile.steps, Some(4));
                assert!(stats);
                assert_eq!(tokens, vec!["M", "Sin"]);
            }
            _ => panic!("expected plot"),
        }
    }

    #[test]
    fn program_subcommands() {
        assert!(matches!(
            parse(&["stackcalc", "program", "list"]).command,
            Some(CliCommand::Program { action: ProgramAction::List })
        ));
        let cli = parse(&["stackcalc", "program", "save", "wave", "M", "Sin"]);
        match to_command(cli.command.unwrap()) {
            commands::Command::ProgramSave { name, tokens } => {
                assert_eq!(name, "wave");
                assert_eq!(tokens, vec!["M", "Sin"]);
            }
            _ => panic!("expected program save"),
        }
    }

    #[test]
    fn eval_requires_tokens() {
        assert!(Cli::try_parse_from(["stackcalc", "eval"]).is_err());
    }

    #[test]
    fn bad_binding_is_rejected() {
        assert!(Cli::try_parse_from(["stackcalc", "eval", "--set", "M", "1"]).is_err());
    }
}
