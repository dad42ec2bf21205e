use stackcalc::{format_number, sample_program, PlotStats, Point, Program};

use crate::config::{Profile, Settings};
use crate::input;
use crate::output::{print_json, print_rows, OutputFormat};

pub fn run(
    settings: &Settings,
    tokens: &[String],
    overrides: &Profile,
    stats: bool,
    format: &OutputFormat,
) -> Result<(), String> {
    let program = Program::new(input::canonical(&settings.aliases, tokens));
    plot_program(settings, &program, overrides, stats, format)
}

/// Sweep a program and print its points, or their bounds with `stats`.
pub fn plot_program(
    settings: &Settings,
    program: &Program,
    overrides: &Profile,
    stats: bool,
    format: &OutputFormat,
) -> Result<(), String> {
    let sweep = settings.profile.sweep(overrides);
    let points = sample_program(&program.tokens, &sweep).map_err(|e| e.to_string())?;
    tracing::info!(
        "{} of {} samples kept for {}",
        points.len(),
        sweep.steps + 1,
        program.label.as_deref().unwrap_or("program")
    );

    if stats {
        print_stats(PlotStats::from_points(&points), format)
    } else {
        print_points(&points, format)
    }
}

fn print_points(points: &[Point], format: &OutputFormat) -> Result<(), String> {
    match format {
        OutputFormat::Json => print_json(&points),
        _ => {
            print_rows(&["x", "y"], &point_rows(points), format)
        }
    }
}

fn print_stats(stats: Option<PlotStats>, format: &OutputFormat) -> Result<(), String> {
    let Some(stats) = stats else {
        return Err("no plottable points in range".into());
    };
    match format {
        OutputFormat::Json => print_json(&stats),
        _ => {
            let columns = ["minimum-x", "maximum-x", "minimum-y", "maximum-y"];
            let row = vec![
                format_number(stats.min_x),
                format_number(stats.max_x),
                format_number(stats.min_y),
                format_number(stats.max_y),
            ];
            print_rows(&columns, &[row], format)
        }
    }
}

fn point_rows(points: &[Point]) -> Vec<Vec<String>> {
    points
        .iter()
        .map(|p| vec![format_number(p.x), format_number(p.y)])
        .collect()
}
