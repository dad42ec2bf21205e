use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use serde_json::{Map, Value};

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Print a serializable value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| format!("failed to encode JSON: {e}"))?;
    println!("{text}");
    Ok(())
}

/// Print named columns of calculator output in the requested format.
pub fn print_rows(columns: &[&str], rows: &[Vec<String>], format: &OutputFormat) -> Result<(), String> {
    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL_CONDENSED);
            table.set_header(columns.to_vec());
            for row in rows {
                table.add_row(row);
            }
            println!("{table}");
            Ok(())
        }
        OutputFormat::Json => print_json(&json_rows(columns, rows)),
        OutputFormat::Csv => {
            print!("{}", csv_text(columns, rows));
            Ok(())
        }
    }
}

/// One object per row, keyed by column name. Missing cells become empty strings.
fn json_rows(columns: &[&str], rows: &[Vec<String>]) -> Vec<Value> {
    rows.iter()
        .map(|row| {
            let cells = row.iter().map(String::as_str).chain(std::iter::repeat(""));
            let object: Map<String, Value> = columns
                .iter()
                .zip(cells)
                .map(|(column, cell)| (column.to_string(), Value::from(cell)))
                .collect();
            Value::Object(object)
        })
        .collect()
}

fn csv_text(columns: &[&str], rows: &[Vec<String>]) -> String {
    let mut text = csv_line(columns.iter().copied());
    for row in rows {
        text.push_str(&csv_line(row.iter().map(String::as_str)));
    }
    text
}

fn csv_line<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    let mut line = cells.map(csv_field).collect::<Vec<_>>().join(",");
    line.push('\n');
    line
}

/// Rendered expressions are joined with ", ", so fields get quoted.
fn csv_field(cell: &str) -> String {
    if cell.contains([',', '"', '\n']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
