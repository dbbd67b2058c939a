//! Rendering mapped tables for the terminal and for files

use crate::error::{OrthoError, Result};
use crate::table::Table;
use std::io::{self, IsTerminal};

/// Shown for missing values in the terminal table view
const MISSING: &str = "NA";

/// Output encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Tsv,
    Csv,
    Json,
}

impl OutputFormat {
    /// Table on a terminal, TSV when piped
    pub fn detect() -> Self {
        if io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Tsv
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputFormat::Table => "table",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// Render `table` in `format`
///
/// `no_header` applies to the delimited formats only.
pub fn render(table: &Table, format: OutputFormat, no_header: bool) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(format_as_table(table)),
        OutputFormat::Tsv => format_delimited(table, b'\t', no_header),
        OutputFormat::Csv => format_delimited(table, b',', no_header),
        OutputFormat::Json => format_as_json(table),
    }
}

/// Render and write to `path`, or to stdout when `None`
pub fn write(table: &Table, format: OutputFormat, no_header: bool, path: Option<&std::path::Path>) -> Result<()> {
    let formatted = render(table, format, no_header)?;
    match path {
        Some(path) => std::fs::write(path, formatted)?,
        None => {
            use std::io::Write;
            let mut stdout = io::stdout().lock();
            stdout.write_all(formatted.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn format_as_table(table: &Table) -> String {
    use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table as Grid};

    let mut grid = Grid::new();
    grid.load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(table.columns());

    for row in table.rows() {
        grid.add_row(row.iter().map(|cell| cell.as_deref().unwrap_or(MISSING)));
    }

    format!("{}\n", grid)
}

fn format_delimited(table: &Table, delimiter: u8, no_header: bool) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    if !no_header {
        writer.write_record(table.columns())?;
    }
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| OrthoError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| OrthoError::malformed(e.to_string()))
}

fn format_as_json(table: &Table) -> Result<String> {
    let mut json = serde_json::to_string_pretty(&table.records())?;
    json.push('\n');
    Ok(json)
}
