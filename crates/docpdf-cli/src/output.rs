//! Rendering of command results as tables, TOML or JSON.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// How command results are printed on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Tables for rows, TOML for documents
    #[default]
    Table,
    Json,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

/// Print result rows.
pub fn print_list<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table if rows.is_empty() => println!("(nothing to show)"),
        OutputFormat::Table => {
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{table}");
        }
        OutputFormat::Json => println!("{}", to_json(rows)),
    }
}

/// Print one structured document, such as the effective configuration.
pub fn print_document<T: Serialize>(doc: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => match toml::to_string_pretty(doc) {
            Ok(text) => print!("{text}"),
            Err(_) => println!("{}", to_json(doc)),
        },
        OutputFormat::Json => println!("{}", to_json(doc)),
    }
}

pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Aligned `key: value` line.
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {value}", format!("{key}:"));
}
