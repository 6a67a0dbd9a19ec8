use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use log::debug;
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::clock::Clock;
use crate::config::OutputFormat;
use crate::messages::{field_label, label, message, Label, Locale};
use crate::models::{TaskInput, TaskRecord};
use crate::validation::{validate, FieldErrors};

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read standard input: {0}")]
    Stdin(#[source] io::Error),
    #[error("malformed task JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] FieldErrors),
}

/// Validates a task entered on the command line.
///
/// Prints the accepted record on stdout, or the field errors on stderr.
pub fn cmd_add(
    input: TaskInput,
    clock: &dyn Clock,
    locale: Locale,
    format: OutputFormat,
    silent: bool,
) -> Result<TaskRecord, FieldErrors> {
    match validate(&input, clock.now()) {
        Ok(record) => {
            debug!("Accepted task '{}' due {}", record.name, record.due_date);
            if !silent {
                match format {
                    OutputFormat::Table => println!("{}", record_table(&record, locale)),
                    OutputFormat::Json => match serde_json::to_string_pretty(&record) {
                        Ok(s) => println!("{}", s),
                        Err(e) => eprintln!("Failed to serialize task: {}", e),
                    },
                }
            }
            Ok(record)
        }
        Err(errors) => {
            debug!("Rejected task: {}", errors);
            if !silent { eprintln!("{}", errors_table(&errors, locale)); }
            Err(errors)
        }
    }
}

/// Validates a JSON task read from `path`, or stdin when `path` is `None` or `-`.
///
/// Prints a JSON verdict on stdout for both accepted and rejected input.
pub fn cmd_check(
    path: Option<&Path>,
    clock: &dyn Clock,
    locale: Locale,
    silent: bool,
) -> Result<TaskRecord, CommandError> {
    let raw = read_input(path)?;
    let input: TaskInput = serde_json::from_str(&raw)?;
    let result = validate(&input, clock.now());
    if !silent {
        println!("{}", check_report(&result, locale));
    }
    match result {
        Ok(record) => {
            debug!("Accepted task '{}' due {}", record.name, record.due_date);
            Ok(record)
        }
        Err(errors) => {
            debug!("Rejected task: {}", errors);
            Err(CommandError::Invalid(errors))
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String, CommandError> {
    match path {
        Some(p) if p != Path::new("-") => fs::read_to_string(p).map_err(|source| CommandError::Read {
            path: p.to_path_buf(),
            source,
        }),
        _ => {
            let mut s = String::new();
            io::stdin().read_to_string(&mut s).map_err(CommandError::Stdin)?;
            Ok(s)
        }
    }
}

/// Builds the JSON verdict printed by `check`.
pub fn check_report(result: &Result<TaskRecord, FieldErrors>, locale: Locale) -> Value {
    match result {
        Ok(record) => json!({ "valid": true, "task": record }),
        Err(errors) => {
            let mut map = Map::new();
            for (field, kind) in errors.iter() {
                map.insert(
                    field.key().to_string(),
                    json!({ "kind": kind, "message": message(field, kind, locale) }),
                );
            }
            json!({ "valid": false, "errors": map })
        }
    }
}

/// Renders an accepted record as a two-column table.
pub fn record_table(record: &TaskRecord, locale: Locale) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new(label(Label::Field, locale)).add_attribute(Attribute::Bold),
            Cell::new(label(Label::Value, locale)).add_attribute(Attribute::Bold),
        ]);

    let completed = if record.is_completed { "✔" } else { "✘" };
    table.add_row(vec![Cell::new(label(Label::Name, locale)), Cell::new(&record.name)]);
    table.add_row(vec![Cell::new(label(Label::DueDate, locale)), Cell::new(&record.due_date)]);
    table.add_row(vec![Cell::new(label(Label::Priority, locale)), Cell::new(record.priority)]);
    table.add_row(vec![
        Cell::new(label(Label::Completed, locale)),
        Cell::new(completed).fg(if record.is_completed { Color::Green } else { Color::Reset }),
    ]);
    table
}

/// Renders field errors as a table, one row per failing field.
pub fn errors_table(errors: &FieldErrors, locale: Locale) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new(label(Label::Field, locale)).add_attribute(Attribute::Bold),
            Cell::new(label(Label::Message, locale)).add_attribute(Attribute::Bold),
        ]);
    for (field, text) in errors.messages(locale) {
        table.add_row(vec![Cell::new(field_label(field, locale)), Cell::new(text).fg(Color::Red)]);
    }
    table
}
