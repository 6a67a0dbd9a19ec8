use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use taskform::clock::FixedClock;
use taskform::commands::*;
use taskform::config::OutputFormat;
use taskform::messages::Locale;
use taskform::models::{Field, Priority, TaskInput};
use taskform::validation::{validate, FieldErrorKind};
use tempfile::TempDir;

fn clock() -> FixedClock {
    FixedClock(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(10, 0, 0).unwrap())
}

fn with_input_file<F>(contents: &str, f: F)
where
    F: FnOnce(PathBuf),
{
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("task.json");
    fs::write(&path, contents).unwrap();
    f(path);
}

#[test]
fn test_add_accepts_valid_task() {
    let input = TaskInput::new("Write report", "01/12/2030")
        .with_priority("Moyenne")
        .with_completed(true);
    let record = cmd_add(input, &clock(), Locale::En, OutputFormat::Table, true).unwrap();
    assert_eq!(record.name, "Write report");
    assert_eq!(record.priority, Priority::Moyenne);
    assert!(record.is_completed);
}

#[test]
fn test_add_rejects_invalid_task() {
    let input = TaskInput::new("Short", "31/13/2030");
    let errors = cmd_add(input, &clock(), Locale::Fr, OutputFormat::Json, true).unwrap_err();
    assert_eq!(errors.get(Field::Name), Some(FieldErrorKind::TooShort));
    assert_eq!(errors.get(Field::DueDate), Some(FieldErrorKind::FormatMismatch));
}

#[test]
fn test_check_accepts_json_file() {
    with_input_file(
        r#"{"name":"TaskTest1","dueDate":"01/01/2099","priority":"Moyenne","isCompleted":true}"#,
        |path| {
            let record = cmd_check(Some(path.as_path()), &clock(), Locale::Fr, true).unwrap();
            assert_eq!(record.name, "TaskTest1");
            assert_eq!(record.due_date.raw, "01/01/2099");
            assert!(record.is_completed);
        },
    );
}

#[test]
fn test_check_applies_defaults() {
    with_input_file(r#"{"name":"TaskTest1","dueDate":"01/01/2025"}"#, |path| {
        let record = cmd_check(Some(path.as_path()), &clock(), Locale::Fr, true).unwrap();
        assert_eq!(record.priority, Priority::Basse);
        assert!(!record.is_completed);
    });
}

#[test]
fn test_check_reports_field_errors() {
    with_input_file(r#"{"name":"ab","dueDate":"01/01/2020","priority":"Haute"}"#, |path| {
        match cmd_check(Some(path.as_path()), &clock(), Locale::Fr, true) {
            Err(CommandError::Invalid(errors)) => {
                assert_eq!(errors.len(), 3);
                assert_eq!(errors.get(Field::DueDate), Some(FieldErrorKind::PastDate));
            }
            other => panic!("expected field errors, got {:?}", other),
        }
    });
}

#[test]
fn test_check_malformed_json() {
    with_input_file("{ not json", |path| {
        let err = cmd_check(Some(path.as_path()), &clock(), Locale::En, true).unwrap_err();
        assert!(matches!(err, CommandError::Json(_)));
    });
}

#[test]
fn test_check_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");
    let err = cmd_check(Some(path.as_path()), &clock(), Locale::En, true).unwrap_err();
    assert!(matches!(err, CommandError::Read { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_check_report_shapes() {
    let ok = validate(&TaskInput::new("TaskTest1", "01/01/2099"), clock().0);
    assert_eq!(
        check_report(&ok, Locale::En),
        json!({
            "valid": true,
            "task": {
                "name": "TaskTest1",
                "dueDate": "01/01/2099",
                "priority": "Basse",
                "isCompleted": false
            }
        })
    );

    let bad = validate(&TaskInput::new("ab", "01/01/2099").with_priority("x"), clock().0);
    assert_eq!(
        check_report(&bad, Locale::Fr),
        json!({
            "valid": false,
            "errors": {
                "name": { "kind": "tooShort", "message": "Minimum 8 caractères" },
                "priority": { "kind": "invalidEnum", "message": "Priorité invalide" }
            }
        })
    );
}
