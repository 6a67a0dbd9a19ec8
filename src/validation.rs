//! Task input validation.
//!
//! Every field is checked on each call and each failing field reports the
//! first rule it broke. The reference moment comes from the caller, so the
//! result only depends on the arguments.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::messages::{message, Locale};
use crate::models::{DueDate, Field, Priority, TaskInput, TaskRecord};

pub const NAME_MIN_LEN: usize = 8;
pub const NAME_MAX_LEN: usize = 15;

// ASCII digits only; `\d` would also accept other Unicode digits.
static DUE_DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0[1-9]|[12][0-9]|3[01])/(0[1-9]|1[0-2])/([0-9]{4})$")
        .expect("due date pattern compiles")
});

/// The rule a field broke.
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FieldErrorKind {
    #[error("value is required")]
    Required,
    #[error("shorter than 8 characters")]
    TooShort,
    #[error("longer than 15 characters")]
    TooLong,
    #[error("does not match DD/MM/YYYY")]
    FormatMismatch,
    #[error("date is before today")]
    PastDate,
    #[error("not one of the allowed values")]
    InvalidEnum,
}

/// Validation failures keyed by field. Never empty.
#[derive(Error, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
#[error("invalid task input: {}", describe(.errors))]
pub struct FieldErrors {
    errors: BTreeMap<Field, FieldErrorKind>,
}

fn describe(errors: &BTreeMap<Field, FieldErrorKind>) -> String {
    errors
        .iter()
        .map(|(field, kind)| format!("{} {}", field, kind))
        .collect::<Vec<_>>()
        .join(", ")
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<FieldErrorKind> {
        self.errors.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fields in form order with the rule each one broke.
    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldErrorKind)> + '_ {
        self.errors.iter().map(|(f, k)| (*f, *k))
    }

    /// Localized message text per field.
    pub fn messages(&self, locale: Locale) -> BTreeMap<Field, &'static str> {
        self.iter()
            .map(|(field, kind)| (field, message(field, kind, locale)))
            .collect()
    }
}

/// Validates a candidate task against `reference_now`.
///
/// The date part of `reference_now` is the earliest accepted due date.
/// Unset priority becomes [`Priority::Basse`] and unset completion becomes
/// `false`.
pub fn validate(input: &TaskInput, reference_now: NaiveDateTime) -> Result<TaskRecord, FieldErrors> {
    let today = reference_now.date();
    let name = validate_name(input.name.as_deref());
    let due_date = validate_due_date(input.due_date.as_deref(), today);
    let priority = validate_priority(input.priority.as_deref());

    match (name, due_date, priority) {
        (Ok(name), Ok(due_date), Ok(priority)) => Ok(TaskRecord {
            name,
            due_date,
            priority,
            is_completed: input.is_completed.unwrap_or(false),
        }),
        (name, due_date, priority) => {
            let mut errors = BTreeMap::new();
            if let Err(kind) = name {
                errors.insert(Field::Name, kind);
            }
            if let Err(kind) = due_date {
                errors.insert(Field::DueDate, kind);
            }
            if let Err(kind) = priority {
                errors.insert(Field::Priority, kind);
            }
            Err(FieldErrors { errors })
        }
    }
}

/// Checks the name is present and between 8 and 15 characters long.
pub fn validate_name(name: Option<&str>) -> Result<String, FieldErrorKind> {
    let name = match name {
        Some(n) if !n.is_empty() => n,
        _ => return Err(FieldErrorKind::Required),
    };
    let len = name.chars().count();
    if len < NAME_MIN_LEN {
        return Err(FieldErrorKind::TooShort);
    }
    if len > NAME_MAX_LEN {
        return Err(FieldErrorKind::TooLong);
    }
    Ok(name.to_string())
}

/// Checks the due date is present, well formed and not before `today`.
pub fn validate_due_date(due: Option<&str>, today: NaiveDate) -> Result<DueDate, FieldErrorKind> {
    let raw = match due {
        Some(d) if !d.is_empty() => d,
        _ => return Err(FieldErrorKind::Required),
    };
    let date = parse_due_date(raw).ok_or(FieldErrorKind::FormatMismatch)?;
    if date < today {
        return Err(FieldErrorKind::PastDate);
    }
    Ok(DueDate { raw: raw.to_string(), date })
}

/// Checks the priority label. Unset or empty means the default.
pub fn validate_priority(priority: Option<&str>) -> Result<Priority, FieldErrorKind> {
    match priority {
        None | Some("") => Ok(Priority::default()),
        Some(label) => label.parse().map_err(|_| FieldErrorKind::InvalidEnum),
    }
}

/// Matches `DD/MM/YYYY` and builds the calendar date it denotes.
///
/// Returns `None` when the text does not match the pattern.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let caps = DUE_DATE_PATTERN.captures(raw)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    construct_date(day, month, year)
}

/// Builds a date from day, month and year with rollover.
///
/// The day is counted from the first of the month, so a day past the end of
/// the month lands in the next one (31/02/2030 is 2030-03-03) and day 0 is
/// the last day of the previous month. Years 0 to 99 are read as 1900 to
/// 1999. Returns `None` only for a month outside 1..=12 or a year chrono
/// cannot represent.
pub fn construct_date(day: u32, month: u32, year: i32) -> Option<NaiveDate> {
    let year = if (0..100).contains(&year) { year + 1900 } else { year };
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    if day == 0 {
        first.checked_sub_days(Days::new(1))
    } else {
        first.checked_add_days(Days::new(u64::from(day - 1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_construct_date_rolls_over_short_months() {
        assert_eq!(construct_date(31, 2, 2030), Some(date(2030, 3, 3)));
        assert_eq!(construct_date(30, 2, 2028), Some(date(2028, 3, 1)));
        assert_eq!(construct_date(31, 4, 2030), Some(date(2030, 5, 1)));
        assert_eq!(construct_date(31, 12, 2030), Some(date(2030, 12, 31)));
    }

    #[test]
    fn test_construct_date_two_digit_years() {
        assert_eq!(construct_date(1, 1, 99), Some(date(1999, 1, 1)));
        assert_eq!(construct_date(1, 1, 0), Some(date(1900, 1, 1)));
        assert_eq!(construct_date(1, 1, 100), Some(date(100, 1, 1)));
    }

    #[test]
    fn test_construct_date_day_zero() {
        assert_eq!(construct_date(0, 3, 2030), Some(date(2030, 2, 28)));
    }

    #[test]
    fn test_construct_date_rejects_bad_month() {
        assert_eq!(construct_date(1, 13, 2030), None);
    }

    #[test]
    fn test_pattern_is_ascii_only() {
        // Arabic-Indic digits
        assert_eq!(parse_due_date("٠١/٠١/٢٠٣٠"), None);
        assert_eq!(parse_due_date("01/01/2030"), Some(date(2030, 1, 1)));
    }

    #[test]
    fn test_pattern_rejects_surrounding_text() {
        assert_eq!(parse_due_date(" 01/01/2030"), None);
        assert_eq!(parse_due_date("01/01/2030\n"), None);
        assert_eq!(parse_due_date("01/01/20301"), None);
        assert_eq!(parse_due_date("1/1/2030"), None);
        assert_eq!(parse_due_date("01-01-2030"), None);
    }

    #[test]
    fn test_name_counts_characters_not_bytes() {
        // 8 characters, 16 bytes
        assert!(validate_name(Some("éééééééé")).is_ok());
    }

    #[test]
    fn test_priority_empty_is_default() {
        assert_eq!(validate_priority(Some("")), Ok(Priority::Basse));
        assert_eq!(validate_priority(None), Ok(Priority::Basse));
        assert_eq!(validate_priority(Some("basse")), Err(FieldErrorKind::InvalidEnum));
        assert_eq!(validate_priority(Some("Elevee")), Err(FieldErrorKind::InvalidEnum));
    }

    #[test]
    fn test_display_lists_fields() {
        let input = TaskInput::default();
        let now = date(2025, 1, 1).and_hms_opt(12, 0, 0).unwrap();
        let err = validate(&input, now).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid task input: name value is required, dueDate value is required"
        );
    }
}
