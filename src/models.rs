use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Raw task data as captured by a form host, before validation.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    /// The task name, possibly empty.
    #[serde(default)]
    pub name: Option<String>,
    /// The due date text, expected as `DD/MM/YYYY`.
    #[serde(default)]
    pub due_date: Option<String>,
    /// One of the priority labels, or unset.
    #[serde(default)]
    pub priority: Option<String>,
    /// Completion flag. Non-boolean JSON values are read as unset.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_completed: Option<bool>,
}

impl TaskInput {
    pub fn new(name: impl Into<String>, due_date: impl Into<String>) -> Self {
        TaskInput {
            name: Some(name.into()),
            due_date: Some(due_date.into()),
            priority: None,
            is_completed: None,
        }
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.is_completed = Some(completed);
        self
    }
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_bool())
}

/// A task that passed validation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Between 8 and 15 characters.
    pub name: String,
    /// The due date, today or later.
    pub due_date: DueDate,
    pub priority: Priority,
    pub is_completed: bool,
}

/// A due date together with the text it was parsed from.
///
/// `date` is the result of calendar date construction and may differ from
/// what `raw` reads as when the day overflows the month (`31/02/2030` is
/// stored as 2030-03-03).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueDate {
    pub raw: String,
    pub date: NaiveDate,
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// Serialized as the source text, the way it was typed into the form.
impl Serialize for DueDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for DueDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let date = crate::validation::parse_due_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid due date '{}'", raw)))?;
        Ok(DueDate { raw, date })
    }
}

/// Task priority. Labels are fixed and case-sensitive.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Priority {
    #[default]
    Basse,
    Moyenne,
    #[serde(rename = "Elevée")]
    Elevee,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Basse, Priority::Moyenne, Priority::Elevee];

    pub fn label(self) -> &'static str {
        match self {
            Priority::Basse => "Basse",
            Priority::Moyenne => "Moyenne",
            Priority::Elevee => "Elevée",
        }
    }

    /// The next priority in select order, wrapping around.
    pub fn next(self) -> Priority {
        match self {
            Priority::Basse => Priority::Moyenne,
            Priority::Moyenne => Priority::Elevee,
            Priority::Elevee => Priority::Basse,
        }
    }

    pub fn previous(self) -> Priority {
        match self {
            Priority::Basse => Priority::Elevee,
            Priority::Moyenne => Priority::Basse,
            Priority::Elevee => Priority::Moyenne,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL.into_iter().find(|p| p.label() == s).ok_or(())
    }
}

/// The form fields that can carry a validation error.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    DueDate,
    Priority,
}

impl Field {
    /// The key used for this field in JSON input and error maps.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::DueDate => "dueDate",
            Field::Priority => "priority",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
