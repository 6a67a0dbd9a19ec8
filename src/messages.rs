use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::Field;
use crate::validation::FieldErrorKind;

/// Language of user-facing text.
#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Fr => f.write_str("fr"),
            Locale::En => f.write_str("en"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fr" => Ok(Locale::Fr),
            "en" => Ok(Locale::En),
            other => Err(format!("unknown locale '{}'. Supported: fr, en.", other)),
        }
    }
}

/// Message shown next to `field` when it broke `kind`.
pub fn message(field: Field, kind: FieldErrorKind, locale: Locale) -> &'static str {
    use FieldErrorKind::*;
    match (locale, field, kind) {
        (Locale::Fr, Field::Name, Required) => "Le nom est requis",
        (Locale::Fr, Field::Name, TooShort) => "Minimum 8 caractères",
        (Locale::Fr, Field::Name, TooLong) => "Maximum 15 caractères",
        (Locale::Fr, Field::DueDate, Required) => "La date est requise",
        (Locale::Fr, Field::DueDate, FormatMismatch) => "Format jj/mm/AAAA",
        (Locale::Fr, Field::DueDate, PastDate) => "La date ne peut être antérieure à aujourd'hui",
        (Locale::Fr, Field::Priority, InvalidEnum) => "Priorité invalide",
        (Locale::Fr, _, _) => "Valeur invalide",

        (Locale::En, Field::Name, Required) => "Name is required",
        (Locale::En, Field::Name, TooShort) => "Minimum 8 characters",
        (Locale::En, Field::Name, TooLong) => "Maximum 15 characters",
        (Locale::En, Field::DueDate, Required) => "Date is required",
        (Locale::En, Field::DueDate, FormatMismatch) => "Format dd/mm/yyyy",
        (Locale::En, Field::DueDate, PastDate) => "Date cannot be earlier than today",
        (Locale::En, Field::Priority, InvalidEnum) => "Invalid priority",
        (Locale::En, _, _) => "Invalid value",
    }
}

/// Labels for the form rows and headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Title,
    Name,
    NamePlaceholder,
    DueDate,
    Priority,
    Completed,
    Submit,
    Field,
    Value,
    Message,
    Move,
    Change,
    Toggle,
    Reset,
    Quit,
}

pub fn label(label: Label, locale: Locale) -> &'static str {
    match (locale, label) {
        (Locale::Fr, Label::Title) => "Ajouter une tâche",
        (Locale::Fr, Label::Name) => "Nom",
        (Locale::Fr, Label::NamePlaceholder) => "Entrez le nom",
        (Locale::Fr, Label::DueDate) => "Date due (jj/mm/AAAA)",
        (Locale::Fr, Label::Priority) => "Priorité",
        (Locale::Fr, Label::Completed) => "Terminée",
        (Locale::Fr, Label::Submit) => "Ajouter tâche",
        (Locale::Fr, Label::Field) => "Champ",
        (Locale::Fr, Label::Value) => "Valeur",
        (Locale::Fr, Label::Message) => "Message",
        (Locale::Fr, Label::Move) => "Déplacer",
        (Locale::Fr, Label::Change) => "Changer",
        (Locale::Fr, Label::Toggle) => "Cocher",
        (Locale::Fr, Label::Reset) => "Réinitialiser",
        (Locale::Fr, Label::Quit) => "Quitter",

        (Locale::En, Label::Title) => "Add a task",
        (Locale::En, Label::Name) => "Name",
        (Locale::En, Label::NamePlaceholder) => "Enter the name",
        (Locale::En, Label::DueDate) => "Due date (dd/mm/yyyy)",
        (Locale::En, Label::Priority) => "Priority",
        (Locale::En, Label::Completed) => "Completed",
        (Locale::En, Label::Submit) => "Add task",
        (Locale::En, Label::Field) => "Field",
        (Locale::En, Label::Value) => "Value",
        (Locale::En, Label::Message) => "Message",
        (Locale::En, Label::Move) => "Move",
        (Locale::En, Label::Change) => "Change",
        (Locale::En, Label::Toggle) => "Toggle",
        (Locale::En, Label::Reset) => "Reset",
        (Locale::En, Label::Quit) => "Quit",
    }
}

/// Label of the form row that edits `field`.
pub fn field_label(field: Field, locale: Locale) -> &'static str {
    match field {
        Field::Name => label(Label::Name, locale),
        Field::DueDate => label(Label::DueDate, locale),
        Field::Priority => label(Label::Priority, locale),
    }
}
