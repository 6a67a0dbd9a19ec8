use std::collections::BTreeMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;

use crate::clock::Clock;
use crate::messages::{message, Locale};
use crate::models::{Field, Priority, TaskInput, TaskRecord};
use crate::validation::{validate, FieldErrorKind};

/// The form row that has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusField {
    Name,
    DueDate,
    Priority,
    Completed,
}

impl FocusField {
    pub const ALL: [FocusField; 4] = [
        FocusField::Name,
        FocusField::DueDate,
        FocusField::Priority,
        FocusField::Completed,
    ];

    /// Whether typed characters go into this row.
    pub fn is_text(self) -> bool {
        matches!(self, FocusField::Name | FocusField::DueDate)
    }

    /// The validated field this row edits, if any.
    pub fn field(self) -> Option<Field> {
        match self {
            FocusField::Name => Some(Field::Name),
            FocusField::DueDate => Some(Field::DueDate),
            FocusField::Priority => Some(Field::Priority),
            FocusField::Completed => None,
        }
    }
}

/// Outcome of the last submission, shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    Accepted(String),
    Rejected(usize),
}

pub struct App {
    pub locale: Locale,
    clock: Box<dyn Clock>,
    pub name: String,
    pub due_date: String,
    pub priority: Priority,
    pub is_completed: bool,
    pub focus: FocusField,
    pub errors: BTreeMap<Field, FieldErrorKind>,
    /// Records accepted during this session, oldest first.
    pub submitted: Vec<TaskRecord>,
    pub status: Status,
    pub should_quit: bool,
}

impl App {
    /// Creates a form with default values.
    pub fn new(locale: Locale, clock: Box<dyn Clock>) -> App {
        App {
            locale,
            clock,
            name: String::new(),
            due_date: String::new(),
            priority: Priority::default(),
            is_completed: false,
            focus: FocusField::Name,
            errors: BTreeMap::new(),
            submitted: Vec::new(),
            status: Status::Idle,
            should_quit: false,
        }
    }

    /// Moves focus to the next row, wrapping around.
    pub fn next_field(&mut self) {
        let i = FocusField::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = FocusField::ALL[(i + 1) % FocusField::ALL.len()];
    }

    /// Moves focus to the previous row, wrapping around.
    pub fn previous_field(&mut self) {
        let i = FocusField::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
        let len = FocusField::ALL.len();
        self.focus = FocusField::ALL[(i + len - 1) % len];
    }

    pub fn input_char(&mut self, c: char) {
        match self.focus {
            FocusField::Name => self.name.push(c),
            FocusField::DueDate => self.due_date.push(c),
            _ => return,
        }
        self.clear_focused_error();
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FocusField::Name => { self.name.pop(); }
            FocusField::DueDate => { self.due_date.pop(); }
            _ => return,
        }
        self.clear_focused_error();
    }

    pub fn cycle_priority(&mut self, forward: bool) {
        if self.focus != FocusField::Priority { return; }
        self.priority = if forward { self.priority.next() } else { self.priority.previous() };
        self.clear_focused_error();
    }

    pub fn toggle_completed(&mut self) {
        if self.focus != FocusField::Completed { return; }
        self.is_completed = !self.is_completed;
    }

    fn clear_focused_error(&mut self) {
        if let Some(field) = self.focus.field() {
            self.errors.remove(&field);
        }
    }

    /// The raw values currently in the form.
    pub fn current_input(&self) -> TaskInput {
        TaskInput {
            name: Some(self.name.clone()),
            due_date: Some(self.due_date.clone()),
            priority: Some(self.priority.label().to_string()),
            is_completed: Some(self.is_completed),
        }
    }

    /// Validates the form against the app clock.
    ///
    /// An accepted record is kept and the form resets. A rejected one keeps
    /// the input and records an error per failing field.
    pub fn submit(&mut self) {
        match validate(&self.current_input(), self.clock.now()) {
            Ok(record) => {
                debug!("Accepted task '{}' due {}", record.name, record.due_date);
                self.status = Status::Accepted(record.name.clone());
                self.submitted.push(record);
                self.reset();
            }
            Err(errors) => {
                debug!("Rejected task: {}", errors);
                self.status = Status::Rejected(errors.len());
                self.errors = errors.iter().collect();
            }
        }
    }

    /// Restores default values and clears errors. Accepted records are kept.
    pub fn reset(&mut self) {
        self.name.clear();
        self.due_date.clear();
        self.priority = Priority::default();
        self.is_completed = false;
        self.focus = FocusField::Name;
        self.errors.clear();
    }

    /// Localized error text for a field, if it failed the last submission.
    pub fn error_message(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).map(|kind| message(field, *kind, self.locale))
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Applies one key press to the form.
    ///
    /// Characters go to the name and due date rows only. `q` quits from the
    /// other rows, Ctrl-C quits from anywhere and other Ctrl chords are ignored.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('c') {
                self.quit();
            }
            return;
        }
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.previous_field(),
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => self.reset(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Right => self.cycle_priority(true),
            KeyCode::Left => self.cycle_priority(false),
            KeyCode::Char(c) if self.focus.is_text() => self.input_char(c),
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char(' ') => match self.focus {
                FocusField::Priority => self.cycle_priority(true),
                FocusField::Completed => self.toggle_completed(),
                _ => {}
            },
            _ => {}
        }
    }
}
