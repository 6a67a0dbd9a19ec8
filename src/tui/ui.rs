use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use crate::messages::{label, Label, Locale};
use super::app::{App, FocusField, Status};

pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Due date
            Constraint::Length(3), // Priority
            Constraint::Length(3), // Completed
            Constraint::Min(0),    // Session log
            Constraint::Length(3)  // Help
        ].as_ref())
        .split(f.area());

    for (i, focus) in FocusField::ALL.iter().enumerate() {
        render_row(f, app, *focus, chunks[i]);
    }

    let rows: Vec<Row> = app
        .submitted
        .iter()
        .rev()
        .map(|t| {
            Row::new(vec![
                Cell::from(t.name.clone()),
                Cell::from(t.due_date.raw.clone()),
                Cell::from(t.priority.label()),
                Cell::from(if t.is_completed { "✔" } else { "" }),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let title = match &app.status {
        Status::Idle => label(Label::Title, app.locale).to_string(),
        Status::Accepted(name) => format!("{} ✔ {}", label(Label::Title, app.locale), name),
        Status::Rejected(n) => format!("{} ✘ {}", label(Label::Title, app.locale), n),
    };

    let table = Table::new(rows, widths)
        .header(Row::new(vec![
            label(Label::Name, app.locale),
            label(Label::DueDate, app.locale),
            label(Label::Priority, app.locale),
            label(Label::Completed, app.locale),
        ])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .bottom_margin(1))
        .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(table, chunks[4]);

    let help = Paragraph::new(help_text(app.focus, app.locale))
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, chunks[5]);
}

fn render_row(f: &mut Frame, app: &App, focus: FocusField, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)].as_ref())
        .split(area);

    let locale = app.locale;
    let (title, value) = match focus {
        FocusField::Name => {
            let value = if app.name.is_empty() && app.focus != FocusField::Name {
                Span::styled(label(Label::NamePlaceholder, locale), Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(app.name.clone())
            };
            (label(Label::Name, locale), value)
        }
        FocusField::DueDate => (label(Label::DueDate, locale), Span::raw(app.due_date.clone())),
        FocusField::Priority => (
            label(Label::Priority, locale),
            Span::raw(format!("< {} >", app.priority.label())),
        ),
        FocusField::Completed => (
            label(Label::Completed, locale),
            Span::raw(if app.is_completed { "[x]" } else { "[ ]" }),
        ),
    };

    let border = if app.focus == focus {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let input = Paragraph::new(Line::from(value))
        .block(Block::default().borders(Borders::ALL).border_style(border).title(title));
    f.render_widget(input, cols[0]);

    if let Some(text) = focus.field().and_then(|field| app.error_message(field)) {
        let error = Paragraph::new(text)
            .style(Style::default().fg(Color::Red))
            .block(Block::default().borders(Borders::NONE))
            .wrap(ratatui::widgets::Wrap { trim: true });
        // One line down to sit level with the input text.
        let area = Rect { y: cols[1].y.saturating_add(1), height: cols[1].height.saturating_sub(1), ..cols[1] };
        f.render_widget(error, area);
    }

    if app.focus == focus && focus.is_text() {
        let len = match focus {
            FocusField::Name => app.name.chars().count(),
            _ => app.due_date.chars().count(),
        };
        let x = cols[0]
            .x
            .saturating_add(u16::try_from(len).unwrap_or(u16::MAX))
            .saturating_add(1)
            .min(cols[0].right().saturating_sub(2));
        f.set_cursor_position((x, cols[0].y.saturating_add(1)));
    }
}

fn help_text(focus: FocusField, locale: Locale) -> String {
    let l = |which| label(which, locale);
    let common = format!(
        "Enter: {} | Tab/↑↓: {} | Esc: {}",
        l(Label::Submit),
        l(Label::Move),
        l(Label::Reset)
    );
    match focus {
        FocusField::Name | FocusField::DueDate => format!("{} | Ctrl-C: {}", common, l(Label::Quit)),
        FocusField::Priority => {
            format!("{} | ←/→/Space: {} | q: {}", common, l(Label::Change), l(Label::Quit))
        }
        FocusField::Completed => {
            format!("{} | Space: {} | q: {}", common, l(Label::Toggle), l(Label::Quit))
        }
    }
}
