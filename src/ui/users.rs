use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::app::{AppState, FormField, InputMode};

pub fn render_users_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }
    let rpp = app.rows_per_page.max(1);

    let start = ((app.selected_user_index / rpp) * rpp).min(app.users.len());
    let end = (start + rpp).min(app.users.len());
    let slice = &app.users[start..end];
    let focused = app.input_mode == InputMode::Normal;

    let rows = slice.iter().enumerate().map(|(i, u)| {
        let absolute_index = start + i;
        let style = if absolute_index == app.selected_user_index && focused {
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(vec![
            Cell::from(u.id.to_string()),
            Cell::from(u.name.clone()),
            Cell::from(u.email.clone()),
        ])
        .style(style)
    });

    let widths = [Constraint::Length(10), Constraint::Percentage(40), Constraint::Percentage(60)];
    let header = Row::new(vec!["ID", "NAME", "EMAIL"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let title = if app.loading { "User List (loading\u{2026})" } else { "User List" };
    let border = if focused { app.theme.focus_border } else { app.theme.border };
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

/// Render the create form: name and email inputs plus the submit hint.
pub fn render_user_form(f: &mut Frame, area: Rect, app: &AppState) {
    let focused = app.input_mode == InputMode::Form;
    let border = if focused { app.theme.focus_border } else { app.theme.border };
    let block = Block::default()
        .title("New user")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let fields = [
        (FormField::Name, "Name", "Enter name", app.form.name.as_str(), rows[0]),
        (FormField::Email, "Email", "Enter email", app.form.email.as_str(), rows[1]),
    ];
    for (field, label, placeholder, value, rect) in fields {
        let active = focused && app.form.focus == field;
        let text = if value.is_empty() {
            Span::styled(placeholder, Style::default().fg(app.theme.muted))
        } else {
            Span::styled(value, Style::default().fg(app.theme.text))
        };
        let p = Paragraph::new(Line::from(text)).block(
            Block::default()
                .title(label)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if active { app.theme.focus_border } else { app.theme.border })),
        );
        f.render_widget(p, rect);

        if active && rect.width > 2 && rect.height > 2 {
            let offset = (value.chars().count() as u16).min(rect.width.saturating_sub(3));
            f.set_cursor_position(Position::new(rect.x + 1 + offset, rect.y + 1));
        }
    }

    let button = Paragraph::new(Line::from(Span::styled(
        " Add User ",
        Style::default()
            .fg(app.theme.on_accent)
            .bg(app.theme.success)
            .add_modifier(Modifier::BOLD),
    )));
    f.render_widget(button, rows[2]);
}
