pub mod components;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode};

pub fn render(f: &mut Frame, app: &mut AppState) {
    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background)),
        f.area(),
    );

    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(root[1]);

    let hint = match app.input_mode {
        InputMode::Normal => "n: new user; d: delete; t: theme; ?: help; q: quit",
        InputMode::Form => "Tab: next field; Enter: add user; Esc: back to list",
        InputMode::Confirm => "y/n, or \u{2190}/\u{2192}/Tab then Enter; Esc: cancel",
        InputMode::Help => "Esc: close help",
    };
    let p = Paragraph::new(format!("users:{} | {hint}", app.users.len()))
        .block(
            Block::default()
                .title("userdeck")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, root[0]);

    users::render_users_table(f, body[0], app);
    users::render_user_form(f, body[1], app);

    components::render_notification(f, root[2], app);
    components::render_status_bar(f, root[3], app);

    match app.input_mode {
        InputMode::Confirm => components::render_confirm_modal(f, f.area(), app),
        InputMode::Help => components::render_help_modal(f, f.area(), app),
        InputMode::Normal | InputMode::Form => {}
    }
}
