//! Shared UI components (status bar, snackbar, dialogs).
//!
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode, NotificationKind, ThemeMode};

/// Render the bottom status bar with mode, theme and request counters.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "LIST",
        InputMode::Form => "FORM",
        InputMode::Confirm => "CONFIRM",
        InputMode::Help => "HELP",
    };
    let theme = match app.theme_mode {
        ThemeMode::Light => "light",
        ThemeMode::Dark => "dark",
    };
    let mut msg = format!("mode: {mode}  theme: {theme}  users:{}", app.users.len());
    if app.pending > 0 {
        msg.push_str(&format!("  pending:{}", app.pending));
    }
    if app.loading {
        msg.push_str("  loading");
    }
    let p = Paragraph::new(msg).style(Style::default().fg(app.theme.status_fg).bg(app.theme.status_bg));
    f.render_widget(p, area);
}

/// Render the snackbar line. Empty when no notification is showing.
pub fn render_notification(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(n) = app.notification.as_ref() else {
        return;
    };
    let (icon, bg) = match n.kind {
        NotificationKind::Success => ("\u{2714}", app.theme.success),
        NotificationKind::Error => ("\u{2716}", app.theme.error),
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {icon} {} ", n.message),
            Style::default().fg(app.theme.on_accent).bg(bg).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  x: dismiss", Style::default().fg(app.theme.muted)),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the delete confirmation dialog for the pending target.
pub fn render_confirm_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(confirmation) = app.confirmation.as_ref() else {
        return;
    };
    let target = &confirmation.target;
    let rect = centered_rect(56, 8, area);
    let yes = if confirmation.selected == 0 { "[Yes]" } else { " Yes " };
    let no = if confirmation.selected == 1 { "[No]" } else { " No " };
    let body = format!(
        "Delete user '{}' ({})?\nThis cannot be undone.\n\n    {}    {}",
        target.name, target.email, yes, no
    );
    let p = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(app.theme.text).bg(app.theme.background))
        .block(
            Block::default()
                .title("Confirm delete")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.error)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Render the help modal with the current list bindings.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let width = 64u16.min(area.width.saturating_sub(4)).max(20);
    let height = 20u16.min(area.height.saturating_sub(2)).max(5);
    let rect = centered_rect(width, height, area);

    let entries = [
        ("Move up", KeyAction::MoveUp),
        ("Move down", KeyAction::MoveDown),
        ("Page up", KeyAction::PageUp),
        ("Page down", KeyAction::PageDown),
        ("New user", KeyAction::NewUser),
        ("Switch pane", KeyAction::SwitchPane),
        ("Delete selection", KeyAction::DeleteSelection),
        ("Toggle theme", KeyAction::ToggleTheme),
        ("Dismiss notification", KeyAction::DismissNotification),
        ("Help", KeyAction::OpenHelp),
        ("Quit", KeyAction::Quit),
    ];
    let label_w = entries.iter().map(|(l, _)| l.len()).max().unwrap_or(0);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled("User list:", Style::default().add_modifier(Modifier::BOLD))),
    ];
    for (label, action) in entries {
        let keys = app.keymap.keys_for(action).join(", ");
        lines.push(Line::from(vec![
            Span::raw(format!("  {:>width$} \u{2502} ", label, width = label_w)),
            Span::styled(keys, Style::default().add_modifier(Modifier::ITALIC)),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Form:", Style::default().add_modifier(Modifier::BOLD))));
    lines.push(Line::raw("  Type to edit; Tab/Up/Down switch field; Enter adds; Esc leaves"));

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(app.theme.text).bg(app.theme.background))
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
