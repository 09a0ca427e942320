use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::api::ApiClient;
use crate::app::keymap::KeyAction;
use crate::app::{ApiCommand, ApiEvent, AppState, FormField, InputMode};
use crate::ui;

/// What the run loop should do after a key press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    None,
    Quit,
    Dispatch(ApiCommand),
}

/// Runs `ApiCommand`s on the tokio runtime and reports completions over a channel.
pub struct Dispatcher {
    client: Arc<ApiClient>,
    runtime: Handle,
    tx: UnboundedSender<ApiEvent>,
}

impl Dispatcher {
    pub fn new(client: ApiClient, runtime: Handle) -> (Self, UnboundedReceiver<ApiEvent>) {
        let (tx, rx) = unbounded_channel();
        let dispatcher = Self {
            client: Arc::new(client),
            runtime,
            tx,
        };
        (dispatcher, rx)
    }

    /// Fire and forget; the completion arrives on the receiver.
    pub fn dispatch(&self, command: ApiCommand) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let event = execute(&client, command).await;
            // The receiver is gone only once the UI has quit.
            let _ = tx.send(event);
        });
    }
}

/// Perform one command against the API.
pub async fn execute(client: &ApiClient, command: ApiCommand) -> ApiEvent {
    match command {
        ApiCommand::LoadUsers => ApiEvent::UsersLoaded(client.list_users().await),
        ApiCommand::CreateUser(new_user) => {
            let result = client.create_user(&new_user).await;
            ApiEvent::UserCreated {
                request: new_user,
                result,
            }
        }
        ApiCommand::DeleteUser(id) => {
            let result = client.delete_user(&id).await;
            ApiEvent::UserDeleted { id, result }
        }
    }
}

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut app: AppState,
    client: ApiClient,
    runtime: Handle,
) -> Result<()> {
    let (dispatcher, mut events) = Dispatcher::new(client, runtime);
    dispatcher.dispatch(app.begin_load());

    loop {
        while let Ok(api_event) = events.try_recv() {
            app.apply_event(api_event, Instant::now());
        }
        app.expire_notification(Instant::now());

        terminal.draw(|f| {
            ui::render(f, &mut app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match handle_key(&mut app, key, Instant::now()) {
                        KeyOutcome::Quit => break,
                        KeyOutcome::Dispatch(command) => dispatcher.dispatch(command),
                        KeyOutcome::None => {}
                    }
                }
            }
        }
    }

    tracing::info!(pending = app.pending, "exiting");
    Ok(())
}

/// Apply one key press to the state.
pub fn handle_key(app: &mut AppState, key: KeyEvent, now: Instant) -> KeyOutcome {
    match app.input_mode {
        InputMode::Normal => handle_list_key(app, key),
        InputMode::Form => handle_form_key(app, key, now),
        InputMode::Confirm => handle_confirm_key(app, key.code),
        InputMode::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.input_mode = InputMode::Normal;
            }
            KeyOutcome::None
        }
    }
}

fn handle_list_key(app: &mut AppState, key: KeyEvent) -> KeyOutcome {
    let Some(action) = app.keymap.resolve(&key) else {
        return KeyOutcome::None;
    };
    match action {
        KeyAction::Quit => return KeyOutcome::Quit,
        KeyAction::NewUser | KeyAction::SwitchPane => {
            app.form.focus = FormField::Name;
            app.input_mode = InputMode::Form;
        }
        KeyAction::DeleteSelection => {
            app.request_delete();
        }
        KeyAction::ToggleTheme => app.toggle_theme(),
        KeyAction::DismissNotification => app.dismiss_notification(),
        KeyAction::OpenHelp => app.input_mode = InputMode::Help,
        KeyAction::MoveUp => app.select_prev(),
        KeyAction::MoveDown => app.select_next(),
        KeyAction::PageUp => app.page_up(),
        KeyAction::PageDown => app.page_down(),
        KeyAction::Ignore => {}
    }
    KeyOutcome::None
}

fn handle_form_key(app: &mut AppState, key: KeyEvent, now: Instant) -> KeyOutcome {
    match key.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Enter => {
            if let Some(command) = app.submit_form(now) {
                return KeyOutcome::Dispatch(command);
            }
        }
        KeyCode::Tab => match app.form.focus {
            FormField::Name => app.form.focus = FormField::Email,
            FormField::Email => app.input_mode = InputMode::Normal,
        },
        KeyCode::Up | KeyCode::Down | KeyCode::BackTab => app.form.focus_next(),
        KeyCode::Backspace => {
            app.form.focused_mut().pop();
        }
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            app.form.focused_mut().push(c);
        }
        _ => {}
    }
    KeyOutcome::None
}

fn handle_confirm_key(app: &mut AppState, code: KeyCode) -> KeyOutcome {
    match code {
        KeyCode::Esc | KeyCode::Char('n') => app.cancel_delete(),
        KeyCode::Char('y') => {
            if let Some(command) = app.confirm_delete() {
                return KeyOutcome::Dispatch(command);
            }
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
            if let Some(confirmation) = app.confirmation.as_mut() {
                confirmation.selected = if confirmation.selected == 0 { 1 } else { 0 };
            }
        }
        KeyCode::Enter => {
            let yes = app.confirmation.as_ref().is_some_and(|c| c.selected == 0);
            if yes {
                if let Some(command) = app.confirm_delete() {
                    return KeyOutcome::Dispatch(command);
                }
            } else {
                app.cancel_delete();
            }
        }
        _ => {}
    }
    KeyOutcome::None
}
