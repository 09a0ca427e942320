//! Application state types and entry glue.
//!
//! `AppState` is the single view-model owned by the run loop. Network work is
//! described by `ApiCommand`s handed out by the state transitions below and
//! comes back as `ApiEvent`s, which are applied on the UI thread.
//!
pub mod keymap;
pub mod update;

use std::time::{Duration, Instant};

use ratatui::style::Color;

use crate::api::{NewUser, User, UserId};
use crate::error::ApiError;
use self::keymap::Keymap;

pub const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_millis(3000);

pub const MSG_CREATED: &str = "User added successfully";
pub const MSG_CREATE_FAILED: &str = "Failed to add user";
pub const MSG_DELETED: &str = "User deleted successfully";
pub const MSG_DELETE_FAILED: &str = "Failed to delete user";
pub const MSG_REQUIRED: &str = "Name and email are required";

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// Users list has focus.
    Normal,
    /// Create form has focus.
    Form,
    /// Delete confirmation dialog is open.
    Confirm,
    Help,
}

/// Which form input is focused.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub focus: FormField,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            focus: FormField::Name,
        }
    }
}

impl FormState {
    /// Empty both inputs and put focus back on the name field.
    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.focus = FormField::Name;
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Name,
        };
    }

    /// Both fields are required; anything non-empty is accepted.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty()
    }

    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient snackbar message.
#[derive(Clone, Debug)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub shown_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant, timeout: Duration) -> bool {
        now.saturating_duration_since(self.shown_at) >= timeout
    }
}

/// Pending delete awaiting an explicit yes/no.
#[derive(Clone, Debug)]
pub struct Confirmation {
    pub target: User,
    /// 0 = Yes, 1 = No. Defaults to No.
    pub selected: usize,
}

/// Network work requested by a state transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiCommand {
    LoadUsers,
    CreateUser(NewUser),
    DeleteUser(UserId),
}

/// Completion of an `ApiCommand`.
#[derive(Debug)]
pub enum ApiEvent {
    UsersLoaded(Result<Vec<User>, ApiError>),
    UserCreated {
        request: NewUser,
        result: Result<User, ApiError>,
    },
    UserDeleted {
        id: UserId,
        result: Result<(), ApiError>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub background: Color,
    pub title: Color,
    pub border: Color,
    pub focus_border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub success: Color,
    pub error: Color,
    pub on_accent: Color,
}

impl Theme {
    /// Catppuccin Latte.
    pub fn light() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0x4c, 0x4f, 0x69),         // text
            muted: Color::Rgb(0x8c, 0x8f, 0xa1),        // overlay1
            background: Color::Rgb(0xef, 0xf1, 0xf5),   // base
            title: Color::Rgb(0x88, 0x39, 0xef),        // mauve
            border: Color::Rgb(0xac, 0xb0, 0xbe),       // surface2
            focus_border: Color::Rgb(0x1e, 0x66, 0xf5), // blue
            header_bg: Color::Rgb(0xcc, 0xd0, 0xda),    // surface0
            header_fg: Color::Rgb(0x72, 0x87, 0xfd),    // lavender
            status_bg: Color::Rgb(0xbc, 0xc0, 0xcc),    // surface1
            status_fg: Color::Rgb(0x4c, 0x4f, 0x69),    // text
            highlight_fg: Color::Rgb(0xdf, 0x8e, 0x1d), // yellow
            highlight_bg: Color::Rgb(0xbc, 0xc0, 0xcc), // surface1
            success: Color::Rgb(0x40, 0xa0, 0x2b),      // green
            error: Color::Rgb(0xd2, 0x0f, 0x39),        // red
            on_accent: Color::Rgb(0xef, 0xf1, 0xf5),    // base
        }
    }

    /// Catppuccin Mocha.
    pub fn dark() -> Self {
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            muted: Color::Rgb(0x7f, 0x84, 0x9c),
            background: Color::Rgb(0x1e, 0x1e, 0x2e),
            title: Color::Rgb(0xcb, 0xa6, 0xf7),
            border: Color::Rgb(0x58, 0x5b, 0x70),
            focus_border: Color::Rgb(0x89, 0xb4, 0xfa),
            header_bg: Color::Rgb(0x31, 0x32, 0x44),
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf),
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a),
            success: Color::Rgb(0xa6, 0xe3, 0xa1),
            error: Color::Rgb(0xf3, 0x8b, 0xa8),
            on_accent: Color::Rgb(0x11, 0x11, 0x1b),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }
}

pub struct AppState {
    pub users: Vec<User>,
    pub selected_user_index: usize,
    pub rows_per_page: usize,
    pub input_mode: InputMode,
    pub form: FormState,
    pub notification: Option<Notification>,
    pub notification_timeout: Duration,
    pub confirmation: Option<Confirmation>,
    pub theme_mode: ThemeMode,
    pub theme: Theme,
    pub keymap: Keymap,
    /// Requests issued but not yet completed.
    pub pending: usize,
    /// Create bodies sent and not yet answered.
    pub creating: Vec<NewUser>,
    pub loading: bool,
}

impl AppState {
    pub fn new(theme_mode: ThemeMode, notification_timeout: Duration, keymap: Keymap) -> Self {
        Self {
            users: Vec::new(),
            selected_user_index: 0,
            rows_per_page: 10,
            input_mode: InputMode::Normal,
            form: FormState::default(),
            notification: None,
            notification_timeout,
            confirmation: None,
            theme_mode,
            theme: Theme::for_mode(theme_mode),
            keymap,
            pending: 0,
            creating: Vec::new(),
            loading: false,
        }
    }

    /// Start the one-time initial load.
    pub fn begin_load(&mut self) -> ApiCommand {
        self.loading = true;
        self.pending += 1;
        ApiCommand::LoadUsers
    }

    /// Validate the form and build a create request.
    ///
    /// The form keeps its contents until the server confirms the create.
    /// Resubmitting a body that is still in flight is ignored.
    pub fn submit_form(&mut self, now: Instant) -> Option<ApiCommand> {
        if !self.form.is_complete() {
            self.notify(NotificationKind::Error, MSG_REQUIRED, now);
            return None;
        }
        let new_user = self.form.to_new_user();
        if self.creating.contains(&new_user) {
            tracing::debug!(name = %new_user.name, "create already in flight");
            return None;
        }
        self.creating.push(new_user.clone());
        self.pending += 1;
        Some(ApiCommand::CreateUser(new_user))
    }

    /// Open the confirmation dialog for the selected user.
    pub fn request_delete(&mut self) -> bool {
        let Some(target) = self.selected_user().cloned() else {
            return false;
        };
        self.confirmation = Some(Confirmation { target, selected: 1 });
        self.input_mode = InputMode::Confirm;
        true
    }

    /// Close the dialog and issue the delete for its target.
    pub fn confirm_delete(&mut self) -> Option<ApiCommand> {
        let confirmation = self.confirmation.take()?;
        self.input_mode = InputMode::Normal;
        self.pending += 1;
        Some(ApiCommand::DeleteUser(confirmation.target.id))
    }

    pub fn cancel_delete(&mut self) {
        self.confirmation = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn apply_event(&mut self, event: ApiEvent, now: Instant) {
        self.pending = self.pending.saturating_sub(1);
        match event {
            ApiEvent::UsersLoaded(result) => self.on_users_loaded(result),
            ApiEvent::UserCreated { request, result } => self.on_user_created(request, result, now),
            ApiEvent::UserDeleted { id, result } => self.on_user_deleted(id, result, now),
        }
    }

    fn on_users_loaded(&mut self, result: Result<Vec<User>, ApiError>) {
        self.loading = false;
        match result {
            Ok(users) => {
                let mut deduped: Vec<User> = Vec::with_capacity(users.len());
                for user in users {
                    if deduped.iter().any(|u| u.id == user.id) {
                        tracing::warn!(id = %user.id, "dropping duplicate user id from list response");
                        continue;
                    }
                    deduped.push(user);
                }
                self.users = deduped;
                self.clamp_selection();
            }
            // The initial load has no user-facing error path.
            Err(e) => tracing::warn!(error = %e, "failed to load users"),
        }
    }

    fn on_user_created(&mut self, request: NewUser, result: Result<User, ApiError>, now: Instant) {
        if let Some(pos) = self.creating.iter().position(|r| *r == request) {
            self.creating.remove(pos);
        }
        match result {
            Ok(user) => {
                if self.users.iter().any(|u| u.id == user.id) {
                    tracing::warn!(id = %user.id, "created user id already listed");
                } else {
                    self.users.push(user);
                }
                // A draft typed since the submit is left alone.
                if self.form.to_new_user() == request {
                    self.form.clear();
                }
                self.notify(NotificationKind::Success, MSG_CREATED, now);
            }
            Err(e) => {
                tracing::error!(error = %e, "create user failed");
                self.notify(NotificationKind::Error, MSG_CREATE_FAILED, now);
            }
        }
    }

    fn on_user_deleted(&mut self, id: UserId, result: Result<(), ApiError>, now: Instant) {
        match result {
            Ok(()) => {
                self.users.retain(|u| u.id != id);
                self.clamp_selection();
                self.notify(NotificationKind::Success, MSG_DELETED, now);
            }
            Err(e) => {
                tracing::error!(%id, error = %e, "delete user failed");
                self.notify(NotificationKind::Error, MSG_DELETE_FAILED, now);
            }
        }
    }

    /// Show a notification, replacing any current one.
    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>, now: Instant) {
        self.notification = Some(Notification {
            message: message.into(),
            kind,
            shown_at: now,
        });
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Drop the notification once its timeout has elapsed.
    pub fn expire_notification(&mut self, now: Instant) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now, self.notification_timeout))
        {
            self.notification = None;
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme_mode = self.theme_mode.toggled();
        self.theme = Theme::for_mode(self.theme_mode);
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.users.get(self.selected_user_index)
    }

    pub fn select_prev(&mut self) {
        self.selected_user_index = self.selected_user_index.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected_user_index + 1 < self.users.len() {
            self.selected_user_index += 1;
        }
    }

    pub fn page_up(&mut self) {
        let rpp = self.rows_per_page.max(1);
        self.selected_user_index = self.selected_user_index.saturating_sub(rpp);
    }

    pub fn page_down(&mut self) {
        let rpp = self.rows_per_page.max(1);
        let new_idx = self.selected_user_index.saturating_add(rpp);
        self.selected_user_index = new_idx.min(self.users.len().saturating_sub(1));
    }

    fn clamp_selection(&mut self) {
        self.selected_user_index = self.selected_user_index.min(self.users.len().saturating_sub(1));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ThemeMode::Light, DEFAULT_NOTIFICATION_TIMEOUT, Keymap::default())
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn user(id: i64, name: &str) -> User {
        User {
            id: UserId::Number(id),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }

    fn body(name: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }

    fn fill_form(app: &mut AppState, name: &str) {
        let draft = body(name);
        app.form.name = draft.name;
        app.form.email = draft.email;
    }

    fn status_error(status: StatusCode) -> ApiError {
        ApiError::Status {
            method: reqwest::Method::POST,
            url: "http://localhost/users".into(),
            status,
        }
    }

    fn loaded(app: &mut AppState, users: Vec<User>) {
        let cmd = app.begin_load();
        assert_eq!(cmd, ApiCommand::LoadUsers);
        app.apply_event(ApiEvent::UsersLoaded(Ok(users)), Instant::now());
    }

    #[test]
    fn load_replaces_list_and_clears_loading() {
        let mut app = AppState::default();
        app.users = vec![user(99, "Stale")];
        loaded(&mut app, vec![user(1, "Ada"), user(2, "Bob")]);
        let ids: Vec<_> = app.users.iter().map(|u| u.id.clone()).collect();
        assert_eq!(ids, vec![UserId::Number(1), UserId::Number(2)]);
        assert!(!app.loading);
        assert_eq!(app.pending, 0);
    }

    #[test]
    fn load_drops_duplicate_ids() {
        let mut app = AppState::default();
        loaded(&mut app, vec![user(1, "Ada"), user(1, "Ada again"), user(2, "Bob")]);
        assert_eq!(app.users.len(), 2);
        assert_eq!(app.users[0].name, "Ada");
    }

    #[test]
    fn failed_load_is_silent() {
        let mut app = AppState::default();
        app.begin_load();
        app.apply_event(
            ApiEvent::UsersLoaded(Err(status_error(StatusCode::INTERNAL_SERVER_ERROR))),
            Instant::now(),
        );
        assert!(app.users.is_empty());
        assert!(app.notification.is_none());
        assert!(!app.loading);
    }

    #[test]
    fn submit_requires_both_fields() {
        let mut app = AppState::default();
        app.form.name = "Ada".into();
        assert!(app.submit_form(Instant::now()).is_none());
        assert_eq!(app.pending, 0);
        let n = app.notification.as_ref().unwrap();
        assert_eq!(n.kind, NotificationKind::Error);
        assert_eq!(n.message, MSG_REQUIRED);
        assert_eq!(app.form.name, "Ada");
    }

    #[test]
    fn successful_create_appends_and_clears_form() {
        let mut app = AppState::default();
        loaded(&mut app, vec![user(1, "Ada")]);
        app.form.name = "Bob".into();
        app.form.email = "bob@example.com".into();
        app.form.focus = FormField::Email;

        let cmd = app.submit_form(Instant::now()).unwrap();
        assert_eq!(
            cmd,
            ApiCommand::CreateUser(NewUser {
                name: "Bob".into(),
                email: "bob@example.com".into()
            })
        );
        assert_eq!(app.pending, 1);

        app.apply_event(
            ApiEvent::UserCreated {
                request: body("Bob"),
                result: Ok(user(2, "Bob")),
            },
            Instant::now(),
        );
        assert_eq!(app.users.len(), 2);
        assert_eq!(app.users[1].id, UserId::Number(2));
        assert_eq!(app.form, FormState::default());
        assert_eq!(app.notification.as_ref().unwrap().kind, NotificationKind::Success);
        assert_eq!(app.pending, 0);
    }

    #[test]
    fn failed_create_keeps_list_and_form() {
        let mut app = AppState::default();
        loaded(&mut app, vec![user(1, "Ada")]);
        app.form.name = "Bob".into();
        app.form.email = "bob@example.com".into();
        app.submit_form(Instant::now()).unwrap();
        app.apply_event(
            ApiEvent::UserCreated {
                request: body("Bob"),
                result: Err(status_error(StatusCode::BAD_REQUEST)),
            },
            Instant::now(),
        );
        assert_eq!(app.users, vec![user(1, "Ada")]);
        assert!(app.creating.is_empty());
        assert_eq!(app.form.name, "Bob");
        let n = app.notification.as_ref().unwrap();
        assert_eq!(n.kind, NotificationKind::Error);
        assert_eq!(n.message, MSG_CREATE_FAILED);
    }

    #[test]
    fn created_user_with_known_id_is_not_duplicated() {
        let mut app = AppState::default();
        loaded(&mut app, vec![user(1, "Ada")]);
        app.apply_event(
            ApiEvent::UserCreated {
                request: body("Ada"),
                result: Ok(user(1, "Ada")),
            },
            Instant::now(),
        );
        assert_eq!(app.users.len(), 1);
    }

    #[test]
    fn resubmitting_in_flight_body_is_ignored() {
        let mut app = AppState::default();
        fill_form(&mut app, "Ada");
        assert!(app.submit_form(Instant::now()).is_some());
        assert!(app.submit_form(Instant::now()).is_none());
        assert_eq!(app.pending, 1);
        assert_eq!(app.creating, vec![body("Ada")]);

        app.apply_event(
            ApiEvent::UserCreated {
                request: body("Ada"),
                result: Err(status_error(StatusCode::BAD_GATEWAY)),
            },
            Instant::now(),
        );
        // Once answered, the same body may be retried.
        assert!(app.submit_form(Instant::now()).is_some());
        assert_eq!(app.pending, 1);
    }

    #[test]
    fn draft_typed_during_create_survives_success() {
        let mut app = AppState::default();
        fill_form(&mut app, "Ada");
        app.submit_form(Instant::now()).unwrap();
        fill_form(&mut app, "Bob");
        app.form.focus = FormField::Email;

        app.apply_event(
            ApiEvent::UserCreated {
                request: body("Ada"),
                result: Ok(user(1, "Ada")),
            },
            Instant::now(),
        );
        assert_eq!(app.users, vec![user(1, "Ada")]);
        assert_eq!(app.form.to_new_user(), body("Bob"));
        assert_eq!(app.form.focus, FormField::Email);
        assert_eq!(app.notification.as_ref().unwrap().message, MSG_CREATED);
    }

    #[test]
    fn overlapping_requests_complete_out_of_order() {
        let mut app = AppState::default();
        loaded(&mut app, vec![user(1, "Ada"), user(2, "Bob")]);

        fill_form(&mut app, "Cy");
        let first = app.submit_form(Instant::now()).unwrap();
        fill_form(&mut app, "Dee");
        let second = app.submit_form(Instant::now()).unwrap();
        assert_ne!(first, second);
        app.selected_user_index = 0;
        assert!(app.request_delete());
        assert_eq!(app.confirm_delete(), Some(ApiCommand::DeleteUser(UserId::Number(1))));
        assert_eq!(app.pending, 3);

        // Second create fails first, then the delete lands, then the first create.
        app.apply_event(
            ApiEvent::UserCreated {
                request: body("Dee"),
                result: Err(status_error(StatusCode::INTERNAL_SERVER_ERROR)),
            },
            Instant::now(),
        );
        assert_eq!(app.pending, 2);
        assert_eq!(app.notification.as_ref().unwrap().message, MSG_CREATE_FAILED);

        app.apply_event(
            ApiEvent::UserDeleted {
                id: UserId::Number(1),
                result: Ok(()),
            },
            Instant::now(),
        );
        assert_eq!(app.pending, 1);
        assert_eq!(app.notification.as_ref().unwrap().message, MSG_DELETED);

        app.apply_event(
            ApiEvent::UserCreated {
                request: body("Cy"),
                result: Ok(user(3, "Cy")),
            },
            Instant::now(),
        );
        assert_eq!(app.pending, 0);
        assert!(app.creating.is_empty());
        let ids: Vec<_> = app.users.iter().map(|u| u.id.clone()).collect();
        assert_eq!(ids, vec![UserId::Number(2), UserId::Number(3)]);
        let n = app.notification.as_ref().unwrap();
        assert_eq!(n.kind, NotificationKind::Success);
        assert_eq!(n.message, MSG_CREATED);
        // The failed draft is still in the form for a retry.
        assert_eq!(app.form.to_new_user(), body("Dee"));
    }

    #[test]
    fn confirm_delete_removes_only_target() {
        let mut app = AppState::default();
        loaded(&mut app, vec![user(1, "Ada"), user(2, "Bob"), user(3, "Cy")]);
        app.selected_user_index = 1;
        assert!(app.request_delete());
        assert_eq!(app.input_mode, InputMode::Confirm);
        assert_eq!(app.confirmation.as_ref().unwrap().target.id, UserId::Number(2));

        let cmd = app.confirm_delete().unwrap();
        assert_eq!(cmd, ApiCommand::DeleteUser(UserId::Number(2)));
        assert!(app.confirmation.is_none());
        assert_eq!(app.input_mode, InputMode::Normal);

        app.apply_event(
            ApiEvent::UserDeleted {
                id: UserId::Number(2),
                result: Ok(()),
            },
            Instant::now(),
        );
        let names: Vec<_> = app.users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Ada", "Cy"]);
        assert_eq!(app.notification.as_ref().unwrap().message, MSG_DELETED);
    }

    #[test]
    fn cancel_delete_issues_nothing() {
        let mut app = AppState::default();
        loaded(&mut app, vec![user(1, "Ada")]);
        app.request_delete();
        app.cancel_delete();
        assert!(app.confirmation.is_none());
        assert!(app.confirm_delete().is_none());
        assert_eq!(app.users.len(), 1);
        assert_eq!(app.pending, 0);
    }

    #[test]
    fn request_delete_on_empty_list_does_nothing() {
        let mut app = AppState::default();
        assert!(!app.request_delete());
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn failed_delete_keeps_list() {
        let mut app = AppState::default();
        loaded(&mut app, vec![user(1, "Ada")]);
        app.request_delete();
        app.confirm_delete();
        app.apply_event(
            ApiEvent::UserDeleted {
                id: UserId::Number(1),
                result: Err(status_error(StatusCode::NOT_FOUND)),
            },
            Instant::now(),
        );
        assert_eq!(app.users.len(), 1);
        assert_eq!(app.notification.as_ref().unwrap().message, MSG_DELETE_FAILED);
    }

    #[test]
    fn delete_of_last_row_clamps_selection() {
        let mut app = AppState::default();
        loaded(&mut app, vec![user(1, "Ada"), user(2, "Bob")]);
        app.selected_user_index = 1;
        app.apply_event(
            ApiEvent::UserDeleted {
                id: UserId::Number(2),
                result: Ok(()),
            },
            Instant::now(),
        );
        assert_eq!(app.selected_user_index, 0);
    }

    #[test]
    fn notification_expires_after_timeout() {
        let mut app = AppState::new(ThemeMode::Light, Duration::from_millis(500), Keymap::default());
        let t0 = Instant::now();
        app.notify(NotificationKind::Success, "ok", t0);
        app.expire_notification(t0 + Duration::from_millis(499));
        assert!(app.notification.is_some());
        app.expire_notification(t0 + Duration::from_millis(500));
        assert!(app.notification.is_none());
    }

    #[test]
    fn newer_notification_restarts_timer() {
        let mut app = AppState::new(ThemeMode::Light, Duration::from_millis(500), Keymap::default());
        let t0 = Instant::now();
        app.notify(NotificationKind::Success, "first", t0);
        app.notify(NotificationKind::Error, "second", t0 + Duration::from_millis(400));
        app.expire_notification(t0 + Duration::from_millis(600));
        assert_eq!(app.notification.as_ref().unwrap().message, "second");
    }

    #[test]
    fn toggle_theme_only_changes_presentation() {
        let mut app = AppState::default();
        loaded(&mut app, vec![user(1, "Ada")]);
        app.form.name = "draft".into();
        let users_before = app.users.clone();
        let form_before = app.form.clone();

        app.toggle_theme();
        assert_eq!(app.theme_mode, ThemeMode::Dark);
        assert_eq!(app.theme, Theme::dark());
        assert_eq!(app.users, users_before);
        assert_eq!(app.form, form_before);

        app.toggle_theme();
        assert_eq!(app.theme, Theme::light());
    }

    #[test]
    fn paging_stays_in_bounds() {
        let mut app = AppState::default();
        loaded(&mut app, (1..=25).map(|i| user(i, &format!("u{i}"))).collect());
        app.rows_per_page = 10;
        app.page_down();
        app.page_down();
        app.page_down();
        assert_eq!(app.selected_user_index, 24);
        app.select_next();
        assert_eq!(app.selected_user_index, 24);
        app.page_up();
        assert_eq!(app.selected_user_index, 14);
        app.page_up();
        app.page_up();
        assert_eq!(app.selected_user_index, 0);
        app.select_prev();
        assert_eq!(app.selected_user_index, 0);
    }
}
