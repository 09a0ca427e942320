//! Command-line and environment configuration.
//!
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::api::DEFAULT_API_URL;
use crate::app::ThemeMode;

#[derive(Debug, Clone, Parser)]
#[command(name = "userdeck", version, about = "Manage users of a remote users API from the terminal")]
pub struct Config {
    /// Base URL of the users API.
    #[arg(long, env = "USERDECK_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: Url,

    /// How long notifications stay visible, in milliseconds.
    #[arg(long, env = "USERDECK_NOTIFY_MS", default_value_t = 3000)]
    pub notify_ms: u64,

    /// Per-request timeout in milliseconds. Requests never time out when unset.
    #[arg(long, env = "USERDECK_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Initial color theme.
    #[arg(long, value_enum, default_value_t = ThemeMode::Light)]
    pub theme: ThemeMode,

    /// Keybinding overrides (`Action = KeySpec` per line).
    #[arg(long, value_name = "PATH")]
    pub keybinds: Option<PathBuf>,

    /// Write the effective keybindings to PATH and exit.
    #[arg(long, value_name = "PATH")]
    pub dump_keybinds: Option<PathBuf>,

    /// Append logs to this file. Logging is off when unset.
    #[arg(long, env = "USERDECK_LOG", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn notification_timeout(&self) -> Duration {
        Duration::from_millis(self.notify_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
