// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::forum_panel;
use crate::ui::modal;
use crate::ui::notifications;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Panel(forum_panel::Message),
    Notification(notifications::NotificationMessage),
    Modal(modal::ModalMessage),
    /// Periodic tick driving transitions, auto-dismiss, search debounce and
    /// draining handler commands.
    Tick(Instant),
    /// A handler task returned. Carries the action name for logging.
    ActionFinished(&'static str),
}

/// Runtime flags passed in from the CLI or launcher to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional forum base URL, overriding `server.base_url` from the config.
    pub server: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `FORUM_DESK_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
