// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the forum panel, the
//! notification stack and the dialog manager.
//!
//! The `App` struct owns every piece of UI state. Action handlers run as
//! background tasks and reach that state only through the command channel
//! drained in [`update`].

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::config::{self, Config};
use crate::forum::bridge::{UiCommand, UiHandle};
use crate::forum::search::Debouncer;
use crate::forum::{HttpApi, Page};
use crate::i18n::fluent::I18n;
use crate::i18n::Label;
use crate::ui::forum_panel;
use crate::ui::modal;
use crate::ui::notifications;
use crate::ui::theming::ThemeMode;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    theme_mode: ThemeMode,
    panel: forum_panel::State,
    page: Page,
    notifications: notifications::Manager,
    modal: modal::Manager,
    debouncer: Debouncer,
    ui: UiHandle,
    commands: mpsc::UnboundedReceiver<UiCommand>,
    /// `None` when the HTTP client could not be built from the config.
    api: Option<Arc<HttpApi>>,
    /// Handler tasks started but not yet finished.
    in_flight: usize,
    /// Query re-run when a handler asks for a reload.
    last_search: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("logged_in", &self.page.is_logged_in())
            .field("in_flight", &self.in_flight)
            .field("dialog_open", &self.modal.is_open())
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1080;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 720;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    paths::init_cli_overrides(flags.config_dir.clone());

    // iced 0.14 requires an Fn boot closure; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self::with_config(&Config::default(), None)
    }
}

impl App {
    /// Builds the UI state from `config`, without a server connection.
    fn with_config(config: &Config, lang: Option<String>) -> Self {
        let transition = config.timing.transition();
        let (ui, commands) = UiHandle::channel();

        Self {
            i18n: I18n::new(lang, config),
            theme_mode: config.general.theme_mode,
            panel: forum_panel::State::new(),
            page: Page::new(),
            notifications: notifications::Manager::with_settings(
                transition,
                config.notifications.durations(),
            ),
            modal: modal::Manager::with_transition(transition),
            debouncer: Debouncer::new(
                config.timing.search_debounce(),
                config.timing.search_min_chars,
            ),
            ui,
            commands,
            api: None,
            in_flight: 0,
            last_search: None,
        }
    }

    /// Loads the config, applies CLI flags and connects the HTTP client.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let now = Instant::now();
        let (mut config, config_warning) = config::load();
        if let Some(server) = flags.server {
            config.server.base_url = server;
        }

        let mut app = Self::with_config(&config, flags.lang);

        match HttpApi::new(&config.server) {
            Ok(api) => {
                tracing::info!(server = %api.base_url(), "forum client ready");
                app.api = Some(Arc::new(api));
            }
            Err(err) => {
                tracing::error!(error = %err, "cannot create forum client");
                app.notifications
                    .error(Label::key("notification-server-unavailable"), now);
            }
        }

        if let Some(key) = config_warning {
            app.notifications.warning(Label::key(key), now);
        }

        (app, Task::none())
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let dialog_open = self.modal.is_open();
        let key_sub = subscription::create_dialog_key_subscription(dialog_open);
        let tick_sub = subscription::create_tick_subscription(
            self.notifications.has_notifications(),
            dialog_open,
            self.debouncer.is_pending(),
            self.in_flight,
        );

        Subscription::batch([key_sub, tick_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            panel: &mut self.panel,
            page: &mut self.page,
            notifications: &mut self.notifications,
            modal: &mut self.modal,
            debouncer: &mut self.debouncer,
            ui: &self.ui,
            commands: &mut self.commands,
            api: self.api.as_ref(),
            in_flight: &mut self.in_flight,
            last_search: &mut self.last_search,
        };
        update::update(&mut ctx, message, Instant::now())
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            panel: &self.panel,
            page: &self.page,
            notifications: &self.notifications,
            modal: &self.modal,
            in_flight: self.in_flight,
            now: Instant::now(),
        })
    }
}
