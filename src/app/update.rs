// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Handler tasks never touch application state directly. They queue
//! [`UiCommand`]s which are applied here, on the UI thread, every tick and
//! whenever a task finishes.

use super::Message;
use crate::forum::action::{Action, Session};
use crate::forum::bridge::{UiCommand, UiHandle};
use crate::forum::handlers;
use crate::forum::search::Debouncer;
use crate::forum::{HttpApi, Page, PagePatch};
use crate::i18n::Label;
use crate::ui::forum_panel::{self, Event as PanelEvent};
use crate::ui::modal;
use crate::ui::notifications;
use iced::Task;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Mutable view over the application state needed by the handlers below.
pub struct UpdateContext<'a> {
    pub panel: &'a mut forum_panel::State,
    pub page: &'a mut Page,
    pub notifications: &'a mut notifications::Manager,
    pub modal: &'a mut modal::Manager,
    pub debouncer: &'a mut Debouncer,
    pub ui: &'a UiHandle,
    pub commands: &'a mut mpsc::UnboundedReceiver<UiCommand>,
    pub api: Option<&'a Arc<HttpApi>>,
    pub in_flight: &'a mut usize,
    pub last_search: &'a mut Option<String>,
}

pub fn update(ctx: &mut UpdateContext<'_>, message: Message, now: Instant) -> Task<Message> {
    match message {
        Message::Panel(message) => handle_panel_message(ctx, message, now),
        Message::Notification(message) => {
            ctx.notifications.handle_message(&message, now);
            Task::none()
        }
        Message::Modal(message) => {
            ctx.modal.handle_message(message, now);
            Task::none()
        }
        Message::Tick(now) => handle_tick(ctx, now),
        Message::ActionFinished(name) => {
            *ctx.in_flight = ctx.in_flight.saturating_sub(1);
            tracing::debug!(action = name, in_flight = *ctx.in_flight, "action finished");
            drain_commands(ctx, now)
        }
    }
}

fn handle_panel_message(
    ctx: &mut UpdateContext<'_>,
    message: forum_panel::Message,
    now: Instant,
) -> Task<Message> {
    match ctx.panel.update(message) {
        PanelEvent::None => Task::none(),
        PanelEvent::Dispatch(action) => dispatch(ctx, action, now),
        PanelEvent::SearchInput(query) => {
            ctx.debouncer.input(&query, now);
            if !ctx.debouncer.is_pending() {
                *ctx.last_search = None;
            }
            Task::none()
        }
        PanelEvent::Invalid(key) => {
            ctx.notifications.warning(Label::key(key), now);
            Task::none()
        }
    }
}

fn handle_tick(ctx: &mut UpdateContext<'_>, now: Instant) -> Task<Message> {
    ctx.notifications.tick(now);
    ctx.modal.tick(now);

    let drained = drain_commands(ctx, now);
    match ctx.debouncer.poll(now) {
        Some(query) => Task::batch([drained, dispatch(ctx, Action::Search { query }, now)]),
        None => drained,
    }
}

/// Spawns the handler for `action` with a snapshot of the session.
pub fn dispatch(ctx: &mut UpdateContext<'_>, action: Action, now: Instant) -> Task<Message> {
    let Some(api) = ctx.api.cloned() else {
        tracing::warn!(action = action.name(), "no server configured");
        ctx.notifications
            .error(Label::key("notification-server-unavailable"), now);
        return Task::none();
    };

    if let Action::Search { query } = &action {
        *ctx.last_search = Some(query.clone());
    }

    let session = Session {
        logged_in: ctx.page.is_logged_in(),
    };
    let ui = ctx.ui.clone();
    let name = action.name();
    *ctx.in_flight += 1;

    Task::perform(
        async move {
            handlers::dispatch(action, session, &ui, api.as_ref()).await;
            name
        },
        Message::ActionFinished,
    )
}

/// Applies every queued handler command.
pub fn drain_commands(ctx: &mut UpdateContext<'_>, now: Instant) -> Task<Message> {
    let mut tasks = Vec::new();

    while let Ok(command) = ctx.commands.try_recv() {
        match command {
            UiCommand::Notify { severity, message } => {
                ctx.notifications.show(message, severity, None, None, now);
            }
            UiCommand::Show(dialog) => {
                ctx.modal.show(dialog, now);
            }
            UiCommand::Patch(PagePatch::Reload) => {
                ctx.page.apply(PagePatch::Reload);
                if let Some(query) = ctx.last_search.clone() {
                    tasks.push(dispatch(ctx, Action::Search { query }, now));
                }
            }
            UiCommand::Patch(patch) => ctx.page.apply(patch),
        }
    }

    Task::batch(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forum::page::{VoteKind, VoteTarget};
    use crate::forum::Ui;
    use crate::ui::modal::ConfirmOptions;
    use crate::ui::notifications::Severity;

    struct Fixture {
        panel: forum_panel::State,
        page: Page,
        notifications: notifications::Manager,
        modal: modal::Manager,
        debouncer: Debouncer,
        ui: UiHandle,
        commands: mpsc::UnboundedReceiver<UiCommand>,
        in_flight: usize,
        last_search: Option<String>,
    }

    impl Fixture {
        fn new() -> Self {
            let (ui, commands) = UiHandle::channel();
            Self {
                panel: forum_panel::State::new(),
                page: Page::new(),
                notifications: notifications::Manager::new(),
                modal: modal::Manager::new(),
                debouncer: Debouncer::default(),
                ui,
                commands,
                in_flight: 0,
                last_search: None,
            }
        }

        fn ctx(&mut self) -> UpdateContext<'_> {
            UpdateContext {
                panel: &mut self.panel,
                page: &mut self.page,
                notifications: &mut self.notifications,
                modal: &mut self.modal,
                debouncer: &mut self.debouncer,
                ui: &self.ui,
                commands: &mut self.commands,
                api: None,
                in_flight: &mut self.in_flight,
                last_search: &mut self.last_search,
            }
        }
    }

    #[test]
    fn queued_commands_reach_their_managers() {
        let mut fixture = Fixture::new();
        let now = Instant::now();

        fixture.ui.notify(Severity::Info, Label::text("hello"));
        let _pending = fixture
            .ui
            .confirm(Label::text("sure?"), None, ConfirmOptions::default());
        fixture.ui.patch(PagePatch::SetVote {
            target: VoteTarget::Post,
            id: 9,
            vote: VoteKind::Like,
        });

        let _ = drain_commands(&mut fixture.ctx(), now);

        assert_eq!(fixture.notifications.visible_count(), 1);
        assert!(fixture.modal.is_open());
        assert!(fixture
            .page
            .is_vote_active(VoteTarget::Post, 9, VoteKind::Like));
    }

    #[test]
    fn reload_without_search_only_counts() {
        let mut fixture = Fixture::new();
        fixture.ui.patch(PagePatch::Reload);

        let _ = drain_commands(&mut fixture.ctx(), Instant::now());

        assert_eq!(fixture.page.reloads(), 1);
        assert_eq!(fixture.in_flight, 0);
    }

    #[test]
    fn short_query_forgets_last_search() {
        let mut fixture = Fixture::new();
        let now = Instant::now();
        fixture.last_search = Some("rust".into());

        let _ = update(
            &mut fixture.ctx(),
            Message::Panel(forum_panel::Message::SearchChanged("ru".into())),
            now,
        );
        assert!(fixture.last_search.is_none());
        assert!(!fixture.debouncer.is_pending());

        fixture.ui.patch(PagePatch::Reload);
        let _ = drain_commands(&mut fixture.ctx(), now);

        assert_eq!(fixture.page.reloads(), 1);
        assert_eq!(fixture.in_flight, 0);
        assert_eq!(fixture.notifications.visible_count(), 0);
    }

    #[test]
    fn dispatch_without_server_reports_error() {
        let mut fixture = Fixture::new();
        let action = Action::Search {
            query: "rust".into(),
        };

        let _ = dispatch(&mut fixture.ctx(), action, Instant::now());

        assert_eq!(fixture.in_flight, 0);
        assert!(fixture.last_search.is_none());
        let severities: Vec<_> = fixture
            .notifications
            .visible()
            .map(notifications::Notification::severity)
            .collect();
        assert_eq!(severities, vec![Severity::Error]);
    }

    #[test]
    fn invalid_panel_input_warns() {
        let mut fixture = Fixture::new();
        let now = Instant::now();

        let _ = update(
            &mut fixture.ctx(),
            Message::Panel(forum_panel::Message::Ban),
            now,
        );

        assert_eq!(fixture.notifications.visible_count(), 1);
    }

    #[test]
    fn finished_action_never_underflows() {
        let mut fixture = Fixture::new();
        let _ = update(
            &mut fixture.ctx(),
            Message::ActionFinished("vote"),
            Instant::now(),
        );
        assert_eq!(fixture.in_flight, 0);
    }
}
