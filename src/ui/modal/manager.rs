// SPDX-License-Identifier: MPL-2.0
//! Single-slot dialog lifecycle.
//!
//! At most one dialog is tracked. Showing a new one detaches the current one
//! on the spot, which drops its responder so the waiting caller observes
//! [`ModalError::Superseded`](super::ModalError::Superseded) instead of hanging.

use super::dialog::{
    ConfirmOptions, Dialog, DialogId, FieldId, Pending, PromptOptions, SelectOption,
};
use super::keyboard::{DialogKey, ListenerId, Listeners};
use crate::i18n::Label;
use crate::ui::notifications::Severity;
use crate::ui::transition::{Phase, Transition};
use std::time::Instant;

/// User input addressed to the active dialog.
#[derive(Debug, Clone)]
pub enum Message {
    ButtonPressed(usize),
    BackdropPressed,
    FieldChanged(FieldId, String),
    Key(DialogKey),
}

#[derive(Debug)]
struct Active {
    dialog: Dialog,
    listener: ListenerId,
    attached_at: Instant,
    phase: Phase,
}

#[derive(Debug, Default)]
pub struct Manager {
    active: Option<Active>,
    listeners: Listeners,
    transition: Transition,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_transition(transition: Transition) -> Self {
        Self {
            transition,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn transition(&self) -> Transition {
        self.transition
    }

    /// Attaches `dialog`, force-closing any dialog already tracked.
    pub fn show(&mut self, dialog: Dialog, now: Instant) -> DialogId {
        if let Some(previous) = self.active.take() {
            tracing::debug!(dialog = ?previous.dialog.id(), "dialog superseded");
            self.detach(previous);
        }
        let id = dialog.id();
        let listener = self.listeners.register(id);
        self.active = Some(Active {
            dialog,
            listener,
            attached_at: now,
            phase: Phase::Entering,
        });
        id
    }

    pub fn confirm(
        &mut self,
        message: impl Into<Label>,
        title: Option<Label>,
        options: ConfirmOptions,
        now: Instant,
    ) -> Pending<bool> {
        let (dialog, pending) = Dialog::confirm(message, title, options);
        self.show(dialog, now);
        pending
    }

    pub fn alert(
        &mut self,
        message: impl Into<Label>,
        title: Option<Label>,
        severity: Severity,
        now: Instant,
    ) -> Pending<()> {
        let (dialog, pending) = Dialog::alert(message, title, severity);
        self.show(dialog, now);
        pending
    }

    pub fn prompt(
        &mut self,
        message: impl Into<Label>,
        title: Option<Label>,
        default_value: impl Into<String>,
        options: PromptOptions,
        now: Instant,
    ) -> Pending<Option<String>> {
        let (dialog, pending) = Dialog::prompt(message, title, default_value, options);
        self.show(dialog, now);
        pending
    }

    pub fn choose(
        &mut self,
        message: impl Into<Label>,
        title: Option<Label>,
        options: Vec<SelectOption>,
        now: Instant,
    ) -> Pending<Option<String>> {
        let (dialog, pending) = Dialog::choose(message, title, options);
        self.show(dialog, now);
        pending
    }

    /// Starts the exit transition of the tracked dialog.
    ///
    /// Returns `false` when nothing is tracked or the dialog is already leaving.
    pub fn close(&mut self, now: Instant) -> bool {
        match &mut self.active {
            Some(active) if !active.phase.is_leaving() => {
                active.phase = Phase::Leaving { since: now };
                true
            }
            _ => false,
        }
    }

    /// Advances the entry transition and detaches a dialog whose exit finished.
    pub fn tick(&mut self, now: Instant) {
        let transition = self.transition;
        let finished = match &mut self.active {
            Some(active) => {
                active.phase = transition.advance(active.phase, active.attached_at, now);
                transition.is_finished(active.phase, now)
            }
            None => false,
        };
        if finished {
            if let Some(active) = self.active.take() {
                self.detach(active);
            }
        }
    }

    /// Fires button `index` of the tracked dialog and closes it.
    pub fn press_button(&mut self, index: usize, now: Instant) -> bool {
        let Some(active) = self.interactive() else {
            return false;
        };
        if !active.dialog.fire(index) {
            return false;
        }
        self.close(now)
    }

    /// Backdrop clicks dismiss only dialogs with more than one button.
    pub fn press_backdrop(&mut self, now: Instant) -> bool {
        let dismissable = self
            .interactive()
            .is_some_and(|active| active.dialog.buttons().len() > 1);
        dismissable && self.press_button(0, now)
    }

    /// Dispatches a key press through the registered listeners.
    pub fn handle_key(&mut self, key: DialogKey, now: Instant) -> bool {
        let Some((dialog_id, button_count)) = self
            .interactive()
            .map(|active| (active.dialog.id(), active.dialog.buttons().len()))
        else {
            return false;
        };
        if !self.listeners.targets().any(|target| target == dialog_id) {
            return false;
        }
        match key.target(button_count) {
            Some(index) => self.press_button(index, now),
            None => false,
        }
    }

    /// Updates the live value of a dialog field. Stale field ids are ignored.
    pub fn set_field_value(&mut self, field: FieldId, value: String) -> bool {
        match self.interactive() {
            Some(active) => active.dialog.set_field_value(field, value),
            None => false,
        }
    }

    pub fn handle_message(&mut self, message: Message, now: Instant) {
        match message {
            Message::ButtonPressed(index) => {
                self.press_button(index, now);
            }
            Message::BackdropPressed => {
                self.press_backdrop(now);
            }
            Message::FieldChanged(field, value) => {
                self.set_field_value(field, value);
            }
            Message::Key(key) => {
                self.handle_key(key, now);
            }
        }
    }

    /// The tracked dialog, including one that is still leaving.
    #[must_use]
    pub fn active(&self) -> Option<&Dialog> {
        self.active.as_ref().map(|active| &active.dialog)
    }

    #[must_use]
    pub fn phase(&self) -> Option<Phase> {
        self.active.as_ref().map(|active| active.phase)
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Number of registered keyboard listeners; at most one when nothing leaks.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn interactive(&mut self) -> Option<&mut Active> {
        self.active
            .as_mut()
            .filter(|active| !active.phase.is_leaving())
    }

    fn detach(&mut self, active: Active) {
        self.listeners.unregister(active.listener);
        // Dropping the dialog drops an unanswered responder.
        drop(active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::modal::dialog::{Field, ModalError};
    use std::time::Duration;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn confirm_resolves_true_on_confirm_button() {
        let mut manager = Manager::new();
        let now = Instant::now();
        let mut pending = manager.confirm("x", None, ConfirmOptions::default(), now);

        assert!(manager.press_button(1, now));
        assert_eq!(pending.try_resolved(), Some(Ok(true)));
    }

    #[test]
    fn confirm_resolves_false_on_cancel_and_escape() {
        let mut manager = Manager::new();
        let now = Instant::now();
        let mut cancelled = manager.confirm("x", None, ConfirmOptions::default(), now);
        manager.press_button(0, now);
        assert_eq!(cancelled.try_resolved(), Some(Ok(false)));

        manager.tick(now + ms(300));
        let mut escaped = manager.confirm("y", None, ConfirmOptions::default(), now + ms(300));
        assert!(manager.handle_key(DialogKey::Escape, now + ms(310)));
        assert_eq!(escaped.try_resolved(), Some(Ok(false)));
    }

    #[test]
    fn enter_fires_the_last_button() {
        let mut manager = Manager::new();
        let now = Instant::now();
        let mut pending = manager.confirm("x", None, ConfirmOptions::default(), now);
        manager.handle_key(DialogKey::Enter, now);
        assert_eq!(pending.try_resolved(), Some(Ok(true)));
    }

    #[test]
    fn alert_ignores_backdrop_and_escape() {
        let mut manager = Manager::new();
        let now = Instant::now();
        let mut pending = manager.alert("done", None, Severity::Info, now);

        assert!(!manager.press_backdrop(now));
        assert!(!manager.handle_key(DialogKey::Escape, now));
        assert_eq!(pending.try_resolved(), None);

        assert!(manager.handle_key(DialogKey::Enter, now));
        assert_eq!(pending.try_resolved(), Some(Ok(())));
    }

    #[test]
    fn backdrop_cancels_multi_button_dialogs() {
        let mut manager = Manager::new();
        let now = Instant::now();
        let mut pending = manager.prompt("why?", None, "", PromptOptions::default(), now);
        assert!(manager.press_backdrop(now));
        assert_eq!(pending.try_resolved(), Some(Ok(None)));
    }

    #[test]
    fn prompt_resolves_live_input() {
        let mut manager = Manager::new();
        let now = Instant::now();
        let mut pending = manager.prompt("x", None, "default", PromptOptions::default(), now);
        let field = manager
            .active()
            .and_then(Dialog::field)
            .map(Field::id)
            .expect("prompt has a field");

        assert!(manager.set_field_value(field, "typed".to_string()));
        manager.press_button(1, now);
        assert_eq!(pending.try_resolved(), Some(Ok(Some("typed".to_string()))));
    }

    #[test]
    fn out_of_range_button_is_ignored() {
        let mut manager = Manager::new();
        let now = Instant::now();
        let mut pending = manager.confirm("x", None, ConfirmOptions::default(), now);
        assert!(!manager.press_button(5, now));
        assert_eq!(pending.try_resolved(), None);
        assert!(!manager.phase().is_some_and(|phase| phase.is_leaving()));
    }

    #[test]
    fn close_detaches_after_grace_and_releases_listener() {
        let mut manager = Manager::new();
        let now = Instant::now();
        let _pending = manager.alert("done", None, Severity::Success, now);
        manager.tick(now + ms(10));
        assert_eq!(manager.phase(), Some(Phase::Shown));

        manager.press_button(0, now + ms(20));
        manager.tick(now + ms(319));
        assert!(manager.is_open());
        assert_eq!(manager.listener_count(), 1);

        manager.tick(now + ms(320));
        assert!(!manager.is_open());
        assert_eq!(manager.listener_count(), 0);
    }

    #[test]
    fn input_while_leaving_is_ignored() {
        let mut manager = Manager::new();
        let now = Instant::now();
        let mut pending = manager.confirm("x", None, ConfirmOptions::default(), now);
        manager.close(now);

        assert!(!manager.press_button(1, now));
        assert!(!manager.handle_key(DialogKey::Enter, now));
        manager.tick(now + ms(300));
        assert_eq!(pending.try_resolved(), Some(Err(ModalError::Superseded)));
    }

    #[test]
    fn second_dialog_supersedes_first() {
        let mut manager = Manager::new();
        let now = Instant::now();
        let mut first = manager.confirm("first", None, ConfirmOptions::default(), now);
        let second_id = {
            let (dialog, _second) = Dialog::alert("second", None, Severity::Info);
            let id = dialog.id();
            manager.show(dialog, now + ms(5));
            id
        };

        assert_eq!(first.try_resolved(), Some(Err(ModalError::Superseded)));
        assert_eq!(manager.active().map(Dialog::id), Some(second_id));
        assert_eq!(manager.listener_count(), 1);
    }

    #[test]
    fn rapid_dialogs_never_leak_listeners() {
        let mut manager = Manager::new();
        let now = Instant::now();
        let mut pendings: Vec<_> = (0..5)
            .map(|i| manager.confirm(format!("dialog {i}"), None, ConfirmOptions::default(), now))
            .collect();
        assert_eq!(manager.listener_count(), 1);

        let mut last = pendings.pop().expect("five dialogs were opened");
        for pending in &mut pendings {
            assert_eq!(pending.try_resolved(), Some(Err(ModalError::Superseded)));
        }
        manager.press_button(1, now);
        manager.tick(now + ms(300));
        assert_eq!(last.try_resolved(), Some(Ok(true)));
        assert_eq!(manager.listener_count(), 0);
    }

    #[test]
    fn superseding_a_leaving_dialog_keeps_the_new_one() {
        let mut manager = Manager::new();
        let now = Instant::now();
        let _first = manager.confirm("first", None, ConfirmOptions::default(), now);
        manager.press_button(1, now);
        let _second = manager.alert("second", None, Severity::Info, now + ms(100));

        manager.tick(now + ms(400));
        assert!(manager.is_open());
        assert_eq!(manager.listener_count(), 1);
    }

    #[tokio::test]
    async fn pending_can_be_awaited() {
        let mut manager = Manager::new();
        let now = Instant::now();
        let pending = manager.confirm("x", None, ConfirmOptions::default(), now);
        manager.handle_message(Message::ButtonPressed(1), now);
        assert_eq!(pending.await, Ok(true));
    }
}
