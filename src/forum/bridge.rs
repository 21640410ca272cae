// SPDX-License-Identifier: MPL-2.0
//! The UI surface the action handlers talk to.
//!
//! Handlers run as async tasks off the UI thread. [`UiHandle`] forwards their
//! requests as [`UiCommand`]s over a channel; the application drains it and
//! applies each command to the notification manager, the dialog manager or
//! the page model.

use super::page::PagePatch;
use crate::i18n::Label;
use crate::ui::modal::{ConfirmOptions, Dialog, Pending, PromptOptions, SelectOption};
use crate::ui::notifications::Severity;
use tokio::sync::mpsc;

pub trait Ui: Send + Sync {
    fn notify(&self, severity: Severity, message: Label);

    fn confirm(
        &self,
        message: Label,
        title: Option<Label>,
        options: ConfirmOptions,
    ) -> Pending<bool>;

    fn alert(&self, message: Label, title: Option<Label>, severity: Severity) -> Pending<()>;

    fn prompt(
        &self,
        message: Label,
        title: Option<Label>,
        default_value: String,
        options: PromptOptions,
    ) -> Pending<Option<String>>;

    fn choose(
        &self,
        message: Label,
        title: Option<Label>,
        options: Vec<SelectOption>,
    ) -> Pending<Option<String>>;

    fn patch(&self, patch: PagePatch);

    fn success(&self, message: Label) {
        self.notify(Severity::Success, message);
    }

    fn error(&self, message: Label) {
        self.notify(Severity::Error, message);
    }

    fn warning(&self, message: Label) {
        self.notify(Severity::Warning, message);
    }

    fn info(&self, message: Label) {
        self.notify(Severity::Info, message);
    }
}

/// Request from a handler task to the UI thread.
#[derive(Debug)]
pub enum UiCommand {
    Notify { severity: Severity, message: Label },
    /// Shows a dialog; its responder resolves the handler's [`Pending`].
    Show(Dialog),
    Patch(PagePatch),
}

/// Channel-backed [`Ui`] given to handler tasks.
#[derive(Debug, Clone)]
pub struct UiHandle {
    tx: mpsc::UnboundedSender<UiCommand>,
}

impl UiHandle {
    /// Creates a handle and the receiver the application drains.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<UiCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, command: UiCommand) {
        // A closed channel drops the command; an undelivered dialog then
        // resolves its caller as superseded.
        if self.tx.send(command).is_err() {
            tracing::debug!("ui closed, command dropped");
        }
    }

    fn show<T>(&self, (dialog, pending): (Dialog, Pending<T>)) -> Pending<T> {
        self.send(UiCommand::Show(dialog));
        pending
    }
}

impl Ui for UiHandle {
    fn notify(&self, severity: Severity, message: Label) {
        self.send(UiCommand::Notify { severity, message });
    }

    fn confirm(
        &self,
        message: Label,
        title: Option<Label>,
        options: ConfirmOptions,
    ) -> Pending<bool> {
        self.show(Dialog::confirm(message, title, options))
    }

    fn alert(&self, message: Label, title: Option<Label>, severity: Severity) -> Pending<()> {
        self.show(Dialog::alert(message, title, severity))
    }

    fn prompt(
        &self,
        message: Label,
        title: Option<Label>,
        default_value: String,
        options: PromptOptions,
    ) -> Pending<Option<String>> {
        self.show(Dialog::prompt(message, title, default_value, options))
    }

    fn choose(
        &self,
        message: Label,
        title: Option<Label>,
        options: Vec<SelectOption>,
    ) -> Pending<Option<String>> {
        self.show(Dialog::choose(message, title, options))
    }

    fn patch(&self, patch: PagePatch) {
        self.send(UiCommand::Patch(patch));
    }
}
