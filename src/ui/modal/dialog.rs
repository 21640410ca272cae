// SPDX-License-Identifier: MPL-2.0
//! Generic dialog description and its single-resolution result.
//!
//! Every dialog is built from a kind, a title, a message, an optional input
//! field and an ordered list of buttons. The dialog owns the responder that
//! resolves its caller; firing a button consumes it.

use crate::i18n::Label;
use crate::ui::notifications::Severity;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::oneshot;

/// Unique identifier for a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogId(u64);

impl DialogId {
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for DialogId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier of a dialog input field.
///
/// Each prompt gets a fresh id so a stale field can never answer for a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(u64);

impl FieldId {
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for FieldId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Confirm,
    Alert(Severity),
    Prompt,
    Choice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Secondary,
}

/// What firing a button means to the waiting caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Cancel,
    Accept,
    Acknowledge,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: Label,
    pub style: ButtonStyle,
    pub outcome: Outcome,
}

impl Button {
    fn cancel(label: Label) -> Self {
        Self {
            label,
            style: ButtonStyle::Secondary,
            outcome: Outcome::Cancel,
        }
    }

    fn accept(label: Label) -> Self {
        Self {
            label,
            style: ButtonStyle::Primary,
            outcome: Outcome::Accept,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: Label,
}

/// Input embedded in a dialog body.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Text {
        id: FieldId,
        value: String,
        placeholder: Option<Label>,
    },
    Select {
        id: FieldId,
        options: Vec<SelectOption>,
        selected: Option<String>,
    },
}

impl Field {
    #[must_use]
    pub fn id(&self) -> FieldId {
        match self {
            Field::Text { id, .. } | Field::Select { id, .. } => *id,
        }
    }

    /// Live value of the field; an empty string when nothing is selected.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Field::Text { value, .. } => value,
            Field::Select { selected, .. } => selected.as_deref().unwrap_or(""),
        }
    }

    pub fn set_value(&mut self, new_value: String) {
        match self {
            Field::Text { value, .. } => *value = new_value,
            Field::Select { options, selected, .. } => {
                if options.iter().any(|option| option.value == new_value) {
                    *selected = Some(new_value);
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModalError {
    /// The dialog was closed or replaced before any of its buttons fired.
    #[error("dialog closed before it was answered")]
    Superseded,
}

/// Result of a dialog, resolved exactly once.
#[derive(Debug)]
pub struct Pending<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> Pending<T> {
    /// Returns the result if the dialog has already been answered or discarded.
    pub fn try_resolved(&mut self) -> Option<Result<T, ModalError>> {
        match self.rx.try_recv() {
            Ok(value) => Some(Ok(value)),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(ModalError::Superseded)),
        }
    }
}

impl<T> Future for Pending<T> {
    type Output = Result<T, ModalError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().rx)
            .poll(cx)
            .map(|result| result.map_err(|_| ModalError::Superseded))
    }
}

#[derive(Debug)]
pub(super) enum Responder {
    Confirm(oneshot::Sender<bool>),
    Alert(oneshot::Sender<()>),
    Text {
        field: FieldId,
        tx: oneshot::Sender<Option<String>>,
    },
}

impl Responder {
    /// Resolves the caller. The receiver may already be gone, which is fine.
    pub(super) fn resolve(self, outcome: Outcome, field: Option<&Field>) {
        match self {
            Responder::Confirm(tx) => {
                let _ = tx.send(outcome == Outcome::Accept);
            }
            Responder::Alert(tx) => {
                let _ = tx.send(());
            }
            Responder::Text { field: wanted, tx } => {
                let answer = (outcome == Outcome::Accept).then(|| {
                    field
                        .filter(|field| field.id() == wanted)
                        .map(|field| field.value().to_string())
                        .unwrap_or_default()
                });
                let _ = tx.send(answer);
            }
        }
    }
}

/// Optional button labels for confirm dialogs.
#[derive(Debug, Clone, Default)]
pub struct ConfirmOptions {
    pub confirm_label: Option<Label>,
    pub cancel_label: Option<Label>,
}

/// Optional button labels and placeholder for prompt dialogs.
#[derive(Debug, Clone, Default)]
pub struct PromptOptions {
    pub confirm_label: Option<Label>,
    pub cancel_label: Option<Label>,
    pub placeholder: Option<Label>,
}

#[derive(Debug)]
pub struct Dialog {
    id: DialogId,
    kind: DialogKind,
    title: Label,
    message: Label,
    field: Option<Field>,
    buttons: Vec<Button>,
    responder: Option<Responder>,
}

impl Dialog {
    /// Builds a two-button dialog resolving `true` on confirm.
    pub fn confirm(
        message: impl Into<Label>,
        title: Option<Label>,
        options: ConfirmOptions,
    ) -> (Self, Pending<bool>) {
        let (tx, rx) = oneshot::channel();
        let dialog = Self {
            id: DialogId::new(),
            kind: DialogKind::Confirm,
            title: title.unwrap_or_else(|| Label::key("dialog-confirm-title")),
            message: message.into(),
            field: None,
            buttons: vec![
                Button::cancel(
                    options
                        .cancel_label
                        .unwrap_or_else(|| Label::key("dialog-button-cancel")),
                ),
                Button::accept(
                    options
                        .confirm_label
                        .unwrap_or_else(|| Label::key("dialog-button-confirm")),
                ),
            ],
            responder: Some(Responder::Confirm(tx)),
        };
        (dialog, Pending { rx })
    }

    /// Builds a single-button dialog that cannot be dismissed by the backdrop.
    pub fn alert(
        message: impl Into<Label>,
        title: Option<Label>,
        severity: Severity,
    ) -> (Self, Pending<()>) {
        let (tx, rx) = oneshot::channel();
        let dialog = Self {
            id: DialogId::new(),
            kind: DialogKind::Alert(severity),
            title: title.unwrap_or_else(|| Label::key("dialog-alert-title")),
            message: message.into(),
            field: None,
            buttons: vec![Button {
                label: Label::key("dialog-button-ok"),
                style: ButtonStyle::Primary,
                outcome: Outcome::Acknowledge,
            }],
            responder: Some(Responder::Alert(tx)),
        };
        (dialog, Pending { rx })
    }

    /// Builds a text prompt resolving to the live input, or `None` on cancel.
    pub fn prompt(
        message: impl Into<Label>,
        title: Option<Label>,
        default_value: impl Into<String>,
        options: PromptOptions,
    ) -> (Self, Pending<Option<String>>) {
        let (tx, rx) = oneshot::channel();
        let field_id = FieldId::new();
        let dialog = Self {
            id: DialogId::new(),
            kind: DialogKind::Prompt,
            title: title.unwrap_or_else(|| Label::key("dialog-prompt-title")),
            message: message.into(),
            field: Some(Field::Text {
                id: field_id,
                value: default_value.into(),
                placeholder: options.placeholder,
            }),
            buttons: vec![
                Button::cancel(
                    options
                        .cancel_label
                        .unwrap_or_else(|| Label::key("dialog-button-cancel")),
                ),
                Button::accept(
                    options
                        .confirm_label
                        .unwrap_or_else(|| Label::key("dialog-button-ok")),
                ),
            ],
            responder: Some(Responder::Text { field: field_id, tx }),
        };
        (dialog, Pending { rx })
    }

    /// Builds a selection dialog resolving to the chosen value (or `""`).
    pub fn choose(
        message: impl Into<Label>,
        title: Option<Label>,
        options: Vec<SelectOption>,
    ) -> (Self, Pending<Option<String>>) {
        let (tx, rx) = oneshot::channel();
        let field_id = FieldId::new();
        let dialog = Self {
            id: DialogId::new(),
            kind: DialogKind::Choice,
            title: title.unwrap_or_else(|| Label::key("dialog-prompt-title")),
            message: message.into(),
            field: Some(Field::Select {
                id: field_id,
                options,
                selected: None,
            }),
            buttons: vec![
                Button::cancel(Label::key("dialog-button-cancel")),
                Button::accept(Label::key("dialog-button-confirm")),
            ],
            responder: Some(Responder::Text { field: field_id, tx }),
        };
        (dialog, Pending { rx })
    }

    #[must_use]
    pub fn id(&self) -> DialogId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> &Label {
        &self.title
    }

    #[must_use]
    pub fn message(&self) -> &Label {
        &self.message
    }

    #[must_use]
    pub fn field(&self) -> Option<&Field> {
        self.field.as_ref()
    }

    #[must_use]
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Updates the live value of the field carrying `id`.
    ///
    /// Returns `false` when the dialog has no such field.
    pub fn set_field_value(&mut self, id: FieldId, value: String) -> bool {
        match &mut self.field {
            Some(field) if field.id() == id => {
                field.set_value(value);
                true
            }
            _ => false,
        }
    }

    /// Fires button `index`, resolving the caller at most once.
    ///
    /// Returns `false` for an out-of-range index.
    pub(super) fn fire(&mut self, index: usize) -> bool {
        let Some(outcome) = self.buttons.get(index).map(|button| button.outcome) else {
            return false;
        };
        if let Some(responder) = self.responder.take() {
            responder.resolve(outcome, self.field.as_ref());
        }
        true
    }
}
