// SPDX-License-Identifier: MPL-2.0
//! Registry of dialog keyboard listeners.
//!
//! A listener is registered for each shown dialog and must be removed when the
//! dialog is detached. [`Listeners::len`] makes leaks observable.

use super::dialog::DialogId;
use std::sync::atomic::{AtomicU64, Ordering};

/// Keys a dialog reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKey {
    /// Fires the first button when the dialog has more than one.
    Escape,
    /// Fires the last button.
    Enter,
}

impl DialogKey {
    /// Index of the button this key fires, given the dialog's button count.
    #[must_use]
    pub fn target(self, button_count: usize) -> Option<usize> {
        match self {
            DialogKey::Escape if button_count > 1 => Some(0),
            DialogKey::Enter if button_count > 0 => Some(button_count - 1),
            DialogKey::Escape | DialogKey::Enter => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Default)]
pub struct Listeners {
    entries: Vec<(ListenerId, DialogId)>,
}

impl Listeners {
    pub fn register(&mut self, dialog: DialogId) -> ListenerId {
        let id = ListenerId::new();
        self.entries.push((id, dialog));
        id
    }

    /// Returns `false` if the listener was not registered.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(listener, _)| *listener != id);
        self.entries.len() < before
    }

    /// Dialogs that currently receive key presses.
    pub fn targets(&self) -> impl Iterator<Item = DialogId> + '_ {
        self.entries.iter().map(|(_, dialog)| *dialog)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
