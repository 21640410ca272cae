// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::Message;
use crate::ui::modal::{DialogKey, ModalMessage};
use iced::keyboard::{self, key::Named, Key};
use iced::{event, time, Subscription};
use std::time::Duration;

/// Tick period while anything time-based is in progress.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Routes Escape and Enter to the open dialog.
///
/// Only active while a dialog is tracked, so no key handling leaks once the
/// dialog is gone.
pub fn create_dialog_key_subscription(dialog_open: bool) -> Subscription<Message> {
    if !dialog_open {
        return Subscription::none();
    }

    event::listen_with(|event, _status, _window_id| match event {
        event::Event::Keyboard(keyboard::Event::KeyPressed {
            key: Key::Named(named),
            ..
        }) => dialog_key(named).map(|key| Message::Modal(ModalMessage::Key(key))),
        _ => None,
    })
}

fn dialog_key(named: Named) -> Option<DialogKey> {
    match named {
        Named::Escape => Some(DialogKey::Escape),
        Named::Enter => Some(DialogKey::Enter),
        _ => None,
    }
}

/// Creates a periodic tick subscription for transitions, notification
/// auto-dismiss, search debounce and handler command delivery.
pub fn create_tick_subscription(
    has_notifications: bool,
    dialog_open: bool,
    search_pending: bool,
    in_flight: usize,
) -> Subscription<Message> {
    if has_notifications || dialog_open || search_pending || in_flight > 0 {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
