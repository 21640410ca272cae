// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` owns every attached toast. Toasts are appended newest last
//! with no upper bound, stage their entry one tick after insertion, and are
//! detached once their exit transition has run for the configured grace period.

use super::notification::{Notification, NotificationId, Severity, SeverityDurations};
use crate::i18n::Label;
use crate::ui::transition::{Phase, Transition};
use std::time::{Duration, Instant};

/// Messages for notification state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// Dismiss a specific notification by ID.
    Dismiss(NotificationId),
    /// Tick for advancing transitions and auto-dismiss timers.
    Tick(Instant),
}

/// Manages the attached notifications.
#[derive(Debug, Default)]
pub struct Manager {
    /// Attached notifications, in insertion order.
    attached: Vec<Notification>,
    transition: Transition,
    durations: SeverityDurations,
}

impl Manager {
    /// Creates a new empty notification manager with default timings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manager with explicit transition and duration settings.
    #[must_use]
    pub fn with_settings(transition: Transition, durations: SeverityDurations) -> Self {
        Self {
            attached: Vec::new(),
            transition,
            durations,
        }
    }

    #[must_use]
    pub fn transition(&self) -> Transition {
        self.transition
    }

    /// Shows a notification.
    ///
    /// `duration` of `None` uses the severity default; `Some(Duration::ZERO)`
    /// keeps the toast until it is dismissed.
    pub fn show(
        &mut self,
        message: impl Into<Label>,
        severity: Severity,
        title: Option<Label>,
        duration: Option<Duration>,
        now: Instant,
    ) -> NotificationId {
        let mut notification = Notification::new(severity, message);
        if let Some(title) = title {
            notification = notification.with_title(title);
        }
        if let Some(duration) = duration {
            notification = notification.auto_dismiss(duration);
        }
        self.push(notification, now)
    }

    pub fn success(&mut self, message: impl Into<Label>, now: Instant) -> NotificationId {
        self.show(message, Severity::Success, None, None, now)
    }

    pub fn info(&mut self, message: impl Into<Label>, now: Instant) -> NotificationId {
        self.show(message, Severity::Info, None, None, now)
    }

    pub fn warning(&mut self, message: impl Into<Label>, now: Instant) -> NotificationId {
        self.show(message, Severity::Warning, None, None, now)
    }

    pub fn error(&mut self, message: impl Into<Label>, now: Instant) -> NotificationId {
        self.show(message, Severity::Error, None, None, now)
    }

    /// Attaches a notification and schedules its auto-dismiss.
    ///
    /// Warnings and errors are mirrored to the log.
    pub fn push(&mut self, mut notification: Notification, now: Instant) -> NotificationId {
        let message = match notification.message() {
            Label::Text(text) => text.clone(),
            Label::Key { key, .. } => (*key).to_string(),
        };
        match notification.severity() {
            Severity::Warning => tracing::warn!(message = %message, "notification"),
            Severity::Error => tracing::error!(message = %message, "notification"),
            Severity::Success | Severity::Info => {
                tracing::debug!(message = %message, "notification");
            }
        }

        let duration = notification
            .custom_duration()
            .unwrap_or_else(|| self.durations.for_severity(notification.severity()));
        notification.created_at = now;
        notification.phase = Phase::Entering;
        notification.dismiss_at = (!duration.is_zero()).then(|| now + duration);

        let id = notification.id();
        self.attached.push(notification);
        id
    }

    /// Starts the exit transition of a notification.
    ///
    /// Returns `false` if it is already leaving or no longer attached.
    pub fn dismiss(&mut self, id: NotificationId, now: Instant) -> bool {
        match self.attached.iter_mut().find(|n| n.id() == id) {
            Some(notification) if !notification.phase.is_leaving() => {
                notification.phase = Phase::Leaving { since: now };
                true
            }
            _ => false,
        }
    }

    /// Advances entry transitions, starts due auto-dismissals and detaches
    /// notifications whose exit grace has elapsed.
    pub fn tick(&mut self, now: Instant) {
        let transition = self.transition;
        for notification in &mut self.attached {
            notification.phase =
                transition.advance(notification.phase, notification.created_at, now);
            if notification.should_auto_dismiss(now) {
                // The exit starts at the deadline, not at this (possibly late) tick.
                let since = notification.dismiss_at.unwrap_or(now);
                notification.phase = Phase::Leaving { since };
            }
        }
        self.attached
            .retain(|n| !transition.is_finished(n.phase, now));
    }

    /// Handles a notification message.
    pub fn handle_message(&mut self, message: &Message, now: Instant) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id, now);
            }
            Message::Tick(at) => self.tick(*at),
        }
    }

    /// Returns the attached notifications, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.attached.iter()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.attached.len()
    }

    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.attached.iter().any(|n| n.id() == id)
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.attached.is_empty()
    }

    pub fn clear(&mut self) {
        self.attached.clear();
    }
}
