// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct and `Severity` enum
//! used throughout the notification system.

use crate::config::{
    DEFAULT_ERROR_DURATION_MS, DEFAULT_INFO_DURATION_MS, DEFAULT_SUCCESS_DURATION_MS,
    DEFAULT_WARNING_DURATION_MS,
};
use crate::i18n::Label;
use crate::ui::design_tokens::palette;
use crate::ui::transition::Phase;
use iced::Color;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity level determines default duration, title and visual styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Returns the primary color for this severity level.
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Severity::Success => palette::SUCCESS_500,
            Severity::Info => palette::INFO_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// i18n key of the title shown when the caller gives none.
    #[must_use]
    pub fn title_key(&self) -> &'static str {
        match self {
            Severity::Success => "notification-title-success",
            Severity::Info => "notification-title-info",
            Severity::Warning => "notification-title-warning",
            Severity::Error => "notification-title-error",
        }
    }
}

/// Auto-dismiss delay per severity. `Duration::ZERO` means persistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityDurations {
    pub success: Duration,
    pub info: Duration,
    pub warning: Duration,
    pub error: Duration,
}

impl Default for SeverityDurations {
    fn default() -> Self {
        Self {
            success: Duration::from_millis(DEFAULT_SUCCESS_DURATION_MS),
            info: Duration::from_millis(DEFAULT_INFO_DURATION_MS),
            warning: Duration::from_millis(DEFAULT_WARNING_DURATION_MS),
            error: Duration::from_millis(DEFAULT_ERROR_DURATION_MS),
        }
    }
}

impl SeverityDurations {
    #[must_use]
    pub fn for_severity(&self, severity: Severity) -> Duration {
        match severity {
            Severity::Success => self.success,
            Severity::Info => self.info,
            Severity::Warning => self.warning,
            Severity::Error => self.error,
        }
    }
}

/// A notification to be displayed to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message: Label,
    title: Option<Label>,
    /// Custom auto-dismiss duration (overrides severity default).
    duration: Option<Duration>,
    pub(super) created_at: Instant,
    pub(super) dismiss_at: Option<Instant>,
    pub(super) phase: Phase,
}

impl Notification {
    /// Creates a new notification with the given severity and message.
    pub fn new(severity: Severity, message: impl Into<Label>) -> Self {
        Self {
            id: NotificationId::new(),
            severity,
            message: message.into(),
            title: None,
            duration: None,
            created_at: Instant::now(),
            dismiss_at: None,
            phase: Phase::Entering,
        }
    }

    pub fn success(message: impl Into<Label>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn info(message: impl Into<Label>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn warning(message: impl Into<Label>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<Label>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Sets an explicit title instead of the severity default.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<Label>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a custom auto-dismiss duration, overriding the severity default.
    ///
    /// `Duration::ZERO` keeps the notification until it is dismissed.
    #[must_use]
    pub fn auto_dismiss(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> &Label {
        &self.message
    }

    /// Returns the explicit title or the severity default.
    #[must_use]
    pub fn title(&self) -> Label {
        self.title
            .clone()
            .unwrap_or_else(|| Label::key(self.severity.title_key()))
    }

    #[must_use]
    pub fn custom_duration(&self) -> Option<Duration> {
        self.duration
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns whether the auto-dismiss deadline has passed.
    #[must_use]
    pub fn should_auto_dismiss(&self, now: Instant) -> bool {
        !self.phase.is_leaving() && self.dismiss_at.is_some_and(|deadline| now >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_ids_are_unique() {
        let n1 = Notification::success("test");
        let n2 = Notification::success("test");
        assert_ne!(n1.id(), n2.id());
    }

    #[test]
    fn severity_colors_are_distinct() {
        let colors = [
            Severity::Success.color(),
            Severity::Info.color(),
            Severity::Warning.color(),
            Severity::Error.color(),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn default_durations_favor_errors() {
        let durations = SeverityDurations::default();
        assert_eq!(durations.for_severity(Severity::Success), Duration::from_secs(5));
        assert_eq!(durations.for_severity(Severity::Info), Duration::from_secs(5));
        assert_eq!(durations.for_severity(Severity::Warning), Duration::from_secs(6));
        assert_eq!(durations.for_severity(Severity::Error), Duration::from_secs(8));
    }

    #[test]
    fn title_defaults_to_severity_key() {
        let notification = Notification::warning("careful");
        assert_eq!(notification.title(), Label::key("notification-title-warning"));

        let titled = Notification::warning("careful").with_title("Heads up");
        assert_eq!(titled.title(), Label::text("Heads up"));
    }

    #[test]
    fn notification_constructors_set_correct_severity() {
        assert_eq!(Notification::success("").severity(), Severity::Success);
        assert_eq!(Notification::info("").severity(), Severity::Info);
        assert_eq!(Notification::warning("").severity(), Severity::Warning);
        assert_eq!(Notification::error("").severity(), Severity::Error);
    }

    #[test]
    fn unscheduled_notification_never_expires() {
        let notification = Notification::info("pending");
        assert!(!notification.should_auto_dismiss(Instant::now() + Duration::from_secs(3600)));
    }
}
