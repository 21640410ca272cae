// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Notifications appear temporarily to report the outcome of forum actions
//! (vote recorded, ban failed, connection lost) without blocking interaction.
//!
//! # Components
//!
//! - [`notification`] - Core `Notification` struct with severity levels
//! - [`manager`] - `Manager` for the toast lifecycle
//! - [`toast`] - Toast widget component for rendering notifications
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::notifications::{Manager, Severity};
//!
//! let mut manager = Manager::new();
//! manager.success(Label::key("notification-vote-recorded"), Instant::now());
//!
//! // Periodically, from a subscription:
//! manager.tick(Instant::now());
//!
//! // In your view function, render toasts
//! let toast_overlay = Toast::view_overlay(&manager, &i18n, now).map(Message::Notification);
//! ```
//!
//! # Lifecycle
//!
//! - Entry is staged one tick after insertion
//! - Auto-dismiss after 5s (success/info), 6s (warning) or 8s (error); zero means persistent
//! - Exit transition runs 300ms before the toast is detached
//! - No maximum count, newest toast last

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity, SeverityDurations};
pub use toast::Toast;
