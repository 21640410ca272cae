// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Follows the Elm-style "state down, messages up" pattern: components own
//! their state, emit messages, and report effects to the application.
//!
//! # Components
//!
//! - [`forum_panel`] - Forms, search results and moderation controls
//! - [`notifications`] - Toast notification system for user feedback
//! - [`modal`] - Blocking confirm/alert/prompt/choice dialogs
//!
//! # Shared Infrastructure
//!
//! - [`transition`] - Enter/leave timing shared by toasts and dialogs
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod design_tokens;
pub mod forum_panel;
pub mod modal;
pub mod notifications;
pub mod styles;
pub mod theming;
pub mod transition;
