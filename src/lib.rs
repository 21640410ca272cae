// SPDX-License-Identifier: MPL-2.0
//! `forum_desk` is a desktop client for a small discussion forum, built with
//! the Iced GUI framework.
//!
//! It covers voting, moderation (ban, delete, promote, mark solution),
//! reporting, search and the login/new-post forms, with toast notifications
//! and blocking dialogs for user feedback. Strings are localized with Fluent.

#![doc(html_root_url = "https://docs.rs/forum_desk/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod forum;
pub mod i18n;
pub mod ui;
