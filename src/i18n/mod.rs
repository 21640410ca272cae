// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Every user-facing string (toasts, dialog titles and buttons, validation
//! errors) is carried around as a [`Label`] and resolved through [`fluent::I18n`]
//! at render time, so background tasks never need access to the bundles.
//!
//! # Features
//!
//! - Automatic locale detection from CLI, config, or system settings
//! - Embedded `.ftl` translation files (`en-US`, `fr`)
//! - Runtime language switching
//! - Placeholder arguments (`{ $username }`) through [`Label::with_arg`]

pub mod fluent;
mod label;

pub use label::Label;
