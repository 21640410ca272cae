// SPDX-License-Identifier: MPL-2.0
//! Blocking dialogs: confirm, alert, prompt and choice.
//!
//! - [`dialog`] - Generic dialog model and its one-shot result
//! - [`keyboard`] - Escape/Enter dispatch and listener bookkeeping
//! - [`manager`] - Single-slot lifecycle (show, close, force-close)
//! - [`view`] - Backdrop and card rendering

mod dialog;
mod keyboard;
mod manager;
mod view;

pub use dialog::{
    Button, ButtonStyle, ConfirmOptions, Dialog, DialogId, DialogKind, Field, FieldId,
    ModalError, Outcome, Pending, PromptOptions, SelectOption,
};
pub use keyboard::DialogKey;
pub use manager::{Manager, Message as ModalMessage};
pub use view::view_overlay;
