// SPDX-License-Identifier: MPL-2.0
//! Forum domain: page model, server API and the action handlers.
//!
//! The handlers only talk to the outside world through two seams, [`bridge::Ui`]
//! and [`api::ForumApi`], so each flow can run against in-memory fakes.

pub mod action;
pub mod api;
pub mod bridge;
pub mod handlers;
pub mod page;
pub mod roles;
pub mod search;
pub mod validation;

pub use action::{Action, Session};
pub use api::{ApiError, ForumApi, HttpApi};
pub use bridge::{Ui, UiCommand, UiHandle};
pub use page::{Page, PagePatch};
