// SPDX-License-Identifier: MPL-2.0
//! Typed commands the application dispatches to the handlers.

use super::page::{ItemRef, VoteKind, VoteTarget};
use super::roles::Role;
use super::validation::{LoginForm, PostDraft};

/// A user-triggered forum action, carrying every parameter it needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Vote {
        vote: VoteKind,
        target: VoteTarget,
        id: u64,
    },
    Ban {
        user_id: u64,
        username: String,
    },
    Delete {
        item: ItemRef,
    },
    Promote {
        user_id: u64,
        username: String,
        current_role: Role,
    },
    MarkSolution {
        comment_id: u64,
        post_id: u64,
    },
    /// Reports an item; the user is asked for a reason when none is given.
    Report {
        item: ItemRef,
        reason: Option<String>,
    },
    /// A debounced query, ready to be sent.
    Search {
        query: String,
    },
    Login(LoginForm),
    CreatePost(PostDraft),
}

impl Action {
    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::Vote { .. } => "vote",
            Action::Ban { .. } => "ban",
            Action::Delete { .. } => "delete",
            Action::Promote { .. } => "promote",
            Action::MarkSolution { .. } => "solution",
            Action::Report { .. } => "report",
            Action::Search { .. } => "search",
            Action::Login(_) => "login",
            Action::CreatePost(_) => "create-post",
        }
    }
}

/// Page state snapshot handed to a handler when it starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    pub logged_in: bool,
}
