// SPDX-License-Identifier: MPL-2.0
//! Action handlers.
//!
//! Each handler is one short request/response cycle: ask the user when
//! needed, send a single request, then patch the page and report the outcome
//! as a toast. Failures never propagate past the handler.

use super::action::{Action, Session};
use super::api::{ApiError, Endpoint, ForumApi, Submission};
use super::bridge::Ui;
use super::page::{ItemRef, PagePatch, VoteKind, VoteTarget};
use super::roles::Role;
use super::validation::{LoginForm, PostDraft};
use crate::i18n::Label;
use crate::ui::modal::{ConfirmOptions, ModalError, PromptOptions, SelectOption};

/// Runs `action` to completion.
pub async fn dispatch<U: Ui, A: ForumApi>(action: Action, session: Session, ui: &U, api: &A) {
    tracing::debug!(action = action.name(), "dispatch");
    match action {
        Action::Vote { vote, target, id } => self::vote(ui, api, session, vote, target, id).await,
        Action::Ban { user_id, username } => ban(ui, api, user_id, &username).await,
        Action::Delete { item } => delete(ui, api, item).await,
        Action::Promote {
            user_id,
            username,
            current_role,
        } => promote(ui, api, user_id, &username, current_role).await,
        Action::MarkSolution {
            comment_id,
            post_id,
        } => mark_solution(ui, api, comment_id, post_id).await,
        Action::Report { item, reason } => report(ui, api, item, reason).await,
        Action::Search { query } => search(ui, api, &query).await,
        Action::Login(form) => login(ui, api, &form).await,
        Action::CreatePost(draft) => create_post(ui, api, &draft).await,
    }
}

/// Reports a failed request: transport failures get the generic message.
fn report_failure<U: Ui>(ui: &U, action: &'static str, err: &ApiError, failure_key: &'static str) {
    if err.is_transport() {
        tracing::warn!(action, error = %err, "connection failed");
        ui.error(Label::key("notification-connection-error"));
    } else {
        tracing::warn!(action, error = %err, "request failed");
        ui.error(Label::key(failure_key));
    }
}

/// A dialog answer, with a superseded dialog counting as a refusal.
fn answered<T>(action: &'static str, result: Result<T, ModalError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(action, error = %err, "dialog abandoned");
            None
        }
    }
}

pub async fn vote<U: Ui, A: ForumApi>(
    ui: &U,
    api: &A,
    session: Session,
    vote: VoteKind,
    target: VoteTarget,
    id: u64,
) {
    if !session.logged_in {
        ui.warning(Label::key("notification-login-to-vote"));
        return;
    }

    let form = vec![
        ("type", vote.as_str().to_string()),
        ("target", target.as_str().to_string()),
        ("target_id", id.to_string()),
    ];
    match api.post_form(Endpoint::Vote, form).await {
        Ok(()) => {
            ui.patch(PagePatch::SetVote { target, id, vote });
            ui.success(Label::key("notification-vote-recorded"));
        }
        Err(err) => report_failure(ui, "vote", &err, "notification-vote-error"),
    }
}

/// Confirm, then ask for a reason. An empty or cancelled reason aborts.
pub async fn ban<U: Ui, A: ForumApi>(ui: &U, api: &A, user_id: u64, username: &str) {
    let confirmed = ui
        .confirm(
            Label::key("dialog-ban-confirm").with_arg("username", username),
            None,
            ConfirmOptions::default(),
        )
        .await;
    if answered("ban", confirmed) != Some(true) {
        return;
    }

    let reason = ui
        .prompt(
            Label::key("dialog-ban-reason"),
            None,
            String::new(),
            PromptOptions::default(),
        )
        .await;
    let Some(reason) = answered("ban", reason).flatten().filter(|r| !r.is_empty()) else {
        return;
    };

    let form = vec![("user_id", user_id.to_string()), ("reason", reason)];
    match api.post_form(Endpoint::Ban, form).await {
        Ok(()) => {
            tracing::info!(user_id, "user banned");
            ui.success(Label::key("notification-ban-success"));
            ui.patch(PagePatch::Reload);
        }
        Err(err) => report_failure(ui, "ban", &err, "notification-ban-error"),
    }
}

pub async fn delete<U: Ui, A: ForumApi>(ui: &U, api: &A, item: ItemRef) {
    let confirmed = ui
        .confirm(
            Label::key("dialog-delete-confirm").with_arg("kind", item.kind.as_str()),
            None,
            ConfirmOptions::default(),
        )
        .await;
    if answered("delete", confirmed) != Some(true) {
        return;
    }

    let form = vec![
        ("type", item.kind.as_str().to_string()),
        ("id", item.id.to_string()),
    ];
    match api.post_form(Endpoint::Delete, form).await {
        Ok(()) => {
            ui.success(Label::key("notification-delete-success"));
            ui.patch(PagePatch::RemoveItem(item));
        }
        Err(err) => report_failure(ui, "delete", &err, "notification-delete-error"),
    }
}

/// Offers every role but the current one. Confirming without a choice warns.
pub async fn promote<U: Ui, A: ForumApi>(
    ui: &U,
    api: &A,
    user_id: u64,
    username: &str,
    current_role: Role,
) {
    let options = current_role
        .alternatives()
        .map(|role| SelectOption {
            value: role.id().to_string(),
            label: role.label(),
        })
        .collect();
    let choice = ui
        .choose(
            Label::key("dialog-promote-message").with_arg("role", current_role.as_str()),
            Some(Label::key("dialog-promote-title").with_arg("username", username)),
            options,
        )
        .await;
    let Some(choice) = answered("promote", choice).flatten() else {
        return;
    };
    let Ok(role) = choice.parse::<Role>() else {
        ui.warning(Label::key("notification-select-role"));
        return;
    };

    let form = vec![
        ("user_id", user_id.to_string()),
        ("role_id", role.id().to_string()),
    ];
    match api.post_form(Endpoint::Promote, form).await {
        Ok(()) => {
            tracing::info!(user_id, role = %role, "role changed");
            ui.success(Label::key("notification-promote-success"));
            ui.patch(PagePatch::Reload);
        }
        Err(err) => report_failure(ui, "promote", &err, "notification-promote-error"),
    }
}

pub async fn mark_solution<U: Ui, A: ForumApi>(ui: &U, api: &A, comment_id: u64, post_id: u64) {
    let confirmed = ui
        .confirm(
            Label::key("dialog-solution-confirm"),
            None,
            ConfirmOptions::default(),
        )
        .await;
    if answered("solution", confirmed) != Some(true) {
        return;
    }

    let form = vec![
        ("comment_id", comment_id.to_string()),
        ("post_id", post_id.to_string()),
    ];
    match api.post_form(Endpoint::Solution, form).await {
        Ok(()) => {
            ui.success(Label::key("notification-solution-success"));
            ui.patch(PagePatch::Reload);
        }
        Err(err) => report_failure(ui, "solution", &err, "notification-solution-error"),
    }
}

pub async fn report<U: Ui, A: ForumApi>(ui: &U, api: &A, item: ItemRef, reason: Option<String>) {
    let reason = match reason {
        Some(reason) => reason,
        None => {
            let answer = ui
                .prompt(
                    Label::key("dialog-report-reason"),
                    None,
                    String::new(),
                    PromptOptions {
                        placeholder: Some(Label::key("dialog-report-placeholder")),
                        ..PromptOptions::default()
                    },
                )
                .await;
            match answered("report", answer).flatten().filter(|r| !r.is_empty()) {
                Some(reason) => reason,
                None => return,
            }
        }
    };

    let form = vec![
        ("type", item.kind.as_str().to_string()),
        ("id", item.id.to_string()),
        ("reason", reason),
    ];
    match api.post_form(Endpoint::Report, form).await {
        Ok(()) => ui.success(Label::key("notification-report-sent")),
        Err(err) => report_failure(ui, "report", &err, "notification-report-error"),
    }
}

/// Search failures are logged only; the results region is left as is.
pub async fn search<U: Ui, A: ForumApi>(ui: &U, api: &A, query: &str) {
    match api.search(query).await {
        Ok(results) => {
            tracing::debug!(query, count = results.len(), "search results");
            ui.patch(PagePatch::SearchResults(results));
        }
        Err(err) => tracing::warn!(query, error = %err, "search failed"),
    }
}

pub async fn login<U: Ui, A: ForumApi>(ui: &U, api: &A, form: &LoginForm) {
    if let Err(err) = form.validate() {
        ui.error(Label::key(err.i18n_key()));
        return;
    }

    match api.login(form).await {
        Ok(Submission::Accepted) => {
            tracing::info!(username = %form.username, "logged in");
            ui.patch(PagePatch::LoggedIn(true));
            ui.success(Label::key("notification-login-success"));
        }
        Ok(Submission::Rejected { reason }) => {
            tracing::warn!(reason = %reason, "login rejected");
            ui.error(Label::key("notification-login-rejected").with_arg("reason", reason));
        }
        Err(err) => report_failure(ui, "login", &err, "notification-login-error"),
    }
}

pub async fn create_post<U: Ui, A: ForumApi>(ui: &U, api: &A, draft: &PostDraft) {
    if let Err(err) = draft.validate() {
        ui.error(Label::key(err.i18n_key()));
        return;
    }

    match api.create_post(draft).await {
        Ok(Submission::Accepted) => {
            ui.success(Label::key("notification-post-created"));
            ui.patch(PagePatch::Reload);
        }
        Ok(Submission::Rejected { reason }) => {
            tracing::warn!(reason = %reason, "post rejected");
            ui.error(Label::key("notification-post-rejected").with_arg("reason", reason));
        }
        Err(err) => report_failure(ui, "create-post", &err, "notification-post-error"),
    }
}
