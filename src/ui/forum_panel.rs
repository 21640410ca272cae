// SPDX-License-Identifier: MPL-2.0
//! Forum page panel.
//!
//! Holds the form inputs (login, new post, search, moderation target) and
//! turns button presses into typed [`Action`]s for the parent application.
//! The panel never talks to the server itself.

use crate::forum::page::{ItemKind, ItemRef, SearchState, VoteKind, VoteTarget};
use crate::forum::roles::Role;
use crate::forum::validation::{LoginForm, PostDraft};
use crate::forum::{Action, Page};
use crate::i18n::fluent::I18n;
use crate::i18n::Label;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{
    button, container, pick_list, scrollable, text, text_input, Column, Row, Text,
};
use iced::{Element, Length};
use std::fmt;

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub page: &'a Page,
    /// Number of actions still waiting on the server.
    pub in_flight: usize,
}

#[derive(Debug, Clone)]
pub enum Message {
    UsernameChanged(String),
    PasswordChanged(String),
    SubmitLogin,
    TitleChanged(String),
    ContentChanged(String),
    CategoryChanged(String),
    TagsChanged(String),
    SubmitPost,
    SearchChanged(String),
    UserIdChanged(String),
    TargetNameChanged(String),
    RoleSelected(Role),
    ItemKindSelected(ItemKind),
    ItemIdChanged(String),
    PostIdChanged(String),
    ReasonChanged(String),
    Vote(VoteKind),
    VoteOnResult { id: u64, vote: VoteKind },
    ReportResult(u64),
    Ban,
    Promote,
    Delete,
    Report,
    MarkSolution,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    Dispatch(Action),
    /// The search box changed; the parent owns debouncing.
    SearchInput(String),
    /// The inputs do not describe a valid target. Carries a message key.
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct State {
    login: LoginForm,
    draft: PostDraft,
    search: String,
    user_id: String,
    target_name: String,
    role: Role,
    item_kind: ItemKind,
    item_id: String,
    post_id: String,
    reason: String,
}

impl Default for State {
    fn default() -> Self {
        Self {
            login: LoginForm::default(),
            draft: PostDraft::default(),
            search: String::new(),
            user_id: String::new(),
            target_name: String::new(),
            role: Role::User,
            item_kind: ItemKind::Post,
            item_id: String::new(),
            post_id: String::new(),
            reason: String::new(),
        }
    }
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::UsernameChanged(value) => self.login.username = value,
            Message::PasswordChanged(value) => self.login.password = value,
            Message::SubmitLogin => return Event::Dispatch(Action::Login(self.login.clone())),
            Message::TitleChanged(value) => self.draft.title = value,
            Message::ContentChanged(value) => self.draft.content = value,
            Message::CategoryChanged(value) => self.draft.category = value,
            Message::TagsChanged(value) => self.draft.tags = value,
            Message::SubmitPost => return Event::Dispatch(Action::CreatePost(self.draft.clone())),
            Message::SearchChanged(value) => {
                self.search = value;
                return Event::SearchInput(self.search.clone());
            }
            Message::UserIdChanged(value) => self.user_id = value,
            Message::TargetNameChanged(value) => self.target_name = value,
            Message::RoleSelected(role) => self.role = role,
            Message::ItemKindSelected(kind) => self.item_kind = kind,
            Message::ItemIdChanged(value) => self.item_id = value,
            Message::PostIdChanged(value) => self.post_id = value,
            Message::ReasonChanged(value) => self.reason = value,
            Message::Vote(vote) => return self.vote(vote),
            Message::VoteOnResult { id, vote } => {
                return Event::Dispatch(Action::Vote {
                    vote,
                    target: VoteTarget::Post,
                    id,
                })
            }
            Message::ReportResult(id) => {
                return Event::Dispatch(Action::Report {
                    item: ItemRef::new(ItemKind::Post, id),
                    reason: None,
                })
            }
            Message::Ban => return self.ban(),
            Message::Promote => return self.promote(),
            Message::Delete => {
                return match self.item() {
                    Ok(item) => Event::Dispatch(Action::Delete { item }),
                    Err(event) => event,
                }
            }
            Message::Report => return self.report(),
            Message::MarkSolution => return self.mark_solution(),
        }
        Event::None
    }

    fn vote(&self, vote: VoteKind) -> Event {
        let target = match self.item_kind {
            ItemKind::Post => VoteTarget::Post,
            ItemKind::Comment => VoteTarget::Comment,
            ItemKind::User => return Event::Invalid("notification-invalid-target"),
        };
        match parse_id(&self.item_id) {
            Some(id) => Event::Dispatch(Action::Vote { vote, target, id }),
            None => Event::Invalid("notification-invalid-id"),
        }
    }

    fn ban(&self) -> Event {
        match parse_id(&self.user_id) {
            Some(user_id) => Event::Dispatch(Action::Ban {
                user_id,
                username: self.display_name(),
            }),
            None => Event::Invalid("notification-invalid-id"),
        }
    }

    fn promote(&self) -> Event {
        match parse_id(&self.user_id) {
            Some(user_id) => Event::Dispatch(Action::Promote {
                user_id,
                username: self.display_name(),
                current_role: self.role,
            }),
            None => Event::Invalid("notification-invalid-id"),
        }
    }

    fn report(&self) -> Event {
        let reason = self.reason.trim();
        match self.item() {
            Ok(item) => Event::Dispatch(Action::Report {
                item,
                reason: (!reason.is_empty()).then(|| reason.to_string()),
            }),
            Err(event) => event,
        }
    }

    fn mark_solution(&self) -> Event {
        if self.item_kind != ItemKind::Comment {
            return Event::Invalid("notification-invalid-target");
        }
        match (parse_id(&self.item_id), parse_id(&self.post_id)) {
            (Some(comment_id), Some(post_id)) => Event::Dispatch(Action::MarkSolution {
                comment_id,
                post_id,
            }),
            _ => Event::Invalid("notification-invalid-id"),
        }
    }

    fn item(&self) -> Result<ItemRef, Event> {
        parse_id(&self.item_id)
            .map(|id| ItemRef::new(self.item_kind, id))
            .ok_or(Event::Invalid("notification-invalid-id"))
    }

    /// Username shown in dialogs, falling back to the numeric id.
    fn display_name(&self) -> String {
        let name = self.target_name.trim();
        if name.is_empty() {
            format!("#{}", self.user_id.trim())
        } else {
            name.to_string()
        }
    }

    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        let left = Column::new()
            .spacing(spacing::LG)
            .width(Length::Fixed(sizing::FORM_WIDTH))
            .push(self.login_section(&ctx))
            .push(self.post_section(ctx.i18n))
            .push(self.moderation_section(ctx.i18n));

        let right = Column::new()
            .spacing(spacing::MD)
            .width(Length::Fill)
            .push(self.search_section(&ctx));

        let mut status = Row::new().spacing(spacing::SM);
        let session_key = if ctx.page.is_logged_in() {
            "panel-logged-in"
        } else {
            "panel-logged-out"
        };
        status = status.push(text(ctx.i18n.tr(session_key)).size(typography::CAPTION));
        if ctx.in_flight > 0 {
            status = status.push(
                text(ctx.i18n.tr_with_args(
                    "panel-pending",
                    &[("count", &ctx.in_flight.to_string())],
                ))
                .size(typography::CAPTION),
            );
        }

        let body = Column::new()
            .spacing(spacing::MD)
            .padding(spacing::LG)
            .push(status)
            .push(Row::new().spacing(spacing::LG).push(left).push(right));

        scrollable(body).height(Length::Fill).into()
    }

    fn login_section<'a>(&'a self, ctx: &ViewContext<'a>) -> Element<'a, Message> {
        let i18n = ctx.i18n;
        let username = text_input(&i18n.tr("panel-username"), &self.login.username)
            .on_input(Message::UsernameChanged)
            .on_submit(Message::SubmitLogin);
        let password = text_input(&i18n.tr("panel-password"), &self.login.password)
            .secure(true)
            .on_input(Message::PasswordChanged)
            .on_submit(Message::SubmitLogin);

        section(
            i18n.tr("panel-login-heading"),
            Column::new()
                .spacing(spacing::XS)
                .push(username)
                .push(password)
                .push(
                    button(text(i18n.tr("panel-login-button")))
                        .style(styles::button::primary)
                        .on_press(Message::SubmitLogin),
                ),
        )
    }

    fn post_section<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let fields = Column::new()
            .spacing(spacing::XS)
            .push(
                text_input(&i18n.tr("panel-post-title"), &self.draft.title)
                    .on_input(Message::TitleChanged),
            )
            .push(
                text_input(&i18n.tr("panel-post-content"), &self.draft.content)
                    .on_input(Message::ContentChanged),
            )
            .push(
                text_input(&i18n.tr("panel-post-category"), &self.draft.category)
                    .on_input(Message::CategoryChanged),
            )
            .push(
                text_input(&i18n.tr("panel-post-tags"), &self.draft.tags)
                    .on_input(Message::TagsChanged),
            )
            .push(
                button(text(i18n.tr("panel-post-button")))
                    .style(styles::button::primary)
                    .on_press(Message::SubmitPost),
            );

        section(i18n.tr("panel-post-heading"), fields)
    }

    fn moderation_section<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let roles: Vec<Labeled<Role>> = Role::ALL
            .into_iter()
            .map(|role| Labeled::new(role, &role.label(), i18n))
            .collect();
        let selected_role = Labeled::new(self.role, &self.role.label(), i18n);

        let kinds: Vec<Labeled<ItemKind>> = ItemKind::ALL
            .into_iter()
            .map(|kind| Labeled::new(kind, &item_kind_label(kind), i18n))
            .collect();
        let selected_kind = Labeled::new(self.item_kind, &item_kind_label(self.item_kind), i18n);

        let user_row = Column::new()
            .spacing(spacing::XS)
            .push(
                Row::new()
                    .spacing(spacing::XS)
                    .push(
                        text_input(&i18n.tr("panel-user-id"), &self.user_id)
                            .on_input(Message::UserIdChanged),
                    )
                    .push(
                        text_input(&i18n.tr("panel-username"), &self.target_name)
                            .on_input(Message::TargetNameChanged),
                    ),
            )
            .push(
                Row::new()
                    .spacing(spacing::XS)
                    .push(pick_list(roles, Some(selected_role), |item| {
                        Message::RoleSelected(item.value)
                    }))
                    .push(
                        button(text(i18n.tr("panel-promote-button")))
                            .style(styles::button::secondary)
                            .on_press(Message::Promote),
                    )
                    .push(
                        button(text(i18n.tr("panel-ban-button")))
                            .style(styles::button::danger)
                            .on_press(Message::Ban),
                    ),
            );

        let item_row = Column::new()
            .spacing(spacing::XS)
            .push(
                Row::new()
                    .spacing(spacing::XS)
                    .push(pick_list(kinds, Some(selected_kind), |item| {
                        Message::ItemKindSelected(item.value)
                    }))
                    .push(
                        text_input(&i18n.tr("panel-item-id"), &self.item_id)
                            .on_input(Message::ItemIdChanged),
                    )
                    .push(
                        text_input(&i18n.tr("panel-post-id"), &self.post_id)
                            .on_input(Message::PostIdChanged),
                    ),
            )
            .push(
                text_input(&i18n.tr("panel-report-reason"), &self.reason)
                    .on_input(Message::ReasonChanged),
            )
            .push(
                Row::new()
                    .spacing(spacing::XS)
                    .push(
                        button(text(i18n.tr("panel-like-button")))
                            .style(styles::button::secondary)
                            .on_press(Message::Vote(VoteKind::Like)),
                    )
                    .push(
                        button(text(i18n.tr("panel-dislike-button")))
                            .style(styles::button::secondary)
                            .on_press(Message::Vote(VoteKind::Dislike)),
                    )
                    .push(
                        button(text(i18n.tr("panel-solution-button")))
                            .style(styles::button::secondary)
                            .on_press(Message::MarkSolution),
                    )
                    .push(
                        button(text(i18n.tr("panel-report-button")))
                            .style(styles::button::secondary)
                            .on_press(Message::Report),
                    )
                    .push(
                        button(text(i18n.tr("panel-delete-button")))
                            .style(styles::button::danger)
                            .on_press(Message::Delete),
                    ),
            );

        section(
            i18n.tr("panel-moderation-heading"),
            Column::new()
                .spacing(spacing::MD)
                .push(user_row)
                .push(item_row),
        )
    }

    fn search_section<'a>(&'a self, ctx: &ViewContext<'a>) -> Element<'a, Message> {
        let i18n = ctx.i18n;
        let input = text_input(&i18n.tr("panel-search-placeholder"), &self.search)
            .on_input(Message::SearchChanged);

        let mut content = Column::new().spacing(spacing::SM).push(input);
        match ctx.page.search() {
            SearchState::Idle => {}
            SearchState::NoResults => {
                content = content.push(text(i18n.tr("search-no-results")).size(typography::BODY));
            }
            SearchState::Results(results) => {
                for result in results {
                    let liked = ctx
                        .page
                        .is_vote_active(VoteTarget::Post, result.id, VoteKind::Like);
                    let disliked =
                        ctx.page
                            .is_vote_active(VoteTarget::Post, result.id, VoteKind::Dislike);

                    let actions = Row::new()
                        .spacing(spacing::XS)
                        .push(
                            button(text(i18n.tr("panel-like-button")))
                                .style(styles::button::vote(liked))
                                .on_press(Message::VoteOnResult {
                                    id: result.id,
                                    vote: VoteKind::Like,
                                }),
                        )
                        .push(
                            button(text(i18n.tr("panel-dislike-button")))
                                .style(styles::button::vote(disliked))
                                .on_press(Message::VoteOnResult {
                                    id: result.id,
                                    vote: VoteKind::Dislike,
                                }),
                        )
                        .push(
                            button(text(i18n.tr("panel-report-button")))
                                .style(styles::button::secondary)
                                .on_press(Message::ReportResult(result.id)),
                        );

                    let mut entry = Column::new()
                        .spacing(spacing::XXS)
                        .push(Text::new(result.title.as_str()).size(typography::TITLE_SM));
                    if !result.category.is_empty() {
                        entry = entry
                            .push(Text::new(result.category.as_str()).size(typography::CAPTION));
                    }
                    if !result.excerpt.is_empty() {
                        entry = entry
                            .push(Text::new(result.excerpt.as_str()).size(typography::BODY_SM));
                    }

                    content = content.push(
                        container(entry.push(actions))
                            .padding(spacing::SM)
                            .width(Length::Fill)
                            .style(styles::container::panel),
                    );
                }
            }
        }

        section(i18n.tr("panel-search-heading"), content)
    }
}

fn section<'a>(heading: String, body: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(
        Column::new()
            .spacing(spacing::SM)
            .push(text(heading).size(typography::TITLE_MD))
            .push(body),
    )
    .padding(spacing::MD)
    .width(Length::Fill)
    .style(styles::container::panel)
    .into()
}

fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

fn item_kind_label(kind: ItemKind) -> Label {
    Label::key(match kind {
        ItemKind::Post => "item-kind-post",
        ItemKind::Comment => "item-kind-comment",
        ItemKind::User => "item-kind-user",
    })
}

/// Pick list entry: a value with its translated label.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Labeled<T> {
    value: T,
    text: String,
}

impl<T> Labeled<T> {
    fn new(value: T, label: &Label, i18n: &I18n) -> Self {
        Self {
            value,
            text: label.resolve(i18n),
        }
    }
}

impl<T> fmt::Display for Labeled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
