// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The forum panel is the base layer. The open dialog, if any, sits above it
//! and toasts stay on top of both.

use super::Message;
use crate::forum::Page;
use crate::i18n::fluent::I18n;
use crate::ui::forum_panel::{self, ViewContext as PanelViewContext};
use crate::ui::modal;
use crate::ui::notifications::{self, Toast};
use iced::widget::{Container, Stack};
use iced::{Element, Length};
use std::time::Instant;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub panel: &'a forum_panel::State,
    pub page: &'a Page,
    pub notifications: &'a notifications::Manager,
    pub modal: &'a modal::Manager,
    pub in_flight: usize,
    pub now: Instant,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let panel = ctx
        .panel
        .view(PanelViewContext {
            i18n: ctx.i18n,
            page: ctx.page,
            in_flight: ctx.in_flight,
        })
        .map(Message::Panel);

    let mut layers = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(
            Container::new(panel)
                .width(Length::Fill)
                .height(Length::Fill),
        );

    if let Some(dialog) = modal::view_overlay(ctx.modal, ctx.i18n, ctx.now) {
        layers = layers.push(dialog.map(Message::Modal));
    }

    if ctx.notifications.has_notifications() {
        layers = layers.push(
            Toast::view_overlay(ctx.notifications, ctx.i18n, ctx.now).map(Message::Notification),
        );
    }

    layers.into()
}
