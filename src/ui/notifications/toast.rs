// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering individual notifications.
//!
//! Toasts are small cards with a severity-colored accent, a title line and a
//! dismiss button. They fade with their transition phase.

use super::manager::{Manager, Message};
use super::notification::{Notification, Severity};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{
    border, opacity, palette, radius, shadow, sizing, spacing, typography,
};
use iced::widget::{button, container, text, Column, Container, Row, Text};
use iced::{alignment, Color, Element, Length, Theme};
use std::time::Instant;

/// Toast widget configuration.
pub struct Toast;

impl Toast {
    /// Renders a single toast notification.
    pub fn view<'a>(
        notification: &'a Notification,
        i18n: &'a I18n,
        alpha: f32,
    ) -> Element<'a, Message> {
        let severity = notification.severity();
        let accent_color = Color {
            a: alpha,
            ..severity.color()
        };

        let glyph = Text::new(Self::severity_glyph(severity))
            .size(typography::TITLE_SM)
            .style(move |_theme: &Theme| text::Style {
                color: Some(accent_color),
            });

        let title = Text::new(notification.title().resolve(i18n))
            .size(typography::BODY)
            .style(move |theme: &Theme| text::Style {
                color: Some(Color {
                    a: alpha,
                    ..theme.palette().text
                }),
            });
        let message = Text::new(notification.message().resolve(i18n))
            .size(typography::BODY_SM)
            .style(move |theme: &Theme| text::Style {
                color: Some(Color {
                    a: alpha,
                    ..theme.palette().text
                }),
            });

        let dismiss_button = button(Text::new("✕").size(typography::BODY_SM))
            .on_press(Message::Dismiss(notification.id()))
            .padding(spacing::XXS)
            .style(dismiss_button_style);

        // Layout: [glyph] [title / message] [dismiss]
        let content = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Container::new(glyph).padding(spacing::XXS))
            .push(
                Container::new(Column::new().spacing(spacing::XXS).push(title).push(message))
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Left),
            )
            .push(dismiss_button);

        Container::new(content)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(move |theme: &Theme| toast_container_style(theme, accent_color, alpha))
            .into()
    }

    /// Renders the toast overlay with all attached notifications.
    ///
    /// Positions toasts in the top-right corner, stacked vertically.
    pub fn view_overlay<'a>(
        manager: &'a Manager,
        i18n: &'a I18n,
        now: Instant,
    ) -> Element<'a, Message> {
        let transition = manager.transition();
        let toasts: Vec<Element<'a, Message>> = manager
            .visible()
            .map(|notification| {
                Self::view(notification, i18n, transition.opacity(notification.phase(), now))
            })
            .collect();

        if toasts.is_empty() {
            Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into()
        } else {
            let toast_column = Column::with_children(toasts)
                .spacing(spacing::XS)
                .align_x(alignment::Horizontal::Right);

            Container::new(toast_column)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Right)
                .align_y(alignment::Vertical::Top)
                .padding(spacing::MD)
                .into()
        }
    }

    fn severity_glyph(severity: Severity) -> &'static str {
        match severity {
            Severity::Success => "✓",
            Severity::Info => "ℹ",
            Severity::Warning => "⚠",
            Severity::Error => "✕",
        }
    }
}

fn toast_container_style(theme: &Theme, accent_color: Color, alpha: f32) -> container::Style {
    let bg_color = Color {
        a: alpha,
        ..theme.extended_palette().background.base.color
    };

    container::Style {
        background: Some(iced::Background::Color(bg_color)),
        border: iced::Border {
            color: accent_color,
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;
    let hover_background = |alpha: f32| {
        Some(iced::Background::Color(Color {
            a: alpha,
            ..palette::GRAY_400
        }))
    };

    let background = match status {
        button::Status::Active | button::Status::Disabled => None,
        button::Status::Hovered => hover_background(opacity::OVERLAY_SUBTLE),
        button::Status::Pressed => hover_background(opacity::OVERLAY_MEDIUM),
    };

    button::Style {
        background,
        text_color: base.text,
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}
