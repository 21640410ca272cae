// SPDX-License-Identifier: MPL-2.0
//! Dialog rendering: a dimmed backdrop with a centered card.

use super::dialog::{ButtonStyle, Dialog, DialogKind, Field, SelectOption};
use super::manager::{Manager, Message};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::notifications::Severity;
use crate::ui::styles;
use iced::widget::{
    button, container, mouse_area, opaque, pick_list, stack, text, text_input, Column, Row, Text,
};
use iced::{alignment, Color, Element, Length, Theme};
use std::time::Instant;

/// Option shown in a choice dialog, with its label already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ChoiceItem {
    value: String,
    text: String,
}

impl std::fmt::Display for ChoiceItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Renders the tracked dialog, or nothing when no dialog is open.
pub fn view_overlay<'a>(
    manager: &'a Manager,
    i18n: &'a I18n,
    now: Instant,
) -> Option<Element<'a, Message>> {
    let dialog = manager.active()?;
    let alpha = manager
        .phase()
        .map_or(0.0, |phase| manager.transition().opacity(phase, now));

    let backdrop = mouse_area(
        container(text(""))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |theme: &Theme| styles::container::modal_backdrop(theme, alpha)),
    )
    .on_press(Message::BackdropPressed);

    let card = container(opaque(card(dialog, i18n, alpha)))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center);

    Some(stack![backdrop, card].into())
}

fn card<'a>(dialog: &'a Dialog, i18n: &'a I18n, alpha: f32) -> Element<'a, Message> {
    let accent = accent_color(dialog.kind());

    let header = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(
            Text::new(kind_glyph(dialog.kind()))
                .size(typography::TITLE_MD)
                .style(move |_theme: &Theme| text::Style {
                    color: Some(Color { a: alpha, ..accent }),
                }),
        )
        .push(Text::new(dialog.title().resolve(i18n)).size(typography::TITLE_SM));

    let mut body = Column::new()
        .spacing(spacing::MD)
        .push(header)
        .push(Text::new(dialog.message().resolve(i18n)).size(typography::BODY));

    if let Some(field) = dialog.field() {
        body = body.push(field_view(field, i18n));
    }

    let buttons = dialog
        .buttons()
        .iter()
        .enumerate()
        .fold(Row::new().spacing(spacing::XS), |row, (index, entry)| {
            let widget = button(Text::new(entry.label.resolve(i18n)).size(typography::BODY))
                .padding([spacing::XXS, spacing::SM])
                .on_press(Message::ButtonPressed(index));
            let widget = match entry.style {
                ButtonStyle::Primary => widget.style(styles::button::primary),
                ButtonStyle::Secondary => widget.style(styles::button::secondary),
            };
            row.push(widget)
        });

    body = body.push(
        container(buttons)
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Right),
    );

    container(body)
        .width(Length::Fixed(sizing::DIALOG_WIDTH))
        .padding(spacing::LG)
        .style(move |theme: &Theme| styles::container::modal_card(theme, accent, alpha))
        .into()
}

fn field_view<'a>(field: &'a Field, i18n: &'a I18n) -> Element<'a, Message> {
    match field {
        Field::Text {
            id,
            value,
            placeholder,
        } => {
            let id = *id;
            let placeholder = placeholder
                .as_ref()
                .map(|label| label.resolve(i18n))
                .unwrap_or_default();
            text_input(&placeholder, value)
                .on_input(move |value| Message::FieldChanged(id, value))
                .padding(spacing::XS)
                .size(typography::BODY)
                .into()
        }
        Field::Select {
            id,
            options,
            selected,
        } => {
            let id = *id;
            let items: Vec<ChoiceItem> = options
                .iter()
                .map(|option: &SelectOption| ChoiceItem {
                    value: option.value.clone(),
                    text: option.label.resolve(i18n),
                })
                .collect();
            let current = selected
                .as_ref()
                .and_then(|value| items.iter().find(|item| &item.value == value).cloned());
            pick_list(items, current, move |item: ChoiceItem| {
                Message::FieldChanged(id, item.value)
            })
            .placeholder(i18n.tr("dialog-choice-placeholder"))
            .width(Length::Fill)
            .into()
        }
    }
}

fn kind_glyph(kind: DialogKind) -> &'static str {
    match kind {
        DialogKind::Confirm => "?",
        DialogKind::Prompt | DialogKind::Choice => "✎",
        DialogKind::Alert(Severity::Success) => "✓",
        DialogKind::Alert(Severity::Info) => "ℹ",
        DialogKind::Alert(Severity::Warning | Severity::Error) => "⚠",
    }
}

fn accent_color(kind: DialogKind) -> Color {
    match kind {
        DialogKind::Alert(severity) => severity.color(),
        DialogKind::Confirm | DialogKind::Prompt | DialogKind::Choice => Severity::Info.color(),
    }
}
