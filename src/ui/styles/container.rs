// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, opacity, palette, radius, shadow};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Generic panel surface used for the forum side panels and forms.
///
/// The color is derived from the active Iced `Theme` background, with a slight
/// opacity, so panels stay readable in both light and dark modes.
pub fn panel(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    let base = palette.background.weak.color;

    container::Style {
        background: Some(Background::Color(Color::from_rgba(
            base.r,
            base.g,
            base.b,
            opacity::SURFACE,
        ))),
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Dimmed layer behind an open dialog. `alpha` follows the dialog transition.
pub fn modal_backdrop(_theme: &Theme, alpha: f32) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM * alpha,
            ..palette::BLACK
        })),
        ..Default::default()
    }
}

/// Dialog card with a severity accent border.
pub fn modal_card(theme: &Theme, accent: Color, alpha: f32) -> container::Style {
    let base = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(Background::Color(Color { a: alpha, ..base })),
        border: Border {
            color: Color { a: alpha, ..accent },
            width: border::WIDTH_MD,
            radius: radius::LG.into(),
        },
        shadow: shadow::LG,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}
