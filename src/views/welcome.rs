// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Welcome screen shown until a template is opened

use masonry::properties::types::AsUnit;
use xilem::WidgetView;
use xilem::core::one_of::Either;
use xilem::style::Style;
use xilem::view::{CrossAxisAlignment, MainAxisAlignment, button, flex_col, label, sized_box};

use crate::data::AppState;
use crate::theme;

/// Welcome screen with an "Open Template" button
pub fn welcome(state: &mut AppState) -> impl WidgetView<AppState> + use<> {
    let error = match &state.error_message {
        Some(message) => Either::A(
            label(message.clone())
                .text_size(14.0)
                .color(theme::text::BRIGHT),
        ),
        None => Either::B(label("")),
    };

    sized_box(
        flex_col((
            label("Pagefields")
                .text_size(32.0)
                .color(theme::text::BRIGHT),
            label("Place data fields on document pages")
                .text_size(16.0)
                .color(theme::text::SECONDARY),
            sized_box(label("")).height(16.px()),
            button(
                label("Open Template...")
                    .text_size(16.0)
                    .color(theme::text::PRIMARY),
                |state: &mut AppState| {
                    state.open_template_dialog();
                },
            ),
            error,
        ))
        .gap(8.px())
        .main_axis_alignment(MainAxisAlignment::Center)
        .cross_axis_alignment(CrossAxisAlignment::Center),
    )
    .expand()
    .background_color(theme::app::BACKGROUND)
}
