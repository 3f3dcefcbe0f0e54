// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Variable palette - catalog variables that can be dropped onto a page
//!
//! Clicking an entry arms it; the next click on empty page space drops a
//! variable field there. Clicking the armed entry again disarms it.

use std::sync::Arc;

use masonry::properties::Padding;
use masonry::properties::types::AsUnit;
use xilem::WidgetView;
use xilem::style::Style;
use xilem::view::{CrossAxisAlignment, button, flex_col, label, portal, sized_box};

use crate::data::AppState;
use crate::model::{VariableCatalog, VariableEntry};
use crate::theme;

/// Width of the variable palette
pub const VARIABLE_PALETTE_WIDTH: f64 = 220.0;

/// Maximum height before the list scrolls
const PALETTE_HEIGHT: f64 = 420.0;

/// Variable palette view for the left side of the editor
pub fn variable_palette(
    catalog: Arc<VariableCatalog>,
    armed_path: Option<String>,
) -> impl WidgetView<AppState> + use<> {
    let groups: Vec<_> = catalog
        .groups()
        .iter()
        .map(|group| {
            let title = if group.label.is_empty() {
                group.key.clone()
            } else {
                group.label.clone()
            };
            let entries: Vec<_> = VariableCatalog::group_entries(group)
                .into_iter()
                .map(|entry| {
                    let armed = armed_path.as_deref() == Some(entry.path.as_str());
                    palette_entry(entry, armed)
                })
                .collect();

            flex_col((
                label(title.to_uppercase())
                    .text_size(12.0)
                    .color(theme::text::SECONDARY),
                flex_col(entries)
                    .gap(2.px())
                    .cross_axis_alignment(CrossAxisAlignment::Fill),
            ))
            .gap(4.px())
            .cross_axis_alignment(CrossAxisAlignment::Fill)
        })
        .collect();

    let hint = if catalog.is_empty() {
        "No variables in this template"
    } else if armed_path.is_some() {
        "Click a page to place the variable"
    } else {
        "Pick a variable to place it"
    };

    sized_box(
        flex_col((
            label(hint).text_size(12.0).color(theme::text::PRIMARY),
            sized_box(portal(
                flex_col(groups)
                    .gap(10.px())
                    .cross_axis_alignment(CrossAxisAlignment::Fill),
            ))
            .height(PALETTE_HEIGHT.px()),
        ))
        .gap(8.px())
        .cross_axis_alignment(CrossAxisAlignment::Fill)
        .padding(theme::panel::PADDING),
    )
    .width(VARIABLE_PALETTE_WIDTH.px())
    .background_color(theme::panel::BACKGROUND)
    .border_color(theme::panel::OUTLINE)
    .border_width(1.5)
    .corner_radius(theme::panel::CORNER_RADIUS)
}

/// Single palette entry
fn palette_entry(entry: VariableEntry, armed: bool) -> impl WidgetView<AppState> + use<> {
    let bg_color = if armed {
        theme::panel::ARMED_ENTRY
    } else {
        theme::panel::BACKGROUND
    };
    let text = entry.label.clone();

    sized_box(
        button(
            label(text).text_size(13.0).color(theme::text::PRIMARY),
            move |state: &mut AppState| {
                state.toggle_armed_variable(&entry);
            },
        )
        .background_color(bg_color)
        .border_color(masonry::vello::peniko::Color::TRANSPARENT),
    )
    .expand_width()
    .padding(Padding::from_vh(1.0, 0.0))
}
