// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Editor view - page canvas with floating panels

use std::sync::Arc;

use masonry::properties::types::{AsUnit, UnitPoint};
use xilem::WidgetView;
use xilem::core::one_of::Either;
use xilem::style::Style;
use xilem::view::{
    ChildAlignment, CrossAxisAlignment, ZStackExt, button, flex_col, flex_row, label, sized_box,
    transformed, zstack,
};

use crate::components::{page_canvas_view, properties_panel, variable_palette};
use crate::data::AppState;
use crate::editing::EditSession;
use crate::theme;

/// Fixed margin between panels and the window edge
const MARGIN: f64 = 16.0;

// ===== Editor Tab View =====

/// The editor: page canvas with the palette, properties panel and status
/// line floating over it
pub fn editor_tab(state: &mut AppState) -> impl WidgetView<AppState> + use<> {
    let Some(session) = state.session.clone() else {
        // Only built with a template open
        return Either::B(flex_col((label("No template open"),)));
    };

    let panel = session.panel_content();
    let catalog = Arc::clone(&session.catalog);

    Either::A(zstack((
        // Background: the page canvas (full window)
        page_canvas_view(
            Arc::clone(&session),
            Arc::clone(&state.images),
            |state: &mut AppState, session, save_requested, payload_consumed| {
                state.handle_session_update(session, save_requested, payload_consumed);
            },
        ),
        // Top-left: variable palette
        transformed(variable_palette(Arc::clone(&catalog), state.armed_path()))
            .translate((MARGIN, MARGIN))
            .alignment(ChildAlignment::SelfAligned(UnitPoint::TOP_LEFT)),
        // Top-right: properties of the selected field
        transformed(properties_panel(panel, catalog))
            .translate((-MARGIN, MARGIN))
            .alignment(ChildAlignment::SelfAligned(UnitPoint::TOP_RIGHT)),
        // Bottom-center: status line
        transformed(status_line(state, &session))
            .translate((0.0, -MARGIN))
            .alignment(ChildAlignment::SelfAligned(UnitPoint::BOTTOM)),
    )))
}

// ===== Helper Views =====

/// Template name, counts, save state and the file actions
fn status_line(state: &AppState, session: &EditSession) -> impl WidgetView<AppState> + use<> {
    let name = state
        .template_display_name()
        .unwrap_or_else(|| "Untitled".to_string());
    let counts = format!(
        "{} pages  ·  {} fields  ·  {}/{} pages loaded",
        session.pages.len(),
        session.store.len(),
        state.images.ready_count(),
        session.pages.len()
    );
    let saved = match (&state.error_message, &state.last_saved) {
        (Some(error), _) => error.clone(),
        (None, Some(time)) => format!("Saved {time}"),
        (None, None) => "Not saved".to_string(),
    };

    sized_box(
        flex_row((
            flex_col((
                label(name).text_size(14.0).color(theme::text::BRIGHT),
                label(counts).text_size(12.0).color(theme::text::SECONDARY),
            ))
            .gap(2.px())
            .cross_axis_alignment(CrossAxisAlignment::Start),
            label(saved).text_size(12.0).color(theme::text::PRIMARY),
            button(
                label("Save").text_size(13.0).color(theme::text::PRIMARY),
                |state: &mut AppState| {
                    state.save_template();
                },
            ),
            button(
                label("Close").text_size(13.0).color(theme::text::PRIMARY),
                |state: &mut AppState| {
                    state.close_template();
                },
            ),
        ))
        .gap(16.px())
        .cross_axis_alignment(CrossAxisAlignment::Center)
        .padding(theme::panel::PADDING),
    )
    .background_color(theme::panel::BACKGROUND)
    .border_color(theme::panel::OUTLINE)
    .border_width(1.5)
    .corner_radius(theme::panel::CORNER_RADIUS)
}
