// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Properties panel for the selected field
//!
//! Shows the binding (variable picker or literal text), typography and the
//! read-only geometry of the selected field. Every input is turned into a
//! [`PropertyEdit`] and handed to `AppState`.

use std::sync::Arc;

use masonry::properties::Padding;
use masonry::properties::types::AsUnit;
use xilem::WidgetView;
use xilem::core::one_of::Either;
use xilem::style::Style;
use xilem::view::{
    CrossAxisAlignment, button, flex_col, flex_row, label, portal, sized_box, text_input,
};

use crate::data::AppState;
use crate::editing::PropertyEdit;
use crate::editing::properties::FieldProperties;
use crate::editing::PanelContent;
use crate::model::{Alignment, BindingMode, FontFamily, VariableCatalog};
use crate::theme;

/// Height of the scrollable variable picker
const PICKER_HEIGHT: f64 = 180.0;

/// Properties panel view for the right side of the editor
pub fn properties_panel(
    content: PanelContent,
    catalog: Arc<VariableCatalog>,
) -> impl WidgetView<AppState> + use<> {
    let body = match content {
        PanelContent::Editing(props) => Either::A(editing_content(props, &catalog)),
        PanelContent::Empty => Either::B(empty_content()),
    };

    sized_box(body)
        .width(theme::panel::WIDTH.px())
        .background_color(theme::panel::BACKGROUND)
        .border_color(theme::panel::OUTLINE)
        .border_width(1.5)
        .corner_radius(theme::panel::CORNER_RADIUS)
}

/// Help text when nothing is selected
fn empty_content() -> impl WidgetView<AppState> + use<> {
    flex_col((
        section_header("Properties"),
        label("Select a field to edit it,")
            .text_size(13.0)
            .color(theme::text::PRIMARY),
        label("or click a page to add one.")
            .text_size(13.0)
            .color(theme::text::PRIMARY),
    ))
    .gap(4.px())
    .cross_axis_alignment(CrossAxisAlignment::Start)
    .padding(theme::panel::PADDING)
}

fn editing_content(
    props: FieldProperties,
    catalog: &VariableCatalog,
) -> impl WidgetView<AppState> + use<> {
    let binding = flex_col((
        section_header("Binding"),
        flex_row((
            mode_button(BindingMode::Variable, props.mode),
            mode_button(BindingMode::Text, props.mode),
        ))
        .gap(4.px()),
        binding_editor(&props, catalog),
    ))
    .gap(4.px())
    .cross_axis_alignment(CrossAxisAlignment::Fill);

    let family_buttons: Vec<_> = FontFamily::ALL
        .into_iter()
        .map(|family| {
            choice_button(
                family.display_name().to_string(),
                family == props.font_family,
                move |state: &mut AppState| {
                    state.apply_property(PropertyEdit::FontFamily(family));
                },
            )
        })
        .collect();

    let alignment_buttons: Vec<_> = Alignment::ALL
        .into_iter()
        .map(|alignment| {
            choice_button(
                alignment.display_name().to_string(),
                alignment == props.alignment,
                move |state: &mut AppState| {
                    state.apply_property(PropertyEdit::Alignment(alignment));
                },
            )
        })
        .collect();

    // Size and color commit on Enter
    let typography = flex_col((
        section_header("Font size"),
        text_input(format_font_size(props.font_size), |_state: &mut AppState, _value| {})
            .on_enter(|state: &mut AppState, raw| {
                state.apply_property(PropertyEdit::FontSize(raw));
            })
            .placeholder("6 - 72"),
        section_header("Font family"),
        flex_row(family_buttons).gap(4.px()),
        section_header("Color"),
        text_input(props.color.clone(), |_state: &mut AppState, _value| {})
            .on_enter(|state: &mut AppState, raw| {
                state.apply_property(PropertyEdit::Color(raw));
            })
            .placeholder("#000000"),
        section_header("Alignment"),
        flex_row(alignment_buttons).gap(4.px()),
    ))
    .gap(4.px())
    .cross_axis_alignment(CrossAxisAlignment::Fill);

    let [x, y, width, height] = props.geometry;
    let geometry = flex_col((
        section_header("Geometry"),
        value_label(format!("Page {}", props.page + 1)),
        value_label(format!("X {x}   Y {y}")),
        value_label(format!("W {width}   H {height}")),
    ))
    .gap(2.px())
    .cross_axis_alignment(CrossAxisAlignment::Start);

    flex_col((
        binding,
        typography,
        geometry,
        button(
            label("Delete field")
                .text_size(13.0)
                .color(theme::text::BRIGHT),
            |state: &mut AppState| {
                state.apply_property(PropertyEdit::Delete);
            },
        ),
    ))
    .gap(12.px())
    .cross_axis_alignment(CrossAxisAlignment::Fill)
    .padding(theme::panel::PADDING)
}

/// Variable picker in variable mode, free text in text mode
fn binding_editor(
    props: &FieldProperties,
    catalog: &VariableCatalog,
) -> impl WidgetView<AppState> + use<> {
    match props.mode {
        BindingMode::Variable => {
            let current = if props.variable.is_empty() {
                "No variable".to_string()
            } else {
                match catalog.label_for(&props.variable) {
                    Some(label) => format!("{label} ({})", props.variable),
                    None => props.variable.clone(),
                }
            };

            let entries: Vec<_> = catalog
                .entries()
                .into_iter()
                .map(|entry| {
                    let active = entry.path == props.variable;
                    let text = format!("{} · {}", entry.group_label, entry.label);
                    let path = entry.path;
                    choice_button(text, active, move |state: &mut AppState| {
                        state.apply_property(PropertyEdit::Variable(path.clone()));
                    })
                })
                .collect();

            Either::A(
                flex_col((
                    value_label(current),
                    sized_box(portal(
                        flex_col(entries)
                            .gap(2.px())
                            .cross_axis_alignment(CrossAxisAlignment::Fill),
                    ))
                    .height(PICKER_HEIGHT.px()),
                ))
                .gap(4.px())
                .cross_axis_alignment(CrossAxisAlignment::Fill),
            )
        }
        BindingMode::Text => Either::B(
            text_input(
                props.custom_text.clone(),
                |state: &mut AppState, text| {
                    state.apply_property(PropertyEdit::Text(text));
                },
            )
            .placeholder("Literal text"),
        ),
    }
}

fn mode_button(mode: BindingMode, current: BindingMode) -> impl WidgetView<AppState> + use<> {
    let text = match mode {
        BindingMode::Variable => "Variable",
        BindingMode::Text => "Text",
    };
    choice_button(text.to_string(), mode == current, move |state: &mut AppState| {
        state.apply_property(PropertyEdit::Mode(mode));
    })
}

/// Button that shows whether it is the current choice
fn choice_button<F>(
    text: String,
    active: bool,
    on_click: F,
) -> impl WidgetView<AppState> + use<F>
where
    F: Fn(&mut AppState) + Send + Sync + 'static,
{
    let bg_color = if active {
        theme::panel::CHOICE_ACTIVE
    } else {
        theme::panel::BACKGROUND
    };

    sized_box(
        button(
            label(text)
                .text_size(13.0)
                .color(theme::text::PRIMARY),
            on_click,
        )
        .background_color(bg_color)
        .border_color(theme::panel::OUTLINE),
    )
    .padding(Padding::from_vh(1.0, 0.0))
}

fn section_header(text: &str) -> impl WidgetView<AppState> + use<> {
    label(text.to_string())
        .text_size(12.0)
        .color(theme::text::SECONDARY)
}

fn value_label(text: String) -> impl WidgetView<AppState> + use<> {
    label(text).text_size(13.0).color(theme::text::PRIMARY)
}

/// Whole sizes without a decimal point
fn format_font_size(size: f64) -> String {
    if size.fract() == 0.0 {
        format!("{size:.0}")
    } else {
        format!("{size:.1}")
    }
}
