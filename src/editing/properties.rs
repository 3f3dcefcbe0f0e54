// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Field Properties Panel logic.
//!
//! The panel view renders a [`PanelContent`] snapshot of the selected field
//! and turns user input into [`PropertyEdit`]s, which are translated here
//! into store edits. The panel never writes geometry.

use super::field_store::FieldEdit;
use crate::model::field::{format_hex_color, parse_hex_color};
use crate::model::{Alignment, Binding, BindingMode, Field, FieldId, FontFamily};
use crate::settings;

/// Display snapshot of the selected field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldProperties {
    pub id: FieldId,
    pub page: usize,
    pub mode: BindingMode,
    pub variable: String,
    pub custom_text: String,
    pub font_size: f64,
    pub font_family: FontFamily,
    pub color: String,
    pub alignment: Alignment,
    /// x, y, width, height rounded to whole document units
    pub geometry: [i64; 4],
}

/// What the panel shows
#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    /// No field selected
    Empty,
    Editing(FieldProperties),
}

impl PanelContent {
    pub fn for_field(field: Option<&Field>) -> Self {
        match field {
            None => Self::Empty,
            Some(field) => Self::Editing(FieldProperties {
                id: field.id.clone(),
                page: field.page,
                mode: field.binding.mode(),
                variable: field.binding.variable().to_string(),
                custom_text: field.binding.custom_text().to_string(),
                font_size: field.font_size,
                font_family: field.font_family,
                color: field.color.clone(),
                alignment: field.alignment,
                geometry: field.geometry.rounded(),
            }),
        }
    }
}

/// User input from the panel
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyEdit {
    Mode(BindingMode),
    Variable(String),
    Text(String),
    /// Raw text from the font size input
    FontSize(String),
    FontFamily(FontFamily),
    /// Raw text from the color input
    Color(String),
    Alignment(Alignment),
    Delete,
}

/// Translate panel input for `field` into a store edit.
///
/// Returns `None` when the input is rejected (unparseable size or color) or
/// changes nothing.
pub fn field_edit(field: &Field, edit: PropertyEdit) -> Option<FieldEdit> {
    let id = field.id.clone();
    match edit {
        PropertyEdit::Mode(mode) => {
            let binding = field.binding.clone().with_mode(mode);
            (binding != field.binding).then_some(FieldEdit::SetBinding { id, binding })
        }
        PropertyEdit::Variable(path) => Some(FieldEdit::SetBinding {
            id,
            binding: Binding::Variable(path),
        }),
        PropertyEdit::Text(text) => Some(FieldEdit::SetBinding {
            id,
            binding: Binding::Text(text),
        }),
        PropertyEdit::FontSize(raw) => {
            parse_font_size(&raw).map(|size| FieldEdit::SetFontSize { id, size })
        }
        PropertyEdit::FontFamily(family) => Some(FieldEdit::SetFontFamily { id, family }),
        PropertyEdit::Color(raw) => parse_hex_color(&raw).map(|rgb| FieldEdit::SetColor {
            id,
            color: format_hex_color(rgb),
        }),
        PropertyEdit::Alignment(alignment) => Some(FieldEdit::SetAlignment { id, alignment }),
        PropertyEdit::Delete => Some(FieldEdit::Delete(id)),
    }
}

/// Parse a font size, clamped to the supported range
pub fn parse_font_size(raw: &str) -> Option<f64> {
    let size: f64 = raw.trim().parse().ok()?;
    if !size.is_finite() {
        return None;
    }
    Some(size.clamp(
        settings::typography::MIN_FONT_SIZE,
        settings::typography::MAX_FONT_SIZE,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldGeometry;

    fn text_field() -> Field {
        Field::new(
            0,
            FieldGeometry::new(12.4, 7.6, 100.2, 16.0),
            Binding::Text("Hello".into()),
        )
    }

    #[test]
    fn empty_when_nothing_selected() {
        assert_eq!(PanelContent::for_field(None), PanelContent::Empty);
    }

    #[test]
    fn snapshot_rounds_geometry() {
        let field = text_field();
        let PanelContent::Editing(props) = PanelContent::for_field(Some(&field)) else {
            panic!("expected editing content");
        };
        assert_eq!(props.geometry, [12, 8, 100, 16]);
        assert_eq!(props.mode, BindingMode::Text);
        assert_eq!(props.custom_text, "Hello");
    }

    #[test]
    fn text_to_variable_clears_text() {
        let field = text_field();
        let edit = field_edit(&field, PropertyEdit::Mode(BindingMode::Variable));
        assert_eq!(
            edit,
            Some(FieldEdit::SetBinding {
                id: field.id.clone(),
                binding: Binding::Variable(String::new()),
            })
        );
    }

    #[test]
    fn selecting_current_mode_is_a_no_op() {
        let field = text_field();
        assert_eq!(field_edit(&field, PropertyEdit::Mode(BindingMode::Text)), None);
    }

    #[test]
    fn font_size_is_clamped_or_rejected() {
        assert_eq!(parse_font_size("12"), Some(12.0));
        assert_eq!(parse_font_size(" 3 "), Some(6.0));
        assert_eq!(parse_font_size("500"), Some(72.0));
        assert_eq!(parse_font_size("abc"), None);
        assert_eq!(parse_font_size(""), None);
        assert_eq!(parse_font_size("NaN"), None);
    }

    #[test]
    fn invalid_color_is_ignored() {
        let field = text_field();
        assert_eq!(field_edit(&field, PropertyEdit::Color("red".into())), None);
        assert_eq!(
            field_edit(&field, PropertyEdit::Color("#F00".into())),
            Some(FieldEdit::SetColor {
                id: field.id.clone(),
                color: "#ff0000".into(),
            })
        );
    }

    #[test]
    fn delete_targets_the_field() {
        let field = text_field();
        assert_eq!(
            field_edit(&field, PropertyEdit::Delete),
            Some(FieldEdit::Delete(field.id.clone()))
        );
    }
}
