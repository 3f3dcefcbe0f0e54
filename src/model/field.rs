// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! The placeable, bindable field and its typography.
//!
//! A `Field` is a rectangle on one page, stored in document units, that is
//! replaced at generation time by either a variable's runtime value or a
//! literal string. The binding is an enum so a field can never carry both a
//! variable path and literal text; on disk it is still written as the two
//! flat `variable` / `custom_text` slots consumers expect.

use super::catalog::VariableCatalog;
use super::field_id::FieldId;
use crate::settings;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

// ============================================================================
// GEOMETRY
// ============================================================================

/// Position and size of a field in document units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FieldGeometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Geometry of the given size centered on `center`, pushed back inside
    /// the page origin if it would start at a negative coordinate
    pub fn centered_at(center: Point, width: f64, height: f64) -> Self {
        Self::new(
            (center.x - width / 2.0).max(0.0),
            (center.y - height / 2.0).max(0.0),
            width,
            height,
        )
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Apply the field invariants: non-negative origin, minimum size
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.max(0.0),
            y: self.y.max(0.0),
            width: self.width.max(settings::field::MIN_WIDTH),
            height: self.height.max(settings::field::MIN_HEIGHT),
        }
    }

    /// Whole-unit values for read-only display
    pub fn rounded(&self) -> [i64; 4] {
        [
            self.x.round() as i64,
            self.y.round() as i64,
            self.width.round() as i64,
            self.height.round() as i64,
        ]
    }
}

// ============================================================================
// BINDING
// ============================================================================

/// Which slot of a binding is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingMode {
    #[default]
    Variable,
    Text,
}

/// What a field is replaced with at generation time.
///
/// An empty `Variable("")` or `Text("")` is a placeholder awaiting binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BindingRecord", into = "BindingRecord")]
pub enum Binding {
    /// Dotted `group.field` reference into the variable catalog
    Variable(String),
    /// Literal text
    Text(String),
}

impl Default for Binding {
    fn default() -> Self {
        Self::Variable(String::new())
    }
}

impl Binding {
    pub fn mode(&self) -> BindingMode {
        match self {
            Self::Variable(_) => BindingMode::Variable,
            Self::Text(_) => BindingMode::Text,
        }
    }

    /// The variable path, or `""` when bound to text
    pub fn variable(&self) -> &str {
        match self {
            Self::Variable(path) => path,
            Self::Text(_) => "",
        }
    }

    /// The literal text, or `""` when bound to a variable
    pub fn custom_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Variable(_) => "",
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Variable(s) | Self::Text(s) => s.is_empty(),
        }
    }

    /// Switch modes. Switching clears the slot being left; selecting the
    /// current mode again leaves the binding untouched.
    pub fn with_mode(self, mode: BindingMode) -> Self {
        match (self, mode) {
            (binding, mode) if binding.mode() == mode => binding,
            (_, BindingMode::Variable) => Self::Variable(String::new()),
            (_, BindingMode::Text) => Self::Text(String::new()),
        }
    }
}

/// Flat on-disk shape of a binding
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BindingRecord {
    #[serde(default)]
    variable: String,
    #[serde(default)]
    custom_text: String,
}

impl From<BindingRecord> for Binding {
    fn from(record: BindingRecord) -> Self {
        match (record.variable.is_empty(), record.custom_text.is_empty()) {
            (false, false) => {
                tracing::warn!(
                    "Field bound to both variable '{}' and literal text; keeping the variable",
                    record.variable
                );
                Self::Variable(record.variable)
            }
            (true, false) => Self::Text(record.custom_text),
            _ => Self::Variable(record.variable),
        }
    }
}

impl From<Binding> for BindingRecord {
    fn from(binding: Binding) -> Self {
        match binding {
            Binding::Variable(variable) => Self {
                variable,
                custom_text: String::new(),
            },
            Binding::Text(custom_text) => Self {
                variable: String::new(),
                custom_text,
            },
        }
    }
}

// ============================================================================
// TYPOGRAPHY
// ============================================================================

/// Font families available to generated documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    Helvetica,
    #[serde(rename = "Times-Roman")]
    TimesRoman,
    Courier,
}

impl FontFamily {
    pub const ALL: [FontFamily; 3] = [Self::Helvetica, Self::TimesRoman, Self::Courier];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::TimesRoman => "Times Roman",
            Self::Courier => "Courier",
        }
    }
}

/// Horizontal text alignment within the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub const ALL: [Alignment; 3] = [Self::Left, Self::Center, Self::Right];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Center => "Center",
            Self::Right => "Right",
        }
    }
}

/// Parse `#RRGGBB` or `#RGB` into its channels
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some([channel(0)?, channel(2)?, channel(4)?])
        }
        3 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some([channel(0)?, channel(1)?, channel(2)?])
        }
        _ => None,
    }
}

/// Canonical lowercase `#rrggbb` spelling of a color
pub fn format_hex_color([r, g, b]: [u8; 3]) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn default_font_size() -> f64 {
    settings::typography::DEFAULT_FONT_SIZE
}

fn default_color() -> String {
    settings::typography::DEFAULT_COLOR.to_string()
}

// ============================================================================
// FIELD
// ============================================================================

/// One placeable, bindable rectangle on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    /// Zero-based page index
    pub page: usize,
    #[serde(flatten)]
    pub geometry: FieldGeometry,
    #[serde(flatten)]
    pub binding: Binding,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default)]
    pub font_family: FontFamily,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub alignment: Alignment,
}

impl Field {
    /// A new field with default typography
    pub fn new(page: usize, geometry: FieldGeometry, binding: Binding) -> Self {
        Self {
            id: FieldId::next(),
            page,
            geometry,
            binding,
            font_size: default_font_size(),
            font_family: FontFamily::default(),
            color: default_color(),
            alignment: Alignment::default(),
        }
    }

    /// Text shown inside the field on the canvas
    pub fn caption(&self, catalog: &VariableCatalog) -> Caption {
        match &self.binding {
            Binding::Variable(path) if !path.is_empty() => {
                let label = catalog.label_for(path).unwrap_or(path.as_str());
                Caption::Variable(format!("{{{label}}}"))
            }
            Binding::Text(text) if !text.is_empty() => Caption::Text(text.clone()),
            _ => Caption::Empty,
        }
    }

    /// Color channels, falling back to black when the stored value is invalid
    pub fn rgb(&self) -> [u8; 3] {
        parse_hex_color(&self.color).unwrap_or([0, 0, 0])
    }
}

/// Rendered content of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caption {
    Variable(String),
    Text(String),
    Empty,
}
