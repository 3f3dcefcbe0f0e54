// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Application settings and configuration constants.
//!
//! This module holds non-visual settings that stay stable across theme
//! changes. Visual styling (colors, stroke widths) belongs in `theme.rs`.
//! The few values a template may override at runtime live in
//! [`EditorConfig`], which is read from the `[editor]` table of a template
//! manifest and falls back to the constants below.

use crate::editing::RenderScale;
use serde::{Deserialize, Serialize};

// ============================================================================
// RESOLUTION SETTINGS
// ============================================================================
/// Document-native resolution (document units per inch)
const DOCUMENT_DPI: f64 = 72.0;

/// Resolution page rasters are rendered at unless a template overrides it
const DEFAULT_RENDER_DPI: f64 = 150.0;

// ============================================================================
// FIELD GEOMETRY SETTINGS
// ============================================================================
/// Minimum usable field width (document units)
const FIELD_MIN_WIDTH: f64 = 30.0;

/// Minimum usable field height (document units)
const FIELD_MIN_HEIGHT: f64 = 14.0;

/// Size of a field created by clicking empty page space
const FIELD_CLICK_WIDTH: f64 = 100.0;
const FIELD_CLICK_HEIGHT: f64 = 16.0;

/// Size of a field created by dropping a variable onto a page
const FIELD_DROP_WIDTH: f64 = 120.0;
const FIELD_DROP_HEIGHT: f64 = 16.0;

// ============================================================================
// TYPOGRAPHY SETTINGS
// ============================================================================
const DEFAULT_FONT_SIZE: f64 = 10.0;
const MIN_FONT_SIZE: f64 = 6.0;
const MAX_FONT_SIZE: f64 = 72.0;
const DEFAULT_COLOR: &str = "#000000";

// ============================================================================
// CANVAS SETTINGS
// ============================================================================
/// Radius around a resize handle that still counts as a hit (pixels)
const HANDLE_HIT_RADIUS: f64 = 6.0;

/// Vertical gap between stacked pages (pixels)
const DEFAULT_PAGE_GAP: f64 = 24.0;

/// Padding around the page stack (pixels)
const CANVAS_PADDING: f64 = 24.0;

/// Pixels scrolled per wheel line
const SCROLL_LINE_STEP: f64 = 40.0;

/// Pointer travel (pixels) below which a press/release pair is a click
const CLICK_SLOP: f64 = 3.0;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Resolution settings used to derive the render scale
pub mod scale {
    /// Document units per inch
    pub const DOCUMENT_DPI: f64 = super::DOCUMENT_DPI;

    /// Default page raster resolution
    pub const DEFAULT_RENDER_DPI: f64 = super::DEFAULT_RENDER_DPI;
}

/// Field size limits and creation defaults (document units)
pub mod field {
    pub const MIN_WIDTH: f64 = super::FIELD_MIN_WIDTH;
    pub const MIN_HEIGHT: f64 = super::FIELD_MIN_HEIGHT;

    pub const CLICK_WIDTH: f64 = super::FIELD_CLICK_WIDTH;
    pub const CLICK_HEIGHT: f64 = super::FIELD_CLICK_HEIGHT;

    pub const DROP_WIDTH: f64 = super::FIELD_DROP_WIDTH;
    pub const DROP_HEIGHT: f64 = super::FIELD_DROP_HEIGHT;
}

/// Default typography and the accepted font size range
pub mod typography {
    pub const DEFAULT_FONT_SIZE: f64 = super::DEFAULT_FONT_SIZE;
    pub const MIN_FONT_SIZE: f64 = super::MIN_FONT_SIZE;
    pub const MAX_FONT_SIZE: f64 = super::MAX_FONT_SIZE;
    pub const DEFAULT_COLOR: &str = super::DEFAULT_COLOR;
}

/// Canvas interaction and layout settings (pixels)
pub mod canvas {
    pub const HANDLE_HIT_RADIUS: f64 = super::HANDLE_HIT_RADIUS;
    pub const DEFAULT_PAGE_GAP: f64 = super::DEFAULT_PAGE_GAP;
    pub const PADDING: f64 = super::CANVAS_PADDING;
    pub const SCROLL_LINE_STEP: f64 = super::SCROLL_LINE_STEP;
    pub const CLICK_SLOP: f64 = super::CLICK_SLOP;
}

// ============================================================================
// RUNTIME CONFIGURATION
// ============================================================================

/// Per-template editor configuration.
///
/// Read from the optional `[editor]` table of `template.toml`:
///
/// ```toml
/// [editor]
/// render_dpi = 150
/// page_gap = 24
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Resolution page rasters are requested at
    pub render_dpi: f64,
    /// Vertical gap between stacked pages, in pixels
    pub page_gap: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            render_dpi: DEFAULT_RENDER_DPI,
            page_gap: DEFAULT_PAGE_GAP,
        }
    }
}

impl EditorConfig {
    /// The document-unit to pixel scale implied by this configuration
    pub fn scale(&self) -> RenderScale {
        RenderScale::from_dpi(self.render_dpi, DOCUMENT_DPI)
    }
}
