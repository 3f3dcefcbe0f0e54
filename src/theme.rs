// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Theme colors and constants
//!
//! All colors use hexadecimal format: Color::from_rgb8(0xRR, 0xGG, 0xBB)

use masonry::vello::peniko::Color;

// ============================================================================
// BASE COLORS -- Generic colors for UI, a dark to light gradient by default
// ============================================================================
const BASE_A: Color = Color::from_rgb8(0x10, 0x10, 0x10);
const BASE_B: Color = Color::from_rgb8(0x20, 0x20, 0x20);
const BASE_C: Color = Color::from_rgb8(0x30, 0x30, 0x30);
const BASE_E: Color = Color::from_rgb8(0x50, 0x50, 0x50);
const BASE_F: Color = Color::from_rgb8(0x60, 0x60, 0x60);
const BASE_G: Color = Color::from_rgb8(0x70, 0x70, 0x70);
const BASE_I: Color = Color::from_rgb8(0x90, 0x90, 0x90);
const BASE_L: Color = Color::from_rgb8(0xc0, 0xc0, 0xc0);
const BASE_N: Color = Color::from_rgb8(0xe0, 0xe0, 0xe0);
const BASE_O: Color = Color::from_rgb8(0xf0, 0xf0, 0xf0);

// ============================================================================
// GLOBAL BACKGROUNDS -- Used for welcome screen and the page canvas
// ============================================================================
const APP_BACKGROUND: Color = BASE_B;

// ============================================================================
// UI TEXT AND LABELS
// ============================================================================
const PRIMARY_UI_TEXT: Color = BASE_I;
const SECONDARY_UI_TEXT: Color = BASE_G;

// ============================================================================
// UI PANELS (Properties, Variable Palette, Status)
// ============================================================================
const PANEL_BACKGROUND: Color = BASE_C;
const PANEL_OUTLINE: Color = BASE_F;
const PALETTE_ENTRY_ARMED: Color = Color::from_rgb8(0x14, 0x64, 0x14);
const PANEL_CHOICE_ACTIVE: Color = Color::from_rgb8(0x14, 0x50, 0x8c);

// ============================================================================
// PAGES
// ============================================================================
const PAGE_PLACEHOLDER: Color = BASE_N;
const PAGE_PLACEHOLDER_TEXT: Color = BASE_G;
const PAGE_OUTLINE: Color = BASE_A;
const PAGE_PAPER: Color = Color::WHITE;

// ============================================================================
// FIELDS
// ============================================================================
const FIELD_VARIABLE_FILL: Color = Color::from_rgba8(0x3c, 0x82, 0xdc, 0x30);
const FIELD_VARIABLE_STROKE: Color = Color::from_rgb8(0x3c, 0x82, 0xdc);
const FIELD_TEXT_FILL: Color = Color::from_rgba8(0x50, 0xb4, 0x50, 0x30);
const FIELD_TEXT_STROKE: Color = Color::from_rgb8(0x50, 0xb4, 0x50);
const FIELD_EMPTY_FILL: Color = Color::from_rgba8(0xff, 0xaa, 0x33, 0x26);
const FIELD_EMPTY_STROKE: Color = Color::from_rgb8(0xff, 0xaa, 0x33);
const FIELD_EMPTY_TEXT: Color = BASE_E;
const FIELD_SELECTED_STROKE: Color = Color::from_rgb8(0x00, 0x66, 0xff);

// ============================================================================
// RESIZE HANDLES
// ============================================================================
const HANDLE_INNER: Color = BASE_O;
const HANDLE_OUTER: Color = FIELD_SELECTED_STROKE;

// ============================================================================
// SIZES
// ============================================================================
const FIELD_STROKE_WIDTH: f64 = 1.0;
const FIELD_SELECTED_STROKE_WIDTH: f64 = 2.0;
const HANDLE_SIZE: f64 = 7.0;
const PANEL_WIDTH: f64 = 260.0;
const PANEL_PADDING: f64 = 12.0;
const PANEL_CORNER_RADIUS: f64 = 8.0;

// ============================================================================
// PUBLIC API -- Organized by UI element
// ============================================================================

/// Application-wide colors
pub mod app {
    use super::Color;
    pub const BACKGROUND: Color = super::APP_BACKGROUND;
}

/// Page canvas colors
pub mod canvas {
    use super::Color;
    pub const BACKGROUND: Color = super::APP_BACKGROUND;
}

/// UI text
pub mod text {
    use super::Color;
    pub const PRIMARY: Color = super::PRIMARY_UI_TEXT;
    pub const SECONDARY: Color = super::SECONDARY_UI_TEXT;
    pub const BRIGHT: Color = super::BASE_L;
}

/// Floating panels
pub mod panel {
    use super::Color;
    pub const BACKGROUND: Color = super::PANEL_BACKGROUND;
    pub const OUTLINE: Color = super::PANEL_OUTLINE;
    pub const ARMED_ENTRY: Color = super::PALETTE_ENTRY_ARMED;
    pub const CHOICE_ACTIVE: Color = super::PANEL_CHOICE_ACTIVE;
    pub const WIDTH: f64 = super::PANEL_WIDTH;
    pub const PADDING: f64 = super::PANEL_PADDING;
    pub const CORNER_RADIUS: f64 = super::PANEL_CORNER_RADIUS;
}

/// Page backgrounds while rasters load
pub mod page {
    use super::Color;
    pub const PAPER: Color = super::PAGE_PAPER;
    pub const PLACEHOLDER: Color = super::PAGE_PLACEHOLDER;
    pub const PLACEHOLDER_TEXT: Color = super::PAGE_PLACEHOLDER_TEXT;
    pub const OUTLINE: Color = super::PAGE_OUTLINE;
}

/// Field overlays, by binding state
pub mod field {
    use super::Color;
    pub const VARIABLE_FILL: Color = super::FIELD_VARIABLE_FILL;
    pub const VARIABLE_STROKE: Color = super::FIELD_VARIABLE_STROKE;
    pub const TEXT_FILL: Color = super::FIELD_TEXT_FILL;
    pub const TEXT_STROKE: Color = super::FIELD_TEXT_STROKE;
    pub const EMPTY_FILL: Color = super::FIELD_EMPTY_FILL;
    pub const EMPTY_STROKE: Color = super::FIELD_EMPTY_STROKE;
    pub const EMPTY_TEXT: Color = super::FIELD_EMPTY_TEXT;
    pub const SELECTED_STROKE: Color = super::FIELD_SELECTED_STROKE;
    pub const STROKE_WIDTH: f64 = super::FIELD_STROKE_WIDTH;
    pub const SELECTED_STROKE_WIDTH: f64 = super::FIELD_SELECTED_STROKE_WIDTH;
}

/// Resize handles on the selected field
pub mod handle {
    use super::Color;
    pub const INNER: Color = super::HANDLE_INNER;
    pub const OUTER: Color = super::HANDLE_OUTER;
    pub const SIZE: f64 = super::HANDLE_SIZE;
}
