// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Conversion between document units and render pixels.
//!
//! Field geometry and page sizes are stored in document units; everything the
//! user touches is measured in render pixels. A single factor
//! `S = render_dpi / document_dpi` maps one onto the other. A non-positive or
//! non-finite factor is a setup error of the caller and is not checked here.

use kurbo::{Point, Rect, Size, Vec2};

/// Document-unit to render-pixel scale factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderScale(f64);

impl RenderScale {
    /// Wrap a raw factor (pixels per document unit)
    pub fn new(factor: f64) -> Self {
        Self(factor)
    }

    /// Derive the factor from a target render resolution and the document's
    /// native resolution
    pub fn from_dpi(render_dpi: f64, document_dpi: f64) -> Self {
        Self(render_dpi / document_dpi)
    }

    /// Pixels per document unit
    pub fn factor(self) -> f64 {
        self.0
    }

    pub fn to_pixels(self, units: f64) -> f64 {
        units * self.0
    }

    pub fn to_document_units(self, pixels: f64) -> f64 {
        pixels / self.0
    }

    pub fn point_to_document(self, point: Point) -> Point {
        Point::new(
            self.to_document_units(point.x),
            self.to_document_units(point.y),
        )
    }

    /// Convert a pointer delta measured in pixels to document units
    pub fn delta_to_document(self, delta: Vec2) -> Vec2 {
        Vec2::new(
            self.to_document_units(delta.x),
            self.to_document_units(delta.y),
        )
    }

    pub fn size_to_pixels(self, size: Size) -> Size {
        Size::new(self.to_pixels(size.width), self.to_pixels(size.height))
    }

    pub fn rect_to_pixels(self, rect: Rect) -> Rect {
        Rect::new(
            self.to_pixels(rect.x0),
            self.to_pixels(rect.y0),
            self.to_pixels(rect.x1),
            self.to_pixels(rect.y1),
        )
    }
}

impl Default for RenderScale {
    fn default() -> Self {
        Self::from_dpi(
            crate::settings::scale::DEFAULT_RENDER_DPI,
            crate::settings::scale::DOCUMENT_DPI,
        )
    }
}
