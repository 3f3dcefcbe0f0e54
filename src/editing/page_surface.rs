// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Multi-page surface: page layout, paint order and field creation.
//!
//! Pages are stacked vertically in one scrollable surface, each sized
//! `page.width * S` by `page.height * S` render pixels. Coordinates on the
//! surface ("content" coordinates) are independent of scrolling; the canvas
//! widget translates them to the viewport.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use super::field_store::FieldStore;
use super::scale::RenderScale;
use crate::model::{Binding, Field, FieldGeometry, FieldId, PageDescriptor};
use crate::settings;

/// Placement of every page in content coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct PageSurface {
    rects: Vec<Rect>,
    content_size: Size,
}

impl PageSurface {
    /// Lay pages out top to bottom, centered on the widest page
    pub fn new(pages: &[PageDescriptor], scale: RenderScale, gap: f64) -> Self {
        let padding = settings::canvas::PADDING;
        let sizes: Vec<Size> = pages
            .iter()
            .map(|page| scale.size_to_pixels(page.size()))
            .collect();
        let widest = sizes.iter().map(|s| s.width).fold(0.0, f64::max);

        let mut rects = Vec::with_capacity(sizes.len());
        let mut y = padding;
        for size in &sizes {
            let x = padding + (widest - size.width) / 2.0;
            rects.push(Rect::from_origin_size((x, y), *size));
            y += size.height + gap;
        }
        let height = if sizes.is_empty() {
            padding * 2.0
        } else {
            y - gap + padding
        };

        Self {
            rects,
            content_size: Size::new(widest + padding * 2.0, height),
        }
    }

    pub fn page_count(&self) -> usize {
        self.rects.len()
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Rectangle of a page in content coordinates
    pub fn page_rect(&self, page: usize) -> Option<Rect> {
        self.rects.get(page).copied()
    }

    pub fn page_rects(&self) -> impl Iterator<Item = (usize, Rect)> + '_ {
        self.rects.iter().copied().enumerate()
    }

    /// The page under a content point and the point in page-local pixels
    pub fn locate(&self, point: Point) -> Option<(usize, Point)> {
        self.page_rects()
            .find(|(_, rect)| rect.contains(point))
            .map(|(page, rect)| (page, point - rect.origin().to_vec2()))
    }
}

/// Fields of one page in paint order: insertion order, with the selected
/// field moved to the top
pub fn paint_order<'a>(
    store: &'a FieldStore,
    page: usize,
    selected: Option<&FieldId>,
) -> Vec<&'a Field> {
    let (mut rest, top): (Vec<&Field>, Vec<&Field>) = store
        .on_page(page)
        .partition(|field| Some(&field.id) != selected);
    rest.extend(top);
    rest
}

/// New empty field centered on a click at page-local pixel `pos`
pub fn field_for_click(page: usize, pos: Point, scale: RenderScale) -> Field {
    let center = scale.point_to_document(pos);
    let geometry = FieldGeometry::centered_at(
        center,
        settings::field::CLICK_WIDTH,
        settings::field::CLICK_HEIGHT,
    );
    Field::new(page, geometry, Binding::default())
}

/// New variable field centered on a drop at page-local pixel `pos`
pub fn field_for_drop(
    page: usize,
    pos: Point,
    payload: &VariableDragPayload,
    scale: RenderScale,
) -> Field {
    let center = scale.point_to_document(pos);
    let geometry = FieldGeometry::centered_at(
        center,
        settings::field::DROP_WIDTH,
        settings::field::DROP_HEIGHT,
    );
    Field::new(
        page,
        geometry,
        Binding::Variable(payload.variable_path.clone()),
    )
}

/// Variable reference carried from the palette to a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDragPayload {
    #[serde(rename = "variablePath")]
    pub variable_path: String,
    #[serde(default)]
    pub label: String,
}

impl VariableDragPayload {
    pub fn new(variable_path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            variable_path: variable_path.into(),
            label: label.into(),
        }
    }

    /// Parse a payload, rejecting anything without a usable variable path
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str::<Self>(raw) {
            Ok(payload) if !payload.variable_path.trim().is_empty() => Some(payload),
            Ok(_) => {
                tracing::debug!("Ignoring drag payload without a variable path");
                None
            }
            Err(err) => {
                tracing::debug!("Ignoring malformed drag payload: {err}");
                None
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn pages() -> Vec<PageDescriptor> {
        vec![
            PageDescriptor::new(0, 100.0, 200.0),
            PageDescriptor::new(1, 200.0, 100.0),
        ]
    }

    #[test]
    fn pages_stack_with_gap_and_padding() {
        let surface = PageSurface::new(&pages(), RenderScale::new(2.0), 10.0);
        let pad = settings::canvas::PADDING;

        assert_eq!(
            surface.page_rect(0),
            Some(Rect::new(pad + 100.0, pad, pad + 300.0, pad + 400.0))
        );
        assert_eq!(
            surface.page_rect(1),
            Some(Rect::new(pad, pad + 410.0, pad + 400.0, pad + 610.0))
        );
        assert_eq!(
            surface.content_size(),
            Size::new(400.0 + 2.0 * pad, 610.0 + 2.0 * pad)
        );
    }

    #[test]
    fn locate_returns_page_local_pixels() {
        let surface = PageSurface::new(&pages(), RenderScale::new(2.0), 10.0);
        let pad = settings::canvas::PADDING;

        let hit = surface.locate(Point::new(pad + 5.0, pad + 420.0));
        assert_eq!(hit, Some((1, Point::new(5.0, 10.0))));
        // In the gap between pages
        assert_eq!(surface.locate(Point::new(pad + 150.0, pad + 405.0)), None);
    }

    #[test]
    fn click_creates_centered_default_field() {
        let scale = RenderScale::from_dpi(150.0, 72.0);
        let field = field_for_click(0, Point::new(200.0, 100.0), scale);

        assert_eq!(field.page, 0);
        assert!((field.geometry.x - 46.0).abs() < EPSILON);
        assert!((field.geometry.y - 40.0).abs() < EPSILON);
        assert_eq!((field.geometry.width, field.geometry.height), (100.0, 16.0));
        assert!(field.binding.is_empty());
    }

    #[test]
    fn click_near_origin_clamps_position() {
        let field = field_for_click(0, Point::new(4.0, 4.0), RenderScale::new(1.0));
        assert_eq!((field.geometry.x, field.geometry.y), (0.0, 0.0));
    }

    #[test]
    fn drop_creates_wider_variable_field() {
        let payload =
            VariableDragPayload::parse(r#"{"variablePath":"entidade.nome","label":"Nome"}"#)
                .unwrap();
        let field = field_for_drop(2, Point::new(300.0, 100.0), &payload, RenderScale::new(2.0));

        assert_eq!(field.page, 2);
        assert_eq!(field.binding.variable(), "entidade.nome");
        assert_eq!(field.binding.custom_text(), "");
        assert_eq!(field.geometry, FieldGeometry::new(90.0, 42.0, 120.0, 16.0));
    }

    #[test]
    fn malformed_payloads_are_rejected() {
        for raw in [
            "",
            "not json",
            "{}",
            r#"{"label":"Nome"}"#,
            r#"{"variablePath":"","label":"Nome"}"#,
            r#"{"variablePath":42}"#,
        ] {
            assert_eq!(VariableDragPayload::parse(raw), None, "{raw}");
        }
    }

    #[test]
    fn payload_round_trips_through_json() {
        let payload = VariableDragPayload::new("processo.numero", "Número");
        assert_eq!(VariableDragPayload::parse(&payload.to_json()), Some(payload));
    }

    #[test]
    fn selected_field_paints_last() {
        let make = |x| Field::new(0, FieldGeometry::new(x, 0.0, 100.0, 16.0), Binding::default());
        let (a, b, c) = (make(0.0), make(10.0), make(20.0));
        let other_page = Field::new(1, FieldGeometry::new(0.0, 0.0, 100.0, 16.0), Binding::default());
        let store = FieldStore::new(vec![a.clone(), b.clone(), other_page, c.clone()]);

        let ids = |v: Vec<&Field>| v.into_iter().map(|f| f.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(paint_order(&store, 0, None)), vec![a.id.clone(), b.id.clone(), c.id.clone()]);
        assert_eq!(ids(paint_order(&store, 0, Some(&a.id))), vec![b.id, c.id, a.id]);
    }
}
