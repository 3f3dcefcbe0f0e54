// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Hit testing for fields and resize handles.
//!
//! Everything here works in page-local render pixels: the caller has already
//! located the page under the pointer and subtracted the page origin.

use kurbo::{Point, Rect};

use super::scale::RenderScale;
use crate::model::{Field, FieldId};
use crate::settings;

/// One of the eight directional resize handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        Self::Nw,
        Self::N,
        Self::Ne,
        Self::E,
        Self::Se,
        Self::S,
        Self::Sw,
        Self::W,
    ];

    pub fn has_north(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    pub fn has_south(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    pub fn has_east(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    pub fn has_west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// Where this handle sits on a rectangle
    pub fn position(self, rect: Rect) -> Point {
        let x = if self.has_west() {
            rect.x0
        } else if self.has_east() {
            rect.x1
        } else {
            (rect.x0 + rect.x1) / 2.0
        };
        let y = if self.has_north() {
            rect.y0
        } else if self.has_south() {
            rect.y1
        } else {
            (rect.y0 + rect.y1) / 2.0
        };
        Point::new(x, y)
    }
}

/// Result of a pointer-down hit test on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    Handle(FieldId, ResizeHandle),
    Body(FieldId),
}

/// Find the handle of `field` under `pos`, if any
pub fn hit_handle(field: &Field, pos: Point, scale: RenderScale) -> Option<ResizeHandle> {
    let rect = scale.rect_to_pixels(field.geometry.rect());
    let radius = settings::canvas::HANDLE_HIT_RADIUS;
    ResizeHandle::ALL
        .into_iter()
        .map(|handle| (handle, handle.position(rect).distance(pos)))
        .filter(|(_, dist)| *dist <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(handle, _)| handle)
}

/// Hit test `pos` against fields given in paint order (bottom first).
///
/// Handles exist only on the selected field and take priority over any
/// body; bodies are tested topmost first.
pub fn hit_test<'a>(
    painted: impl IntoIterator<Item = &'a Field>,
    selected: Option<&FieldId>,
    pos: Point,
    scale: RenderScale,
) -> Option<Hit> {
    let painted: Vec<&Field> = painted.into_iter().collect();

    if let Some(selected) = selected
        && let Some(field) = painted.iter().find(|f| &f.id == selected)
        && let Some(handle) = hit_handle(field, pos, scale)
    {
        return Some(Hit::Handle(field.id.clone(), handle));
    }

    painted
        .iter()
        .rev()
        .find(|field| scale.rect_to_pixels(field.geometry.rect()).contains(pos))
        .map(|field| Hit::Body(field.id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Binding, FieldGeometry};

    fn field_at(x: f64, y: f64) -> Field {
        Field::new(0, FieldGeometry::new(x, y, 100.0, 16.0), Binding::default())
    }

    #[test]
    fn handle_positions_follow_compass() {
        let rect = Rect::new(0.0, 0.0, 100.0, 20.0);
        assert_eq!(ResizeHandle::Nw.position(rect), Point::new(0.0, 0.0));
        assert_eq!(ResizeHandle::S.position(rect), Point::new(50.0, 20.0));
        assert_eq!(ResizeHandle::E.position(rect), Point::new(100.0, 10.0));
        assert_eq!(ResizeHandle::Se.position(rect), Point::new(100.0, 20.0));
    }

    #[test]
    fn selected_handle_beats_overlapping_body() {
        let scale = RenderScale::new(2.0);
        let below = field_at(10.0, 10.0);
        // Top field covers the se corner of the one below
        let above = field_at(100.0, 20.0);
        let fields = [below.clone(), above.clone()];

        // se corner of `below` in pixels: (220, 52)
        let pos = Point::new(221.0, 51.0);
        let hit = hit_test(fields.iter(), Some(&below.id), pos, scale);
        assert_eq!(hit, Some(Hit::Handle(below.id.clone(), ResizeHandle::Se)));

        let hit = hit_test(fields.iter(), None, pos, scale);
        assert_eq!(hit, Some(Hit::Body(above.id.clone())));
    }

    #[test]
    fn unselected_fields_have_no_handles() {
        let scale = RenderScale::new(1.0);
        let field = field_at(10.0, 10.0);
        let outside_corner = Point::new(8.0, 8.0);
        assert_eq!(
            hit_test(std::iter::once(&field), None, outside_corner, scale),
            None
        );
    }

    #[test]
    fn topmost_body_wins() {
        let scale = RenderScale::new(1.0);
        let a = field_at(0.0, 0.0);
        let b = field_at(20.0, 0.0);
        let fields = [a, b.clone()];
        let hit = hit_test(fields.iter(), None, Point::new(50.0, 8.0), scale);
        assert_eq!(hit, Some(Hit::Body(b.id)));
    }

    #[test]
    fn empty_space_misses() {
        let scale = RenderScale::new(1.0);
        let a = field_at(0.0, 0.0);
        assert_eq!(
            hit_test(std::iter::once(&a), None, Point::new(300.0, 300.0), scale),
            None
        );
    }
}
