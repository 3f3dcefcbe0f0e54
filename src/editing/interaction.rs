// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Field Interaction Controller.
//!
//! A drag on a field is modelled as an explicit state machine:
//!
//! ```text
//! Idle --begin_move/begin_resize--> Moving | Resizing --end--> Idle
//! ```
//!
//! Entering an active state asks the host to start observing pointer
//! movement outside the field (masonry pointer capture); leaving it asks the
//! host to stop. Both requests are returned as [`Listener`] values so the
//! widget never has to track capture state on its own, and a release is
//! reported exactly once per session.
//!
//! Pointer positions are recorded in render pixels and converted to
//! document units before they touch geometry. Every pointer move while
//! active yields a geometry edit; nothing is batched until release.

use kurbo::{Point, Vec2};

use super::field_store::FieldEdit;
use super::hit_test::ResizeHandle;
use super::scale::RenderScale;
use crate::model::{FieldGeometry, FieldId};
use crate::settings;

/// Change in pointer observation the host must perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    Attach,
    Detach,
}

/// The drag session state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Interaction {
    #[default]
    Idle,
    Moving {
        id: FieldId,
        start_pointer: Point,
        start_geometry: FieldGeometry,
    },
    Resizing {
        id: FieldId,
        handle: ResizeHandle,
        start_pointer: Point,
        start_geometry: FieldGeometry,
    },
}

impl Interaction {
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// The field under the active session
    pub fn active_field(&self) -> Option<&FieldId> {
        match self {
            Self::Idle => None,
            Self::Moving { id, .. } | Self::Resizing { id, .. } => Some(id),
        }
    }

    /// Start moving a field.
    ///
    /// Returns `Some(Listener::Attach)` when coming from idle. Starting over
    /// an active session replaces it without a second attach.
    pub fn begin_move(
        &mut self,
        id: FieldId,
        pointer: Point,
        geometry: FieldGeometry,
    ) -> Option<Listener> {
        self.enter(Self::Moving {
            id,
            start_pointer: pointer,
            start_geometry: geometry,
        })
    }

    /// Start resizing a field from one of its handles
    pub fn begin_resize(
        &mut self,
        id: FieldId,
        handle: ResizeHandle,
        pointer: Point,
        geometry: FieldGeometry,
    ) -> Option<Listener> {
        self.enter(Self::Resizing {
            id,
            handle,
            start_pointer: pointer,
            start_geometry: geometry,
        })
    }

    /// Geometry update for the current pointer position, or `None` when no
    /// session is active
    pub fn pointer_moved(&self, pointer: Point, scale: RenderScale) -> Option<FieldEdit> {
        match self {
            Self::Idle => None,
            Self::Moving {
                id,
                start_pointer,
                start_geometry,
            } => {
                let delta = scale.delta_to_document(pointer - *start_pointer);
                Some(FieldEdit::SetGeometry {
                    id: id.clone(),
                    geometry: moved_geometry(*start_geometry, delta),
                })
            }
            Self::Resizing {
                id,
                handle,
                start_pointer,
                start_geometry,
            } => {
                let delta = scale.delta_to_document(pointer - *start_pointer);
                Some(FieldEdit::SetGeometry {
                    id: id.clone(),
                    geometry: resized_geometry(*start_geometry, *handle, delta),
                })
            }
        }
    }

    /// End the session on pointer release or teardown.
    ///
    /// Returns `Some(Listener::Detach)` only for the call that leaves an
    /// active state; further calls are no-ops.
    pub fn end(&mut self) -> Option<Listener> {
        if self.is_active() {
            tracing::debug!("Interaction ended for {:?}", self.active_field());
            *self = Self::Idle;
            Some(Listener::Detach)
        } else {
            None
        }
    }

    fn enter(&mut self, next: Self) -> Option<Listener> {
        let was_active = self.is_active();
        tracing::debug!("Interaction begins: {:?}", next);
        *self = next;
        (!was_active).then_some(Listener::Attach)
    }
}

/// Session-start geometry translated by a document-unit delta
pub fn moved_geometry(start: FieldGeometry, delta: Vec2) -> FieldGeometry {
    FieldGeometry {
        x: (start.x + delta.x).max(0.0),
        y: (start.y + delta.y).max(0.0),
        ..start
    }
}

/// Session-start geometry resized from `handle` by a document-unit delta.
///
/// West and north edges move the origin by the full delta even when the
/// size has already hit its minimum.
pub fn resized_geometry(start: FieldGeometry, handle: ResizeHandle, delta: Vec2) -> FieldGeometry {
    let mut geometry = start;

    if handle.has_east() {
        geometry.width = start.width + delta.x;
    }
    if handle.has_west() {
        geometry.width = start.width - delta.x;
        geometry.x = start.x + delta.x;
    }
    if handle.has_south() {
        geometry.height = start.height + delta.y;
    }
    if handle.has_north() {
        geometry.height = start.height - delta.y;
        geometry.y = start.y + delta.y;
    }

    geometry.width = geometry.width.max(settings::field::MIN_WIDTH);
    geometry.height = geometry.height.max(settings::field::MIN_HEIGHT);
    geometry.x = geometry.x.max(0.0);
    geometry.y = geometry.y.max(0.0);
    geometry
}
