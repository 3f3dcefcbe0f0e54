// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Page canvas widget - the scrollable multi-page surface fields are placed on

mod keyboard;
mod paint;
mod pointer;
mod view;

pub use view::page_canvas_view;

use crate::editing::{EditSession, Listener, PageImageCache};
use kurbo::{Affine, Point, Vec2};
use masonry::accesskit::{Node, Role};
use masonry::core::{
    AccessCtx, BoxConstraints, ChildrenIds, EventCtx, LayoutCtx, PaintCtx, PointerButton,
    PointerButtonEvent, PointerEvent, PointerScrollEvent, PointerUpdate, PropertiesMut,
    PropertiesRef, RegisterCtx, TextEvent, Update, UpdateCtx, Widget,
};
use masonry::kurbo::Size;
use masonry::vello::Scene;
use std::sync::Arc;

/// The multi-page canvas widget
pub struct PageCanvasWidget {
    /// The editing session (mutable copy for editing)
    pub session: EditSession,

    /// Page rasters, shared with `AppState`
    pub(super) images: Arc<PageImageCache>,

    /// Canvas size
    pub(super) size: Size,

    /// Vertical scroll position in content pixels
    pub(super) scroll: f64,
}

impl PageCanvasWidget {
    pub fn new(session: Arc<EditSession>, images: Arc<PageImageCache>) -> Self {
        Self {
            session: (*session).clone(),
            images,
            size: Size::new(800.0, 600.0),
            scroll: 0.0,
        }
    }

    /// Horizontal offset that centers the page stack in the canvas
    fn x_offset(&self) -> f64 {
        ((self.size.width - self.session.surface.content_size().width) / 2.0).max(0.0)
    }

    /// Content coordinates to widget coordinates
    pub(super) fn content_transform(&self) -> Affine {
        Affine::translate((self.x_offset(), -self.scroll))
    }

    /// Widget coordinates to content coordinates
    pub(super) fn to_content(&self, local: Point) -> Point {
        local + Vec2::new(-self.x_offset(), self.scroll)
    }

    pub(super) fn max_scroll(&self) -> f64 {
        (self.session.surface.content_size().height - self.size.height).max(0.0)
    }

    pub(super) fn apply_listener(ctx: &mut EventCtx<'_>, listener: Option<Listener>) {
        match listener {
            Some(Listener::Attach) => ctx.capture_pointer(),
            Some(Listener::Detach) => ctx.release_pointer(),
            None => {}
        }
    }

    /// Emit a session update action
    pub(super) fn emit_session_update(
        &self,
        ctx: &mut EventCtx<'_>,
        save_requested: bool,
        payload_consumed: bool,
    ) {
        ctx.submit_action::<SessionUpdate>(SessionUpdate {
            session: self.session.clone(),
            save_requested,
            payload_consumed,
        });
    }
}

/// Action emitted by the canvas when the field list or selection changes
#[derive(Debug, Clone)]
pub struct SessionUpdate {
    pub session: EditSession,
    /// If true, save the current state to disk
    pub save_requested: bool,
    /// If true, the armed palette variable was used up
    pub payload_consumed: bool,
}

impl Widget for PageCanvasWidget {
    type Action = SessionUpdate;

    fn accepts_focus(&self) -> bool {
        true
    }

    fn register_children(&mut self, _ctx: &mut RegisterCtx<'_>) {}

    fn update(
        &mut self,
        _ctx: &mut UpdateCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        _event: &Update,
    ) {
    }

    fn layout(
        &mut self,
        _ctx: &mut LayoutCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        bc: &BoxConstraints,
    ) -> Size {
        let size = bc.max();
        self.size = size;
        self.scroll = self.scroll.clamp(0.0, self.max_scroll());
        size
    }

    fn paint(&mut self, ctx: &mut PaintCtx<'_>, _props: &PropertiesRef<'_>, scene: &mut Scene) {
        let canvas_size = ctx.size();
        self.paint_background(scene, canvas_size);
        self.paint_pages(scene);
    }

    fn on_pointer_event(
        &mut self,
        ctx: &mut EventCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        event: &PointerEvent,
    ) {
        match event {
            PointerEvent::Down(PointerButtonEvent {
                button: Some(PointerButton::Primary),
                state,
                ..
            }) => {
                ctx.request_focus();
                self.handle_pointer_down(ctx, state);
            }

            PointerEvent::Move(PointerUpdate { current, .. }) => {
                self.handle_pointer_move(ctx, current);
            }

            PointerEvent::Up(PointerButtonEvent {
                button: Some(PointerButton::Primary),
                state,
                ..
            }) => {
                self.handle_pointer_up(ctx, state);
            }

            PointerEvent::Cancel(_) => {
                self.handle_pointer_cancel(ctx);
            }

            PointerEvent::Scroll(PointerScrollEvent { delta, .. }) => {
                self.handle_scroll(ctx, delta);
            }

            _ => {}
        }
    }

    fn on_text_event(
        &mut self,
        ctx: &mut EventCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        event: &TextEvent,
    ) {
        use masonry::core::keyboard::KeyState;

        if let TextEvent::Keyboard(key_event) = event {
            if key_event.state != KeyState::Down {
                return;
            }
            let cmd = key_event.modifiers.meta() || key_event.modifiers.ctrl();
            self.handle_key(ctx, &key_event.key, cmd);
        }
    }

    fn accessibility_role(&self) -> Role {
        Role::Canvas
    }

    fn accessibility(
        &mut self,
        _ctx: &mut AccessCtx<'_>,
        _props: &PropertiesRef<'_>,
        node: &mut Node,
    ) {
        node.set_label(format!(
            "{} pages, {} fields",
            self.session.surface.page_count(),
            self.session.store.len()
        ));
    }

    fn children_ids(&self) -> ChildrenIds {
        ChildrenIds::new()
    }
}
