// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer event handlers for PageCanvasWidget

use super::PageCanvasWidget;
use crate::settings;
use masonry::core::{EventCtx, PointerState, ScrollDelta};

impl PageCanvasWidget {
    // ============================================================================
    // POINTER EVENT HANDLERS
    // ============================================================================

    /// Press: select/hit-test, maybe start a drag session
    pub(super) fn handle_pointer_down(&mut self, ctx: &mut EventCtx<'_>, state: &PointerState) {
        let pos = self.to_content(ctx.local_position(state.position));
        tracing::debug!("[PageCanvas] Down at content {:?}", pos);

        let outcome = self.session.pointer_down(pos);
        Self::apply_listener(ctx, outcome.listener);

        // Selection is a side effect of pressing, even without a drag
        if outcome.changed {
            self.emit_session_update(ctx, false, false);
        }
        ctx.request_render();
    }

    /// Move: every step of an active drag is reported upward
    pub(super) fn handle_pointer_move(&mut self, ctx: &mut EventCtx<'_>, current: &PointerState) {
        let pos = self.to_content(ctx.local_position(current.position));
        if self.session.pointer_move(pos) {
            self.emit_session_update(ctx, false, false);
            ctx.request_render();
        }
    }

    /// Release: ends the drag session or completes a click on empty space
    pub(super) fn handle_pointer_up(&mut self, ctx: &mut EventCtx<'_>, state: &PointerState) {
        let pos = self.to_content(ctx.local_position(state.position));
        let outcome = self.session.pointer_up(pos);
        Self::apply_listener(ctx, outcome.listener);

        if outcome.changed || outcome.payload_consumed {
            self.emit_session_update(ctx, false, outcome.payload_consumed);
        }
        ctx.request_render();
    }

    /// The platform took the pointer away mid-drag
    pub(super) fn handle_pointer_cancel(&mut self, ctx: &mut EventCtx<'_>) {
        let listener = self.session.cancel_interaction();
        if listener.is_some() {
            tracing::debug!("[PageCanvas] Pointer cancelled during drag");
        }
        Self::apply_listener(ctx, listener);
        ctx.request_render();
    }

    /// Scroll the page stack vertically
    pub(super) fn handle_scroll(&mut self, ctx: &mut EventCtx<'_>, delta: &ScrollDelta) {
        let dy = match delta {
            ScrollDelta::LineDelta(_x, y) => -(*y as f64) * settings::canvas::SCROLL_LINE_STEP,
            ScrollDelta::PixelDelta(pos) => -pos.y,
            ScrollDelta::PageDelta(_x, y) => -(*y as f64) * self.size.height,
        };

        if dy.abs() < 0.001 {
            return;
        }

        let scroll = (self.scroll + dy).clamp(0.0, self.max_scroll());
        if scroll != self.scroll {
            self.scroll = scroll;
            ctx.request_render();
        }
    }
}
