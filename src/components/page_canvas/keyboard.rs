// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Keyboard event handlers for PageCanvasWidget

use super::PageCanvasWidget;
use masonry::core::EventCtx;
use masonry::core::keyboard::{Key, NamedKey};

impl PageCanvasWidget {
    /// Dispatch a key press to the shortcut handlers
    pub(super) fn handle_key(&mut self, ctx: &mut EventCtx<'_>, key: &Key, cmd: bool) {
        if self.handle_save(ctx, cmd, key) {
            return;
        }
        self.handle_delete(ctx, key);
    }

    fn handle_save(&self, ctx: &mut EventCtx<'_>, cmd: bool, key: &Key) -> bool {
        if !cmd || !matches!(key, Key::Character(c) if c == "s") {
            return false;
        }

        self.emit_session_update(ctx, true, false);
        ctx.set_handled();
        true
    }

    /// Delete/Backspace removes the selected field
    fn handle_delete(&mut self, ctx: &mut EventCtx<'_>, key: &Key) -> bool {
        if !matches!(
            key,
            Key::Named(NamedKey::Backspace) | Key::Named(NamedKey::Delete)
        ) {
            return false;
        }

        // Not while a drag is holding the field
        if self.session.interaction.is_active() {
            return false;
        }

        if !self.session.delete_selected() {
            return false;
        }

        self.emit_session_update(ctx, false, false);
        ctx.request_render();
        ctx.set_handled();
        true
    }
}
