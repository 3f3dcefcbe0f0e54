// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Xilem View wrapper for PageCanvasWidget

use super::{PageCanvasWidget, SessionUpdate};
use crate::editing::{EditSession, PageImageCache};
use std::marker::PhantomData;
use std::sync::Arc;
use xilem::core::{MessageContext, MessageResult, Mut, View, ViewMarker};
use xilem::{Pod, ViewCtx};

/// Create a page canvas view from an edit session and the page rasters,
/// with a callback receiving `(session, save_requested, payload_consumed)`
pub fn page_canvas_view<State, F>(
    session: Arc<EditSession>,
    images: Arc<PageImageCache>,
    on_session_update: F,
) -> PageCanvasView<State, F>
where
    F: Fn(&mut State, EditSession, bool, bool),
{
    PageCanvasView {
        session,
        images,
        on_session_update,
        phantom: PhantomData,
    }
}

/// The Xilem View for PageCanvasWidget
#[must_use = "View values do nothing unless provided to Xilem."]
pub struct PageCanvasView<State, F> {
    session: Arc<EditSession>,
    images: Arc<PageImageCache>,
    on_session_update: F,
    phantom: PhantomData<fn() -> State>,
}

impl<State, F> ViewMarker for PageCanvasView<State, F> {}

impl<State: 'static, F: Fn(&mut State, EditSession, bool, bool) + 'static> View<State, (), ViewCtx>
    for PageCanvasView<State, F>
{
    type Element = Pod<PageCanvasWidget>;
    type ViewState = ();

    fn build(&self, ctx: &mut ViewCtx, _app_state: &mut State) -> (Self::Element, Self::ViewState) {
        let widget = PageCanvasWidget::new(self.session.clone(), self.images.clone());
        let pod = ctx.create_pod(widget);
        ctx.record_action(pod.new_widget.id());
        (pod, ())
    }

    fn rebuild(
        &self,
        prev: &Self,
        _view_state: &mut Self::ViewState,
        _ctx: &mut ViewCtx,
        mut element: Mut<'_, Self::Element>,
        _app_state: &mut State,
    ) {
        if !Arc::ptr_eq(&self.session, &prev.session) {
            // Take the owner's field list, selection and armed payload;
            // keep the widget's drag session so an active drag survives
            // the round trip
            let session = &mut element.widget.session;
            session.sync(self.session.store.clone(), self.session.selected.clone());
            session.armed_payload = self.session.armed_payload.clone();
            element.ctx.request_render();
        }

        if !Arc::ptr_eq(&self.images, &prev.images) {
            element.widget.images = self.images.clone();
            element.ctx.request_render();
        }
    }

    fn teardown(
        &self,
        _view_state: &mut Self::ViewState,
        _ctx: &mut ViewCtx,
        element: Mut<'_, Self::Element>,
    ) {
        // A drag must not outlive the canvas
        element.widget.session.cancel_interaction();
    }

    fn message(
        &self,
        _view_state: &mut Self::ViewState,
        message: &mut MessageContext,
        _element: Mut<'_, Self::Element>,
        app_state: &mut State,
    ) -> MessageResult<()> {
        match message.take_message::<SessionUpdate>() {
            Some(update) => {
                tracing::debug!(
                    "[PageCanvasView::message] {} fields, selected={:?}, save_requested={}",
                    update.session.store.len(),
                    update.session.selected,
                    update.save_requested
                );
                (self.on_session_update)(
                    app_state,
                    update.session,
                    update.save_requested,
                    update.payload_consumed,
                );
                // Propagate to root so the panels see the new snapshot
                MessageResult::Action(())
            }
            None => MessageResult::Stale,
        }
    }
}
