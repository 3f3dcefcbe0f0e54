// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Edit session - editing state for one open template
//!
//! The session is a value: the canvas widget works on its own copy and
//! reports the resulting field list and selection back to `AppState`, which
//! owns the authoritative snapshot and hands it down again on rebuild.

use std::path::PathBuf;
use std::sync::Arc;

use kurbo::Point;

use super::field_store::{FieldEdit, FieldStore};
use super::hit_test::{self, Hit};
use super::interaction::{Interaction, Listener};
use super::page_surface::{self, PageSurface, VariableDragPayload};
use super::properties::{self, PanelContent, PropertyEdit};
use super::scale::RenderScale;
use crate::model::{Field, FieldGeometry, FieldId, PageDescriptor, Template, VariableCatalog};
use crate::settings;

/// A press on empty page space that becomes a click on release
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingClick {
    page: usize,
    local: Point,
    origin: Point,
}

/// What a pointer event did to the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerOutcome {
    /// Pointer capture change the widget must perform
    pub listener: Option<Listener>,
    /// Whether the field list or selection changed
    pub changed: bool,
    /// Whether an armed variable payload was dropped (or rejected)
    pub payload_consumed: bool,
}

/// Editing state for one template
#[derive(Debug, Clone)]
pub struct EditSession {
    pub template_path: PathBuf,
    pub pages: Arc<Vec<PageDescriptor>>,
    pub catalog: Arc<VariableCatalog>,
    pub scale: RenderScale,
    pub surface: PageSurface,

    /// Field list snapshot
    pub store: FieldStore,

    /// At most one selected field
    pub selected: Option<FieldId>,

    /// Active drag session, if any
    pub interaction: Interaction,

    /// Variable payload (JSON) armed in the palette, dropped by the next
    /// click on a page
    pub armed_payload: Option<String>,

    pending_click: Option<PendingClick>,
}

impl EditSession {
    pub fn new(template: &Template) -> Self {
        let scale = template.config.scale();
        Self {
            template_path: template.path.clone(),
            surface: PageSurface::new(&template.pages, scale, template.config.page_gap),
            pages: Arc::new(template.pages.clone()),
            catalog: Arc::new(template.catalog.clone()),
            scale,
            store: FieldStore::new(template.fields.clone()),
            selected: None,
            interaction: Interaction::Idle,
            armed_payload: None,
            pending_click: None,
        }
    }

    pub fn selected_field(&self) -> Option<&Field> {
        self.selected.as_ref().and_then(|id| self.store.get(id))
    }

    /// Fields of a page in paint order
    pub fn paint_order(&self, page: usize) -> Vec<&Field> {
        page_surface::paint_order(&self.store, page, self.selected.as_ref())
    }

    pub fn panel_content(&self) -> PanelContent {
        PanelContent::for_field(self.selected_field())
    }

    // ========================================================================
    // POINTER
    // ========================================================================

    /// Pointer pressed at a content point
    pub fn pointer_down(&mut self, pos: Point) -> PointerOutcome {
        self.pending_click = None;
        let previous = self.selected.clone();

        // Handle circles of a field on the page edge reach past the page
        if let Some((id, handle, geometry)) = self.selected_handle_at(pos) {
            let listener = self.interaction.begin_resize(id, handle, pos, geometry);
            return PointerOutcome {
                listener,
                changed: false,
                payload_consumed: false,
            };
        }

        let Some((page, local)) = self.surface.locate(pos) else {
            self.selected = None;
            return PointerOutcome {
                changed: previous.is_some(),
                ..Default::default()
            };
        };

        let painted = self.paint_order(page);
        let hit = hit_test::hit_test(painted, self.selected.as_ref(), local, self.scale);

        let listener = match hit {
            Some(Hit::Handle(id, handle)) => {
                let geometry = self.store.get(&id).map(|f| f.geometry);
                self.selected = Some(id.clone());
                geometry.and_then(|g| self.interaction.begin_resize(id, handle, pos, g))
            }
            Some(Hit::Body(id)) => {
                let geometry = self.store.get(&id).map(|f| f.geometry);
                self.selected = Some(id.clone());
                geometry.and_then(|g| self.interaction.begin_move(id, pos, g))
            }
            None => {
                self.pending_click = Some(PendingClick {
                    page,
                    local,
                    origin: pos,
                });
                None
            }
        };

        PointerOutcome {
            listener,
            changed: self.selected != previous,
            payload_consumed: false,
        }
    }

    /// Pointer moved to a content point. Returns `true` if a field changed.
    pub fn pointer_move(&mut self, pos: Point) -> bool {
        if let Some(click) = self.pending_click
            && (pos - click.origin).hypot() > settings::canvas::CLICK_SLOP
        {
            self.pending_click = None;
        }

        match self.interaction.pointer_moved(pos, self.scale) {
            Some(edit) => self.apply(edit),
            None => false,
        }
    }

    /// Pointer released. Ends any drag session; a press-release on empty
    /// page space creates a field (or drops the armed variable).
    pub fn pointer_up(&mut self, pos: Point) -> PointerOutcome {
        let listener = self.interaction.end();
        let mut outcome = PointerOutcome {
            listener,
            ..Default::default()
        };

        if let Some(click) = self.pending_click.take()
            && (pos - click.origin).hypot() <= settings::canvas::CLICK_SLOP
        {
            match self.armed_payload.take() {
                Some(raw) => {
                    outcome.payload_consumed = true;
                    outcome.changed = self.drop_at(click.page, click.local, &raw);
                }
                None => {
                    let field = page_surface::field_for_click(click.page, click.local, self.scale);
                    outcome.changed = self.insert_and_select(field);
                }
            }
        }
        outcome
    }

    /// Drop a raw variable payload at a content point
    pub fn drop_payload(&mut self, raw: &str, pos: Point) -> bool {
        match self.surface.locate(pos) {
            Some((page, local)) => self.drop_at(page, local, raw),
            None => false,
        }
    }

    /// End any drag session without a release (widget teardown)
    pub fn cancel_interaction(&mut self) -> Option<Listener> {
        self.pending_click = None;
        self.interaction.end()
    }

    /// Resize handle of the selected field under a content point
    fn selected_handle_at(
        &self,
        pos: Point,
    ) -> Option<(FieldId, hit_test::ResizeHandle, FieldGeometry)> {
        let field = self.store.get(self.selected.as_ref()?)?;
        let page_rect = self.surface.page_rect(field.page)?;
        let local = pos - page_rect.origin().to_vec2();
        let handle = hit_test::hit_handle(field, local, self.scale)?;
        Some((field.id.clone(), handle, field.geometry))
    }

    fn drop_at(&mut self, page: usize, local: Point, raw: &str) -> bool {
        match VariableDragPayload::parse(raw) {
            Some(payload) => {
                let field = page_surface::field_for_drop(page, local, &payload, self.scale);
                self.insert_and_select(field)
            }
            None => false,
        }
    }

    fn insert_and_select(&mut self, field: Field) -> bool {
        tracing::debug!("Creating field {} on page {}", field.id, field.page);
        self.selected = Some(field.id.clone());
        self.apply(FieldEdit::Insert(field))
    }

    // ========================================================================
    // EDITS
    // ========================================================================

    /// Apply an edit to the field list. Deleting the selected field clears
    /// the selection. Returns `true` if anything changed.
    pub fn apply(&mut self, edit: FieldEdit) -> bool {
        if let FieldEdit::Delete(id) = &edit
            && self.selected.as_ref() == Some(id)
        {
            self.selected = None;
            if self.interaction.active_field() == Some(id) {
                self.interaction.end();
            }
        }
        let next = self.store.apply(edit);
        let changed = !next.ptr_eq(&self.store);
        self.store = next;
        changed
    }

    /// Apply panel input to the selected field
    pub fn apply_property(&mut self, edit: PropertyEdit) -> bool {
        let Some(field) = self.selected_field() else {
            return false;
        };
        match properties::field_edit(field, edit) {
            Some(edit) => self.apply(edit),
            None => false,
        }
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.selected.clone() {
            Some(id) => self.apply(FieldEdit::Delete(id)),
            None => false,
        }
    }

    /// Adopt a field list and selection from the owner
    pub fn sync(&mut self, store: FieldStore, selected: Option<FieldId>) {
        self.store = store;
        self.selected = selected.filter(|id| self.store.contains(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Binding, BindingMode, FieldGeometry};
    use crate::settings::EditorConfig;

    const EPSILON: f64 = 1e-9;

    fn template(fields: Vec<Field>, render_dpi: f64) -> Template {
        Template {
            path: PathBuf::from("/tmp/template"),
            name: None,
            config: EditorConfig {
                render_dpi,
                page_gap: 20.0,
            },
            pages: vec![
                PageDescriptor::new(0, 595.0, 842.0),
                PageDescriptor::new(1, 595.0, 842.0),
            ],
            fields,
            detached_fields: vec![],
            catalog: VariableCatalog::default(),
        }
    }

    /// Content point of a page-local pixel
    fn on_page(session: &EditSession, page: usize, local: Point) -> Point {
        let rect = session.surface.page_rect(page).unwrap();
        rect.origin() + local.to_vec2()
    }

    #[test]
    fn click_on_empty_page_creates_and_selects() {
        let mut session = EditSession::new(&template(vec![], 150.0));
        let pos = on_page(&session, 0, Point::new(200.0, 100.0));

        let down = session.pointer_down(pos);
        assert_eq!(down.listener, None);
        let up = session.pointer_up(pos);
        assert!(up.changed);

        let field = session.selected_field().unwrap();
        assert_eq!(field.page, 0);
        assert!((field.geometry.x - 46.0).abs() < EPSILON);
        assert!((field.geometry.y - 40.0).abs() < EPSILON);
        assert_eq!((field.geometry.width, field.geometry.height), (100.0, 16.0));
        assert!(field.binding.is_empty());
    }

    #[test]
    fn press_drag_release_on_empty_space_creates_nothing() {
        let mut session = EditSession::new(&template(vec![], 150.0));
        let pos = on_page(&session, 0, Point::new(200.0, 100.0));
        session.pointer_down(pos);
        session.pointer_move(pos + (40.0, 0.0));
        session.pointer_up(pos + (40.0, 0.0));
        assert!(session.store.is_empty());
    }

    #[test]
    fn armed_payload_drops_variable_field() {
        let mut session = EditSession::new(&template(vec![], 144.0));
        session.armed_payload =
            Some(r#"{"variablePath":"entidade.nome","label":"Nome"}"#.to_string());
        let pos = on_page(&session, 1, Point::new(240.0, 100.0));

        session.pointer_down(pos);
        let up = session.pointer_up(pos);
        assert!(up.payload_consumed);
        assert!(session.armed_payload.is_none());

        let field = session.selected_field().unwrap();
        assert_eq!(field.page, 1);
        assert_eq!(field.binding, Binding::Variable("entidade.nome".into()));
        assert_eq!(field.geometry, FieldGeometry::new(60.0, 42.0, 120.0, 16.0));
    }

    #[test]
    fn malformed_drop_is_ignored() {
        let mut session = EditSession::new(&template(vec![], 150.0));
        let pos = on_page(&session, 0, Point::new(50.0, 50.0));
        assert!(!session.drop_payload("{\"label\":\"Nome\"}", pos));
        assert!(session.store.is_empty());
        assert_eq!(session.selected, None);
    }

    #[test]
    fn pointer_down_on_body_selects_and_moves_only_that_field() {
        let a = Field::new(0, FieldGeometry::new(10.0, 10.0, 100.0, 16.0), Binding::default());
        let b = Field::new(0, FieldGeometry::new(10.0, 100.0, 100.0, 16.0), Binding::default());
        let mut session = EditSession::new(&template(vec![a.clone(), b.clone()], 144.0));

        // S = 2; inside `a`
        let start = on_page(&session, 0, Point::new(60.0, 30.0));
        let down = session.pointer_down(start);
        assert_eq!(down.listener, Some(Listener::Attach));
        assert_eq!(session.selected, Some(a.id.clone()));

        for step in 1..=5 {
            assert!(session.pointer_move(start + (10.0 * step as f64, 4.0 * step as f64)));
            assert_eq!(session.store.get(&b.id), Some(&b));
        }
        let moved = session.store.get(&a.id).unwrap();
        assert_eq!((moved.geometry.x, moved.geometry.y), (35.0, 20.0));

        let up = session.pointer_up(start + (50.0, 20.0));
        assert_eq!(up.listener, Some(Listener::Detach));
        assert!(!session.pointer_move(start + (100.0, 100.0)));
    }

    #[test]
    fn handle_press_resizes_selected_field() {
        let a = Field::new(0, FieldGeometry::new(40.0, 40.0, 100.0, 16.0), Binding::default());
        let mut session = EditSession::new(&template(vec![a.clone()], 144.0));
        session.selected = Some(a.id.clone());

        // nw corner at (80, 80) px
        let start = on_page(&session, 0, Point::new(80.0, 80.0));
        session.pointer_down(start);
        session.pointer_move(start + (20.0, 4.0));
        assert_eq!(
            session.store.get(&a.id).unwrap().geometry,
            FieldGeometry::new(50.0, 42.0, 90.0, 14.0)
        );
    }

    #[test]
    fn handle_reaching_past_the_page_edge_still_resizes() {
        let a = Field::new(0, FieldGeometry::new(0.0, 0.0, 100.0, 16.0), Binding::default());
        let mut session = EditSession::new(&template(vec![a.clone()], 144.0));
        session.selected = Some(a.id.clone());

        // nw handle sits on the page corner; press just outside the page
        let start = on_page(&session, 0, Point::new(-3.0, -3.0));
        assert!(session.surface.locate(start).is_none());
        let down = session.pointer_down(start);
        assert_eq!(down.listener, Some(Listener::Attach));
        assert_eq!(session.selected, Some(a.id.clone()));

        session.pointer_move(start + (20.0, 4.0));
        assert_eq!(
            session.store.get(&a.id).unwrap().geometry,
            FieldGeometry::new(10.0, 2.0, 90.0, 14.0)
        );
    }

    #[test]
    fn cancelled_drag_detaches_exactly_once() {
        let a = Field::new(0, FieldGeometry::new(10.0, 10.0, 100.0, 16.0), Binding::default());
        let mut session = EditSession::new(&template(vec![a.clone()], 144.0));

        let start = on_page(&session, 0, Point::new(60.0, 30.0));
        assert_eq!(session.pointer_down(start).listener, Some(Listener::Attach));
        assert_eq!(session.cancel_interaction(), Some(Listener::Detach));
        assert_eq!(session.cancel_interaction(), None);
        assert!(!session.pointer_move(start + (10.0, 10.0)));
    }

    #[test]
    fn clicking_outside_pages_clears_selection() {
        let a = Field::new(0, FieldGeometry::new(40.0, 40.0, 100.0, 16.0), Binding::default());
        let mut session = EditSession::new(&template(vec![a.clone()], 144.0));
        session.selected = Some(a.id);
        let outcome = session.pointer_down(Point::new(1.0, 1.0));
        assert!(outcome.changed);
        assert_eq!(session.selected, None);
    }

    #[test]
    fn deleting_selected_field_clears_selection() {
        let a = Field::new(0, FieldGeometry::new(40.0, 40.0, 100.0, 16.0), Binding::default());
        let mut session = EditSession::new(&template(vec![a.clone()], 144.0));
        session.selected = Some(a.id.clone());

        assert!(session.apply_property(PropertyEdit::Delete));
        assert!(session.store.is_empty());
        assert_eq!(session.selected, None);
        assert!(!session.delete_selected());
    }

    #[test]
    fn panel_edits_without_selection_do_nothing() {
        let mut session = EditSession::new(&template(vec![], 150.0));
        assert_eq!(session.panel_content(), PanelContent::Empty);
        assert!(!session.apply_property(PropertyEdit::Mode(BindingMode::Text)));
    }

    #[test]
    fn text_to_variable_toggle_through_panel() {
        let a = Field::new(
            0,
            FieldGeometry::new(40.0, 40.0, 100.0, 16.0),
            Binding::Text("Hello".into()),
        );
        let mut session = EditSession::new(&template(vec![a.clone()], 150.0));
        session.selected = Some(a.id.clone());

        assert!(session.apply_property(PropertyEdit::Mode(BindingMode::Variable)));
        let binding = &session.store.get(&a.id).unwrap().binding;
        assert_eq!(binding.custom_text(), "");
        assert_eq!(binding.variable(), "");
    }

    #[test]
    fn sync_drops_selection_of_missing_field() {
        let mut session = EditSession::new(&template(vec![], 150.0));
        session.sync(FieldStore::default(), Some(FieldId::from("gone")));
        assert_eq!(session.selected, None);
    }
}
