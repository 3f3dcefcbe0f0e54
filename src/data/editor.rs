// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Editor updates for AppState: canvas sessions, panel edits, palette

use super::AppState;
use crate::editing::{EditSession, PropertyEdit, VariableDragPayload};
use crate::model::VariableEntry;
use std::sync::Arc;

impl AppState {
    /// Adopt the session reported by the canvas
    pub fn handle_session_update(
        &mut self,
        mut session: EditSession,
        save_requested: bool,
        payload_consumed: bool,
    ) {
        if payload_consumed {
            self.armed_variable = None;
            session.armed_payload = None;
        }
        self.session = Some(Arc::new(session));

        if save_requested {
            self.save_template();
        }
    }

    /// Apply panel input to the selected field
    pub fn apply_property(&mut self, edit: PropertyEdit) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        tracing::debug!("[AppState::apply_property] {:?}", edit);
        if !Arc::make_mut(session).apply_property(edit) {
            tracing::debug!("[AppState::apply_property] No change");
        }
    }

    /// Arm a palette variable for dropping, or disarm it if it is already
    /// armed
    pub fn toggle_armed_variable(&mut self, entry: &VariableEntry) {
        let already_armed = self
            .armed_variable
            .as_ref()
            .is_some_and(|payload| payload.variable_path == entry.path);

        self.armed_variable = if already_armed {
            None
        } else {
            Some(VariableDragPayload::new(&entry.path, &entry.label))
        };

        let armed_json = self.armed_variable.as_ref().map(VariableDragPayload::to_json);
        if let Some(session) = self.session.as_mut() {
            Arc::make_mut(session).armed_payload = armed_json;
        }
    }

    /// Path of the armed palette variable, if any
    pub fn armed_path(&self) -> Option<String> {
        self.armed_variable
            .as_ref()
            .map(|payload| payload.variable_path.clone())
    }
}
