// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Field Entity Store.
//!
//! The ordered list of fields is held behind an `Arc` and treated as an
//! immutable snapshot: every mutation goes through [`FieldStore::apply`],
//! which returns a new store (copy-on-write) and leaves the old one intact.
//! The canvas, properties panel and `AppState` all hold the same snapshot
//! and request changes as [`FieldEdit`] messages.

use std::sync::Arc;

use crate::model::{Alignment, Binding, Field, FieldGeometry, FieldId, FontFamily};

/// One mutation of the field list
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    /// Append a new field (it paints above existing fields)
    Insert(Field),
    SetGeometry { id: FieldId, geometry: FieldGeometry },
    SetBinding { id: FieldId, binding: Binding },
    SetFontSize { id: FieldId, size: f64 },
    SetFontFamily { id: FieldId, family: FontFamily },
    SetColor { id: FieldId, color: String },
    SetAlignment { id: FieldId, alignment: Alignment },
    Delete(FieldId),
}

impl FieldEdit {
    /// The field this edit targets
    pub fn target(&self) -> &FieldId {
        match self {
            Self::Insert(field) => &field.id,
            Self::SetGeometry { id, .. }
            | Self::SetBinding { id, .. }
            | Self::SetFontSize { id, .. }
            | Self::SetFontFamily { id, .. }
            | Self::SetColor { id, .. }
            | Self::SetAlignment { id, .. }
            | Self::Delete(id) => id,
        }
    }
}

/// Immutable, cheaply clonable snapshot of the field list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldStore {
    fields: Arc<Vec<Field>>,
}

impl FieldStore {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields: Arc::new(fields),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn as_slice(&self) -> &[Field] {
        &self.fields
    }

    pub fn get(&self, id: &FieldId) -> Option<&Field> {
        self.fields.iter().find(|field| &field.id == id)
    }

    pub fn contains(&self, id: &FieldId) -> bool {
        self.get(id).is_some()
    }

    /// Fields on one page, in insertion order
    pub fn on_page(&self, page: usize) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(move |field| field.page == page)
    }

    /// Whether two snapshots share the same backing list
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }

    /// Apply an edit, producing the replacement list.
    ///
    /// Edits that target a missing field return `self` unchanged (sharing
    /// the same backing list), so callers can tell a no-op with
    /// [`ptr_eq`](Self::ptr_eq).
    pub fn apply(&self, edit: FieldEdit) -> FieldStore {
        let index = match &edit {
            FieldEdit::Insert(_) => None,
            other => match self.position(other.target()) {
                Some(index) => Some(index),
                None => {
                    tracing::debug!("Ignoring edit for unknown field {}", other.target());
                    return self.clone();
                }
            },
        };

        let mut fields = Vec::clone(&self.fields);
        match (edit, index) {
            (FieldEdit::Insert(field), _) => fields.push(field),
            (FieldEdit::Delete(_), Some(i)) => {
                fields.remove(i);
            }
            (FieldEdit::SetGeometry { geometry, .. }, Some(i)) => {
                fields[i].geometry = geometry.clamped();
            }
            (FieldEdit::SetBinding { binding, .. }, Some(i)) => fields[i].binding = binding,
            (FieldEdit::SetFontSize { size, .. }, Some(i)) => fields[i].font_size = size,
            (FieldEdit::SetFontFamily { family, .. }, Some(i)) => fields[i].font_family = family,
            (FieldEdit::SetColor { color, .. }, Some(i)) => fields[i].color = color,
            (FieldEdit::SetAlignment { alignment, .. }, Some(i)) => fields[i].alignment = alignment,
            (_, None) => return self.clone(),
        }
        FieldStore::new(fields)
    }

    fn position(&self, id: &FieldId) -> Option<usize> {
        self.fields.iter().position(|field| &field.id == id)
    }
}
