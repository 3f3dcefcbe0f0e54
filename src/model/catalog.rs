// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Catalog of bindable variables, grouped by entity.
//!
//! The catalog is supplied by the host (`variables.json` in a template
//! directory). The editor only needs two things from it: the display label
//! for a dotted `group.field` path, and the full list of paths for the
//! properties panel picker and the variable palette.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One bindable value within a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableField {
    pub key: String,
    pub label: String,
}

/// A named group of variables (e.g. everything about the client entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableGroup {
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub fields: Vec<VariableField>,
}

/// A resolved catalog entry, as listed in pickers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableEntry {
    /// Dotted `group.field` path
    pub path: String,
    pub label: String,
    pub group_label: String,
}

/// Grouped variable definitions with a path -> label index
#[derive(Debug, Clone, Default)]
pub struct VariableCatalog {
    groups: Vec<VariableGroup>,
    labels: HashMap<String, String>,
}

impl VariableCatalog {
    pub fn new(groups: Vec<VariableGroup>) -> Self {
        let labels = groups
            .iter()
            .flat_map(|group| {
                group.fields.iter().map(move |field| {
                    (format!("{}.{}", group.key, field.key), field.label.clone())
                })
            })
            .collect();
        Self { groups, labels }
    }

    /// Parse the catalog from its JSON representation (an array of groups)
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let groups: Vec<VariableGroup> = serde_json::from_str(json)?;
        Ok(Self::new(groups))
    }

    pub fn groups(&self) -> &[VariableGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Display label for a dotted path, if the catalog knows it
    pub fn label_for(&self, path: &str) -> Option<&str> {
        self.labels.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.labels.contains_key(path)
    }

    /// Every path in catalog order (group order, then field order)
    pub fn entries(&self) -> Vec<VariableEntry> {
        self.groups.iter().flat_map(Self::group_entries).collect()
    }

    /// The entries of one group, in field order
    pub fn group_entries(group: &VariableGroup) -> Vec<VariableEntry> {
        let group_label = if group.label.is_empty() {
            group.key.clone()
        } else {
            group.label.clone()
        };
        group
            .fields
            .iter()
            .map(|field| VariableEntry {
                path: format!("{}.{}", group.key, field.key),
                label: field.label.clone(),
                group_label: group_label.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        { "key": "entidade", "label": "Entidade", "fields": [
            { "key": "nome", "label": "Nome" },
            { "key": "nif", "label": "NIF" }
        ]},
        { "key": "processo", "fields": [
            { "key": "numero", "label": "Número" }
        ]}
    ]"#;

    #[test]
    fn resolves_dotted_paths_to_labels() {
        let catalog = VariableCatalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.label_for("entidade.nome"), Some("Nome"));
        assert_eq!(catalog.label_for("processo.numero"), Some("Número"));
        assert_eq!(catalog.label_for("entidade.morada"), None);
        assert_eq!(catalog.label_for("nome"), None);
    }

    #[test]
    fn enumerates_paths_in_catalog_order() {
        let catalog = VariableCatalog::from_json(CATALOG).unwrap();
        let paths: Vec<String> = catalog.entries().into_iter().map(|e| e.path).collect();
        assert_eq!(
            paths,
            vec!["entidade.nome", "entidade.nif", "processo.numero"]
        );
    }

    #[test]
    fn group_without_label_falls_back_to_key() {
        let catalog = VariableCatalog::from_json(CATALOG).unwrap();
        let entry = catalog
            .entries()
            .into_iter()
            .find(|e| e.path == "processo.numero")
            .unwrap();
        assert_eq!(entry.group_label, "processo");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(VariableCatalog::from_json("{ not json").is_err());
    }
}
