// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! On-disk template directory.
//!
//! A template is a directory holding a TOML manifest with the page list and
//! editor settings, the placed fields as JSON, the variable catalog as JSON,
//! and the pre-rendered page rasters produced by the import step:
//!
//! ```text
//! <template>/
//!   template.toml
//!   fields.json
//!   variables.json
//!   pages/page-<index>.png
//! ```
//!
//! The editor core never touches the disk; `AppState` loads a template here
//! and writes the replacement field list back through [`save_fields`].

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::catalog::VariableCatalog;
use super::field::Field;
use super::page::PageDescriptor;
use crate::settings::EditorConfig;

const MANIFEST_FILE: &str = "template.toml";
const FIELDS_FILE: &str = "fields.json";
const VARIABLES_FILE: &str = "variables.json";
const PAGES_DIR: &str = "pages";

/// `template.toml` contents
#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    editor: EditorConfig,
    #[serde(default)]
    pages: Vec<PageDescriptor>,
}

/// A loaded template directory
#[derive(Debug, Clone)]
pub struct Template {
    pub path: PathBuf,
    pub name: Option<String>,
    pub config: EditorConfig,
    pub pages: Vec<PageDescriptor>,
    pub fields: Vec<Field>,
    /// Fields on pages past the end of the template. They are not edited
    /// but are written back on save so no stored field is lost.
    pub detached_fields: Vec<Field>,
    pub catalog: VariableCatalog,
}

impl Template {
    /// Load a template from its directory
    pub fn load(path: &Path) -> Result<Self> {
        let manifest_path = path.join(MANIFEST_FILE);
        let manifest_src = std::fs::read_to_string(&manifest_path)
            .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
        let manifest: Manifest = toml::from_str(&manifest_src)
            .with_context(|| format!("Failed to parse {}", manifest_path.display()))?;

        if manifest.pages.is_empty() {
            anyhow::bail!("Template {} declares no pages", path.display());
        }

        // Page indices are positional; whatever the manifest says is ignored
        let pages = manifest
            .pages
            .iter()
            .enumerate()
            .map(|(index, page)| PageDescriptor::new(index, page.width, page.height))
            .collect::<Vec<_>>();

        let (fields, detached_fields) =
            split_fields_off_template(load_fields(&path.join(FIELDS_FILE))?, pages.len());
        let catalog = load_catalog(&path.join(VARIABLES_FILE))?;

        Ok(Self {
            path: path.to_path_buf(),
            name: manifest.name,
            config: manifest.editor,
            pages,
            fields,
            detached_fields,
            catalog,
        })
    }

    /// Full list to persist: the edited fields followed by the detached ones
    pub fn fields_to_save(&self, edited: &[Field]) -> Vec<Field> {
        edited
            .iter()
            .chain(&self.detached_fields)
            .cloned()
            .collect()
    }

    /// Name shown in the UI: the manifest name, else the directory name
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "Untitled".to_string())
        })
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.path.join(PAGES_DIR)
    }
}

/// Path of the pre-rendered raster for a page
pub fn page_image_path(pages_dir: &Path, index: usize) -> PathBuf {
    pages_dir.join(format!("page-{index}.png"))
}

/// Page index encoded in a raster file name (`page-<index>.png`)
pub fn page_index_from_path(path: &Path) -> Option<usize> {
    let stem = path.file_stem()?.to_str()?;
    stem.strip_prefix("page-")?.parse().ok()
}

/// Write the full field list to the template's `fields.json`
pub fn save_fields(template_path: &Path, fields: &[Field]) -> Result<()> {
    let fields_path = template_path.join(FIELDS_FILE);
    let json = serde_json::to_string_pretty(fields).context("Failed to serialize fields")?;
    std::fs::write(&fields_path, json)
        .with_context(|| format!("Failed to write {}", fields_path.display()))?;
    Ok(())
}

fn load_fields(path: &Path) -> Result<Vec<Field>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&src).with_context(|| format!("Failed to parse {}", path.display()))
}

fn load_catalog(path: &Path) -> Result<VariableCatalog> {
    if !path.exists() {
        return Ok(VariableCatalog::default());
    }
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    VariableCatalog::from_json(&src).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Split loaded fields into those on the template's pages (geometry
/// clamped) and those past its last page (kept as stored)
fn split_fields_off_template(fields: Vec<Field>, page_count: usize) -> (Vec<Field>, Vec<Field>) {
    let (on_template, detached): (Vec<Field>, Vec<Field>) = fields
        .into_iter()
        .partition(|field| field.page < page_count);

    for field in &detached {
        tracing::warn!(
            "Field {} is on page {} but the template has {} pages; keeping it unedited",
            field.id,
            field.page,
            page_count
        );
    }

    let on_template = on_template
        .into_iter()
        .map(|mut field| {
            field.geometry = field.geometry.clamped();
            field
        })
        .collect();
    (on_template, detached)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::{Binding, FieldGeometry};

    const MANIFEST: &str = r#"
name = "Contrato"

[editor]
render_dpi = 144

[[pages]]
width = 595
height = 842

[[pages]]
index = 7
width = 842
height = 595
"#;

    fn write_template(dir: &Path, fields_json: Option<&str>) {
        std::fs::write(dir.join(MANIFEST_FILE), MANIFEST).unwrap();
        if let Some(json) = fields_json {
            std::fs::write(dir.join(FIELDS_FILE), json).unwrap();
        }
    }

    #[test]
    fn loads_manifest_with_positional_page_indices() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), None);

        let template = Template::load(dir.path()).unwrap();
        assert_eq!(template.display_name(), "Contrato");
        assert_eq!(template.config.render_dpi, 144.0);
        assert_eq!(template.pages.len(), 2);
        assert_eq!(template.pages[1].index, 1);
        assert_eq!(template.pages[1].width, 842.0);
        assert!(template.fields.is_empty());
        assert!(template.catalog.is_empty());
    }

    #[test]
    fn missing_manifest_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Template::load(dir.path()).is_err());
    }

    #[test]
    fn manifest_without_pages_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "name = \"x\"\n").unwrap();
        assert!(Template::load(dir.path()).is_err());
    }

    #[test]
    fn save_then_load_keeps_fields() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), None);

        let field = Field::new(
            1,
            FieldGeometry::new(46.0, 40.0, 100.0, 16.0),
            Binding::Text("Hello".into()),
        );
        save_fields(dir.path(), std::slice::from_ref(&field)).unwrap();

        let template = Template::load(dir.path()).unwrap();
        assert_eq!(template.fields, vec![field]);
    }

    #[test]
    fn fields_on_missing_pages_are_detached_and_geometry_clamped() {
        let dir = tempfile::tempdir().unwrap();
        write_template(
            dir.path(),
            Some(
                r#"[
                {"id":"a","page":0,"x":-5,"y":3,"width":10,"height":20,"variable":"","custom_text":""},
                {"id":"b","page":5,"x":0,"y":0,"width":100,"height":16,"variable":"","custom_text":""}
            ]"#,
            ),
        );

        let template = Template::load(dir.path()).unwrap();
        assert_eq!(template.fields.len(), 1);
        assert_eq!(
            template.fields[0].geometry,
            FieldGeometry::new(0.0, 3.0, 30.0, 20.0)
        );
        assert_eq!(template.detached_fields.len(), 1);
        assert_eq!(template.detached_fields[0].page, 5);
    }

    #[test]
    fn detached_fields_survive_load_and_save() {
        let dir = tempfile::tempdir().unwrap();
        write_template(
            dir.path(),
            Some(
                r#"[
                {"id":"keep","page":0,"x":0,"y":0,"width":100,"height":16,"variable":"","custom_text":""},
                {"id":"away","page":3,"x":0,"y":0,"width":100,"height":16,"variable":"","custom_text":""}
            ]"#,
            ),
        );

        let template = Template::load(dir.path()).unwrap();
        save_fields(dir.path(), &template.fields_to_save(&template.fields)).unwrap();

        let reloaded = Template::load(dir.path()).unwrap();
        let ids = |fields: &[Field]| -> Vec<String> {
            fields.iter().map(|f| f.id.to_string()).collect()
        };
        assert_eq!(ids(&reloaded.fields), vec!["keep"]);
        assert_eq!(ids(&reloaded.detached_fields), vec!["away"]);
    }

    #[test]
    fn page_index_round_trips_through_file_name() {
        let path = page_image_path(Path::new("/t/pages"), 12);
        assert_eq!(path, PathBuf::from("/t/pages/page-12.png"));
        assert_eq!(page_index_from_path(&path), Some(12));
        assert_eq!(page_index_from_path(Path::new("/t/pages/cover.png")), None);
    }
}
