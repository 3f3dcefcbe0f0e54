// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! File I/O operations for AppState (open, load, save, close)

use super::AppState;
use crate::editing::{DirectoryRasterProvider, EditSession, PageImageCache};
use crate::model::Template;
use crate::model::template::save_fields;
use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;

impl AppState {
    /// Open a folder dialog to select a template directory
    pub fn open_template_dialog(&mut self) {
        self.error_message = None;

        let path = rfd::FileDialog::new()
            .set_title("Open Template")
            .pick_folder();

        if let Some(path) = path {
            self.load_template(path);
        }
    }

    /// Load a template directory and start fetching its page images
    pub fn load_template(&mut self, path: PathBuf) {
        match Template::load(&path) {
            Ok(template) => {
                tracing::info!(
                    "Loaded template: {} ({} pages, {} fields)",
                    template.display_name(),
                    template.pages.len(),
                    template.fields.len()
                );
                self.release_template();

                self.provider = Some(Arc::new(DirectoryRasterProvider::new(
                    template.pages_dir(),
                )));
                self.images = Arc::new(PageImageCache::new(template.pages.len()));
                self.session = Some(Arc::new(EditSession::new(&template)));
                self.template = Some(template);
                self.error_message = None;
                self.request_page_images();
            }
            Err(e) => {
                let error = format!("Failed to load template: {:#}", e);
                tracing::error!("{}", error);
                self.error_message = Some(error);
            }
        }
    }

    /// Close the open template and return to the welcome screen
    pub fn close_template(&mut self) {
        if let Some(template) = &self.template {
            tracing::info!("Closing template: {}", template.display_name());
        }
        self.release_template();
        self.error_message = None;
    }

    /// Drop everything tied to the open template
    fn release_template(&mut self) {
        Arc::make_mut(&mut self.images).clear();
        self.images = Arc::new(PageImageCache::default());
        self.template_generation += 1;
        self.template = None;
        self.session = None;
        self.provider = None;
        self.armed_variable = None;
        self.last_saved = None;
    }

    /// Get the current template display name
    pub fn template_display_name(&self) -> Option<String> {
        self.template.as_ref().map(Template::display_name)
    }

    /// Save the current field list to the template's `fields.json`
    pub fn save_template(&mut self) {
        let (Some(template), Some(session)) = (&self.template, &self.session) else {
            self.error_message = Some("No template to save".to_string());
            return;
        };

        let fields = template.fields_to_save(session.store.as_slice());
        match save_fields(&template.path, &fields) {
            Ok(()) => {
                tracing::info!(
                    "Saved {} fields: {}",
                    session.store.len(),
                    template.path.display()
                );
                self.error_message = None;
                self.last_saved = Some(Local::now().format("%I:%M %p").to_string());
            }
            Err(e) => {
                let error = format!("Failed to save: {:#}", e);
                tracing::error!("{}", error);
                self.error_message = Some(error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::RasterState;
    use std::fs;

    fn write_template(dir: &std::path::Path) {
        fs::write(
            dir.join("template.toml"),
            "name = \"Invoice\"\n\n[[pages]]\nwidth = 200.0\nheight = 100.0\n",
        )
        .unwrap();
        fs::write(
            dir.join("fields.json"),
            r##"[{"id":"f1","page":0,"x":10,"y":10,"width":100,"height":16,
                "variable":"client.name","custom_text":"","font_size":10,
                "font_family":"Helvetica","color":"#000000","alignment":"left"}]"##,
        )
        .unwrap();
    }

    #[test]
    fn loading_a_template_queues_every_page() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path());

        let mut state = AppState::new();
        state.load_template(dir.path().to_path_buf());

        assert!(state.has_template_loaded());
        assert_eq!(state.template_display_name().as_deref(), Some("Invoice"));
        assert_eq!(state.session.as_ref().unwrap().store.len(), 1);
        assert!(matches!(
            state.images.state(0),
            Some(RasterState::Pending { .. })
        ));
    }

    #[test]
    fn failed_load_reports_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let mut state = AppState::new();
        state.load_template(dir.path().to_path_buf());

        assert!(!state.has_template_loaded());
        assert!(state.error_message.is_some());
    }

    #[test]
    fn save_writes_the_session_field_list() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path());

        let mut state = AppState::new();
        state.load_template(dir.path().to_path_buf());
        {
            let session = Arc::make_mut(state.session.as_mut().unwrap());
            let id = session.store.as_slice()[0].id.clone();
            session.selected = Some(id);
        }
        state.apply_property(crate::editing::PropertyEdit::Delete);
        state.save_template();

        assert!(state.last_saved.is_some());
        let saved = fs::read_to_string(dir.path().join("fields.json")).unwrap();
        assert_eq!(saved.trim(), "[]");
    }

    #[test]
    fn save_keeps_fields_past_the_last_page() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path());
        fs::write(
            dir.path().join("fields.json"),
            r#"[{"id":"f1","page":0,"x":10,"y":10,"width":100,"height":16,"variable":"","custom_text":"A"},
                {"id":"f9","page":4,"x":10,"y":10,"width":100,"height":16,"variable":"","custom_text":"B"}]"#,
        )
        .unwrap();

        let mut state = AppState::new();
        state.load_template(dir.path().to_path_buf());
        assert_eq!(state.session.as_ref().unwrap().store.len(), 1);
        state.save_template();

        let saved = fs::read_to_string(dir.path().join("fields.json")).unwrap();
        assert!(saved.contains("\"f1\""));
        assert!(saved.contains("\"f9\""));
    }

    #[test]
    fn closing_releases_the_template() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path());

        let mut state = AppState::new();
        state.load_template(dir.path().to_path_buf());
        let generation = state.template_generation;
        state.close_template();

        assert!(!state.has_template_loaded());
        assert!(state.images.state(0).is_none());
        assert!(state.template_generation > generation);
    }
}
