// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Central application state (`AppState`) that drives the Xilem reactive UI.
//!
//! `AppState` is the parent editor: it owns the open template, the
//! authoritative field list (inside the edit session snapshot), the page
//! raster cache and window metadata. Components report changes through
//! callbacks and never keep a divergent copy of the field list. Sub-modules
//! split the methods by domain: file I/O, editor updates and page images.

mod editor;
mod file_io;
mod pages;

use std::sync::Arc;

use xilem::WindowId;

use crate::editing::{EditSession, PageImageCache, PageImageProvider, VariableDragPayload};
use crate::model::Template;
use crate::page_fetcher::FetchQueue;

/// Main application state
pub struct AppState {
    /// The open template, if any
    pub template: Option<Template>,

    /// Editing session for the open template (field list + selection)
    pub session: Option<Arc<EditSession>>,

    /// Rasters for the open template's pages
    pub images: Arc<PageImageCache>,

    /// Where page rasters come from for the open template
    pub provider: Option<Arc<dyn PageImageProvider>>,

    /// Palette variable waiting to be dropped onto a page
    pub armed_variable: Option<VariableDragPayload>,

    /// Error message to display, if any
    pub error_message: Option<String>,

    /// When the fields were last saved (formatted time string for UI)
    pub last_saved: Option<String>,

    /// Whether the app should keep running
    pub running: bool,

    /// Main window ID (stable across rebuilds to prevent window
    /// recreation)
    pub main_window_id: WindowId,

    /// Page fetch jobs for the background task
    pub fetch_queue: FetchQueue,

    /// Bumped whenever a template is opened or closed so late raster
    /// results for an earlier template are dropped
    pub template_generation: u64,
}

impl AppState {
    /// Create a new empty application state
    pub fn new() -> Self {
        Self {
            template: None,
            session: None,
            images: Arc::new(PageImageCache::default()),
            provider: None,
            armed_variable: None,
            error_message: None,
            last_saved: None,
            running: true,
            main_window_id: WindowId::next(),
            fetch_queue: FetchQueue::new(),
            template_generation: 0,
        }
    }

    /// Check if a template is open
    pub fn has_template_loaded(&self) -> bool {
        self.template.is_some() && self.session.is_some()
    }
}

/// Implement the Xilem AppState trait
impl xilem::AppState for AppState {
    fn keep_running(&self) -> bool {
        self.running
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
