// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Page raster bookkeeping for AppState

use super::AppState;
use crate::editing::RasterState;
use crate::file_watcher::PagesChanged;
use crate::page_fetcher::{PageFetchJob, PageRasterLoaded};
use std::sync::Arc;

impl AppState {
    /// Queue a fetch for every page that has no image and no fetch in
    /// flight
    pub fn request_page_images(&mut self) {
        let (Some(template), Some(provider)) = (&self.template, &self.provider) else {
            return;
        };
        let scale = template.config.scale();

        for request in Arc::make_mut(&mut self.images).pages_to_fetch() {
            let Some(page) = template.pages.get(request.page).copied() else {
                continue;
            };
            let job = PageFetchJob {
                generation: self.template_generation,
                request,
                page,
                scale,
                provider: Arc::clone(provider),
            };
            if !self.fetch_queue.push(job) {
                tracing::error!("Page fetch task is not running; page {} stays blank", request.page);
            }
        }
    }

    /// Store a rendered page (or its failure)
    pub fn page_raster_loaded(&mut self, loaded: PageRasterLoaded) {
        if loaded.generation != self.template_generation {
            tracing::debug!(
                "Dropping raster for page {} of a closed template",
                loaded.request.page
            );
            return;
        }
        let page = loaded.request.page;
        let images = Arc::make_mut(&mut self.images);
        if !images.complete(loaded.request, loaded.result)
            && matches!(images.state(page), Some(RasterState::Missing))
        {
            // Superseded while in flight
            self.request_page_images();
        }
    }

    /// Page images changed on disk: release them and fetch again
    pub fn pages_changed(&mut self, changed: PagesChanged) {
        let images = Arc::make_mut(&mut self.images);
        for page in changed.0 {
            images.supersede(page);
        }
        self.request_page_images();
    }
}
