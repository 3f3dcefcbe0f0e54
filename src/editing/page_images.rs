// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Page Image Provisioning.
//!
//! The editor never rasterizes documents itself. A [`PageImageProvider`]
//! hands back one bitmap per page sized to the page at the current scale,
//! and [`PageImageCache`] tracks which pages have an image, which are being
//! fetched, and which failed. Fetches run off the UI thread; the cache only
//! decides what to fetch and accepts or drops the results.

use std::path::PathBuf;

use image::imageops::FilterType;
use peniko::{Blob, ImageData, ImageFormat};
use thiserror::Error;

use super::scale::RenderScale;
use crate::model::PageDescriptor;
use crate::model::template::page_image_path;

/// Errors raised while provisioning a page raster
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("page {0} is outside the template")]
    PageOutOfRange(usize),
    #[error("no raster for page {page} at {}", path.display())]
    Missing { page: usize, path: PathBuf },
    #[error("rendering page {0} was interrupted")]
    Interrupted(usize),
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// A decoded page bitmap ready for Vello
#[derive(Debug, Clone)]
pub struct PageRaster {
    pub image: ImageData,
    pub width: u32,
    pub height: u32,
}

impl PageRaster {
    /// Wrap RGBA8 pixels
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        let image = ImageData {
            data: Blob::from(pixels),
            format: ImageFormat::Rgba8,
            alpha_type: peniko::ImageAlphaType::Alpha,
            width,
            height,
        };
        Self {
            image,
            width,
            height,
        }
    }
}

/// Supplies page rasters at a given scale
pub trait PageImageProvider: Send + Sync {
    fn render_page(
        &self,
        page: &PageDescriptor,
        scale: RenderScale,
    ) -> Result<PageRaster, RasterError>;
}

/// Reads the pre-rendered `pages/page-<index>.png` files of a template and
/// resamples them to the page's pixel size
#[derive(Debug, Clone)]
pub struct DirectoryRasterProvider {
    pages_dir: PathBuf,
}

impl DirectoryRasterProvider {
    pub fn new(pages_dir: impl Into<PathBuf>) -> Self {
        Self {
            pages_dir: pages_dir.into(),
        }
    }
}

impl PageImageProvider for DirectoryRasterProvider {
    fn render_page(
        &self,
        page: &PageDescriptor,
        scale: RenderScale,
    ) -> Result<PageRaster, RasterError> {
        let path = page_image_path(&self.pages_dir, page.index);
        if !path.exists() {
            return Err(RasterError::Missing {
                page: page.index,
                path,
            });
        }

        let img = image::open(&path).map_err(|source| RasterError::Decode {
            path: path.clone(),
            source,
        })?;

        let target = scale.size_to_pixels(page.size());
        let width = (target.width.round() as u32).max(1);
        let height = (target.height.round() as u32).max(1);
        let img = if img.width() == width && img.height() == height {
            img
        } else {
            img.resize_exact(width, height, FilterType::Triangle)
        };

        let rgba = img.to_rgba8();
        tracing::debug!(
            "Rendered page {} at {}x{} from {}",
            page.index,
            width,
            height,
            path.display()
        );
        Ok(PageRaster::from_rgba(width, height, rgba.into_raw()))
    }
}

// ============================================================================
// CACHE
// ============================================================================

/// Per-page raster state
#[derive(Debug, Clone, Default)]
pub enum RasterState {
    /// No image and no fetch in flight
    #[default]
    Missing,
    /// A fetch is in flight; only the matching ticket may complete it.
    /// `stale` marks a page superseded mid-fetch: its result is dropped
    /// and the page fetched again once the fetch lands.
    Pending { ticket: u64, stale: bool },
    Ready(PageRaster),
    /// The last fetch failed; the page shows its placeholder until the
    /// image is superseded
    Failed,
}

/// A fetch the host should perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub page: usize,
    pub ticket: u64,
}

/// Page rasters for one open template
#[derive(Debug, Clone, Default)]
pub struct PageImageCache {
    states: Vec<RasterState>,
    next_ticket: u64,
}

impl PageImageCache {
    pub fn new(page_count: usize) -> Self {
        Self {
            states: vec![RasterState::Missing; page_count],
            next_ticket: 0,
        }
    }

    pub fn state(&self, page: usize) -> Option<&RasterState> {
        self.states.get(page)
    }

    /// The image for a page, if one is ready
    pub fn image(&self, page: usize) -> Option<&PageRaster> {
        match self.states.get(page) {
            Some(RasterState::Ready(raster)) => Some(raster),
            _ => None,
        }
    }

    /// Seed an image supplied up front; the page is never fetched
    pub fn preload(&mut self, page: usize, raster: PageRaster) -> Result<(), RasterError> {
        let state = self
            .states
            .get_mut(page)
            .ok_or(RasterError::PageOutOfRange(page))?;
        *state = RasterState::Ready(raster);
        Ok(())
    }

    /// Pages without an image or a fetch in flight, marked pending in the
    /// same step so no page is ever requested twice concurrently
    pub fn pages_to_fetch(&mut self) -> Vec<FetchRequest> {
        let mut requests = Vec::new();
        for (page, state) in self.states.iter_mut().enumerate() {
            if matches!(state, RasterState::Missing) {
                let ticket = self.next_ticket;
                self.next_ticket += 1;
                *state = RasterState::Pending {
                    ticket,
                    stale: false,
                };
                requests.push(FetchRequest { page, ticket });
            }
        }
        requests
    }

    /// Accept the result of a fetch.
    ///
    /// Returns `false` and drops the result when the page was superseded or
    /// cleared while the fetch was in flight. A superseded page goes back
    /// to `Missing` so the next `pages_to_fetch` asks for it again.
    pub fn complete(
        &mut self,
        request: FetchRequest,
        result: Result<PageRaster, RasterError>,
    ) -> bool {
        let Some(state) = self.states.get_mut(request.page) else {
            return false;
        };
        match state {
            RasterState::Pending { ticket, stale } if *ticket == request.ticket => {
                if *stale {
                    tracing::debug!("Dropping superseded raster for page {}", request.page);
                    *state = RasterState::Missing;
                    return false;
                }
            }
            _ => {
                tracing::debug!("Dropping stale raster for page {}", request.page);
                return false;
            }
        }
        *state = match result {
            Ok(raster) => RasterState::Ready(raster),
            Err(err) => {
                tracing::error!("Page {} image unavailable: {err}", request.page);
                RasterState::Failed
            }
        };
        true
    }

    /// Release a page's image so it is fetched again.
    ///
    /// A page with a fetch in flight keeps it; the fetch is marked stale
    /// and the page is requested again after it lands, so there is never
    /// more than one fetch per page.
    pub fn supersede(&mut self, page: usize) {
        let Some(state) = self.states.get_mut(page) else {
            return;
        };
        tracing::debug!("Superseding raster for page {page}");
        match state {
            RasterState::Pending { stale, .. } => *stale = true,
            _ => *state = RasterState::Missing,
        }
    }

    /// Release every image and forget in-flight fetches
    pub fn clear(&mut self) {
        for state in &mut self.states {
            *state = RasterState::Missing;
        }
    }

    pub fn ready_count(&self) -> usize {
        self.states
            .iter()
            .filter(|s| matches!(s, RasterState::Ready(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster(w: u32, h: u32) -> PageRaster {
        PageRaster::from_rgba(w, h, vec![255; (w * h * 4) as usize])
    }

    #[test]
    fn pending_pages_are_not_requested_twice() {
        let mut cache = PageImageCache::new(3);
        let first = cache.pages_to_fetch();
        assert_eq!(first.iter().map(|r| r.page).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(cache.pages_to_fetch().is_empty());
    }

    #[test]
    fn preloaded_pages_are_never_fetched() {
        let mut cache = PageImageCache::new(2);
        cache.preload(1, raster(2, 2)).unwrap();
        let pages: Vec<_> = cache.pages_to_fetch().into_iter().map(|r| r.page).collect();
        assert_eq!(pages, vec![0]);
        assert!(matches!(
            cache.preload(5, raster(1, 1)),
            Err(RasterError::PageOutOfRange(5))
        ));
    }

    #[test]
    fn failure_leaves_placeholder_without_touching_other_pages() {
        let mut cache = PageImageCache::new(2);
        let requests = cache.pages_to_fetch();
        assert!(cache.complete(
            requests[0],
            Err(RasterError::PageOutOfRange(0))
        ));
        assert!(cache.complete(requests[1], Ok(raster(4, 4))));

        assert!(matches!(cache.state(0), Some(RasterState::Failed)));
        assert!(cache.image(1).is_some());
        // Failed pages wait for supersession instead of refetching
        assert!(cache.pages_to_fetch().is_empty());
    }

    #[test]
    fn superseded_fetch_result_is_dropped() {
        let mut cache = PageImageCache::new(1);
        let stale = cache.pages_to_fetch()[0];
        cache.supersede(0);

        assert!(!cache.complete(stale, Ok(raster(1, 1))));
        assert!(matches!(cache.state(0), Some(RasterState::Missing)));

        let fresh = cache.pages_to_fetch()[0];
        assert_ne!(fresh.ticket, stale.ticket);
        assert!(cache.complete(fresh, Ok(raster(1, 1))));
        assert_eq!(cache.ready_count(), 1);
    }

    #[test]
    fn superseding_a_page_in_flight_does_not_fetch_it_twice() {
        let mut cache = PageImageCache::new(2);
        let first = cache.pages_to_fetch();
        cache.supersede(0);
        cache.supersede(0);

        assert!(cache.pages_to_fetch().is_empty());
        assert!(matches!(
            cache.state(0),
            Some(RasterState::Pending { stale: true, .. })
        ));

        // Only after the outstanding fetch lands is the page requested again
        assert!(!cache.complete(first[0], Err(RasterError::PageOutOfRange(0))));
        let again = cache.pages_to_fetch();
        assert_eq!(again.len(), 1);
        assert_eq!(again[0].page, 0);
    }

    #[test]
    fn superseding_a_ready_page_refetches_it() {
        let mut cache = PageImageCache::new(1);
        cache.preload(0, raster(1, 1)).unwrap();
        cache.supersede(0);
        assert_eq!(cache.pages_to_fetch().len(), 1);
    }

    #[test]
    fn clear_releases_images_and_in_flight_fetches() {
        let mut cache = PageImageCache::new(2);
        cache.preload(0, raster(1, 1)).unwrap();
        let in_flight = cache.pages_to_fetch()[0];
        cache.clear();

        assert_eq!(cache.ready_count(), 0);
        assert!(!cache.complete(in_flight, Ok(raster(1, 1))));
    }

    #[test]
    fn directory_provider_resamples_to_page_pixels() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbaImage::new(10, 20)
            .save(page_image_path(dir.path(), 0))
            .unwrap();

        let provider = DirectoryRasterProvider::new(dir.path());
        let page = PageDescriptor::new(0, 30.0, 40.0);
        let raster = provider.render_page(&page, RenderScale::new(2.0)).unwrap();
        assert_eq!((raster.width, raster.height), (60, 80));
        assert_eq!(raster.image.data.data().len(), 60 * 80 * 4);
    }

    #[test]
    fn directory_provider_reports_missing_pages() {
        let dir = tempfile::tempdir().unwrap();
        let provider = DirectoryRasterProvider::new(dir.path());
        let page = PageDescriptor::new(3, 30.0, 40.0);
        assert!(matches!(
            provider.render_page(&page, RenderScale::new(1.0)),
            Err(RasterError::Missing { page: 3, .. })
        ));
    }
}
