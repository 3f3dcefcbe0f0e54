// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Background page raster fetching.
//!
//! `AppState` queues one job per page the cache wants; a single task drains
//! the queue, renders each page on tokio's blocking pool and sends the
//! result back as a `PageRasterLoaded` message. The UI thread never waits
//! on a decode.

use std::sync::{Arc, Mutex};

use xilem::core::MessageProxy;
use xilem::tokio;
use xilem::tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::editing::{FetchRequest, PageImageProvider, PageRaster, RasterError, RenderScale};
use crate::model::PageDescriptor;

/// One page to render
pub struct PageFetchJob {
    /// Template generation the request belongs to
    pub generation: u64,
    pub request: FetchRequest,
    pub page: PageDescriptor,
    pub scale: RenderScale,
    pub provider: Arc<dyn PageImageProvider>,
}

/// Message sent when a page raster has been rendered (or failed)
#[derive(Debug)]
pub struct PageRasterLoaded {
    pub generation: u64,
    pub request: FetchRequest,
    pub result: Result<PageRaster, RasterError>,
}

/// Sending half kept by `AppState`, receiving half handed to the task once
pub struct FetchQueue {
    sender: UnboundedSender<PageFetchJob>,
    receiver: Arc<Mutex<Option<UnboundedReceiver<PageFetchJob>>>>,
}

impl FetchQueue {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded_channel();
        Self {
            sender,
            receiver: Arc::new(Mutex::new(Some(receiver))),
        }
    }

    /// Queue a job; returns `false` if the fetch task is gone
    pub fn push(&self, job: PageFetchJob) -> bool {
        self.sender.send(job).is_ok()
    }

    /// Receiver slot for the fetch task
    pub fn receiver(&self) -> Arc<Mutex<Option<UnboundedReceiver<PageFetchJob>>>> {
        Arc::clone(&self.receiver)
    }
}

impl Default for FetchQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Drain the job queue until the app shuts down.
pub async fn run(
    proxy: MessageProxy<PageRasterLoaded>,
    receiver: Arc<Mutex<Option<UnboundedReceiver<PageFetchJob>>>>,
) {
    let Some(mut rx) = receiver.lock().ok().and_then(|mut slot| slot.take()) else {
        tracing::warn!("Page fetch task started twice; ignoring");
        return;
    };

    while let Some(job) = rx.recv().await {
        let PageFetchJob {
            generation,
            request,
            page,
            scale,
            provider,
        } = job;
        tracing::debug!("Fetching page {} (ticket {})", request.page, request.ticket);

        let result = match tokio::task::spawn_blocking(move || provider.render_page(&page, scale))
            .await
        {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Page {} render task failed: {}", request.page, e);
                Err(RasterError::Interrupted(request.page))
            }
        };

        let loaded = PageRasterLoaded {
            generation,
            request,
            result,
        };
        if proxy.message(loaded).is_err() {
            break;
        }
    }
}
