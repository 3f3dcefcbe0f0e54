// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Filesystem watcher for re-rendered page images.
//!
//! Uses the `notify` crate to watch a template's `pages/` directory. When an
//! import step rewrites page rasters, the affected pages are reported after
//! a 1-second quiet period so their cached images can be superseded.

use notify::{Event, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;
use xilem::core::MessageProxy;
use xilem::tokio;

use crate::model::template::page_index_from_path;

/// Message sent when page image files change on disk.
#[derive(Debug)]
pub struct PagesChanged(pub Vec<usize>);

/// Watch `pages_dir` and send `PagesChanged` messages via the Xilem proxy.
pub async fn watch_pages(proxy: MessageProxy<PagesChanged>, pages_dir: PathBuf) {
    let (tx, mut rx) = tokio::sync::mpsc::channel::<Event>(64);

    // The watcher lives on this stack frame, as long as the task runs
    let mut watcher = match notify::recommended_watcher(
        move |result: Result<Event, notify::Error>| {
            if let Ok(event) = result {
                use notify::EventKind::*;
                match event.kind {
                    Create(_) | Modify(_) | Remove(_) => {
                        let _ = tx.blocking_send(event);
                    }
                    _ => {}
                }
            }
        },
    ) {
        Ok(w) => w,
        Err(e) => {
            tracing::error!("Failed to create file watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&pages_dir, RecursiveMode::NonRecursive) {
        tracing::error!("Failed to watch {}: {}", pages_dir.display(), e);
        return;
    }
    tracing::info!("Watching page images: {}", pages_dir.display());

    loop {
        // Wait for the first event
        let Some(first) = rx.recv().await else {
            break;
        };

        let mut pages = BTreeSet::new();
        collect_pages(&first, &mut pages);

        // Debounce: wait until 1 second of quiet
        loop {
            match tokio::time::timeout(Duration::from_secs(1), rx.recv()).await {
                Ok(Some(event)) => collect_pages(&event, &mut pages),
                Ok(None) => return,
                Err(_) => break,
            }
        }

        if pages.is_empty() {
            continue;
        }

        tracing::info!("Page images changed on disk: {:?}", pages);

        if proxy
            .message(PagesChanged(pages.into_iter().collect()))
            .is_err()
        {
            break;
        }
    }
}

fn collect_pages(event: &Event, pages: &mut BTreeSet<usize>) {
    pages.extend(
        event
            .paths
            .iter()
            .filter_map(|path| page_index_from_path(path)),
    );
}
